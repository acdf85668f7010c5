//! Uptime Monitor Library
//!
//! This library periodically probes a fixed set of HTTP endpoints, keeps a
//! rolling day of check results in memory and derives uptime percentages,
//! hourly history and sparklines from them.

pub mod aggregation;
pub mod api;
pub mod checker;
pub mod config;
pub mod errors;
pub mod probe;
pub mod record;
pub mod report;
pub mod scheduler;
pub mod state;
pub mod store;
pub mod targets;

pub use checker::{classify, HealthChecker};
pub use config::Config;
pub use errors::{MonitorError, Result};
pub use probe::{HttpProbe, Probe, ProbeOutcome, ProbeResult};
pub use record::{CheckRecord, CheckStatus, NewCheckRecord};
pub use scheduler::Scheduler;
pub use store::TimeSeriesStore;
pub use targets::{default_targets, Target};
