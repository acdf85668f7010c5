//! HTTP probing of monitored endpoints

use crate::errors::{MonitorError, Result};
use crate::targets::Target;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, warn};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; StatusChecker/1.0)";

/// How a single probe resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered with this HTTP status code
    Responded(u16),
    /// Network error, timeout or abort
    Failed,
}

/// Outcome of one probe plus the wall-clock time it took to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    pub outcome: ProbeOutcome,
    pub elapsed: Duration,
}

/// Issues one request against a target.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, target: &Target) -> ProbeResult;
}

/// Probe that issues a plain GET against the target endpoint
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(probe_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(probe_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(MonitorError::Http)?;

        Ok(Self {
            client,
            timeout: probe_timeout,
        })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, target: &Target) -> ProbeResult {
        let start_time = Instant::now();

        debug!("Probing {} at {}", target.name, target.endpoint);

        let outcome = match timeout(self.timeout, self.client.get(&target.endpoint).send()).await {
            Ok(Ok(response)) => ProbeOutcome::Responded(response.status().as_u16()),
            Ok(Err(e)) => {
                warn!("Error checking {}: {}", target.name, e);
                ProbeOutcome::Failed
            }
            Err(_) => {
                warn!(
                    "Error checking {}: no response within {}ms",
                    target.name,
                    self.timeout.as_millis()
                );
                ProbeOutcome::Failed
            }
        };

        ProbeResult {
            outcome,
            elapsed: start_time.elapsed(),
        }
    }
}
