//! Configuration management for the uptime monitor

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Records older than this are pruned from the store.
pub const RETENTION: Duration = Duration::from_secs(24 * 60 * 60);

/// Upper bound on a single probe, from request issue to resolution.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Successful probes slower than this are classified as degraded.
pub const DEGRADED_THRESHOLD: Duration = Duration::from_millis(2000);

/// Maximum number of points in a sparkline series.
pub const SPARKLINE_POINTS: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the read API listens on
    pub bind_address: String,

    /// Time between two health-check rounds
    pub poll_interval: Duration,

    /// Sliding retention window of the time-series store
    pub retention: Duration,

    /// Per-probe deadline
    pub probe_timeout: Duration,

    /// Latency above which a reachable target is degraded
    pub degraded_threshold: Duration,

    /// Cardinality of sparkline series
    pub sparkline_points: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            poll_interval: Duration::from_secs(30),
            retention: RETENTION,
            probe_timeout: PROBE_TIMEOUT,
            degraded_threshold: DEGRADED_THRESHOLD,
            sparkline_points: SPARKLINE_POINTS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(bind_address) = env::var("BIND_ADDRESS") {
            config.bind_address = bind_address;
        }

        if let Ok(interval) = env::var("POLL_INTERVAL_SECONDS") {
            if let Ok(seconds) = interval.parse::<u64>() {
                config.poll_interval = Duration::from_secs(seconds);
            }
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.bind_address.is_empty() {
            return Err("bind_address cannot be empty".to_string());
        }

        if self.poll_interval.is_zero() {
            return Err("poll_interval must be greater than 0".to_string());
        }

        if self.retention.is_zero() {
            return Err("retention must be greater than 0".to_string());
        }

        if self.probe_timeout.is_zero() {
            return Err("probe_timeout must be greater than 0".to_string());
        }

        if self.sparkline_points == 0 {
            return Err("sparkline_points must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.retention, Duration::from_secs(86_400));
        assert_eq!(config.probe_timeout, Duration::from_millis(5000));
        assert_eq!(config.degraded_threshold, Duration::from_millis(2000));
        assert_eq!(config.sparkline_points, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let config = Config {
            poll_interval: Duration::ZERO,
            ..Config::default()
        };

        assert_eq!(
            config.validate().unwrap_err(),
            "poll_interval must be greater than 0"
        );
    }

    #[test]
    fn test_empty_bind_address_is_rejected() {
        let config = Config {
            bind_address: String::new(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }
}
