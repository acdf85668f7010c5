//! Health-check rounds: probe every target, classify, record

use crate::config::Config;
use crate::probe::{Probe, ProbeOutcome, ProbeResult};
use crate::record::{CheckStatus, NewCheckRecord};
use crate::store::TimeSeriesStore;
use crate::targets::Target;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{info, instrument, warn};

/// Map a probe result to a status.
///
/// 403, 301 and 302 mean the server is up and merely blocking or
/// redirecting us; 404 means it answered with nothing at the probe path.
/// Latency is compared in whole milliseconds, the same value that is stored.
pub fn classify(result: ProbeResult, degraded_threshold: Duration) -> CheckStatus {
    let code = match result.outcome {
        ProbeOutcome::Responded(code) => code,
        ProbeOutcome::Failed => return CheckStatus::Down,
    };

    match code {
        200..=299 | 301 | 302 | 403 => {
            if result.elapsed.as_millis() > degraded_threshold.as_millis() {
                CheckStatus::Degraded
            } else {
                CheckStatus::Online
            }
        }
        500.. => CheckStatus::Down,
        404 => CheckStatus::Online,
        _ => CheckStatus::Degraded,
    }
}

/// Runs rounds of concurrent probes and writes one record per target.
pub struct HealthChecker {
    targets: Arc<Vec<Target>>,
    store: Arc<TimeSeriesStore>,
    probe: Arc<dyn Probe>,
    probe_timeout: Duration,
    degraded_threshold: Duration,
}

impl HealthChecker {
    pub fn new(
        config: &Config,
        targets: Arc<Vec<Target>>,
        store: Arc<TimeSeriesStore>,
        probe: Arc<dyn Probe>,
    ) -> Self {
        Self {
            targets,
            store,
            probe,
            probe_timeout: config.probe_timeout,
            degraded_threshold: config.degraded_threshold,
        }
    }

    /// Probe every target once and store the results.
    ///
    /// Completes after every probe has resolved; a failing or hanging target
    /// only ever produces its own down record.
    #[instrument(skip(self))]
    pub async fn run_round(&self) {
        info!("Checking all {} targets", self.targets.len());

        let checks = self.targets.iter().map(|target| self.check_target(target));
        let results = join_all(checks).await;

        let mut down = 0;
        for result in results {
            if result.status == CheckStatus::Down {
                down += 1;
            }
            self.store.append(result).await;
        }

        info!(
            "Checked {} targets, {} down",
            self.targets.len(),
            down
        );
    }

    async fn check_target(&self, target: &Target) -> NewCheckRecord {
        let start_time = Instant::now();

        let result = match timeout(self.probe_timeout, self.probe.probe(target)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "Probe of {} did not resolve within {}ms",
                    target.name,
                    self.probe_timeout.as_millis()
                );
                ProbeResult {
                    outcome: ProbeOutcome::Failed,
                    elapsed: start_time.elapsed(),
                }
            }
        };

        let status = classify(result, self.degraded_threshold);
        NewCheckRecord::new(
            &target.url,
            &target.name,
            status,
            result.elapsed.as_millis() as u64,
        )
    }
}
