//! Periodic driver of health-check rounds

use crate::checker::HealthChecker;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Starts a round immediately and then one per interval until stopped.
///
/// Rounds run as their own tasks: a slow round never delays the timer, and
/// stopping only cancels the timer, so a round already in flight finishes.
pub struct Scheduler {
    checker: Arc<HealthChecker>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new(checker: Arc<HealthChecker>) -> Self {
        Self {
            checker,
            timer: Mutex::new(None),
        }
    }

    /// Start monitoring. Does nothing if already running.
    pub fn start(&self, every: Duration) {
        let mut timer = self.timer();

        if timer.is_some() {
            info!("Monitoring already running");
            return;
        }

        if every.is_zero() {
            warn!("Refusing to start monitoring with a zero interval");
            return;
        }

        info!("Starting monitoring (every {}s)", every.as_secs());

        spawn_round(&self.checker);

        let checker = Arc::clone(&self.checker);
        *timer = Some(tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + every, every);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticks.tick().await;
                spawn_round(&checker);
            }
        }));
    }

    /// Stop scheduling new rounds. Safe to call when not running.
    pub fn stop(&self) {
        match self.timer().take() {
            Some(handle) => {
                handle.abort();
                info!("Monitoring stopped");
            }
            None => debug!("Monitoring not running, nothing to stop"),
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer().is_some()
    }

    fn timer(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.timer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.timer().take() {
            handle.abort();
        }
    }
}

fn spawn_round(checker: &Arc<HealthChecker>) {
    let checker = Arc::clone(checker);
    tokio::spawn(async move {
        checker.run_round().await;
    });
}
