//! In-memory time-series store for check records

use crate::record::{CheckRecord, NewCheckRecord};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Source of "now" for timestamps and window cutoffs.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Append-only, age-pruned store of check records.
///
/// Records are kept in insertion order. Because timestamps are assigned here
/// and never decrease, insertion order is also timestamp order, so every
/// read returns records ascending without sorting and pruning only ever
/// touches the front of the queue.
pub struct TimeSeriesStore {
    records: Arc<RwLock<VecDeque<CheckRecord>>>,
    retention: TimeDelta,
    clock: Clock,
}

impl TimeSeriesStore {
    /// Create a store backed by the system clock
    pub fn new(retention: Duration) -> Self {
        Self::with_clock(retention, Arc::new(Utc::now))
    }

    /// Create a store that reads the time from `clock`
    pub fn with_clock(retention: Duration, clock: Clock) -> Self {
        Self {
            records: Arc::new(RwLock::new(VecDeque::new())),
            retention: TimeDelta::from_std(retention).unwrap_or(TimeDelta::hours(24)),
            clock,
        }
    }

    /// Stamp and append a record, then drop everything outside the retention window
    pub async fn append(&self, new: NewCheckRecord) -> CheckRecord {
        let mut records = self.records.write().await;
        let now = (self.clock)();

        let checked_at = match records.back() {
            Some(last) if last.checked_at > now => last.checked_at,
            _ => now,
        };

        let record = CheckRecord::stamp(new, checked_at);
        records.push_back(record.clone());

        let pruned = prune_before(&mut records, now - self.retention);
        debug!(
            "Stored {} check for {}, pruned {}, current size: {}",
            record.status,
            record.target,
            pruned,
            records.len()
        );

        record
    }

    /// Drop records older than the retention window, returning how many went
    pub async fn prune(&self) -> usize {
        let mut records = self.records.write().await;
        let now = (self.clock)();
        prune_before(&mut records, now - self.retention)
    }

    /// Most recent record of every target that has one
    pub async fn latest_per_target(&self) -> HashMap<String, CheckRecord> {
        let records = self.records.read().await;
        let cutoff = self.cutoff(None);

        let mut latest = HashMap::new();
        for record in records.iter().filter(|r| r.checked_at >= cutoff) {
            latest.insert(record.target.clone(), record.clone());
        }
        latest
    }

    /// Records of one target from the last `hours_ago` hours, oldest first
    pub async fn history(&self, target: &str, hours_ago: u32) -> Vec<CheckRecord> {
        let records = self.records.read().await;
        let cutoff = self.cutoff(Some(hours_ago));

        records
            .iter()
            .filter(|r| r.target == target && r.checked_at >= cutoff)
            .cloned()
            .collect()
    }

    /// Records of every target from the last `hours_ago` hours, oldest first
    pub async fn all_history(&self, hours_ago: u32) -> Vec<CheckRecord> {
        let records = self.records.read().await;
        let cutoff = self.cutoff(Some(hours_ago));

        records
            .iter()
            .filter(|r| r.checked_at >= cutoff)
            .cloned()
            .collect()
    }

    /// Percentage of online or degraded checks, rounded to one decimal.
    ///
    /// An empty window scores 0.0.
    pub async fn uptime(&self, target: &str, hours_ago: u32) -> f64 {
        let records = self.records.read().await;
        let cutoff = self.cutoff(Some(hours_ago));

        let (up, total) = records
            .iter()
            .filter(|r| r.target == target && r.checked_at >= cutoff)
            .fold((0usize, 0usize), |(up, total), r| {
                (up + usize::from(r.status.is_up()), total + 1)
            });

        uptime_percentage(up, total)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Oldest timestamp a read may return. Never reaches past the retention window.
    fn cutoff(&self, hours_ago: Option<u32>) -> DateTime<Utc> {
        let now = (self.clock)();
        let window = hours_ago
            .map(|h| TimeDelta::hours(i64::from(h)))
            .map_or(self.retention, |w| w.min(self.retention));
        now - window
    }
}

fn prune_before(records: &mut VecDeque<CheckRecord>, cutoff: DateTime<Utc>) -> usize {
    let mut pruned = 0;
    while records.front().is_some_and(|r| r.checked_at < cutoff) {
        records.pop_front();
        pruned += 1;
    }
    pruned
}

pub fn uptime_percentage(up: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (up as f64 / total as f64 * 1000.0).round() / 10.0
}
