//! Hourly rollups and sparkline resampling over stored history
//!
//! Both aggregations count only `Online` checks as up. That is stricter than
//! the headline uptime score, which also counts `Degraded`.

use crate::record::CheckRecord;
use crate::targets::{chart_key, Target};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Timelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// One hour of the trend chart, keyed by chart key.
///
/// A target with no checks in the hour has no entry; that is a gap, not 0%.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourlyPoint {
    pub time: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    online: usize,
    total: usize,
}

impl Tally {
    fn percentage(self) -> f64 {
        self.online as f64 / self.total as f64 * 100.0
    }
}

/// Group records by local calendar hour
pub fn hourly_history(records: &[CheckRecord]) -> Vec<HourlyPoint> {
    hourly_history_in(records, &Local)
}

/// Group records by calendar hour in `tz`, oldest hour first
pub fn hourly_history_in<Tz: TimeZone>(records: &[CheckRecord], tz: &Tz) -> Vec<HourlyPoint> {
    let mut hours: BTreeMap<DateTime<Utc>, BTreeMap<&str, Tally>> = BTreeMap::new();

    for record in records {
        let local = record.checked_at.with_timezone(tz);
        let hour_start = record.checked_at
            - TimeDelta::minutes(i64::from(local.minute()))
            - TimeDelta::seconds(i64::from(local.second()))
            - TimeDelta::nanoseconds(i64::from(local.nanosecond()));

        let tally = hours
            .entry(hour_start)
            .or_default()
            .entry(record.target.as_str())
            .or_default();
        tally.total += 1;
        if record.status.is_online() {
            tally.online += 1;
        }
    }

    hours
        .into_iter()
        .map(|(hour_start, targets)| HourlyPoint {
            time: format!("{}:00", hour_start.with_timezone(tz).hour()),
            values: targets
                .into_iter()
                .map(|(target, tally)| (chart_key(target), tally.percentage()))
                .collect(),
        })
        .collect()
}

/// Resample one target's history into at most `points` online percentages.
///
/// No history renders as a single fully-up point.
pub fn sparkline(history: &[CheckRecord], points: usize) -> Vec<f64> {
    if history.is_empty() {
        return vec![100.0];
    }

    let bucket_size = (history.len() / points.max(1)).max(1);

    history
        .chunks(bucket_size)
        .map(|chunk| {
            let online = chunk.iter().filter(|r| r.status.is_online()).count();
            online as f64 / chunk.len() as f64 * 100.0
        })
        .take(points)
        .collect()
}

/// Sparkline of every configured target, keyed by target identifier
pub fn sparklines(
    targets: &[Target],
    records: &[CheckRecord],
    points: usize,
) -> BTreeMap<String, Vec<f64>> {
    targets
        .iter()
        .map(|target| {
            let history: Vec<CheckRecord> = records
                .iter()
                .filter(|r| r.target == target.url)
                .cloned()
                .collect();
            (target.url.clone(), sparkline(&history, points))
        })
        .collect()
}
