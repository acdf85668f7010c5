//! Read models served to the dashboard

use crate::aggregation::{hourly_history, sparklines, HourlyPoint};
use crate::store::TimeSeriesStore;
use crate::targets::Target;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Uptime window of the status view, in hours.
pub const UPTIME_WINDOW_HOURS: u32 = 24;

/// Current state of one target
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub name: String,
    pub url: String,
    pub description: String,
    pub status: String,
    pub response_time: u64,
    pub uptime: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<DateTime<Utc>>,
}

impl ServiceStatus {
    fn unknown(target: &Target, uptime: f64) -> Self {
        Self {
            name: target.name.clone(),
            url: target.url.clone(),
            description: target.description.clone(),
            status: "unknown".to_string(),
            response_time: 0,
            uptime,
            last_checked: None,
        }
    }
}

/// Status of every target, in configuration order
pub async fn current_status(targets: &[Target], store: &TimeSeriesStore) -> Vec<ServiceStatus> {
    let latest = store.latest_per_target().await;
    let mut statuses = Vec::with_capacity(targets.len());

    for target in targets {
        let uptime = store.uptime(&target.url, UPTIME_WINDOW_HOURS).await;

        let status = match latest.get(&target.url) {
            Some(record) => ServiceStatus {
                status: record.status.to_string(),
                response_time: record.response_time_ms,
                last_checked: Some(record.checked_at),
                ..ServiceStatus::unknown(target, uptime)
            },
            None => ServiceStatus::unknown(target, uptime),
        };
        statuses.push(status);
    }

    statuses
}

/// Hourly chart series over the last `hours` hours
pub async fn hourly_report(store: &TimeSeriesStore, hours: u32) -> Vec<HourlyPoint> {
    hourly_history(&store.all_history(hours).await)
}

/// Sparkline of every target over the last day
pub async fn sparkline_report(
    targets: &[Target],
    store: &TimeSeriesStore,
    points: usize,
) -> BTreeMap<String, Vec<f64>> {
    let history = store.all_history(UPTIME_WINDOW_HOURS).await;
    sparklines(targets, &history, points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CheckStatus, NewCheckRecord};
    use std::time::Duration;

    fn targets() -> Vec<Target> {
        vec![
            Target::new("api.mojang.com", "api.mojang.com", "API", "https://api.mojang.com"),
            Target::new("minecraft.net", "minecraft.net", "Website", "https://minecraft.net"),
        ]
    }

    fn store() -> TimeSeriesStore {
        TimeSeriesStore::new(Duration::from_secs(24 * 3600))
    }

    #[tokio::test]
    async fn test_status_of_unchecked_target_is_unknown() {
        let store = store();
        let statuses = current_status(&targets(), &store).await;

        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].status, "unknown");
        assert_eq!(statuses[0].response_time, 0);
        assert_eq!(statuses[0].uptime, 0.0);
        assert!(statuses[0].last_checked.is_none());

        let json = serde_json::to_value(&statuses[0]).unwrap();
        assert!(json.get("lastChecked").is_none());
        assert_eq!(json["responseTime"], 0);
    }

    #[tokio::test]
    async fn test_status_reflects_latest_check_and_uptime() {
        let store = store();
        store
            .append(NewCheckRecord::new("minecraft.net", "minecraft.net", CheckStatus::Down, 5000))
            .await;
        let last = store
            .append(NewCheckRecord::new("minecraft.net", "minecraft.net", CheckStatus::Degraded, 2400))
            .await;

        let statuses = current_status(&targets(), &store).await;
        let site = &statuses[1];

        assert_eq!(site.name, "minecraft.net");
        assert_eq!(site.description, "Website");
        assert_eq!(site.status, "degraded");
        assert_eq!(site.response_time, 2400);
        assert_eq!(site.uptime, 50.0);
        assert_eq!(site.last_checked, Some(last.checked_at));
        assert_eq!(statuses[0].status, "unknown");
    }

    #[tokio::test]
    async fn test_sparkline_report_includes_unchecked_targets() {
        let store = store();
        store
            .append(NewCheckRecord::new("api.mojang.com", "api.mojang.com", CheckStatus::Online, 10))
            .await;

        let lines = sparkline_report(&targets(), &store, 20).await;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines["api.mojang.com"], vec![100.0]);
        assert_eq!(lines["minecraft.net"], vec![100.0]);
    }

    #[tokio::test]
    async fn test_hourly_report_single_bucket() {
        let store = store();
        store
            .append(NewCheckRecord::new("api.mojang.com", "api.mojang.com", CheckStatus::Online, 10))
            .await;

        let points = hourly_report(&store, 24).await;
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].values["api_mojang_com"], 100.0);
        assert!(points[0].time.ends_with(":00"));
    }
}
