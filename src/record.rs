//! Check result data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Online,
    Degraded,
    Down,
}

impl CheckStatus {
    /// Reachable at all. Degraded still counts towards uptime.
    pub fn is_up(self) -> bool {
        matches!(self, CheckStatus::Online | CheckStatus::Degraded)
    }

    pub fn is_online(self) -> bool {
        self == CheckStatus::Online
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CheckStatus::Online => "online",
            CheckStatus::Degraded => "degraded",
            CheckStatus::Down => "down",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A probe outcome before the store has stamped it.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCheckRecord {
    pub target: String,
    pub target_name: String,
    pub status: CheckStatus,
    pub response_time_ms: u64,
}

impl NewCheckRecord {
    pub fn new(target: &str, target_name: &str, status: CheckStatus, response_time_ms: u64) -> Self {
        Self {
            target: target.to_string(),
            target_name: target_name.to_string(),
            status,
            response_time_ms,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CheckRecord {
    pub id: Uuid,
    pub target: String,
    pub target_name: String,
    pub status: CheckStatus,
    pub response_time_ms: u64,
    /// Never populated on write; uptime is derived from history on read.
    pub uptime: Option<f64>,
    pub checked_at: DateTime<Utc>,
}

impl CheckRecord {
    pub fn stamp(new: NewCheckRecord, checked_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            target: new.target,
            target_name: new.target_name,
            status: new.status,
            response_time_ms: new.response_time_ms,
            uptime: None,
            checked_at,
        }
    }
}
