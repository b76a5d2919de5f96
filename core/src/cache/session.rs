use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One entry of a user's session list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn new(session_id: impl Into<String>, display_name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            session_id: session_id.into(),
            display_name: display_name.into(),
            created_at,
        }
    }
}

/// The persisted unit: the whole list plus the instant it was last populated.
///
/// An empty `entries` list is a real, cached answer and is not the same as
/// having no snapshot at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSnapshot {
    pub entries: Vec<SessionSummary>,
    pub last_refreshed_at: DateTime<Utc>,
}

impl CacheSnapshot {
    pub fn new(entries: Vec<SessionSummary>, last_refreshed_at: DateTime<Utc>) -> Self {
        Self {
            entries,
            last_refreshed_at,
        }
    }

    /// `now - last_refreshed_at < ttl`. A stamp ahead of `now` counts as fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            return true;
        };
        now.signed_duration_since(self.last_refreshed_at) < ttl
    }
}
