use chrono::{DateTime, Utc};

use crate::cache::SessionSummary;

/// Lifecycle phase of a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePhase {
    Uninitialized,
    Refreshing,
    /// Steady state. Also reached after a failed refresh, in which case `CacheView::error` is set.
    Ready,
}

/// What consumers see of the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheView {
    pub sessions: Vec<SessionSummary>,
    pub phase: CachePhase,
    /// True only while the refresh started by activation is outstanding.
    pub is_loading: bool,
    /// Last refresh failure, cleared by the next successful refresh.
    pub error: Option<String>,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl Default for CacheView {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            phase: CachePhase::Uninitialized,
            is_loading: false,
            error: None,
            last_refreshed_at: None,
        }
    }
}

impl CacheView {
    pub fn is_degraded(&self) -> bool {
        self.phase == CachePhase::Ready && self.error.is_some()
    }
}
