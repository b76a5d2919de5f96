//! The session-list cache: persisted snapshots plus the manager that keeps
//! them fresh.

mod session;
mod key;
mod store;
mod transform;
mod state;
#[cfg(feature = "async")]
mod manager;

#[cfg(all(test, feature = "async"))]
mod mock_sessions_api;

pub use session::{SessionSummary, CacheSnapshot};
pub use key::CacheKey;
pub use store::SessionCacheStore;
pub use transform::to_summaries;
pub use state::{CachePhase, CacheView};
#[cfg(feature = "async")]
pub use manager::SessionCacheManager;
