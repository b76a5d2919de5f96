//! # Chatcache Core SDK
//!
//! This crate keeps a user's chat-session list available for instant rendering:
//! a persisted, TTL-bounded snapshot per user, refreshed from the chat backend
//! and patched locally when sessions are created or deleted.

mod storage;
mod api;
mod cache;
mod clock;
mod config;

pub use api::{ApiClient, DefaultSender, Error, HttpSender, RemoteSession, SessionsApi};
pub use cache::{CacheKey, CachePhase, CacheSnapshot, CacheView, SessionCacheStore, SessionSummary, to_summaries};
#[cfg(feature = "async")]
pub use cache::SessionCacheManager;
pub use clock::{Clock, SystemClock};
pub use config::{CacheConfig, DEFAULT_NAMESPACE, DEFAULT_TTL};
pub use storage::{LocalStorage, MemoryStorage, StorageError, StorageResult};
