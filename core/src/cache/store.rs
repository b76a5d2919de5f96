use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, warn};

use crate::cache::{CacheKey, CacheSnapshot};
use crate::config::{CacheConfig, DEFAULT_NAMESPACE};
use crate::storage::{LocalStorage, StorageError};

/// Persists one [`CacheSnapshot`] per user on top of a [`LocalStorage`].
///
/// Snapshots are stored as JSON under a namespaced [`CacheKey`]. Every written
/// snapshot is also kept in memory, so that when the substrate stops accepting
/// writes (quota exceeded, storage disabled) the store keeps working for the
/// rest of the process lifetime, just without durability. Snapshots already on
/// the substrate stay readable after that.
#[derive(Debug)]
pub struct SessionCacheStore {
    storage: Arc<dyn LocalStorage>,
    namespace: String,
    mirror: RwLock<HashMap<CacheKey, CacheSnapshot>>,
    degraded: AtomicBool,
}

impl SessionCacheStore {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE, storage)
    }

    pub fn from_config(storage: Arc<dyn LocalStorage>, config: &CacheConfig) -> Self {
        Self::with_namespace(&config.namespace, storage)
    }

    pub fn with_namespace(namespace: &str, storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            storage,
            namespace: namespace.to_string(),
            mirror: RwLock::new(HashMap::new()),
            degraded: AtomicBool::new(false),
        }
    }

    pub fn key_for(&self, user_id: &str) -> CacheKey {
        CacheKey::for_user(&self.namespace, user_id)
    }

    /// True once a write to the substrate has failed and writes went memory-only.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    /// Returns the user's snapshot, or `None` if there is none or it cannot be decoded.
    pub fn read(&self, user_id: &str) -> Option<CacheSnapshot> {
        let key = self.key_for(user_id);
        if self.is_degraded() {
            if let Some(snapshot) = self.mirrored(&key) {
                return Some(snapshot);
            }
        }

        match self.storage.get_item(key.as_str()) {
            Ok(raw) => match serde_json::from_str::<CacheSnapshot>(&raw) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!("Ignoring unreadable session snapshot at {}: {}", key, e);
                    None
                }
            },
            Err(StorageError::KeyNotFound(_)) => {
                debug!("No session snapshot at {}", key);
                None
            }
            Err(e) => {
                warn!("Failed to read session snapshot at {}: {}", key, e);
                self.mirrored(&key)
            }
        }
    }

    /// Replaces the user's snapshot. Never fails; substrate errors switch the store to memory-only.
    pub fn write(&self, user_id: &str, snapshot: &CacheSnapshot) {
        let key = self.key_for(user_id);
        self.mirror
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.clone(), snapshot.clone());

        if self.is_degraded() {
            return;
        }

        let result = serde_json::to_string(snapshot)
            .map_err(|e| StorageError::SerializationError(format!("Failed to serialize: {}", e)))
            .and_then(|json| self.storage.set_item(key.as_str(), &json));

        if let Err(e) = result {
            warn!("Session snapshot for {} kept in memory only: {}", key, e);
            self.degraded.store(true, Ordering::Release);
        }
    }

    fn mirrored(&self, key: &CacheKey) -> Option<CacheSnapshot> {
        self.mirror
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }
}
