//! # Storage Implementation for the Rust SDK
//!
//! This module provides a durable session-cache substrate for the Rust SDK using the sled database.

use std::path::Path;
use chatcache_core::{LocalStorage, StorageError, StorageResult};

/// A storage implementation using the sled database.
#[derive(Debug)]
pub struct SledStorage {
    db: sled::Db,
}

impl SledStorage {
    /// Creates a new SledStorage instance with the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the database directory
    ///
    /// # Returns
    ///
    /// * `StorageResult<Self>` - The new SledStorage instance, or an error if creation fails
    pub fn new<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let db = sled::open(path).map_err(|e| {
            StorageError::StorageUnavailable(format!("Failed to open sled database: {}", e))
        })?;
        Ok(Self { db })
    }
}

impl LocalStorage for SledStorage {
    fn get_item(&self, key: &str) -> StorageResult<String> {
        let value = self.db
            .get(key.as_bytes())
            .map_err(|e| {
                StorageError::OperationFailed(format!("Failed to get value: {}", e))
            })?
            .ok_or_else(|| StorageError::KeyNotFound(key.to_string()))?;

        String::from_utf8(value.to_vec()).map_err(|e| {
            StorageError::SerializationError(format!("Stored value is not UTF-8: {}", e))
        })
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| {
                StorageError::OperationFailed(format!("Failed to put value: {}", e))
            })?;
        self.db.flush().map_err(|e| {
            StorageError::OperationFailed(format!("Failed to flush database: {}", e))
        })?;
        log::trace!("Flushed {} bytes under {}", value.len(), key);
        Ok(())
    }
}
