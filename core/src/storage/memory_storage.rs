use super::*;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory substrate, optionally capped by a byte quota the way browser
/// web storage is.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    storage: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage that rejects writes once keys plus values would exceed `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            storage: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    fn used_bytes(storage: &HashMap<String, String>, skip_key: &str) -> usize {
        storage
            .iter()
            .filter(|(k, _)| k.as_str() != skip_key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<String> {
        let storage = self.storage.read().map_err(|e| {
            StorageError::OperationFailed(format!("Failed to acquire read lock: {}", e))
        })?;

        storage.get(key).cloned().ok_or_else(|| StorageError::KeyNotFound(key.to_string()))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut storage = self.storage.write().map_err(|e| {
            StorageError::OperationFailed(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(quota) = self.quota {
            let needed = Self::used_bytes(&storage, key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        storage.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_item_then_get_item_returns_value() {
        // Arrange
        let storage = MemoryStorage::new();

        // Act
        storage.set_item("key", "value").unwrap();

        // Assert
        assert_eq!(storage.get_item("key").unwrap(), "value");
    }

    #[test]
    fn get_item_with_missing_key_returns_key_not_found() {
        // Arrange
        let storage = MemoryStorage::new();

        // Act
        let result = storage.get_item("missing");

        // Assert
        match result {
            Err(StorageError::KeyNotFound(key)) => assert_eq!(key, "missing"),
            other => panic!("Expected KeyNotFound, got {:?}", other),
        }
    }

    #[test]
    fn set_item_over_quota_is_rejected_and_keeps_previous_value() {
        // Arrange
        let storage = MemoryStorage::with_quota(16);
        storage.set_item("k", "short").unwrap();

        // Act
        let result = storage.set_item("k", "this value is far too long");

        // Assert
        assert!(matches!(result, Err(StorageError::QuotaExceeded { quota: 16, .. })));
        assert_eq!(storage.get_item("k").unwrap(), "short");
    }

    #[test]
    fn set_item_replacing_value_does_not_count_old_value_against_quota() {
        // Arrange
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "123456789").unwrap();

        // Act
        let result = storage.set_item("k", "987654321");

        // Assert
        assert!(result.is_ok());
    }
}
