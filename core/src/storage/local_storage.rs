use std::fmt::Debug;
use crate::storage::StorageResult;

/// Trait defining the interface for the string-valued persistence substrate.
///
/// This trait provides the two operations the session cache needs:
/// - `get_item`: Retrieve a value by key
/// - `set_item`: Store a key-value pair, replacing any previous value
///
/// Implementations of this trait can use different storage backends depending on the environment
/// (browser web storage, an embedded database, plain memory).
pub trait LocalStorage: Send + Sync + Debug {
    /// Retrieves a value by key.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to retrieve
    ///
    /// # Returns
    ///
    /// * `StorageResult<String>` - The stored value, `StorageError::KeyNotFound` if the key has
    ///   never been written, or another error if retrieval fails
    fn get_item(&self, key: &str) -> StorageResult<String>;

    /// Stores a key-value pair.
    ///
    /// Implementations must make the value visible to a following `get_item` before returning.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to store
    /// * `value` - The value to store
    ///
    /// # Returns
    ///
    /// * `StorageResult<()>` - Success or an error if storage fails
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
}
