//! Persistence substrate abstractions.
//!
//! The cache never talks to a concrete store directly; it goes through
//! [`LocalStorage`], which mirrors the `getItem`/`setItem` surface of a
//! browser's web storage and can be backed by anything that stores strings.

use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

mod local_storage;
mod error;
mod memory_storage;

pub use local_storage::LocalStorage;
pub use error::StorageError;
pub use memory_storage::MemoryStorage;
