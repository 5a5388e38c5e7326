//! Key-value backend trait
//!
//! The durable string store the session is persisted into.

use crate::error::StorageError;

/// Durable string key/value store.
///
/// Implementations must make each individual `set`/`remove` visible to a
/// later `get` from a fresh instance over the same location.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
