//! Backing store trait.

use crate::StoreError;

/// Flat string-to-string durable storage.
///
/// Calls are synchronous and durable once they return. A write that cannot be
/// kept (quota exceeded, storage disabled, I/O failure) must return
/// [`StoreError::StorageUnavailable`] rather than succeed silently.
///
/// Implementations:
/// - [`InMemoryStore`](super::InMemoryStore): process-lifetime storage with an optional quota
/// - [`FileStore`](super::FileStore): one JSON file per key
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
