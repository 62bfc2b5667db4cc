//! In-memory backing store.
//!
//! Suitable for tests and for embedding where durability is handled elsewhere.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::StoreError;

use super::backend::KeyValueStore;

#[derive(Default)]
struct Inner {
    values: HashMap<String, String>,
    writes: HashMap<String, usize>,
}

impl Inner {
    fn stored_bytes(&self) -> usize {
        self.values.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

/// In-memory backing store.
///
/// Clones share the same data, so a store handed to [`Store::open`](crate::Store::open)
/// can be inspected or reopened by the test that created it.
///
/// A byte quota can be set to mimic browser storage limits: a write that would
/// push the total size of keys and values past the quota fails with
/// [`StoreError::StorageUnavailable`] and leaves the previous value in place.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
    quota: Option<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            quota: None,
        }
    }

    /// Creates a store that holds at most `bytes` bytes of keys and values.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::new()
        }
    }

    /// Creates a store that rejects every write, like disabled browser storage.
    pub fn disabled() -> Self {
        Self::with_quota(0)
    }

    /// Returns how many successful writes `key` has received.
    pub fn write_count(&self, key: &str) -> usize {
        self.inner
            .read()
            .map(|guard| guard.writes.get(key).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Returns the number of keys currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().map(|guard| guard.values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_owned()))?;

        Ok(inner.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_owned()))?;

        if let Some(quota) = self.quota {
            let current = inner
                .values
                .get(key)
                .map_or(0, |old| key.len() + old.len());
            let projected = inner.stored_bytes() - current + key.len() + value.len();
            if projected > quota {
                return Err(StoreError::StorageUnavailable(format!(
                    "quota of {quota} bytes exceeded writing {key}"
                )));
            }
        }

        inner.values.insert(key.to_owned(), value.to_owned());
        *inner.writes.entry(key.to_owned()).or_insert(0) += 1;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_owned()))?
            .values
            .remove(key);

        Ok(())
    }
}
