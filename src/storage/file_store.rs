//! File-based backing store.
//!
//! Stores each key as a JSON file in a directory.

use std::path::{Path, PathBuf};

use crate::StoreError;

use super::backend::KeyValueStore;

/// File-based backing store.
///
/// Each key is stored in a file named `{key}.json` in the configured directory.
/// Writes go to a temporary file first and are renamed into place, so a crash
/// mid-write leaves the previous value intact.
///
/// # Example
///
/// ```rust,ignore
/// use roster_store::storage::FileStore;
///
/// let store = FileStore::new("/var/lib/myapp/roster")?;
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Creates a new file store, creating the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = directory.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            StoreError::StorageUnavailable(format!("Failed to create storage directory: {e}"))
        })?;
        Ok(Self { directory: dir })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        // keys become file names, so only plain identifiers are allowed
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(StoreError::StorageUnavailable(format!(
                "Invalid storage key: {key:?}"
            )));
        }
        Ok(self.directory.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path).map(Some).map_err(|e| {
            StoreError::StorageUnavailable(format!("Failed to read {key}: {e}"))
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        let tmp = path.with_extension("json.tmp");

        std::fs::write(&tmp, value).map_err(|e| {
            StoreError::StorageUnavailable(format!("Failed to write {key}: {e}"))
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            StoreError::StorageUnavailable(format!("Failed to replace {key}: {e}"))
        })?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;

        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                StoreError::StorageUnavailable(format!("Failed to delete {key}: {e}"))
            })?;
        }

        Ok(())
    }
}
