use std::sync::Arc;

use crate::repository::User;
use crate::storage::{KeyValueStore, StorageKey};
use crate::StoreError;

/// The `user` key: the public view of whoever is logged in.
#[derive(Clone)]
pub struct CurrentUserSlot {
    backend: Arc<dyn KeyValueStore>,
}

impl CurrentUserSlot {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Reads the slot.
    ///
    /// # Errors
    ///
    /// Returns `CorruptData` if the slot holds something other than a user.
    pub fn load(&self) -> Result<Option<User>, StoreError> {
        let key = StorageKey::CurrentUser.as_str();
        match self.backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::CorruptData {
                    key,
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    pub fn save(&self, user: &User) -> Result<(), StoreError> {
        let json = serde_json::to_string(user)
            .map_err(|e| StoreError::Internal(format!("Failed to serialize user: {e}")))?;
        self.backend.set(StorageKey::CurrentUser.as_str(), &json)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove(StorageKey::CurrentUser.as_str())
    }
}
