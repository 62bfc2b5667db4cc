#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::LoginKey;
use crate::id::IdGenerator;
use crate::StoreError;

use super::user::{UserDraft, UserPatch, UserRecord, UserRepository};
use super::{Entity, Patch};

#[derive(Default)]
struct MockUsers {
    users: Vec<UserRecord>,
    by_login_key: HashMap<String, usize>,
}

/// In-memory [`UserRepository`] with a hash index on the login key.
///
/// Nothing is persisted. Useful for testing actions without a backing store.
#[derive(Clone)]
pub struct MockUserRepository {
    state: Arc<Mutex<MockUsers>>,
    ids: Arc<IdGenerator>,
    login_key: LoginKey,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::with_login_key(LoginKey::UserId)
    }

    pub fn with_login_key(login_key: LoginKey) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockUsers::default())),
            ids: Arc::new(IdGenerator::new()),
            login_key,
        }
    }

    /// Inserts a record as-is, bypassing the uniqueness check.
    pub fn push(&self, user: UserRecord) {
        let mut state = self.state.lock().unwrap();
        let index = state.users.len();
        state
            .by_login_key
            .insert(user.login_key(self.login_key).to_owned(), index);
        state.users.push(user);
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    fn login_key(&self) -> LoginKey {
        self.login_key
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_login_key(&self, login_key: &str) -> Result<Option<UserRecord>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .by_login_key
            .get(login_key)
            .map(|&index| state.users[index].clone()))
    }

    async fn create_user(&self, draft: UserDraft) -> Result<UserRecord, StoreError> {
        let user = UserRecord::from_draft(self.ids.next_id(), draft)?;
        let key = user.login_key(self.login_key).to_owned();

        let mut state = self.state.lock().unwrap();
        if state.by_login_key.contains_key(&key) {
            return Err(StoreError::DuplicateUser);
        }
        let index = state.users.len();
        state.by_login_key.insert(key, index);
        state.users.push(user.clone());
        drop(state);

        Ok(user)
    }

    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<UserRecord, StoreError> {
        let mut state = self.state.lock().unwrap();
        let index = state
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;

        let old_key = state.users[index].login_key(self.login_key).to_owned();
        let mut updated = state.users[index].clone();
        patch.apply(&mut updated);
        updated.validate()?;
        let new_key = updated.login_key(self.login_key).to_owned();

        if new_key != old_key {
            if state.by_login_key.contains_key(&new_key) {
                return Err(StoreError::DuplicateUser);
            }
            state.by_login_key.remove(&old_key);
            state.by_login_key.insert(new_key, index);
        }

        state.users[index] = updated.clone();
        Ok(updated)
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StoreError> {
        let mut state = self.state.lock().unwrap();
        let Some(index) = state.users.iter().position(|u| u.id == id) else {
            return Ok(false);
        };
        state.users.remove(index);

        // positions after the removed user shifted down
        let login_key = self.login_key;
        let rebuilt = state
            .users
            .iter()
            .enumerate()
            .map(|(i, u)| (u.login_key(login_key).to_owned(), i))
            .collect();
        state.by_login_key = rebuilt;
        Ok(true)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.state.lock().unwrap().users.clone())
    }
}
