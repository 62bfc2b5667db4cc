use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{set_if_some, Collection, Entity, Patch};
use crate::config::LoginKey;
use crate::crypto::SecretString;
use crate::storage::StorageKey;
use crate::validators::{validate_profile, Profile, ValidationError};
use crate::StoreError;

/// A registered leader as stored in the `users` collection.
///
/// `password` holds whatever the configured password scheme produced. Use
/// [`UserRecord::to_public`] for anything that leaves the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub user_id: String,
    pub password: SecretString,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_team_leader: bool,
}

impl UserRecord {
    /// Value of the field used as the login key.
    pub fn login_key(&self, key: LoginKey) -> &str {
        match key {
            LoginKey::UserId => &self.user_id,
            LoginKey::Email => &self.email,
        }
    }

    /// The user without the password field.
    pub fn to_public(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            user_id: self.user_id.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            organization: self.organization.clone(),
            role: self.role.clone(),
            is_team_leader: self.is_team_leader,
        }
    }
}

/// A leader as held by a session and persisted in the current user slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_team_leader: bool,
}

/// A user to be created. `password` is already in its stored form.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub name: String,
    pub user_id: String,
    pub password: SecretString,
    pub phone: String,
    pub email: String,
    pub organization: String,
    pub role: String,
    pub is_team_leader: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub user_id: Option<String>,
    pub password: Option<SecretString>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub role: Option<String>,
    pub is_team_leader: Option<bool>,
}

impl Patch<UserRecord> for UserPatch {
    fn apply(self, target: &mut UserRecord) {
        set_if_some(&mut target.name, self.name);
        set_if_some(&mut target.user_id, self.user_id);
        set_if_some(&mut target.password, self.password);
        set_if_some(&mut target.phone, self.phone);
        set_if_some(&mut target.email, self.email);
        set_if_some(&mut target.organization, self.organization);
        set_if_some(&mut target.role, self.role);
        set_if_some(&mut target.is_team_leader, self.is_team_leader);
    }
}

impl Entity for UserRecord {
    const KEY: StorageKey = StorageKey::Users;
    type Draft = UserDraft;
    type Patch = UserPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: UserDraft) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: draft.name,
            user_id: draft.user_id,
            password: draft.password,
            phone: draft.phone,
            email: draft.email,
            organization: draft.organization,
            role: draft.role,
            is_team_leader: draft.is_team_leader,
        })
    }

    /// The password is opaque here: it may already be a hash.
    fn validate(&self) -> Result<(), ValidationError> {
        validate_profile(&Profile {
            name: &self.name,
            user_id: &self.user_id,
            phone: &self.phone,
            email: &self.email,
            organization: &self.organization,
            role: &self.role,
        })
    }
}

#[cfg(any(test, feature = "mocks"))]
impl UserRecord {
    pub fn mock() -> Self {
        Self::mock_from_credentials("alice1", "secret1")
    }

    pub fn mock_from_credentials(user_id: &str, password: &str) -> Self {
        UserRecord {
            id: "1".to_owned(),
            name: "Test Leader".to_owned(),
            user_id: user_id.to_owned(),
            password: SecretString::new(password),
            phone: "5550001111".to_owned(),
            email: format!("{user_id}@example.com"),
            organization: "Springfield High".to_owned(),
            role: "Coach".to_owned(),
            is_team_leader: true,
        }
    }
}

#[cfg(any(test, feature = "mocks"))]
impl UserDraft {
    pub fn mock(user_id: &str, password: &str) -> Self {
        let record = UserRecord::mock_from_credentials(user_id, password);
        UserDraft {
            name: record.name,
            user_id: record.user_id,
            password: record.password,
            phone: record.phone,
            email: record.email,
            organization: record.organization,
            role: record.role,
            is_team_leader: record.is_team_leader,
        }
    }
}

/// Storage of registered users.
///
/// `create_user` enforces login-key uniqueness. Implementations may scan or
/// index; callers observe the same results either way.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Field that identifies users at login and must be unique.
    fn login_key(&self) -> LoginKey;

    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError>;
    async fn find_user_by_login_key(&self, login_key: &str) -> Result<Option<UserRecord>, StoreError>;

    /// # Errors
    ///
    /// Returns `DuplicateUser` if a user with the same login key exists.
    async fn create_user(&self, draft: UserDraft) -> Result<UserRecord, StoreError>;

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, `Validation` if the patched
    /// profile breaks a field rule, or `DuplicateUser` if the patch changes
    /// the login key to one already taken. The stored user is unchanged on
    /// any error.
    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<UserRecord, StoreError>;

    /// Removes a user. Registration uses this to undo a user it could not
    /// finish signing in. Returns whether a user was removed.
    async fn delete_user(&self, id: &str) -> Result<bool, StoreError>;

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;
}

/// [`UserRepository`] over the `users` collection of the backing store.
///
/// Lookups are linear scans, which is fine for a few hundred users.
#[derive(Clone)]
pub struct LocalUserRepository {
    users: Collection<UserRecord>,
    login_key: LoginKey,
}

impl LocalUserRepository {
    pub fn new(users: Collection<UserRecord>, login_key: LoginKey) -> Self {
        Self { users, login_key }
    }
}

#[async_trait]
impl UserRepository for LocalUserRepository {
    fn login_key(&self) -> LoginKey {
        self.login_key
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        self.users.find_by_id(id).await
    }

    async fn find_user_by_login_key(&self, login_key: &str) -> Result<Option<UserRecord>, StoreError> {
        let key = self.login_key;
        self.users.find(|u| u.login_key(key) == login_key).await
    }

    async fn create_user(&self, draft: UserDraft) -> Result<UserRecord, StoreError> {
        let key = self.login_key;
        // the check and the append share one write lock
        self.users.mutate(|users, ids| {
            let wanted = match key {
                LoginKey::UserId => draft.user_id.as_str(),
                LoginKey::Email => draft.email.as_str(),
            };
            if users.iter().any(|u| u.login_key(key) == wanted) {
                return Err(StoreError::DuplicateUser);
            }
            let user = UserRecord::from_draft(ids.next_id(), draft)?;
            users.push(user.clone());
            Ok(user)
        })
    }

    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<UserRecord, StoreError> {
        let key = self.login_key;
        self.users.mutate(|users, _| {
            let index = users
                .iter()
                .position(|u| u.id == id)
                .ok_or(StoreError::NotFound)?;

            let mut updated = users[index].clone();
            patch.apply(&mut updated);
            updated.validate()?;

            let taken = users
                .iter()
                .any(|u| u.id != id && u.login_key(key) == updated.login_key(key));
            if taken {
                return Err(StoreError::DuplicateUser);
            }

            users[index] = updated.clone();
            Ok(updated)
        })
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StoreError> {
        self.users.remove(id).await
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.users.list().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::id::IdGenerator;
    use crate::storage::InMemoryStore;

    fn repository(backend: &InMemoryStore, login_key: LoginKey) -> LocalUserRepository {
        let users = Collection::load(Arc::new(backend.clone()), Arc::new(IdGenerator::new())).unwrap();
        LocalUserRepository::new(users, login_key)
    }

    #[tokio::test]
    async fn test_create_and_find_by_login_key() {
        let backend = InMemoryStore::new();
        let repo = repository(&backend, LoginKey::UserId);

        let created = repo.create_user(UserDraft::mock("alice1", "secret1")).await.unwrap();
        let found = repo.find_user_by_login_key("alice1").await.unwrap().unwrap();

        assert_eq!(found, created);
        assert!(repo.find_user_by_login_key("bob22").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_login_key_rejected() {
        let backend = InMemoryStore::new();
        let repo = repository(&backend, LoginKey::UserId);

        repo.create_user(UserDraft::mock("alice1", "secret1")).await.unwrap();
        let result = repo.create_user(UserDraft::mock("alice1", "other12")).await;

        assert_eq!(result.unwrap_err(), StoreError::DuplicateUser);
        assert_eq!(repo.list_users().await.unwrap().len(), 1);
        assert_eq!(backend.write_count("users"), 1);
    }

    #[tokio::test]
    async fn test_email_login_key() {
        let backend = InMemoryStore::new();
        let repo = repository(&backend, LoginKey::Email);

        let mut first = UserDraft::mock("alice1", "secret1");
        first.email = "shared@example.com".to_owned();
        let mut second = UserDraft::mock("bob22", "secret2");
        second.email = "shared@example.com".to_owned();

        repo.create_user(first).await.unwrap();
        assert_eq!(
            repo.create_user(second).await.unwrap_err(),
            StoreError::DuplicateUser
        );
        assert!(repo
            .find_user_by_login_key("shared@example.com")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_update_cannot_steal_login_key() {
        let backend = InMemoryStore::new();
        let repo = repository(&backend, LoginKey::UserId);

        repo.create_user(UserDraft::mock("alice1", "secret1")).await.unwrap();
        let bob = repo.create_user(UserDraft::mock("bob22", "secret2")).await.unwrap();

        let patch = UserPatch {
            user_id: Some("alice1".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            repo.update_user(&bob.id, patch).await.unwrap_err(),
            StoreError::DuplicateUser
        );

        let patch = UserPatch {
            phone: Some("5559998888".to_owned()),
            ..Default::default()
        };
        let updated = repo.update_user(&bob.id, patch).await.unwrap();
        assert_eq!(updated.phone, "5559998888");
        assert_eq!(updated.user_id, "bob22");
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_profile() {
        let backend = InMemoryStore::new();
        let repo = repository(&backend, LoginKey::UserId);
        let bob = repo.create_user(UserDraft::mock("bob22", "secret2")).await.unwrap();

        let patch = UserPatch {
            email: Some("broken".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            repo.update_user(&bob.id, patch).await.unwrap_err(),
            StoreError::Validation(ValidationError::EmailInvalidFormat)
        );

        let patch = UserPatch {
            name: Some("   ".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            repo.update_user(&bob.id, patch).await.unwrap_err(),
            StoreError::Validation(ValidationError::NameEmpty)
        );

        let patch = UserPatch {
            user_id: Some("b".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            repo.update_user(&bob.id, patch).await.unwrap_err(),
            StoreError::Validation(ValidationError::UserIdTooShort)
        );

        let stored = repo.find_user_by_id(&bob.id).await.unwrap().unwrap();
        assert_eq!(stored, bob);
    }

    #[tokio::test]
    async fn test_login_key_stays_unique_across_writes() {
        let backend = InMemoryStore::new();
        let repo = repository(&backend, LoginKey::UserId);

        repo.create_user(UserDraft::mock("alice1", "secret1")).await.unwrap();
        let bob = repo.create_user(UserDraft::mock("bob22", "secret2")).await.unwrap();

        assert_eq!(
            repo.create_user(UserDraft::mock("alice1", "other12")).await.unwrap_err(),
            StoreError::DuplicateUser
        );
        let patch = UserPatch {
            user_id: Some("alice1".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            repo.update_user(&bob.id, patch).await.unwrap_err(),
            StoreError::DuplicateUser
        );

        let users = repo.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users.iter().filter(|u| u.user_id == "alice1").count(), 1);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let backend = InMemoryStore::new();
        let repo = repository(&backend, LoginKey::UserId);
        let alice = repo.create_user(UserDraft::mock("alice1", "secret1")).await.unwrap();

        assert!(repo.delete_user(&alice.id).await.unwrap());
        assert!(!repo.delete_user(&alice.id).await.unwrap());
        assert!(repo.find_user_by_login_key("alice1").await.unwrap().is_none());

        // the login key is free again
        repo.create_user(UserDraft::mock("alice1", "secret1")).await.unwrap();
    }

    #[test]
    fn test_public_user_has_no_password() {
        let user = UserRecord::mock();
        let json = serde_json::to_value(user.to_public()).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["userId"], "alice1");
        assert_eq!(json["isTeamLeader"], true);
    }

    #[test]
    fn test_record_wire_format() {
        let json = serde_json::to_value(UserRecord::mock()).unwrap();
        assert_eq!(json["password"], "secret1");
        assert_eq!(json["organization"], "Springfield High");
    }
}
