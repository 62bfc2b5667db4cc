use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use super::simulate_latency;
use crate::crypto::{PasswordHasher, SecretString};
use crate::events::{dispatch, StoreEvent};
use crate::session::{CurrentUserSlot, Registration, Session};
use crate::validators::validate_registration;
use crate::{StoreError, UserDraft, UserRepository};

pub struct RegisterAction<U: UserRepository> {
    users: U,
    slot: CurrentUserSlot,
    hasher: Arc<dyn PasswordHasher>,
    latency: Duration,
}

impl<U: UserRepository> RegisterAction<U> {
    pub fn new(
        users: U,
        slot: CurrentUserSlot,
        hasher: Arc<dyn PasswordHasher>,
        latency: Duration,
    ) -> Self {
        Self {
            users,
            slot,
            hasher,
            latency,
        }
    }

    /// Creates a team leader and logs them in.
    ///
    /// # Returns
    ///
    /// - `Ok(Session)` - user created and persisted as the current user
    /// - `Err(StoreError::Validation(_))` - the first field rule that failed
    /// - `Err(StoreError::DuplicateUser)` - the login key is taken
    /// - `Err(StoreError::StorageUnavailable(_))` - the user could not be
    ///   saved or logged in. A created user is removed again, so the same
    ///   registration can be retried.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "register", skip_all, err)
    )]
    pub async fn execute(&self, registration: Registration) -> Result<Session, StoreError> {
        simulate_latency(self.latency).await;

        validate_registration(&registration)?;

        let password = self.hasher.hash(registration.password.expose_secret())?;
        let draft = UserDraft {
            name: registration.name,
            user_id: registration.user_id,
            password: SecretString::new(password),
            phone: registration.phone,
            email: registration.email,
            organization: registration.organization,
            role: registration.role,
            is_team_leader: true,
        };

        let user = self.users.create_user(draft).await?;
        let public = user.to_public();
        if let Err(err) = self.slot.save(&public) {
            log::warn!(
                target: "roster_store",
                "msg=\"login after registration failed, removing user\", user_id=\"{}\", error=\"{err}\"",
                public.id
            );
            if let Err(rollback) = self.users.delete_user(&user.id).await {
                log::error!(
                    target: "roster_store",
                    "msg=\"registration rollback failed\", user_id=\"{}\", error=\"{rollback}\"",
                    public.id
                );
            }
            return Err(err);
        }

        dispatch(StoreEvent::UserRegistered {
            user_id: public.id.clone(),
            login_key: user.login_key(self.users.login_key()).to_owned(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "roster_store",
            "msg=\"user registered\", user_id=\"{}\"",
            public.id
        );

        Ok(Session::new(public))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Argon2Hasher, PlaintextHasher};
    use crate::storage::{InMemoryStore, KeyValueStore};
    use crate::validators::ValidationError;
    use crate::MockUserRepository;

    fn action(users: MockUserRepository, backend: &InMemoryStore) -> RegisterAction<MockUserRepository> {
        RegisterAction::new(
            users,
            CurrentUserSlot::new(Arc::new(backend.clone())),
            Arc::new(PlaintextHasher),
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn test_register_creates_leader() {
        let users = MockUserRepository::new();
        let backend = InMemoryStore::new();

        let session = action(users.clone(), &backend)
            .execute(Registration::mock("alice1", "secret1"))
            .await
            .unwrap();

        assert!(session.user.is_team_leader);
        assert_eq!(users.len(), 1);
        assert!(backend.get("user").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_user() {
        let users = MockUserRepository::new();
        let backend = InMemoryStore::new();
        let register = action(users.clone(), &backend);

        register.execute(Registration::mock("alice1", "secret1")).await.unwrap();
        let result = register.execute(Registration::mock("alice1", "other12")).await;

        assert_eq!(result.unwrap_err(), StoreError::DuplicateUser);
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_registration_creates_nothing() {
        let users = MockUserRepository::new();
        let backend = InMemoryStore::new();

        let result = action(users.clone(), &backend)
            .execute(Registration::mock("alice1", "123"))
            .await;

        assert_eq!(
            result.unwrap_err(),
            StoreError::Validation(ValidationError::PasswordTooShort)
        );
        assert!(users.is_empty());
        assert!(backend.get("user").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_login_removes_user() {
        let users = MockUserRepository::new();
        let backend = InMemoryStore::disabled();

        let result = action(users.clone(), &backend)
            .execute(Registration::mock("alice1", "secret1"))
            .await;

        assert!(matches!(result, Err(StoreError::StorageUnavailable(_))));
        assert!(users.is_empty());
        assert!(users.find_user_by_login_key("alice1").await.unwrap().is_none());

        let session = action(users.clone(), &InMemoryStore::new())
            .execute(Registration::mock("alice1", "secret1"))
            .await
            .unwrap();
        assert_eq!(session.user.user_id, "alice1");
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_argon2_scheme_stores_hash() {
        let users = MockUserRepository::new();
        let backend = InMemoryStore::new();
        let register = RegisterAction::new(
            users.clone(),
            CurrentUserSlot::new(Arc::new(backend)),
            Arc::new(Argon2Hasher::default()),
            Duration::ZERO,
        );

        register.execute(Registration::mock("alice1", "secret1")).await.unwrap();

        let stored = users.find_user_by_login_key("alice1").await.unwrap().unwrap();
        assert_ne!(stored.password.expose_secret(), "secret1");
        assert!(stored.password.expose_secret().starts_with("$argon2"));
    }
}
