use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use super::simulate_latency;
use crate::crypto::PasswordHasher;
use crate::events::{dispatch, StoreEvent};
use crate::session::{CurrentUserSlot, Session};
use crate::{StoreError, UserRepository};

pub struct LoginAction<U: UserRepository> {
    users: U,
    slot: CurrentUserSlot,
    hasher: Arc<dyn PasswordHasher>,
    latency: Duration,
}

impl<U: UserRepository> LoginAction<U> {
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

    /// Authenticates by login key and password and persists the user as the
    /// current user.
    ///
    /// # Returns
    ///
    /// - `Ok(Session)` - the password matched
    /// - `Err(StoreError::InvalidCredentials)` - unknown login key or wrong password
    /// - `Err(_)` - the current user slot could not be written
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "login", skip_all, err)
    )]
    pub async fn execute(&self, login_key: &str, password: &str) -> Result<Session, StoreError> {
        simulate_latency(self.latency).await;

        let Some(user) = self.users.find_user_by_login_key(login_key).await? else {
            self.fail(login_key, "unknown user").await;
            return Err(StoreError::InvalidCredentials);
        };

        let matches = self
            .hasher
            .verify(password, user.password.expose_secret())
            .unwrap_or_else(|e| {
                log::warn!(
                    target: "roster_store",
                    "msg=\"stored password unreadable\", user_id=\"{}\", error=\"{e}\"",
                    user.id
                );
                false
            });

        if !matches {
            self.fail(login_key, "wrong password").await;
            return Err(StoreError::InvalidCredentials);
        }

        let public = user.to_public();
        self.slot.save(&public)?;

        dispatch(StoreEvent::LoginSuccess {
            user_id: public.id.clone(),
            login_key: login_key.to_owned(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "roster_store",
            "msg=\"login success\", user_id=\"{}\"",
            public.id
        );

        Ok(Session::new(public))
    }

    async fn fail(&self, login_key: &str, reason: &str) {
        log::info!(
            target: "roster_store",
            "msg=\"login failed\", reason=\"{reason}\""
        );
        dispatch(StoreEvent::LoginFailed {
            login_key: login_key.to_owned(),
            reason: reason.to_owned(),
            at: Utc::now(),
        })
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Argon2Hasher, PlaintextHasher};
    use crate::storage::{InMemoryStore, KeyValueStore};
    use crate::{MockUserRepository, UserRecord};

    fn action(users: MockUserRepository, backend: &InMemoryStore) -> LoginAction<MockUserRepository> {
        LoginAction::new(
            users,
            CurrentUserSlot::new(Arc::new(backend.clone())),
            Arc::new(PlaintextHasher),
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn test_login_success_persists_public_user() {
        let users = MockUserRepository::new();
        users.push(UserRecord::mock());
        let backend = InMemoryStore::new();

        let session = action(users, &backend).execute("alice1", "secret1").await.unwrap();

        assert_eq!(session.user.user_id, "alice1");
        let stored = backend.get("user").unwrap().unwrap();
        assert!(stored.contains("alice1"));
        assert!(!stored.contains("secret1"));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user() {
        let users = MockUserRepository::new();
        users.push(UserRecord::mock());
        let backend = InMemoryStore::new();
        let login = action(users, &backend);

        assert_eq!(
            login.execute("alice1", "wrong").await.unwrap_err(),
            StoreError::InvalidCredentials
        );
        assert_eq!(
            login.execute("nobody", "secret1").await.unwrap_err(),
            StoreError::InvalidCredentials
        );
        assert!(backend.get("user").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_argon2_stored_password() {
        let hasher = Argon2Hasher::default();
        let hashed = hasher.hash("secret1").unwrap();
        let users = MockUserRepository::new();
        users.push(UserRecord::mock_from_credentials("alice1", &hashed));
        let backend = InMemoryStore::new();

        let login = LoginAction::new(
            users,
            CurrentUserSlot::new(Arc::new(backend)),
            Arc::new(hasher),
            Duration::ZERO,
        );

        assert!(login.execute("alice1", "secret1").await.is_ok());
        assert_eq!(
            login.execute("alice1", "secret2").await.unwrap_err(),
            StoreError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_unparsable_hash_is_a_mismatch() {
        let users = MockUserRepository::new();
        users.push(UserRecord::mock_from_credentials("alice1", "not-a-phc-string"));
        let backend = InMemoryStore::new();

        let login = LoginAction::new(
            users,
            CurrentUserSlot::new(Arc::new(backend)),
            Arc::new(Argon2Hasher::default()),
            Duration::ZERO,
        );

        assert_eq!(
            login.execute("alice1", "not-a-phc-string").await.unwrap_err(),
            StoreError::InvalidCredentials
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_configured_latency() {
        let users = MockUserRepository::new();
        users.push(UserRecord::mock());
        let backend = InMemoryStore::new();
        let login = LoginAction::new(
            users,
            CurrentUserSlot::new(Arc::new(backend)),
            Arc::new(PlaintextHasher),
            Duration::from_secs(1),
        );

        let started = tokio::time::Instant::now();
        login.execute("alice1", "secret1").await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}
