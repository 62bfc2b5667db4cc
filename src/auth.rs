//! Session and credential operations.

use std::future::Future;
use std::sync::Arc;

use crate::actions::{
    ForgotPasswordAction, LoginAction, LogoutAction, RegisterAction, RestoreSessionAction,
};
use crate::config::AuthConfig;
use crate::crypto::{PasswordHasher, SecretString};
use crate::session::{CurrentUserSlot, Registration, Session, SessionState};
use crate::{StoreError, UserRepository};

/// Login, registration and session restore over a [`UserRepository`].
///
/// Holds no session itself; callers keep the [`Session`] values it returns.
///
/// Login and register run as spawned tasks: once called, they complete and
/// persist even if the caller drops the returned future. They must be called
/// from within a Tokio runtime.
#[derive(Clone)]
pub struct AuthManager<U: UserRepository + Clone + 'static> {
    users: U,
    slot: CurrentUserSlot,
    hasher: Arc<dyn PasswordHasher>,
    config: AuthConfig,
}

impl<U: UserRepository + Clone + 'static> AuthManager<U> {
    pub fn new(users: U, slot: CurrentUserSlot, config: AuthConfig) -> Self {
        let hasher = Arc::from(config.password_scheme.hasher());
        Self {
            users,
            slot,
            hasher,
            config,
        }
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// # Errors
    ///
    /// `InvalidCredentials` for an unknown login key or a wrong password.
    pub async fn login(&self, login_key: &str, password: &str) -> Result<Session, StoreError> {
        let action = LoginAction::new(
            self.users.clone(),
            self.slot.clone(),
            Arc::clone(&self.hasher),
            self.config.simulated_latency,
        );
        let login_key = login_key.to_owned();
        let password = SecretString::new(password);

        detach(async move { action.execute(&login_key, password.expose_secret()).await }).await
    }

    /// # Errors
    ///
    /// A validation error for the first invalid field, or `DuplicateUser`.
    pub async fn register(&self, registration: Registration) -> Result<Session, StoreError> {
        let action = RegisterAction::new(
            self.users.clone(),
            self.slot.clone(),
            Arc::clone(&self.hasher),
            self.config.simulated_latency,
        );

        detach(async move { action.execute(registration).await }).await
    }

    pub async fn logout(&self, state: SessionState) -> Result<SessionState, StoreError> {
        LogoutAction::new(self.slot.clone()).execute(state).await
    }

    /// Picks up the session persisted by the last login or register.
    pub async fn restore_session(&self) -> Result<SessionState, StoreError> {
        RestoreSessionAction::new(
            self.users.clone(),
            self.slot.clone(),
            self.config.revalidate_on_restore,
        )
        .execute()
        .await
    }

    /// Returns whether `login_key` belongs to a registered user.
    pub async fn forgot_password(&self, login_key: &str) -> Result<bool, StoreError> {
        ForgotPasswordAction::new(self.users.clone())
            .execute(login_key)
            .await
    }
}

/// Runs `task` to completion regardless of whether the caller keeps waiting.
async fn detach<T, F>(task: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, StoreError>> + Send + 'static,
{
    tokio::spawn(task)
        .await
        .map_err(|e| StoreError::Internal(format!("auth task failed: {e}")))?
}
