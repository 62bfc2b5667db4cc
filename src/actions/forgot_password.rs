use chrono::Utc;

use crate::events::{dispatch, StoreEvent};
use crate::{StoreError, UserRepository};

/// Looks up whether a login key is registered.
///
/// Nothing is sent and nothing is written; a real reset flow would hook into
/// the `PasswordResetRequested` event.
pub struct ForgotPasswordAction<U: UserRepository> {
    users: U,
}

impl<U: UserRepository> ForgotPasswordAction<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "forgot_password", skip_all, err)
    )]
    pub async fn execute(&self, login_key: &str) -> Result<bool, StoreError> {
        let found = self.users.find_user_by_login_key(login_key).await?.is_some();

        dispatch(StoreEvent::PasswordResetRequested {
            login_key: login_key.to_owned(),
            found,
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "roster_store",
            "msg=\"password reset requested\", found={found}"
        );

        Ok(found)
    }
}
