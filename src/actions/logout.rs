use chrono::Utc;

use crate::events::{dispatch, StoreEvent};
use crate::session::{CurrentUserSlot, SessionState};
use crate::StoreError;

pub struct LogoutAction {
    slot: CurrentUserSlot,
}

impl LogoutAction {
    pub fn new(slot: CurrentUserSlot) -> Self {
        Self { slot }
    }

    /// Ends `state` and clears the current user slot. Users are untouched.
    ///
    /// Logging out an anonymous state still clears the slot.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "logout", skip_all, err)
    )]
    pub async fn execute(&self, state: SessionState) -> Result<SessionState, StoreError> {
        self.slot.clear()?;

        if let Some(user) = state.user() {
            dispatch(StoreEvent::LogoutSuccess {
                user_id: user.id.clone(),
                at: Utc::now(),
            })
            .await;
        }

        log::info!(
            target: "roster_store",
            "msg=\"logout success\""
        );

        Ok(SessionState::Anonymous)
    }
}
