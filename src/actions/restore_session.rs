use chrono::Utc;

use crate::events::{dispatch, StoreEvent};
use crate::session::{CurrentUserSlot, Session, SessionState};
use crate::{StoreError, UserRepository};

pub struct RestoreSessionAction<U: UserRepository> {
    users: U,
    slot: CurrentUserSlot,
    revalidate: bool,
}

impl<U: UserRepository> RestoreSessionAction<U> {
    /// With `revalidate`, a slot whose user is no longer registered is cleared
    /// instead of restored.
    pub fn new(users: U, slot: CurrentUserSlot, revalidate: bool) -> Self {
        Self {
            users,
            slot,
            revalidate,
        }
    }

    /// Reads the current user slot.
    ///
    /// An unreadable slot is cleared and yields `Anonymous`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "restore_session", skip_all, err)
    )]
    pub async fn execute(&self) -> Result<SessionState, StoreError> {
        let user = match self.slot.load() {
            Ok(Some(user)) => user,
            Ok(None) => return Ok(SessionState::Anonymous),
            Err(StoreError::CorruptData { reason, .. }) => {
                log::warn!(
                    target: "roster_store",
                    "msg=\"current user slot unreadable, clearing\", error=\"{reason}\""
                );
                self.slot.clear()?;
                return Ok(SessionState::Anonymous);
            }
            Err(e) => return Err(e),
        };

        if self.revalidate && self.users.find_user_by_id(&user.id).await?.is_none() {
            log::info!(
                target: "roster_store",
                "msg=\"stale session dropped\", user_id=\"{}\"",
                user.id
            );
            self.slot.clear()?;
            return Ok(SessionState::Anonymous);
        }

        dispatch(StoreEvent::SessionRestored {
            user_id: user.id.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(SessionState::Authenticated(Session::new(user)))
    }
}
