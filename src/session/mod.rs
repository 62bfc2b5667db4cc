//! Session state and the durable current-user slot.
//!
//! A session is a plain value. Login and register hand one out, logout takes
//! it back, and the caller keeps it in between. The only durable trace is the
//! `user` key, holding the public view of the logged-in user so that
//! [`restore_session`](crate::AuthManager::restore_session) can pick it up
//! after a restart.

mod slot;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use slot::CurrentUserSlot;

use crate::crypto::SecretString;
use crate::repository::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self {
            user,
            started_at: Utc::now(),
        }
    }
}

/// Either nobody is logged in or exactly one leader is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(session) => Some(&session.user),
            Self::Anonymous => None,
        }
    }

    pub fn into_session(self) -> Option<Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Anonymous => None,
        }
    }
}

impl From<Session> for SessionState {
    fn from(session: Session) -> Self {
        Self::Authenticated(session)
    }
}

/// Sign-up form of a team leader. `password` is plaintext here.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub user_id: String,
    pub password: SecretString,
    pub phone: String,
    pub email: String,
    pub organization: String,
    pub role: String,
}

#[cfg(any(test, feature = "mocks"))]
impl Registration {
    pub fn mock(user_id: &str, password: &str) -> Self {
        Self {
            name: "Test Leader".to_owned(),
            user_id: user_id.to_owned(),
            password: SecretString::new(password),
            phone: "5550001111".to_owned(),
            email: format!("{user_id}@example.com"),
            organization: "Springfield High".to_owned(),
            role: "Coach".to_owned(),
        }
    }
}
