use chrono::{DateTime, Utc};

use crate::storage::StorageKey;

/// Events emitted by store operations.
///
/// Events are always fired. If no listeners are registered they are dropped.
/// Register listeners via
/// [`register_event_listeners`](crate::register_event_listeners).
#[derive(Debug, Clone)]
pub enum StoreEvent {
    // collections
    RecordAdded {
        key: StorageKey,
        id: String,
        at: DateTime<Utc>,
    },
    RecordUpdated {
        key: StorageKey,
        id: String,
        at: DateTime<Utc>,
    },
    RecordRemoved {
        key: StorageKey,
        id: String,
        at: DateTime<Utc>,
    },

    // auth
    UserRegistered {
        user_id: String,
        login_key: String,
        at: DateTime<Utc>,
    },
    LoginSuccess {
        user_id: String,
        login_key: String,
        at: DateTime<Utc>,
    },
    LoginFailed {
        login_key: String,
        reason: String,
        at: DateTime<Utc>,
    },
    LogoutSuccess {
        user_id: String,
        at: DateTime<Utc>,
    },
    SessionRestored {
        user_id: String,
        at: DateTime<Utc>,
    },
    PasswordResetRequested {
        login_key: String,
        found: bool,
        at: DateTime<Utc>,
    },

    // roster
    TeamMemberAdded {
        team_id: String,
        member_id: String,
        at: DateTime<Utc>,
    },
    TeamMemberRemoved {
        team_id: String,
        member_id: String,
        at: DateTime<Utc>,
    },

    // project
    ProjectDetailsSaved {
        team_name: String,
        at: DateTime<Utc>,
    },
    ProjectFilesChanged {
        count: usize,
        at: DateTime<Utc>,
    },
}

impl StoreEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RecordAdded { .. } => "record.added",
            Self::RecordUpdated { .. } => "record.updated",
            Self::RecordRemoved { .. } => "record.removed",
            Self::UserRegistered { .. } => "user.registered",
            Self::LoginSuccess { .. } => "auth.login.success",
            Self::LoginFailed { .. } => "auth.login.failed",
            Self::LogoutSuccess { .. } => "auth.logout.success",
            Self::SessionRestored { .. } => "auth.session.restored",
            Self::PasswordResetRequested { .. } => "auth.password.reset_requested",
            Self::TeamMemberAdded { .. } => "team.member.added",
            Self::TeamMemberRemoved { .. } => "team.member.removed",
            Self::ProjectDetailsSaved { .. } => "project.details.saved",
            Self::ProjectFilesChanged { .. } => "project.files.changed",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::RecordAdded { at, .. }
            | Self::RecordUpdated { at, .. }
            | Self::RecordRemoved { at, .. }
            | Self::UserRegistered { at, .. }
            | Self::LoginSuccess { at, .. }
            | Self::LoginFailed { at, .. }
            | Self::LogoutSuccess { at, .. }
            | Self::SessionRestored { at, .. }
            | Self::PasswordResetRequested { at, .. }
            | Self::TeamMemberAdded { at, .. }
            | Self::TeamMemberRemoved { at, .. }
            | Self::ProjectDetailsSaved { at, .. }
            | Self::ProjectFilesChanged { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();

        assert_eq!(
            StoreEvent::RecordAdded {
                key: StorageKey::Teams,
                id: "1".to_owned(),
                at: now
            }
            .name(),
            "record.added"
        );
        assert_eq!(
            StoreEvent::LoginFailed {
                login_key: "alice1".to_owned(),
                reason: "unknown user".to_owned(),
                at: now
            }
            .name(),
            "auth.login.failed"
        );
        assert_eq!(
            StoreEvent::TeamMemberRemoved {
                team_id: "1".to_owned(),
                member_id: "1-2".to_owned(),
                at: now
            }
            .name(),
            "team.member.removed"
        );
        assert_eq!(
            StoreEvent::ProjectFilesChanged { count: 2, at: now }.name(),
            "project.files.changed"
        );
    }

    #[test]
    fn test_event_timestamp() {
        let now = Utc::now();
        let event = StoreEvent::LogoutSuccess {
            user_id: "1".to_owned(),
            at: now,
        };

        assert_eq!(event.timestamp(), now);
    }

    #[test]
    fn test_event_debug() {
        let event = StoreEvent::LoginFailed {
            login_key: "alice1".to_owned(),
            reason: "wrong password".to_owned(),
            at: Utc::now(),
        };

        let debug_str = format!("{event:?}");
        assert!(debug_str.contains("LoginFailed"));
        assert!(debug_str.contains("alice1"));
    }
}
