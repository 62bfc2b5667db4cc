//! Client-side persistent entity store for team leaders.
//!
//! Everything lives in a flat key-value [`storage::KeyValueStore`] and is
//! accessed through typed, cached collections. Team leaders register and log
//! in through the [`auth::AuthManager`], keep rosters of 2 to 4 students per
//! team through the [`teams::TeamRoster`], and maintain teammates, document
//! metadata and project details alongside.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use roster_store::{Store, StoreConfig};
//! use roster_store::storage::InMemoryStore;
//!
//! let store = Store::open(Arc::new(InMemoryStore::new()), StoreConfig::development())?;
//! let session = store.auth().register(registration).await?;
//! let team = store.teams().create_team("Rockets", members).await?;
//! ```

pub mod actions;
pub mod auth;
pub mod config;
pub mod crypto;
pub mod events;
pub mod id;
pub mod outcome;
pub mod repository;
pub mod session;
pub mod storage;
pub mod store;
pub mod teams;
pub mod validators;

use std::fmt;

pub use auth::AuthManager;
pub use config::{AuthConfig, LoginKey, PasswordScheme, StoreConfig};
pub use crypto::SecretString;
pub use events::register_event_listeners;
pub use outcome::{ErrorKind, Failure, Outcome};
pub use repository::{
    Collection, Document, DocumentPatch, Entity, LocalUserRepository, NewDocument, NewTeammate,
    Patch, ProjectDetails, ProjectDetailsInput, ProjectRepository, Student, StudentInput, Team,
    TeamPatch, Teammate, TeammatePatch, User, UserDraft, UserPatch, UserRecord, UserRepository,
    WorkingStatus,
};
pub use session::{Registration, Session, SessionState};
pub use storage::{FileStore, InMemoryStore, KeyValueStore, StorageKey};
pub use store::Store;
pub use teams::TeamRoster;
pub use validators::ValidationError;

#[cfg(any(test, feature = "mocks"))]
pub use repository::MockUserRepository;

/// Every failure an operation of this crate can report.
///
/// All variants are expected, recoverable conditions. Callers map them to
/// user-facing text; `Display` here is meant for logs.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    Validation(ValidationError),
    NotFound,
    DuplicateUser,
    InvalidCredentials,
    MaxMembersReached,
    MinMembersRequired,
    StorageUnavailable(String),
    CorruptData { key: &'static str, reason: String },
    PasswordHashError,
    Internal(String),
}

impl StoreError {
    /// Stable machine-readable tag for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::ValidationError,
            Self::NotFound => ErrorKind::NotFound,
            Self::DuplicateUser => ErrorKind::DuplicateUser,
            Self::InvalidCredentials => ErrorKind::InvalidCredentials,
            Self::MaxMembersReached => ErrorKind::MaxMembersReached,
            Self::MinMembersRequired => ErrorKind::MinMembersRequired,
            Self::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            Self::CorruptData { .. } => ErrorKind::CorruptData,
            Self::PasswordHashError | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl std::error::Error for StoreError {}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "Validation failed: {err}"),
            Self::NotFound => write!(f, "Record not found"),
            Self::DuplicateUser => write!(f, "User already exists"),
            Self::InvalidCredentials => write!(f, "Invalid login or password"),
            Self::MaxMembersReached => write!(f, "Team already has the maximum number of members"),
            Self::MinMembersRequired => write!(f, "Team already has the minimum number of members"),
            Self::StorageUnavailable(msg) => write!(f, "Storage unavailable: {msg}"),
            Self::CorruptData { key, reason } => write!(f, "Corrupt data under key {key}: {reason}"),
            Self::PasswordHashError => write!(f, "Failed to hash password"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}
