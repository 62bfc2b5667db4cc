//! Typed collections over the backing store.
//!
//! Every durable collection is a [`Collection`] of one [`Entity`] type. The
//! collection keeps an in-memory copy of all records, loaded once when the
//! store opens, and rewrites the whole collection under its key after every
//! mutation.
//!
//! # Entities
//!
//! | Type | Key | Created from |
//! |------|-----|--------------|
//! | [`UserRecord`] | `users` | [`UserDraft`] |
//! | [`Team`] | `teams` | [`NewTeam`] |
//! | [`Teammate`] | `teammates` | [`NewTeammate`] |
//! | [`Document`] | `documents` | [`NewDocument`] |
//!
//! Project details and project files are single values rather than
//! collections; see [`ProjectRepository`].
//!
//! # Mock Implementations
//!
//! Enable the `mocks` feature for [`MockUserRepository`], an in-memory
//! [`UserRepository`] with an indexed login-key lookup.

mod collection;
mod document;
mod project;
mod team;
mod teammate;
mod user;

#[cfg(any(test, feature = "mocks"))]
mod user_mock;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::StorageKey;
use crate::validators::ValidationError;

pub use collection::Collection;
pub use document::{Document, DocumentPatch, NewDocument};
pub use project::{ProjectDetails, ProjectDetailsInput, ProjectRepository, WorkingStatus};
pub use team::{NewTeam, Student, StudentInput, Team, TeamPatch};
pub use teammate::{NewTeammate, Teammate, TeammatePatch};
pub use user::{LocalUserRepository, User, UserDraft, UserPatch, UserRecord, UserRepository};

#[cfg(any(test, feature = "mocks"))]
pub use user_mock::MockUserRepository;

/// A record type stored as one element of a JSON array under [`Entity::KEY`].
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Backing-store key holding the collection.
    const KEY: StorageKey;

    /// The entity without its id, as supplied by callers.
    type Draft: Send;

    /// Partial update: only fields set to `Some` change.
    type Patch: Patch<Self> + Send;

    fn id(&self) -> &str;

    /// Builds the stored entity, validating and normalizing the draft.
    fn from_draft(id: String, draft: Self::Draft) -> Result<Self, ValidationError>;

    /// Checks an entity after a patch has been applied.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

pub trait Patch<T> {
    fn apply(self, target: &mut T);
}

/// Replaces `target` when `value` is set.
pub(crate) fn set_if_some<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}
