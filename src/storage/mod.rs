//! Durable key-value backing store.
//!
//! This is the only I/O boundary of the crate. Every collection is kept as a
//! JSON blob under one of the [`StorageKey`]s below.
//!
//! | Key | Content |
//! |-----|---------|
//! | `user` | current session's user, or absent |
//! | `users` | array of registered users |
//! | `teams` | array of teams with nested members |
//! | `teammates` | array of teammates |
//! | `documents` | array of document metadata |
//! | `projectDetails` | single project object, or absent |
//! | `projectFiles` | array of filenames |
//!
//! # Multiple writers
//!
//! Nothing coordinates two processes (or browser tabs) opened over the same
//! backing store. Each keeps its own cache and rewrites whole collections, so
//! the last writer wins and the other's changes to that key are lost.

mod backend;
mod file_store;
mod memory_store;

pub use backend::KeyValueStore;
pub use file_store::FileStore;
pub use memory_store::InMemoryStore;

/// Keys of the backing-store layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    CurrentUser,
    Users,
    Teams,
    Teammates,
    Documents,
    ProjectDetails,
    ProjectFiles,
}

impl StorageKey {
    pub const ALL: [StorageKey; 7] = [
        Self::CurrentUser,
        Self::Users,
        Self::Teams,
        Self::Teammates,
        Self::Documents,
        Self::ProjectDetails,
        Self::ProjectFiles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentUser => "user",
            Self::Users => "users",
            Self::Teams => "teams",
            Self::Teammates => "teammates",
            Self::Documents => "documents",
            Self::ProjectDetails => "projectDetails",
            Self::ProjectFiles => "projectFiles",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
