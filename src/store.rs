//! Entry point: every collection opened over one backing store.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::StoreConfig;
use crate::id::IdGenerator;
use crate::repository::{Collection, Document, LocalUserRepository, ProjectRepository, Teammate};
use crate::session::CurrentUserSlot;
use crate::storage::KeyValueStore;
use crate::teams::TeamRoster;
use crate::StoreError;

/// The leader's whole database.
///
/// Opening loads every key once. All handles share one id generator, so ids
/// are unique across collections.
#[derive(Clone)]
pub struct Store {
    auth: AuthManager<LocalUserRepository>,
    teams: TeamRoster,
    teammates: Collection<Teammate>,
    documents: Collection<Document>,
    project: ProjectRepository,
}

impl Store {
    /// # Errors
    ///
    /// Returns `CorruptData` naming the first key whose value cannot be read
    /// back, or the backend's error if it cannot be read at all.
    pub fn open(backend: Arc<dyn KeyValueStore>, config: StoreConfig) -> Result<Self, StoreError> {
        let ids = Arc::new(IdGenerator::new());

        let users = LocalUserRepository::new(
            Collection::load(Arc::clone(&backend), Arc::clone(&ids))?,
            config.auth.login_key,
        );
        let teams = TeamRoster::new(Collection::load(Arc::clone(&backend), Arc::clone(&ids))?);
        let teammates = Collection::load(Arc::clone(&backend), Arc::clone(&ids))?;
        let documents = Collection::load(Arc::clone(&backend), Arc::clone(&ids))?;
        let project = ProjectRepository::load(Arc::clone(&backend))?;
        let slot = CurrentUserSlot::new(backend);

        log::info!(
            target: "roster_store",
            "msg=\"store opened\", login_key=\"{}\"",
            config.auth.login_key.as_str()
        );

        Ok(Self {
            auth: AuthManager::new(users, slot, config.auth),
            teams,
            teammates,
            documents,
            project,
        })
    }

    pub fn auth(&self) -> &AuthManager<LocalUserRepository> {
        &self.auth
    }

    pub fn users(&self) -> &LocalUserRepository {
        self.auth.users()
    }

    pub fn teams(&self) -> &TeamRoster {
        &self.teams
    }

    pub fn teammates(&self) -> &Collection<Teammate> {
        &self.teammates
    }

    pub fn documents(&self) -> &Collection<Document> {
        &self.documents
    }

    pub fn project(&self) -> &ProjectRepository {
        &self.project
    }
}
