use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::events::{dispatch, StoreEvent};
use crate::storage::{KeyValueStore, StorageKey};
use crate::validators::{validate_project_details, ValidationError};
use crate::StoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkingStatus {
    #[default]
    Working,
    NotWorking,
}

/// The leader's single project description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    pub team_name: String,
    pub working_status: WorkingStatus,
    pub problem_statement: String,
    pub project_info: String,
    pub budget: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProjectDetailsInput {
    pub team_name: String,
    pub working_status: WorkingStatus,
    pub problem_statement: String,
    pub project_info: String,
    pub budget: String,
}

/// Project details and the names of files attached to the project.
///
/// Both live under their own key as single JSON values (an object and an
/// array of strings) rather than as entity collections.
#[derive(Clone)]
pub struct ProjectRepository {
    backend: Arc<dyn KeyValueStore>,
    details: Arc<RwLock<Option<ProjectDetails>>>,
    files: Arc<RwLock<Vec<String>>>,
}

fn load_value<T: DeserializeOwned>(
    backend: &dyn KeyValueStore,
    key: StorageKey,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = backend.get(key.as_str())? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StoreError::CorruptData {
            key: key.as_str(),
            reason: e.to_string(),
        })
}

fn lock_poisoned<E>(_: E) -> StoreError {
    StoreError::Internal("lock poisoned".to_owned())
}

impl ProjectRepository {
    /// # Errors
    ///
    /// Returns `CorruptData` if either key holds a value of the wrong shape.
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let details = load_value(backend.as_ref(), StorageKey::ProjectDetails)?;
        let files = load_value(backend.as_ref(), StorageKey::ProjectFiles)?.unwrap_or_default();

        Ok(Self {
            backend,
            details: Arc::new(RwLock::new(details)),
            files: Arc::new(RwLock::new(files)),
        })
    }

    pub async fn details(&self) -> Result<Option<ProjectDetails>, StoreError> {
        Ok(self.details.read().map_err(lock_poisoned)?.clone())
    }

    /// Validates and stores the details, replacing any previous ones.
    pub async fn save_details(&self, input: ProjectDetailsInput) -> Result<ProjectDetails, StoreError> {
        validate_project_details(&input)?;

        let details = ProjectDetails {
            team_name: input.team_name,
            working_status: input.working_status,
            problem_statement: input.problem_statement,
            project_info: input.project_info,
            budget: input.budget,
            updated_at: Utc::now(),
        };

        {
            let mut slot = self.details.write().map_err(lock_poisoned)?;
            self.persist(StorageKey::ProjectDetails, &details)?;
            *slot = Some(details.clone());
        }

        log::info!(
            target: "roster_store",
            "msg=\"project details saved\", team_name=\"{}\"",
            details.team_name
        );
        dispatch(StoreEvent::ProjectDetailsSaved {
            team_name: details.team_name.clone(),
            at: details.updated_at,
        })
        .await;

        Ok(details)
    }

    pub async fn files(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.files.read().map_err(lock_poisoned)?.clone())
    }

    /// Appends file names and returns the full list.
    ///
    /// # Errors
    ///
    /// Returns `FileNameEmpty` if any name is blank; nothing is added then.
    pub async fn add_files(&self, names: Vec<String>) -> Result<Vec<String>, StoreError> {
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(ValidationError::FileNameEmpty.into());
        }

        let files = self.mutate_files(|files| files.extend(names))?;

        dispatch(StoreEvent::ProjectFilesChanged {
            count: files.len(),
            at: Utc::now(),
        })
        .await;

        Ok(files)
    }

    /// Removes the first file with `name`. Returns whether one was removed.
    pub async fn remove_file(&self, name: &str) -> Result<bool, StoreError> {
        let mut removed = false;
        let files = self.mutate_files(|files| {
            if let Some(index) = files.iter().position(|f| f == name) {
                files.remove(index);
                removed = true;
            }
        })?;

        if removed {
            dispatch(StoreEvent::ProjectFilesChanged {
                count: files.len(),
                at: Utc::now(),
            })
            .await;
        }

        Ok(removed)
    }

    fn mutate_files(&self, f: impl FnOnce(&mut Vec<String>)) -> Result<Vec<String>, StoreError> {
        let mut files = self.files.write().map_err(lock_poisoned)?;
        let mut next = files.clone();
        f(&mut next);
        self.persist(StorageKey::ProjectFiles, &next)?;
        *files = next.clone();
        Ok(next)
    }

    fn persist<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)
            .map_err(|e| StoreError::Internal(format!("Failed to serialize {key}: {e}")))?;
        self.backend.set(key.as_str(), &json).map_err(|e| {
            log::error!(
                target: "roster_store",
                "msg=\"persist failed\", key=\"{key}\", error=\"{e}\""
            );
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    fn input() -> ProjectDetailsInput {
        ProjectDetailsInput {
            team_name: "Rockets".to_owned(),
            working_status: WorkingStatus::NotWorking,
            problem_statement: "Clean water for rural schools".to_owned(),
            project_info: "A low-cost filtration prototype".to_owned(),
            budget: "5000".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_details_round_trip_through_backend() {
        let backend = InMemoryStore::new();
        let project = ProjectRepository::load(Arc::new(backend.clone())).unwrap();
        assert!(project.details().await.unwrap().is_none());

        let saved = project.save_details(input()).await.unwrap();

        let reloaded = ProjectRepository::load(Arc::new(backend.clone())).unwrap();
        assert_eq!(reloaded.details().await.unwrap(), Some(saved));

        let raw: serde_json::Value =
            serde_json::from_str(&backend.get("projectDetails").unwrap().unwrap()).unwrap();
        assert_eq!(raw["workingStatus"], "not-working");
    }

    #[tokio::test]
    async fn test_invalid_details_not_saved() {
        let backend = InMemoryStore::new();
        let project = ProjectRepository::load(Arc::new(backend.clone())).unwrap();

        let mut details = input();
        details.team_name = "R".to_owned();

        assert_eq!(
            project.save_details(details).await.unwrap_err(),
            StoreError::Validation(ValidationError::ProjectTeamNameTooShort)
        );
        assert_eq!(backend.write_count("projectDetails"), 0);
    }

    #[tokio::test]
    async fn test_files_add_and_remove() {
        let backend = InMemoryStore::new();
        let project = ProjectRepository::load(Arc::new(backend.clone())).unwrap();

        let files = project
            .add_files(vec!["a.pdf".to_owned(), "b.png".to_owned()])
            .await
            .unwrap();
        assert_eq!(files, vec!["a.pdf", "b.png"]);

        assert!(project.remove_file("a.pdf").await.unwrap());
        assert!(!project.remove_file("a.pdf").await.unwrap());
        assert_eq!(project.files().await.unwrap(), vec!["b.png"]);

        let raw = backend.get("projectFiles").unwrap().unwrap();
        assert_eq!(raw, "[\"b.png\"]");
    }

    #[tokio::test]
    async fn test_blank_file_name_rejected() {
        let backend = InMemoryStore::new();
        let project = ProjectRepository::load(Arc::new(backend)).unwrap();

        let result = project.add_files(vec!["a.pdf".to_owned(), " ".to_owned()]).await;
        assert_eq!(
            result.unwrap_err(),
            StoreError::Validation(ValidationError::FileNameEmpty)
        );
        assert!(project.files().await.unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_files_key() {
        let backend = InMemoryStore::new();
        backend.set("projectFiles", "{\"a\":1}").unwrap();

        assert!(matches!(
            ProjectRepository::load(Arc::new(backend)),
            Err(StoreError::CorruptData { key: "projectFiles", .. })
        ));
    }
}
