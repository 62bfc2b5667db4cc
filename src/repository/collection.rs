use std::sync::{Arc, RwLock};

use chrono::Utc;

use super::{Entity, Patch};
use crate::events::{dispatch, StoreEvent};
use crate::id::IdGenerator;
use crate::storage::KeyValueStore;
use crate::StoreError;

/// Cached collection of one entity type.
///
/// All reads are served from memory. Every mutation serializes the whole
/// collection and writes it back under [`Entity::KEY`]; at a few hundred
/// records that O(n) rewrite is cheap, and it keeps the stored JSON identical
/// to what other readers of the same key expect.
///
/// A mutation is committed to the cache only after the backing store accepted
/// the write, so a failed write leaves both unchanged.
///
/// Clones share the same cache.
pub struct Collection<T: Entity> {
    backend: Arc<dyn KeyValueStore>,
    ids: Arc<IdGenerator>,
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Entity> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            ids: Arc::clone(&self.ids),
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Entity> Collection<T> {
    /// Loads the collection from the backing store.
    ///
    /// A missing key is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `CorruptData` if the stored value is not a JSON array of `T`.
    pub fn load(backend: Arc<dyn KeyValueStore>, ids: Arc<IdGenerator>) -> Result<Self, StoreError> {
        let key = T::KEY.as_str();
        let records: Vec<T> = match backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::CorruptData {
                key,
                reason: e.to_string(),
            })?,
            None => Vec::new(),
        };

        for record in &records {
            ids.observe(record.id());
        }

        log::debug!(
            target: "roster_store",
            "msg=\"collection loaded\", key=\"{key}\", records={}",
            records.len()
        );

        Ok(Self {
            backend,
            ids,
            records: Arc::new(RwLock::new(records)),
        })
    }

    /// Returns every record in insertion order.
    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.read(|records| records.to_vec())
    }

    pub async fn len(&self) -> Result<usize, StoreError> {
        self.read(<[T]>::len)
    }

    pub async fn is_empty(&self) -> Result<bool, StoreError> {
        self.read(<[T]>::is_empty)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        self.read(|records| records.iter().find(|r| r.id() == id).cloned())
    }

    /// Returns the first record matching `predicate`.
    pub async fn find<P>(&self, predicate: P) -> Result<Option<T>, StoreError>
    where
        P: Fn(&T) -> bool + Send,
    {
        self.read(|records| records.iter().find(|&r| predicate(r)).cloned())
    }

    /// Appends a new record with a generated id.
    pub async fn add(&self, draft: T::Draft) -> Result<T, StoreError> {
        let record = self.mutate(|records, ids| {
            let record = T::from_draft(ids.next_id(), draft)?;
            records.push(record.clone());
            Ok(record)
        })?;

        dispatch(StoreEvent::RecordAdded {
            key: T::KEY,
            id: record.id().to_owned(),
            at: Utc::now(),
        })
        .await;

        Ok(record)
    }

    /// Appends several records with a single write.
    ///
    /// Either every draft is stored or none is.
    pub async fn add_many(&self, drafts: Vec<T::Draft>) -> Result<Vec<T>, StoreError> {
        let added = self.mutate(|records, ids| {
            let mut added = Vec::with_capacity(drafts.len());
            for draft in drafts {
                added.push(T::from_draft(ids.next_id(), draft)?);
            }
            records.extend(added.iter().cloned());
            Ok(added)
        })?;

        for record in &added {
            dispatch(StoreEvent::RecordAdded {
                key: T::KEY,
                id: record.id().to_owned(),
                at: Utc::now(),
            })
            .await;
        }

        Ok(added)
    }

    /// Applies `patch` to the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has `id`, or a validation error if the
    /// patched record is invalid.
    pub async fn update(&self, id: &str, patch: T::Patch) -> Result<T, StoreError> {
        let record = self.mutate(|records, _| {
            let record = records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or(StoreError::NotFound)?;
            patch.apply(record);
            record.validate()?;
            Ok(record.clone())
        })?;

        dispatch(StoreEvent::RecordUpdated {
            key: T::KEY,
            id: id.to_owned(),
            at: Utc::now(),
        })
        .await;

        Ok(record)
    }

    /// Removes the record with `id`.
    ///
    /// Returns whether a record was removed. The collection is written back
    /// either way.
    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self.mutate(|records, _| {
            let before = records.len();
            records.retain(|r| r.id() != id);
            Ok(records.len() < before)
        })?;

        if removed {
            dispatch(StoreEvent::RecordRemoved {
                key: T::KEY,
                id: id.to_owned(),
                at: Utc::now(),
            })
            .await;
        }

        Ok(removed)
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> Result<R, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_owned()))?;
        Ok(f(&records))
    }

    /// Runs `f` on a copy of the records, persists the copy, then commits it.
    ///
    /// Nothing is written or committed if `f` fails.
    #[allow(clippy::significant_drop_tightening)]
    pub(crate) fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Vec<T>, &IdGenerator) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_owned()))?;

        let mut next = records.clone();
        let result = f(&mut next, &self.ids)?;
        self.persist(&next)?;
        *records = next;

        Ok(result)
    }

    fn persist(&self, records: &[T]) -> Result<(), StoreError> {
        let key = T::KEY.as_str();
        let json = serde_json::to_string(records)
            .map_err(|e| StoreError::Internal(format!("Failed to serialize {key}: {e}")))?;

        self.backend.set(key, &json).map_err(|e| {
            log::error!(
                target: "roster_store",
                "msg=\"persist failed\", key=\"{key}\", error=\"{e}\""
            );
            e
        })?;

        log::debug!(
            target: "roster_store",
            "msg=\"collection persisted\", key=\"{key}\", records={}",
            records.len()
        );

        Ok(())
    }
}
