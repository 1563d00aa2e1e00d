//! Generic one-document-per-key repository.
//!
//! A `Repository<T>` maps an entity id to `T::KEY_PREFIX + id` and stores
//! the entity as a JSON document. There is no partial update primitive:
//! callers read the full document, change it in memory and overwrite it.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::errors::AppError;
use crate::store::DocumentStore;

/// An entity that can live in a `Repository`.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Human-readable entity name used in log messages.
    const KIND: &'static str;
    /// Namespace prepended to every id, including its separator.
    const KEY_PREFIX: &'static str;

    fn id(&self) -> &str;

    fn key_for(id: &str) -> String {
        format!("{}{}", Self::KEY_PREFIX, id)
    }
}

pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<T: Document> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Fetch one entity. Absent keys and undecodable payloads are both
    /// reported as NotFound.
    pub async fn get(&self, id: &str) -> Result<T, AppError> {
        let key = T::key_for(id);
        let raw = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {id} does not exist", T::KIND)))?;

        serde_json::from_str(&raw).map_err(|e| {
            AppError::NotFound(format!("{} {id} has a malformed payload: {e}", T::KIND))
        })
    }

    /// Like `get`, but absence is `Ok(None)` rather than an error.
    pub async fn find(&self, id: &str) -> Result<Option<T>, AppError> {
        match self.get(id).await {
            Ok(entity) => Ok(Some(entity)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Every entity under this prefix. Keys that vanish between the scan
    /// and the read are skipped; the result is not an isolated snapshot.
    pub async fn list(&self) -> Result<Vec<T>, AppError> {
        let keys = self.store.keys_with_prefix(T::KEY_PREFIX).await?;
        let mut entities = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(raw) = self.store.get(&key).await? else {
                continue;
            };
            let entity = serde_json::from_str(&raw).map_err(|e| {
                AppError::Internal(format!("{} under key {key} is malformed: {e}", T::KIND))
            })?;
            entities.push(entity);
        }
        Ok(entities)
    }

    /// Insert a new entity. Conflict if the id is already taken; the
    /// existence check and the write are a single store operation.
    pub async fn create(&self, entity: &T) -> Result<(), AppError> {
        let key = T::key_for(entity.id());
        let payload = serde_json::to_string(entity)?;
        if self.store.set_if_absent(&key, payload).await? {
            Ok(())
        } else {
            Err(AppError::Conflict(format!(
                "{} {} already exists",
                T::KIND,
                entity.id()
            )))
        }
    }

    /// Replace the stored document unconditionally.
    pub async fn overwrite(&self, entity: &T) -> Result<(), AppError> {
        let key = T::key_for(entity.id());
        let payload = serde_json::to_string(entity)?;
        self.store.set(&key, payload).await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let removed = self.store.delete(&T::key_for(id)).await?;
        if removed == 0 {
            return Err(AppError::NotFound(format!(
                "{} {id} does not exist, nothing to delete",
                T::KIND
            )));
        }
        Ok(())
    }
}
