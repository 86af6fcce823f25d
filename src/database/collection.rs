//! Typed collection wrapper
//!
//! `DocCollection<T>` is what a concept owns: one named collection of `T`
//! bodies over a shared backend, with store metadata attached to every read.

use std::marker::PhantomData;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::store::{
    expect_object, DocId, Filter, ReadOptions, SharedStore, StoredDoc, UpdateOutcome, WriteGuard,
};
use crate::utils::errors::{KinshipError, Result};
use crate::utils::logging::log_store_operation;

/// A body together with the metadata the store maintains for it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<T> {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub version: i64,
    #[serde(flatten)]
    pub body: T,
}

/// Result of a read-modify-write
#[derive(Debug, Clone, PartialEq)]
pub enum Modified<T> {
    /// Nothing matched the filter
    Missing,
    /// The mutation reported no change; nothing was written
    Unchanged(Document<T>),
    Updated(Document<T>),
}

/// Outcome of an update guarded by a uniqueness filter
#[derive(Debug, Clone, PartialEq)]
pub enum Guarded<T> {
    Updated(Document<T>),
    Missing,
    Conflict,
}

/// Build a one-field patch for `partial_update_one`
pub fn set_field(field: &str, value: impl Serialize) -> Result<Map<String, Value>> {
    let mut patch = Map::new();
    patch.insert(field.to_string(), serde_json::to_value(value)?);
    Ok(patch)
}

pub struct DocCollection<T> {
    store: SharedStore,
    name: String,
    max_retries: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for DocCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            name: self.name.clone(),
            max_retries: self.max_retries,
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for DocCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocCollection")
            .field("name", &self.name)
            .field("backend", &self.store.backend_name())
            .finish()
    }
}

impl<T> DocCollection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    pub fn new(store: SharedStore, name: impl Into<String>, max_retries: u32) -> Self {
        Self {
            store,
            name: name.into(),
            max_retries: max_retries.max(1),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn decode(&self, stored: StoredDoc) -> Result<Document<T>> {
        Ok(Document {
            id: stored.id,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            version: stored.version,
            body: serde_json::from_value(stored.body)?,
        })
    }

    fn encode(&self, body: &T) -> Result<Value> {
        Ok(serde_json::to_value(body)?)
    }

    fn record<R>(&self, operation: &str, started: Instant, result: &Result<R>) {
        log_store_operation(
            operation,
            &self.name,
            started.elapsed().as_millis() as u64,
            result.is_ok(),
        );
    }

    pub async fn create_one(&self, body: &T) -> Result<Document<T>> {
        let started = Instant::now();
        let result = match self.store.insert(&self.name, self.encode(body)?, None).await {
            Ok(Some(stored)) => self.decode(stored),
            Ok(None) => Err(KinshipError::Internal(format!(
                "Unconditional insert into {} was refused",
                self.name
            ))),
            Err(e) => Err(e),
        };
        self.record("create_one", started, &result);
        result
    }

    /// Insert unless a document matching `conflict` exists; `None` on conflict
    pub async fn create_one_unless(&self, conflict: &Filter, body: &T) -> Result<Option<Document<T>>> {
        let started = Instant::now();
        let result = match self.store.insert(&self.name, self.encode(body)?, Some(conflict)).await {
            Ok(stored) => stored.map(|s| self.decode(s)).transpose(),
            Err(e) => Err(e),
        };
        self.record("create_one_unless", started, &result);
        result
    }

    pub async fn read_one(&self, filter: &Filter) -> Result<Option<Document<T>>> {
        let started = Instant::now();
        let result = match self.store.find_one(&self.name, filter).await {
            Ok(stored) => stored.map(|s| self.decode(s)).transpose(),
            Err(e) => Err(e),
        };
        self.record("read_one", started, &result);
        result
    }

    pub async fn read_many(&self, filter: &Filter, options: &ReadOptions) -> Result<Vec<Document<T>>> {
        let started = Instant::now();
        let result = match self.store.find_many(&self.name, filter, options).await {
            Ok(stored) => stored.into_iter().map(|s| self.decode(s)).collect(),
            Err(e) => Err(e),
        };
        self.record("read_many", started, &result);
        result
    }

    /// Merge `patch` into the first match; `None` when nothing matched
    pub async fn partial_update_one(
        &self,
        filter: &Filter,
        patch: Map<String, Value>,
    ) -> Result<Option<Document<T>>> {
        match self.update_guarded(filter, patch, &WriteGuard::none()).await? {
            Guarded::Updated(doc) => Ok(Some(doc)),
            Guarded::Missing | Guarded::Conflict => Ok(None),
        }
    }

    /// Merge `patch` unless another document matches `conflict`
    pub async fn partial_update_one_unless(
        &self,
        filter: &Filter,
        patch: Map<String, Value>,
        conflict: Filter,
    ) -> Result<Guarded<T>> {
        self.update_guarded(filter, patch, &WriteGuard::unless(conflict)).await
    }

    async fn update_guarded(
        &self,
        filter: &Filter,
        patch: Map<String, Value>,
        guard: &WriteGuard,
    ) -> Result<Guarded<T>> {
        let started = Instant::now();
        let result = match self.store.update_one(&self.name, filter, patch, guard).await {
            Ok(UpdateOutcome::Updated(stored)) => self.decode(stored).map(Guarded::Updated),
            Ok(UpdateOutcome::NotFound) => Ok(Guarded::Missing),
            Ok(UpdateOutcome::Conflict) => Ok(Guarded::Conflict),
            Ok(UpdateOutcome::VersionMismatch) => Err(KinshipError::Internal(format!(
                "Unversioned update on {} reported a version mismatch",
                self.name
            ))),
            Err(e) => Err(e),
        };
        self.record("partial_update_one", started, &result);
        result
    }

    /// Delete the first match; `false` when nothing matched
    pub async fn delete_one(&self, filter: &Filter) -> Result<bool> {
        let started = Instant::now();
        let result = self.store.delete_one(&self.name, filter).await;
        self.record("delete_one", started, &result);
        result
    }

    pub async fn delete_many(&self, filter: &Filter) -> Result<u64> {
        let started = Instant::now();
        let result = self.store.delete_many(&self.name, filter).await;
        self.record("delete_many", started, &result);
        result
    }

    /// Read the first match, apply `mutate` to a copy and write it back only if
    /// the stored version is unchanged, retrying on interleaved writers.
    ///
    /// `mutate` returns `Ok(false)` to leave the document untouched and may run
    /// more than once. Fails with `Conflict` once the retry bound is spent.
    pub async fn modify_one<F>(&self, filter: &Filter, mut mutate: F) -> Result<Modified<T>>
    where
        F: FnMut(&mut T) -> Result<bool> + Send,
    {
        for attempt in 1..=self.max_retries {
            let Some(current) = self.read_one(filter).await? else {
                return Ok(Modified::Missing);
            };

            let mut body = current.body.clone();
            if !mutate(&mut body)? {
                return Ok(Modified::Unchanged(current));
            }

            let patch = expect_object(self.encode(&body)?)?;
            let started = Instant::now();
            let outcome = self
                .store
                .update_one(&self.name, &Filter::by_id(current.id), patch, &WriteGuard::version(current.version))
                .await;
            self.record("modify_one", started, &outcome);

            match outcome? {
                UpdateOutcome::Updated(stored) => return Ok(Modified::Updated(self.decode(stored)?)),
                UpdateOutcome::NotFound => return Ok(Modified::Missing),
                UpdateOutcome::VersionMismatch => {
                    debug!(collection = %self.name, id = %current.id, attempt, "Version moved underneath, retrying");
                }
                UpdateOutcome::Conflict => {
                    return Err(KinshipError::Conflict(format!("{} {}", self.name, current.id)));
                }
            }
        }

        Err(KinshipError::Conflict(format!(
            "{} still contended after {} attempts",
            self.name, self.max_retries
        )))
    }
}
