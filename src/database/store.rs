//! Document store contract
//!
//! Every concept persists through this trait. A backend stores untyped JSON
//! bodies grouped by collection name; each call is atomic with respect to the
//! single document it touches and no call spans a transaction with another.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::utils::errors::{KinshipError, Result};

/// Store-assigned document identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(Uuid);

impl DocId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DocId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<DocId> for Value {
    fn from(value: DocId) -> Self {
        Value::String(value.0.to_string())
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DocId {
    type Err = KinshipError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| KinshipError::InvalidInput(format!("{} is not a valid id", s)))
    }
}

/// A raw stored document as a backend returns it
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDoc {
    pub id: DocId,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: Value,
}

/// Equality filter over the document id and top-level body fields.
///
/// An empty filter matches every document of the collection. Field values are
/// compared for equality; the PostgreSQL backend uses JSONB containment, which
/// coincides with equality for the scalar values concepts filter on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    id: Option<DocId>,
    fields: Map<String, Value>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: DocId) -> Self {
        Self { id: Some(id), fields: Map::new() }
    }

    pub fn field(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(name, value)
    }

    pub fn and(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> Option<DocId> {
        self.id
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn matches(&self, doc: &StoredDoc) -> bool {
        if let Some(id) = self.id {
            if doc.id != id {
                return false;
            }
        }
        self.fields
            .iter()
            .all(|(name, expected)| doc.body.get(name) == Some(expected))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

/// Options for multi-document reads; no sort means insertion order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    pub sort: Option<Sort>,
}

impl ReadOptions {
    pub fn sorted(key: SortKey, order: SortOrder) -> Self {
        Self { sort: Some(Sort { key, order }) }
    }

    pub fn newest_updated_first() -> Self {
        Self::sorted(SortKey::UpdatedAt, SortOrder::Descending)
    }
}

/// Preconditions checked atomically with an update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteGuard {
    /// Apply only if the matched document still carries this version
    pub expected_version: Option<i64>,
    /// Refuse if any other document of the collection matches this filter
    pub unless: Option<Filter>,
}

impl WriteGuard {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn version(expected: i64) -> Self {
        Self { expected_version: Some(expected), unless: None }
    }

    pub fn unless(filter: Filter) -> Self {
        Self { expected_version: None, unless: Some(filter) }
    }
}

/// Result of a guarded update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated(StoredDoc),
    NotFound,
    VersionMismatch,
    Conflict,
}

/// Keyed persistence for JSON documents, grouped by collection
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Insert a body. With `unless`, the insert is skipped (and `None`
    /// returned) when any document already matches that filter.
    async fn insert(&self, collection: &str, body: Value, unless: Option<&Filter>) -> Result<Option<StoredDoc>>;

    /// First matching document in insertion order
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<StoredDoc>>;

    async fn find_many(&self, collection: &str, filter: &Filter, options: &ReadOptions) -> Result<Vec<StoredDoc>>;

    /// Merge `patch` into the top level of the first matching document
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Map<String, Value>,
        guard: &WriteGuard,
    ) -> Result<UpdateOutcome>;

    /// Delete the first matching document; `false` when nothing matched
    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<bool>;

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64>;

    async fn health_check(&self) -> Result<()>;
}

pub type SharedStore = Arc<dyn DocumentStore>;

/// Ensure a body is a JSON object before it reaches a backend
pub(crate) fn expect_object(body: Value) -> Result<Map<String, Value>> {
    match body {
        Value::Object(map) => Ok(map),
        other => Err(KinshipError::Internal(format!(
            "Document bodies must be JSON objects, got {}",
            other
        ))),
    }
}
