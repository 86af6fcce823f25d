//! In-process document store
//!
//! Collections live in insertion-ordered vectors behind one async `RwLock`, so
//! every call observes and mutates a consistent snapshot.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::store::{
    expect_object, DocId, DocumentStore, Filter, ReadOptions, SortKey, SortOrder, StoredDoc, UpdateOutcome,
    WriteGuard,
};
use crate::utils::errors::Result;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<StoredDoc>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: &str, body: Value, unless: Option<&Filter>) -> Result<Option<StoredDoc>> {
        let body = Value::Object(expect_object(body)?);
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(unless) = unless {
            if docs.iter().any(|doc| unless.matches(doc)) {
                return Ok(None);
            }
        }

        let now = Utc::now();
        let doc = StoredDoc {
            id: DocId::new(),
            version: 1,
            created_at: now,
            updated_at: now,
            body,
        };
        docs.push(doc.clone());
        Ok(Some(doc))
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<StoredDoc>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)).cloned()))
    }

    async fn find_many(&self, collection: &str, filter: &Filter, options: &ReadOptions) -> Result<Vec<StoredDoc>> {
        let collections = self.collections.read().await;
        let mut found: Vec<StoredDoc> = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default();

        if let Some(sort) = options.sort {
            // stable sort keeps insertion order between equal timestamps
            found.sort_by(|a, b| {
                let ordering = match sort.key {
                    SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
                    SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                };
                match sort.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        Ok(found)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Map<String, Value>,
        guard: &WriteGuard,
    ) -> Result<UpdateOutcome> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(UpdateOutcome::NotFound);
        };
        let Some(index) = docs.iter().position(|doc| filter.matches(doc)) else {
            return Ok(UpdateOutcome::NotFound);
        };

        if let Some(expected) = guard.expected_version {
            if docs[index].version != expected {
                return Ok(UpdateOutcome::VersionMismatch);
            }
        }

        if let Some(unless) = &guard.unless {
            let target = docs[index].id;
            if docs.iter().any(|doc| doc.id != target && unless.matches(doc)) {
                return Ok(UpdateOutcome::Conflict);
            }
        }

        let doc = &mut docs[index];
        if let Value::Object(body) = &mut doc.body {
            body.extend(patch);
        }
        doc.version += 1;
        doc.updated_at = Utc::now();
        Ok(UpdateOutcome::Updated(doc.clone()))
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        match docs.iter().position(|doc| filter.matches(doc)) {
            Some(index) => {
                docs.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|doc| !filter.matches(doc));
        Ok((before - docs.len()) as u64)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
