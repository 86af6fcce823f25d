//! Store wrapper that fails writes to one collection on demand

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};

use kinship::database::{DocumentStore, Filter, MemoryStore, ReadOptions, StoredDoc, UpdateOutcome, WriteGuard};
use kinship::{KinshipError, Result};

pub struct FailingStore {
    inner: MemoryStore,
    collection: String,
    failing: AtomicBool,
}

impl FailingStore {
    pub fn new(collection: &str) -> Self {
        Self {
            inner: MemoryStore::new(),
            collection: collection.to_string(),
            failing: AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self, collection: &str) -> Result<()> {
        if collection == self.collection && self.failing.load(Ordering::SeqCst) {
            return Err(KinshipError::Internal(format!("injected write failure on {}", collection)));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing-memory"
    }

    async fn insert(&self, collection: &str, body: Value, unless: Option<&Filter>) -> Result<Option<StoredDoc>> {
        self.check(collection)?;
        self.inner.insert(collection, body, unless).await
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<StoredDoc>> {
        self.inner.find_one(collection, filter).await
    }

    async fn find_many(&self, collection: &str, filter: &Filter, options: &ReadOptions) -> Result<Vec<StoredDoc>> {
        self.inner.find_many(collection, filter, options).await
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Map<String, Value>,
        guard: &WriteGuard,
    ) -> Result<UpdateOutcome> {
        self.check(collection)?;
        self.inner.update_one(collection, filter, patch, guard).await
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<bool> {
        self.check(collection)?;
        self.inner.delete_one(collection, filter).await
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64> {
        self.check(collection)?;
        self.inner.delete_many(collection, filter).await
    }

    async fn health_check(&self) -> Result<()> {
        self.inner.health_check().await
    }
}
