//! Store service layer
//!
//! Chooses and opens the configured document store backend.

use std::sync::Arc;

use tracing::info;

use super::{MemoryStore, PostgresStore, SharedStore};
use crate::config::{StoreBackend, StoreConfig};
use crate::utils::errors::Result;

/// Open the backend named in the configuration
pub async fn open_store(config: &StoreConfig) -> Result<SharedStore> {
    let store: SharedStore = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Postgres => Arc::new(PostgresStore::connect(config).await?),
    };

    store.health_check().await?;
    info!(backend = store.backend_name(), "Document store ready");
    Ok(store)
}
