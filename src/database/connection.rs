//! PostgreSQL pool setup for the document store

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::{debug, info};

use crate::config::{Settings, StoreConfig};
use crate::utils::errors::KinshipError;

pub type DatabasePool = Pool<Postgres>;

/// Pool parameters derived from the store section of the settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from(&Settings::default().store)
    }
}

impl From<&StoreConfig> for DatabaseConfig {
    fn from(store: &StoreConfig) -> Self {
        Self {
            url: store.url.clone(),
            max_connections: store.max_connections,
            min_connections: store.min_connections,
            acquire_timeout: Duration::from_secs(store.acquire_timeout_seconds),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }
}

/// Open a pool and make sure the server answers before handing it out
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, KinshipError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect(&config.url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;

    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Document store pool ready"
    );
    Ok(pool)
}

/// Create the `documents` table and its indexes if they are missing
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), KinshipError> {
    debug!("Applying document store migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Document store schema up to date");
    Ok(())
}

/// The store is healthy when the documents table can be read
pub async fn health_check(pool: &DatabasePool) -> Result<(), KinshipError> {
    sqlx::query("SELECT 1 FROM documents LIMIT 1")
        .fetch_optional(pool)
        .await?;
    Ok(())
}
