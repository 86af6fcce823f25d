//! Test database helper utilities
//!
//! PostgreSQL tests run only when `TEST_DATABASE_URL` points at a database
//! the tests may truncate.

use kinship::config::{Settings, StoreBackend};
use kinship::database::PostgresStore;

pub fn test_database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL").ok().filter(|url| !url.is_empty())
}

/// Settings for the postgres backend, or `None` when no test database is configured
pub fn postgres_settings() -> Option<Settings> {
    let url = test_database_url()?;
    let mut settings = super::TestContext::test_settings();
    settings.store.backend = StoreBackend::Postgres;
    settings.store.url = url;
    settings.store.max_connections = 8;
    Some(settings)
}

/// Connect, migrate and empty the documents table
pub async fn fresh_postgres_store(settings: &Settings) -> PostgresStore {
    let store = PostgresStore::connect(&settings.store)
        .await
        .expect("Failed to connect to test database");
    sqlx::query("TRUNCATE documents")
        .execute(store.pool())
        .await
        .expect("Failed to truncate documents");
    store
}
