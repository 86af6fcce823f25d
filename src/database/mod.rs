//! Database module
//!
//! This module is the document store adapter every concept persists through:
//! the backend contract, its in-memory and PostgreSQL implementations, and the
//! typed collection wrapper concepts own.

pub mod collection;
pub mod connection;
pub mod memory;
pub mod postgres;
pub mod service;
pub mod store;

// Re-export commonly used database components
pub use collection::{set_field, DocCollection, Document, Guarded, Modified};
pub use connection::{create_pool, health_check, run_migrations, DatabaseConfig, DatabasePool};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use service::open_store;
pub use store::{
    DocId, DocumentStore, Filter, ReadOptions, SharedStore, Sort, SortKey, SortOrder, StoredDoc, UpdateOutcome,
    WriteGuard,
};
