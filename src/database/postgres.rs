//! PostgreSQL document store
//!
//! All collections share the `documents` table. Filters become JSONB
//! containment (`@>`), partial updates become top-level concatenation (`||`),
//! and guarded writes take a transaction-scoped advisory lock per collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

use super::connection::{create_pool, health_check, run_migrations, DatabaseConfig, DatabasePool};
use super::store::{
    expect_object, DocumentStore, Filter, ReadOptions, SortKey, SortOrder, StoredDoc, UpdateOutcome, WriteGuard,
};
use crate::config::StoreConfig;
use crate::utils::errors::Result;

const MATCH_CLAUSE: &str = "collection = $1 AND ($2::uuid IS NULL OR id = $2) AND data @> $3";
const RETURNING: &str = "id, version, data, created_at, updated_at";

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    version: i64,
    data: Json<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for StoredDoc {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id.into(),
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
            body: row.data.0,
        }
    }
}

#[derive(Clone)]
pub struct PostgresStore {
    pool: DatabasePool,
}

impl PostgresStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Open a pool for the configured URL and bring the schema up to date
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let pool = create_pool(&DatabaseConfig::from(config)).await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

fn filter_binds(filter: &Filter) -> (Option<Uuid>, Json<Value>) {
    (
        filter.id().map(|id| id.as_uuid()),
        Json(Value::Object(filter.fields().clone())),
    )
}

fn order_clause(options: &ReadOptions) -> &'static str {
    match options.sort {
        None => "seq ASC",
        Some(sort) => match (sort.key, sort.order) {
            (SortKey::CreatedAt, SortOrder::Ascending) => "created_at ASC, seq ASC",
            (SortKey::CreatedAt, SortOrder::Descending) => "created_at DESC, seq ASC",
            (SortKey::UpdatedAt, SortOrder::Ascending) => "updated_at ASC, seq ASC",
            (SortKey::UpdatedAt, SortOrder::Descending) => "updated_at DESC, seq ASC",
        },
    }
}

async fn lock_collection(tx: &mut Transaction<'_, Postgres>, collection: &str) -> Result<()> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(collection)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Whether a document other than `exclude` matches the filter
async fn any_other_matches(
    tx: &mut Transaction<'_, Postgres>,
    collection: &str,
    filter: &Filter,
    exclude: Option<Uuid>,
) -> Result<bool> {
    let (id, data) = filter_binds(filter);
    let exists: bool = sqlx::query_scalar(&format!(
        "SELECT EXISTS (SELECT 1 FROM documents WHERE {MATCH_CLAUSE} AND ($4::uuid IS NULL OR id <> $4))"
    ))
    .bind(collection)
    .bind(id)
    .bind(data)
    .bind(exclude)
    .fetch_one(&mut **tx)
    .await?;
    Ok(exists)
}

#[async_trait]
impl DocumentStore for PostgresStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, collection: &str, body: Value, unless: Option<&Filter>) -> Result<Option<StoredDoc>> {
        let body = Value::Object(expect_object(body)?);
        let mut tx = self.pool.begin().await?;

        if let Some(unless) = unless {
            lock_collection(&mut tx, collection).await?;
            if any_other_matches(&mut tx, collection, unless, None).await? {
                tx.rollback().await?;
                return Ok(None);
            }
        }

        let row: DocumentRow = sqlx::query_as(&format!(
            "INSERT INTO documents (id, collection, data) VALUES ($1, $2, $3) RETURNING {RETURNING}"
        ))
        .bind(Uuid::new_v4())
        .bind(collection)
        .bind(Json(body))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(row.into()))
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<StoredDoc>> {
        let (id, data) = filter_binds(filter);
        let row: Option<DocumentRow> = sqlx::query_as(&format!(
            "SELECT {RETURNING} FROM documents WHERE {MATCH_CLAUSE} ORDER BY seq ASC LIMIT 1"
        ))
        .bind(collection)
        .bind(id)
        .bind(data)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StoredDoc::from))
    }

    async fn find_many(&self, collection: &str, filter: &Filter, options: &ReadOptions) -> Result<Vec<StoredDoc>> {
        let (id, data) = filter_binds(filter);
        let rows: Vec<DocumentRow> = sqlx::query_as(&format!(
            "SELECT {RETURNING} FROM documents WHERE {MATCH_CLAUSE} ORDER BY {}",
            order_clause(options)
        ))
        .bind(collection)
        .bind(id)
        .bind(data)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StoredDoc::from).collect())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Map<String, Value>,
        guard: &WriteGuard,
    ) -> Result<UpdateOutcome> {
        let mut tx = self.pool.begin().await?;
        if guard.unless.is_some() {
            lock_collection(&mut tx, collection).await?;
        }

        let (id, data) = filter_binds(filter);
        let target: Option<(Uuid, i64)> = sqlx::query_as(&format!(
            "SELECT id, version FROM documents WHERE {MATCH_CLAUSE} ORDER BY seq ASC LIMIT 1 FOR UPDATE"
        ))
        .bind(collection)
        .bind(id)
        .bind(data)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((target_id, version)) = target else {
            tx.rollback().await?;
            return Ok(UpdateOutcome::NotFound);
        };

        if guard.expected_version.is_some_and(|expected| expected != version) {
            tx.rollback().await?;
            return Ok(UpdateOutcome::VersionMismatch);
        }

        if let Some(unless) = &guard.unless {
            if any_other_matches(&mut tx, collection, unless, Some(target_id)).await? {
                tx.rollback().await?;
                return Ok(UpdateOutcome::Conflict);
            }
        }

        let row: DocumentRow = sqlx::query_as(&format!(
            "UPDATE documents SET data = data || $2, version = version + 1, updated_at = clock_timestamp() \
             WHERE id = $1 RETURNING {RETURNING}"
        ))
        .bind(target_id)
        .bind(Json(Value::Object(patch)))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(UpdateOutcome::Updated(row.into()))
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<bool> {
        let (id, data) = filter_binds(filter);
        let result = sqlx::query(&format!(
            "DELETE FROM documents WHERE id = (SELECT id FROM documents WHERE {MATCH_CLAUSE} ORDER BY seq ASC LIMIT 1)"
        ))
        .bind(collection)
        .bind(id)
        .bind(data)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let (id, data) = filter_binds(filter);
        let result = sqlx::query(&format!("DELETE FROM documents WHERE {MATCH_CLAUSE}"))
            .bind(collection)
            .bind(id)
            .bind(data)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<()> {
        health_check(&self.pool).await
    }
}
