//! Postgres-backed document store
//!
//! All collections share the `documents` table, one JSONB row per document.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use sqlx::types::Json;
use tracing::debug;
use crate::database::connection::DatabasePool;
use crate::utils::{errors::Result, helpers::generate_document_id};
use super::{with_id, DocumentFilter, DocumentStore};

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: DatabasePool,
}

impl PgDocumentStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(&self, collection: &str, document: Value) -> Result<String> {
        let id = generate_document_id();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            "#
        )
        .bind(collection)
        .bind(id.as_str())
        .bind(Json(with_id(document, &id)))
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(collection = collection, id = %id, "Document created");
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let row = sqlx::query_scalar::<_, Json<Value>>(
            "SELECT data FROM documents WHERE collection = $1 AND id = $2"
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|Json(data)| data))
    }

    async fn set(&self, collection: &str, id: &str, document: Value) -> Result<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (collection, id)
            DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at
            "#
        )
        .bind(collection)
        .bind(id)
        .bind(Json(with_id(document, id)))
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(collection = collection, id = id, "Document stored");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn query(&self, collection: &str, filter: &DocumentFilter) -> Result<Vec<Value>> {
        let (sql, field, operand) = match filter {
            DocumentFilter::FieldEquals { field, value } => (
                "SELECT data FROM documents WHERE collection = $1 AND data -> $2 = $3 ORDER BY created_at, id",
                field,
                value.clone(),
            ),
            DocumentFilter::ArrayContains { field, element } => (
                "SELECT data FROM documents WHERE collection = $1 AND data -> $2 @> $3 ORDER BY created_at, id",
                field,
                json!([element]),
            ),
        };

        let rows = sqlx::query_scalar::<_, Json<Value>>(sql)
            .bind(collection)
            .bind(field.as_str())
            .bind(Json(operand))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|Json(data)| data).collect())
    }
}
