//! Database connection management

use std::sync::Arc;
use std::time::Duration;
use sqlx::{Pool, Postgres};
use crate::config::{DatabaseConfig, StorageBackend};
use crate::utils::errors::EventBotError;
use super::store::{DocumentStore, InMemoryDocumentStore, PgDocumentStore};

pub type DatabasePool = Pool<Postgres>;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, EventBotError> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(Some(IDLE_TIMEOUT))
        .max_lifetime(Some(MAX_LIFETIME))
        .connect(&config.url)
        .await?;

    // Test the connection
    health_check(&pool).await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), EventBotError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &DatabasePool) -> Result<(), EventBotError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await?;

    Ok(())
}

/// Build the document store selected by configuration
pub async fn open_document_store(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, EventBotError> {
    match config.backend {
        StorageBackend::Postgres => {
            let pool = create_pool(config).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory document store, data will not survive a restart");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_needs_no_database() {
        let config = DatabaseConfig {
            backend: StorageBackend::Memory,
            url: String::new(),
            ..DatabaseConfig::default()
        };
        let store = open_document_store(&config).await.unwrap();
        assert!(store.get("events", "missing").await.unwrap().is_none());
    }
}
