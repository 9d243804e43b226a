//! # Database Connection Pool
//!
//! PostgreSQL connection pool creation and repository access.
//!
//! ## Pool Sharing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request A ──► BookCatalog ──► PgBookRepository ─┐                     │
//! │  request B ──► BookCatalog ──► PgBookRepository ─┼──► PgPool ──► PG    │
//! │  request C ──► BookCatalog ──► PgBookRepository ─┘   (shared, cloned)  │
//! │                                                                         │
//! │  The pool is safe for concurrent use; repositories add no locking.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::{PgBookRepository, Repositories};

/// Main database handle providing repository access.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::from_env()?).await?;
/// let catalog = BookCatalog::new(db.repositories());
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The PostgreSQL connection pool.
    pool: PgPool,

    /// Per-operation bound handed to repositories.
    query_timeout: Duration,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the connection pool
    /// 2. Runs migrations (if enabled)
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            max_connections = config.max_connections,
            "Initializing database connection"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect(&config.database_url)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!("Database pool created");

        let db = Database::from_pool(pool, config.query_timeout);

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Wraps an existing pool (e.g. one provided by `#[sqlx::test]`).
    pub fn from_pool(pool: PgPool, query_timeout: Duration) -> Self {
        debug!(query_timeout_ms = query_timeout.as_millis() as u64, "Database handle ready");
        Database {
            pool,
            query_timeout,
        }
    }

    /// Runs database migrations.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns the PostgreSQL book repository.
    pub fn books(&self) -> PgBookRepository {
        PgBookRepository::new(self.pool.clone(), self.query_timeout)
    }

    /// Returns the repository set for the catalog layer.
    pub fn repositories(&self) -> Repositories {
        Repositories::new(self.pool.clone(), self.query_timeout)
    }

    /// Closes the database connection pool.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_pool_does_not_connect() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://nobody@127.0.0.1:1/none")
            .unwrap();
        let db = Database::from_pool(pool, Duration::from_secs(1));

        assert!(!db.health_check().await);
    }
}
