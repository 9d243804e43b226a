//! # Repository Module
//!
//! Data-access contracts and their implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  BookCatalog (catalog.rs)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<dyn BookRepo>  ← the contract                                      │
//! │       │                                                                 │
//! │       ├── PgBookRepository    → PostgreSQL, bounded by a query timeout  │
//! │       └── NoopBookRepository  → neutral results, no store needed        │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                        │
//! │  • Transport code can be composed without a live database              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`PgBookRepository`] - Book CRUD and filtered listing
//! - [`NoopBookRepository`] - Store-less stand-in

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bookworm_core::{Book, Category, Filters, MetaData};
use sqlx::PgPool;
use tracing::warn;

use crate::error::{DbError, DbResult};

pub mod book;
pub mod noop;

pub use book::PgBookRepository;
pub use noop::NoopBookRepository;

/// Storage contract for books.
#[async_trait]
pub trait BookRepo: Send + Sync + Debug {
    /// Lists books whose name matches `name` (all when empty) and whose
    /// categories include every entry of `categories` (all when empty).
    ///
    /// Returns one page ordered by the filter's sort key then by ID, with
    /// metadata computed from the full filtered count.
    async fn get_all(
        &self,
        name: &str,
        categories: &[Category],
        filters: &Filters,
    ) -> DbResult<(Vec<Book>, MetaData)>;

    /// Persists a new book, filling in `id` and `created_at`.
    async fn insert(&self, book: &mut Book) -> DbResult<()>;

    /// Fetches one book. IDs below 1 are `NotFound` without a query.
    async fn get(&self, id: i64) -> DbResult<Book>;

    /// Overwrites every mutable column of the row with `book.id`.
    ///
    /// There is no version check: concurrent updates are last-write-wins,
    /// and a row deleted since it was read is not reported.
    async fn update(&self, book: &Book) -> DbResult<()>;

    /// Removes a book; `NotFound` if no row was deleted.
    async fn delete(&self, id: i64) -> DbResult<()>;
}

/// The set of repositories handed to the catalog layer.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub books: Arc<dyn BookRepo>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing `pool`.
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Repositories {
            books: Arc::new(PgBookRepository::new(pool, query_timeout)),
        }
    }

    /// Repositories that never touch a store.
    pub fn noop() -> Self {
        Repositories {
            books: Arc::new(NoopBookRepository),
        }
    }

    /// Wraps an arbitrary, possibly shared, book repository.
    pub fn with_books(books: Arc<dyn BookRepo>) -> Self {
        Repositories { books }
    }
}

/// Runs a query future, failing with [`DbError::Timeout`] once `limit` has
/// elapsed.
pub(crate) async fn with_timeout<T, F>(
    limit: Duration,
    operation: &'static str,
    op: F,
) -> DbResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, op).await {
        Ok(result) => result.map_err(DbError::from),
        Err(_) => {
            warn!(operation, timeout_ms = limit.as_millis() as u64, "Query timed out");
            Err(DbError::Timeout(limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_passes_result_through() {
        let value = with_timeout(Duration::from_secs(1), "test", async { Ok::<_, sqlx::Error>(5) })
            .await
            .unwrap();
        assert_eq!(value, 5);
    }

    #[tokio::test]
    async fn test_with_timeout_maps_driver_errors() {
        let result: DbResult<()> = with_timeout(Duration::from_secs(1), "test", async {
            Err(sqlx::Error::PoolTimedOut)
        })
        .await;
        assert!(matches!(result, Err(DbError::PoolExhausted)));
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result: DbResult<()> = with_timeout(Duration::from_millis(10), "test", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, sqlx::Error>(())
        })
        .await;

        assert!(matches!(result, Err(DbError::Timeout(d)) if d == Duration::from_millis(10)));
    }
}
