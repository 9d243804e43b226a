//! # bookworm-db: Database Layer for Bookworm
//!
//! This crate provides database access for the Bookworm catalog.
//! It uses PostgreSQL with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookworm Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (external)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    bookworm-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  BookCatalog  │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │ (catalog.rs)  │───►│  BookRepo     │    │  (embedded)  │  │   │
//! │  │   │               │    │  Pg / Noop    │    │ 001_books    │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                ▼                                │   │
//! │  │                    Database (pool.rs) · PgPool                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     PostgreSQL: books table                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Connection and timeout settings
//! - [`pool`] - Connection pool creation
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository contract and implementations
//! - [`catalog`] - Validated catalog operations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookworm_db::{BookCatalog, Database, DbConfig, ListBooksQuery};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//! let catalog = BookCatalog::new(db.repositories());
//!
//! let page = catalog.list(&ListBooksQuery::default()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{book_location, BookCatalog, BookPage, Created, ListBooksQuery};
pub use config::{ConfigError, DbConfig};
pub use error::{DbError, DbResult};
pub use pool::Database;

// Repository re-exports for convenience
pub use repository::{BookRepo, NoopBookRepository, PgBookRepository, Repositories};
