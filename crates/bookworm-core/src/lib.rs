//! # bookworm-core: Pure Catalog Logic for Bookworm
//!
//! This crate holds the book catalog's domain rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookworm Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP layer (external)                        │   │
//! │  │     GET /v1/books  POST /v1/books  PATCH /v1/books/:id  …       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bookworm-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ category  │  │   book    │  │  filters  │  │ validation│  │   │
//! │  │   │ labels ↔  │  │  Book     │  │  paging   │  │ Validator │  │   │
//! │  │   │ codes     │  │  payloads │  │  MetaData │  │ field map │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  bookworm-db (Database Layer)                   │   │
//! │  │          PostgreSQL queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`category`] - The closed category set and its label/code mappings
//! - [`book`] - Book record, create/replace payload, partial patch
//! - [`filters`] - Page/sort filters and pagination metadata
//! - [`validation`] - Field error accumulator
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bookworm_core::{Book, Category, Filters, Validator};
//!
//! let book = Book {
//!     name: "The Sealed Nectar".into(),
//!     author: "Safiur Rahman Mubarakpuri".into(),
//!     publisher: "Darussalam".into(),
//!     image: "nectar.jpg".into(),
//!     categories: vec![Category::Islamic],
//!     ..Book::default()
//! };
//!
//! let mut v = Validator::new();
//! book.validate(&mut v);
//! Filters::books().validate(&mut v);
//! assert!(v.valid());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod book;
pub mod category;
pub mod error;
pub mod filters;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use book::{Book, BookPatch, NewBook, MAX_BOOK_CATEGORIES};
pub use category::Category;
pub use error::{CoreError, CoreResult, ValidationErrors};
pub use filters::{Filters, MetaData, SortDirection, BOOK_SORT_SAFELIST};
pub use validation::Validator;
