//! # Book Catalog Operations
//!
//! The entry points a transport (HTTP, CLI, …) calls. Each one validates
//! before touching the store and returns typed outcomes.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Operations                                   │
//! │                                                                         │
//! │  list    ─► parse labels (lenient) ─► Filters::validate ─► get_all     │
//! │  create  ─► Book::validate ─► insert ─► Created { book, location }     │
//! │  show    ─► get                                                         │
//! │  replace ─► get ─► overwrite all fields ─► Book::validate ─► update    │
//! │  patch   ─► get ─► overwrite present fields ─► Book::validate ─► update│
//! │  delete  ─► delete                                                      │
//! │                                                                         │
//! │  Validation failures never reach the store.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Limitation
//! `replace` and `patch` read then write without a version check. Two
//! concurrent edits of one book are last-write-wins, and a book deleted
//! between the read and the write is not reported.

use bookworm_core::filters::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT};
use bookworm_core::{Book, BookPatch, Category, CoreError, Filters, MetaData, NewBook, Validator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::DbResult;
use crate::repository::Repositories;

/// Listing parameters as they arrive from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListBooksQuery {
    /// Name match; empty matches everything.
    pub name: String,

    /// Category labels, parsed leniently. Unknown labels are ignored.
    #[serde(rename = "type")]
    pub categories: Vec<String>,

    pub page: Option<i64>,

    pub page_size: Option<i64>,

    pub sort: Option<String>,
}

impl ListBooksQuery {
    /// Book filters with defaults filled in.
    pub fn filters(&self) -> Filters {
        Filters {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort: self.sort.clone().unwrap_or_else(|| DEFAULT_SORT.to_string()),
            ..Filters::books()
        }
    }
}

/// One page of books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub metadata: MetaData,
}

/// A freshly stored book and where it can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Created {
    pub book: Book,
    pub location: String,
}

/// Canonical resource path for a book.
pub fn book_location(id: i64) -> String {
    format!("/v1/books/{id}")
}

/// Catalog operations over a set of repositories.
#[derive(Debug, Clone)]
pub struct BookCatalog {
    repos: Repositories,
}

impl BookCatalog {
    pub fn new(repos: Repositories) -> Self {
        BookCatalog { repos }
    }

    /// Lists one page of books matching the query.
    pub async fn list(&self, query: &ListBooksQuery) -> DbResult<BookPage> {
        let categories = Category::parse_labels(&query.categories);
        let filters = query.filters();

        let mut v = Validator::new();
        filters.validate(&mut v);
        v.finish().map_err(CoreError::from)?;

        let (books, metadata) = self
            .repos
            .books
            .get_all(&query.name, &categories, &filters)
            .await?;

        Ok(BookPage { books, metadata })
    }

    /// Validates and stores a new book.
    pub async fn create(&self, input: NewBook) -> DbResult<Created> {
        let mut v = Validator::new();
        input.validate(&mut v);
        let mut book = Book::from(input);
        validate(&book, v)?;

        self.repos.books.insert(&mut book).await?;
        info!(id = book.id, "Book created");

        Ok(Created {
            location: book_location(book.id),
            book,
        })
    }

    pub async fn show(&self, id: i64) -> DbResult<Book> {
        self.repos.books.get(id).await
    }

    /// Replaces every mutable field of an existing book.
    pub async fn replace(&self, id: i64, input: NewBook) -> DbResult<Book> {
        let mut v = Validator::new();
        input.validate(&mut v);

        let mut book = self.repos.books.get(id).await?;
        book.replace_with(input);
        self.save(book, v).await
    }

    /// Changes only the fields present in `patch`.
    pub async fn patch(&self, id: i64, patch: BookPatch) -> DbResult<Book> {
        let mut book = self.repos.books.get(id).await?;
        book.apply_patch(patch);
        self.save(book, Validator::new()).await
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        self.repos.books.delete(id).await?;
        info!(id, "Book deleted");
        Ok(())
    }

    async fn save(&self, book: Book, v: Validator) -> DbResult<Book> {
        validate(&book, v)?;
        self.repos.books.update(&book).await?;
        debug!(id = book.id, "Book updated");
        Ok(book)
    }
}

/// Adds the book's field checks to `v` and fails on any recorded error.
fn validate(book: &Book, mut v: Validator) -> DbResult<()> {
    book.validate(&mut v);
    v.finish().map_err(CoreError::from)?;
    Ok(())
}
