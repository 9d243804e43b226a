//! # Book Repository
//!
//! PostgreSQL implementation of [`BookRepo`].
//!
//! ## Listing Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a listing is built                               │
//! │                                                                         │
//! │  name = "hadith", categories = [Islamic], sort = "-name", page 2 × 20 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT count(*) OVER(), id, …, types FROM books                       │
//! │  WHERE (to_tsvector('simple', name) @@ plainto_tsquery('simple', $1)   │
//! │         OR $1 = '')                                                    │
//! │    AND (types @> $2 OR cardinality($2) = 0)                            │
//! │  ORDER BY name DESC, id ASC          ← column from the safelist        │
//! │  LIMIT $3 OFFSET $4                  ← 20, 20                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  count(*) OVER() is taken before LIMIT, so every row carries the       │
//! │  total for the whole filtered set → MetaData::calculate                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call is wrapped in the configured query timeout.

use std::time::Duration;

use async_trait::async_trait;
use bookworm_core::{Book, Category, Filters, MetaData};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;

use super::{with_timeout, BookRepo};
use crate::error::{DbError, DbResult};

/// Row shape of the `books` table.
#[derive(Debug, FromRow)]
struct BookRow {
    id: i64,
    created_at: DateTime<Utc>,
    name: String,
    author: String,
    publisher: String,
    image: String,
    cover_image: String,
    types: Vec<i32>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            name: row.name,
            author: row.author,
            publisher: row.publisher,
            image: row.image,
            cover_image: row.cover_image,
            categories: Category::from_codes(&row.types),
            created_at: row.created_at,
        }
    }
}

/// A listing row: the book plus the window count of the filtered set.
#[derive(Debug, FromRow)]
struct CountedBookRow {
    total_records: i64,
    #[sqlx(flatten)]
    book: BookRow,
}

/// Repository for book database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = PgBookRepository::new(pool, Duration::from_secs(3));
///
/// let mut book = Book::from(new_book);
/// repo.insert(&mut book).await?;
/// let fetched = repo.get(book.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PgBookRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgBookRepository {
    /// Creates a new PgBookRepository.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        PgBookRepository { pool, timeout }
    }

    /// Counts all books (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        with_timeout(
            self.timeout,
            "count_books",
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books").fetch_one(&self.pool),
        )
        .await
    }
}

#[async_trait]
impl BookRepo for PgBookRepository {
    async fn get_all(
        &self,
        name: &str,
        categories: &[Category],
        filters: &Filters,
    ) -> DbResult<(Vec<Book>, MetaData)> {
        let column = filters.sort_column()?;
        let direction = filters.sort_direction().as_sql();

        debug!(
            name = %name,
            categories = ?categories,
            sort = %filters.sort,
            page = filters.page,
            page_size = filters.page_size,
            "Listing books"
        );

        let query = format!(
            r#"
            SELECT
                count(*) OVER() AS total_records,
                id, created_at, name, author, publisher, image, cover_image, types
            FROM books
            WHERE (to_tsvector('simple', name) @@ plainto_tsquery('simple', $1) OR $1 = '')
            AND (types @> $2 OR cardinality($2) = 0)
            ORDER BY {column} {direction}, id ASC
            LIMIT $3 OFFSET $4
            "#
        );

        let rows = with_timeout(
            self.timeout,
            "list_books",
            sqlx::query_as::<_, CountedBookRow>(&query)
                .bind(name)
                .bind(Category::to_codes(categories))
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(&self.pool),
        )
        .await?;

        let total_records = rows.first().map_or(0, |row| row.total_records);
        let books: Vec<Book> = rows.into_iter().map(|row| row.book.into()).collect();
        let metadata = MetaData::calculate(total_records, filters.page, filters.page_size);

        debug!(count = books.len(), total_records, "Listing returned books");
        Ok((books, metadata))
    }

    async fn insert(&self, book: &mut Book) -> DbResult<()> {
        debug!(name = %book.name, "Inserting book");

        let (id, created_at) = with_timeout(
            self.timeout,
            "insert_book",
            sqlx::query_as::<_, (i64, DateTime<Utc>)>(
                r#"
                INSERT INTO books (name, author, publisher, image, cover_image, types)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, created_at
                "#,
            )
            .bind(&book.name)
            .bind(&book.author)
            .bind(&book.publisher)
            .bind(&book.image)
            .bind(&book.cover_image)
            .bind(Category::to_codes(&book.categories))
            .fetch_one(&self.pool),
        )
        .await?;

        book.id = id;
        book.created_at = created_at;
        Ok(())
    }

    async fn get(&self, id: i64) -> DbResult<Book> {
        if id < 1 {
            return Err(DbError::not_found("Book", id));
        }

        debug!(id, "Fetching book");

        let row = with_timeout(
            self.timeout,
            "get_book",
            sqlx::query_as::<_, BookRow>(
                r#"
                SELECT id, created_at, name, author, publisher, image, cover_image, types
                FROM books
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool),
        )
        .await?;

        row.map(Book::from)
            .ok_or_else(|| DbError::not_found("Book", id))
    }

    async fn update(&self, book: &Book) -> DbResult<()> {
        debug!(id = book.id, "Updating book");

        with_timeout(
            self.timeout,
            "update_book",
            sqlx::query(
                r#"
                UPDATE books SET
                    name = $1,
                    author = $2,
                    publisher = $3,
                    image = $4,
                    cover_image = $5,
                    types = $6
                WHERE id = $7
                "#,
            )
            .bind(&book.name)
            .bind(&book.author)
            .bind(&book.publisher)
            .bind(&book.image)
            .bind(&book.cover_image)
            .bind(Category::to_codes(&book.categories))
            .bind(book.id)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting book");

        let rows_affected = with_timeout(
            self.timeout,
            "delete_book",
            sqlx::query("DELETE FROM books WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(DbError::not_found("Book", id));
        }

        Ok(())
    }
}
