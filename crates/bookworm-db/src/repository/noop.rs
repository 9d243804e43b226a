//! # No-op Book Repository
//!
//! A [`BookRepo`] that never touches a store. Every operation succeeds with
//! an empty or neutral value, which lets transport code be wired up and
//! exercised without PostgreSQL.

use async_trait::async_trait;
use bookworm_core::{Book, Category, Filters, MetaData};

use super::BookRepo;
use crate::error::DbResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBookRepository;

#[async_trait]
impl BookRepo for NoopBookRepository {
    async fn get_all(
        &self,
        _name: &str,
        _categories: &[Category],
        _filters: &Filters,
    ) -> DbResult<(Vec<Book>, MetaData)> {
        Ok((Vec::new(), MetaData::default()))
    }

    async fn insert(&self, _book: &mut Book) -> DbResult<()> {
        Ok(())
    }

    async fn get(&self, id: i64) -> DbResult<Book> {
        Ok(Book {
            id,
            ..Book::default()
        })
    }

    async fn update(&self, _book: &Book) -> DbResult<()> {
        Ok(())
    }

    async fn delete(&self, _id: i64) -> DbResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_operation_is_neutral() {
        let repo = NoopBookRepository;

        let (books, metadata) = repo.get_all("", &[], &Filters::books()).await.unwrap();
        assert!(books.is_empty());
        assert!(metadata.is_empty());

        let mut book = Book::default();
        repo.insert(&mut book).await.unwrap();
        assert_eq!(book, Book::default());

        assert_eq!(repo.get(-4).await.unwrap().id, -4);
        repo.update(&book).await.unwrap();
        repo.delete(99).await.unwrap();
    }
}
