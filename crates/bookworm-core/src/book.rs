//! # Book Types
//!
//! The book record and the payloads that create or change it.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Book Types                                      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    NewBook      │   │      Book       │   │   BookPatch     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  create/replace │──►│  id (store)     │◄──│  every field    │       │
//! │  │  every field    │   │  created_at     │   │  optional       │       │
//! │  │  required       │   │  name, author…  │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `id` and `created_at` are assigned by the store and never taken from a
//! payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::validation::{unique, Validator};

/// Maximum number of categories a book can carry.
pub const MAX_BOOK_CATEGORIES: usize = 3;

// =============================================================================
// Book
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Book {
    /// Assigned by the store on insert.
    pub id: i64,

    pub name: String,

    pub author: String,

    pub publisher: String,

    /// Image reference (URL or storage key).
    pub image: String,

    /// Optional cover image; empty when absent.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cover_image: String,

    /// Between one and three distinct categories.
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,

    /// Assigned by the store on insert. Not part of the JSON representation.
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// Runs every field check, recording failures in `v`.
    ///
    /// ## Rules
    /// - name, author, publisher, image must be non-empty
    /// - 1 to 3 categories, no duplicates
    pub fn validate(&self, v: &mut Validator) {
        v.check(!self.name.is_empty(), "name", "must be provided");
        v.check(!self.author.is_empty(), "author", "must be provided");
        v.check(!self.publisher.is_empty(), "publisher", "must be provided");
        v.check(!self.image.is_empty(), "image", "must be provided");

        v.check(!self.categories.is_empty(), "type", "must contain at least 1 type");
        v.check(
            self.categories.len() <= MAX_BOOK_CATEGORIES,
            "type",
            "must not contain more than 3 types",
        );
        v.check(unique(&self.categories), "type", "must not contain duplicate values");
    }

    /// Overwrites every mutable field with the payload's values.
    pub fn replace_with(&mut self, input: NewBook) {
        self.name = input.name;
        self.author = input.author;
        self.publisher = input.publisher;
        self.image = input.image;
        self.cover_image = input.cover_image;
        self.categories = input.categories.unwrap_or_default();
    }

    /// Overwrites only the fields present in the patch.
    pub fn apply_patch(&mut self, patch: BookPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(publisher) = patch.publisher {
            self.publisher = publisher;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(cover_image) = patch.cover_image {
            self.cover_image = cover_image;
        }
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
    }
}

impl From<NewBook> for Book {
    fn from(input: NewBook) -> Self {
        let mut book = Book::default();
        book.replace_with(input);
        book
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// Full payload for creating or replacing a book.
///
/// Category labels are decoded strictly: an unknown label fails
/// deserialization of the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewBook {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub publisher: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub cover_image: String,

    /// `None` when the payload carried no `type` at all.
    #[serde(rename = "type", default)]
    pub categories: Option<Vec<Category>>,
}

impl NewBook {
    /// Checks what only the raw payload can tell: whether `type` was sent.
    ///
    /// Run before [`Book::validate`] on the converted book so a missing
    /// list reports "must be provided" rather than a length error.
    pub fn validate(&self, v: &mut Validator) {
        v.check(self.categories.is_some(), "type", "must be provided");
    }
}

/// Partial update; absent (or `null`) fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookPatch {
    pub name: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub image: Option<String>,
    pub cover_image: Option<String>,
    #[serde(rename = "type")]
    pub categories: Option<Vec<Category>>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_book() -> Book {
        Book {
            id: 0,
            name: "The Sealed Nectar".to_string(),
            author: "Safiur Rahman Mubarakpuri".to_string(),
            publisher: "Darussalam".to_string(),
            image: "nectar.jpg".to_string(),
            cover_image: String::new(),
            categories: vec![Category::Islamic],
            created_at: DateTime::<Utc>::default(),
        }
    }

    fn errors_for(book: &Book) -> Vec<String> {
        let mut v = Validator::new();
        book.validate(&mut v);
        v.errors().fields().map(str::to_string).collect()
    }

    #[test]
    fn test_valid_book() {
        assert!(errors_for(&valid_book()).is_empty());

        let mut book = valid_book();
        book.categories = vec![Category::Islamic, Category::ComparativeReligion];
        assert!(errors_for(&book).is_empty());
    }

    #[test]
    fn test_each_required_field_reports_only_itself() {
        let clear: [(&str, fn(&mut Book)); 4] = [
            ("name", |b| b.name.clear()),
            ("author", |b| b.author.clear()),
            ("publisher", |b| b.publisher.clear()),
            ("image", |b| b.image.clear()),
        ];

        for (field, clear_field) in clear {
            let mut book = valid_book();
            clear_field(&mut book);
            assert_eq!(errors_for(&book), vec![field.to_string()]);
        }
    }

    #[test]
    fn test_category_rules() {
        let mut book = valid_book();
        book.categories.clear();
        let mut v = Validator::new();
        book.validate(&mut v);
        assert_eq!(v.errors().get("type"), Some("must contain at least 1 type"));
        assert_eq!(v.errors().len(), 1);

        book.categories = vec![Category::Islamic, Category::Islamic];
        let mut v = Validator::new();
        book.validate(&mut v);
        assert_eq!(v.errors().get("type"), Some("must not contain duplicate values"));

        book.categories = vec![
            Category::Islamic,
            Category::ComparativeReligion,
            Category::Islamic,
            Category::ComparativeReligion,
        ];
        let mut v = Validator::new();
        book.validate(&mut v);
        assert_eq!(v.errors().get("type"), Some("must not contain more than 3 types"));
    }

    #[test]
    fn test_all_violations_reported_together() {
        let book = Book::default();
        assert_eq!(
            errors_for(&book),
            vec!["author", "image", "name", "publisher", "type"]
        );
    }

    #[test]
    fn test_serialize_skips_timestamp_and_empty_optionals() {
        let mut book = valid_book();
        book.id = 7;
        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["type"], serde_json::json!(["Islamic"]));
        assert!(json.get("created_at").is_none());
        assert!(json.get("cover_image").is_none());
    }

    #[test]
    fn test_new_book_decoding_is_strict() {
        let input: NewBook = serde_json::from_str(
            r#"{"name":"A","author":"B","publisher":"C","image":"d.png","type":["Islamic"]}"#,
        )
        .unwrap();
        assert_eq!(input.categories, Some(vec![Category::Islamic]));

        let err =
            serde_json::from_str::<NewBook>(r#"{"name":"A","type":["islamic"]}"#).unwrap_err();
        assert!(err.to_string().contains("invalid book type format"));
    }

    #[test]
    fn test_missing_type_must_be_provided() {
        let input: NewBook =
            serde_json::from_str(r#"{"name":"A","author":"B","publisher":"C","image":"d"}"#)
                .unwrap();
        assert_eq!(input.categories, None);

        let mut v = Validator::new();
        input.validate(&mut v);
        Book::from(input).validate(&mut v);
        assert_eq!(v.errors().get("type"), Some("must be provided"));
        assert_eq!(v.errors().len(), 1);

        let input: NewBook = serde_json::from_str(
            r#"{"name":"A","author":"B","publisher":"C","image":"d","type":[]}"#,
        )
        .unwrap();
        let mut v = Validator::new();
        input.validate(&mut v);
        Book::from(input).validate(&mut v);
        assert_eq!(v.errors().get("type"), Some("must contain at least 1 type"));
    }

    #[test]
    fn test_apply_patch_only_touches_present_fields() {
        let mut book = valid_book();
        let patch: BookPatch =
            serde_json::from_str(r#"{"author":"Someone Else","cover_image":null}"#).unwrap();
        book.apply_patch(patch);

        assert_eq!(book.author, "Someone Else");
        assert_eq!(book.name, "The Sealed Nectar");
        assert_eq!(book.categories, vec![Category::Islamic]);
    }

    #[test]
    fn test_replace_with_keeps_identity() {
        let mut book = valid_book();
        book.id = 42;
        let created_at = book.created_at;

        book.replace_with(NewBook {
            name: "New".into(),
            categories: Some(vec![Category::ComparativeReligion]),
            ..NewBook::default()
        });

        assert_eq!(book.id, 42);
        assert_eq!(book.created_at, created_at);
        assert_eq!(book.name, "New");
        assert!(book.author.is_empty());
    }
}
