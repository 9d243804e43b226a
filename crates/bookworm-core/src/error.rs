//! # Error Types
//!
//! Domain-specific error types for bookworm-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookworm-core errors (this file)                                       │
//! │  ├── CoreError         - General domain errors                          │
//! │  └── ValidationErrors  - Field name → first failure message            │
//! │                                                                         │
//! │  bookworm-db errors (separate crate)                                    │
//! │  └── DbError           - Not found, timeouts, store failures            │
//! │                                                                         │
//! │  Flow: Validator → ValidationErrors → CoreError → DbError → transport  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (label, sort key, etc.)
//! 3. Errors are enum variants, never String

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core catalog errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A category label did not match any known category.
    ///
    /// ## When This Occurs
    /// - Strict decoding of a request body (`"type": ["Fiction"]`)
    /// - `Category::decode` / `str::parse::<Category>()`
    ///
    /// Listing filters never produce this; they parse labels permissively.
    #[error("invalid book type format: {0:?}")]
    InvalidCategoryFormat(String),

    /// A stored category code was not an integer token.
    #[error("incompatible storage value for book type: {0:?}")]
    IncompatibleStorageValue(String),

    /// A sort key reached SQL generation without being in the safelist.
    ///
    /// Filter validation rejects these first, so this is a programming
    /// error and never a user-facing outcome.
    #[error("unsafe sort parameter: {0}")]
    UnsafeSortParameter(String),

    /// One or more fields failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

impl CoreError {
    /// True for outcomes caused by caller input rather than a bug.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, CoreError::UnsafeSortParameter(_))
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Field-level validation failures, keyed by field name.
///
/// Only the first message recorded for a field is kept. Serializes as a
/// plain JSON object, e.g. `{"name": "must be provided"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless the field already has one.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Returns the message recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Names of all failing fields.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field} {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidCategoryFormat("Fiction".to_string());
        assert_eq!(err.to_string(), "invalid book type format: \"Fiction\"");

        let err = CoreError::UnsafeSortParameter("title; DROP TABLE books".to_string());
        assert_eq!(
            err.to_string(),
            "unsafe sort parameter: title; DROP TABLE books"
        );
    }

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("type", "must contain at least 1 type");
        errors.add("type", "must not contain duplicate values");
        errors.add("name", "must be provided");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("type"), Some("must contain at least 1 type"));
        assert_eq!(
            errors.to_string(),
            "name must be provided; type must contain at least 1 type"
        );
    }

    #[test]
    fn test_validation_errors_serialize_as_object() {
        let mut errors = ValidationErrors::new();
        errors.add("page", "must be greater than zero");

        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"page":"must be greater than zero"}"#);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "must be provided");
        let core_err: CoreError = errors.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert!(core_err.is_user_facing());
        assert!(!CoreError::UnsafeSortParameter("x".into()).is_user_facing());
    }
}
