//! # Validation Module
//!
//! The field-error accumulator shared by every validated entity.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  └── Unknown category labels rejected outright                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Every check runs, no short-circuit                                │
//! │  └── First failing message per field is kept                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (PostgreSQL)                                        │
//! │  └── NOT NULL constraints                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `Validator` is created per request and never shared.
//!
//! ## Usage
//! ```rust
//! use bookworm_core::validation::{permitted_value, Validator};
//!
//! let mut v = Validator::new();
//! v.check(!"".is_empty(), "name", "must be provided");
//! v.check(permitted_value(&"id", &["id", "-id"]), "sort", "invalid sort value");
//!
//! assert!(!v.valid());
//! assert_eq!(v.errors().get("name"), Some("must be provided"));
//! ```

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::ValidationErrors;

/// Accumulates named field errors.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no errors have been recorded.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records an error for `field` unless it already has one.
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.add(field, message);
    }

    /// Records `message` for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Consumes the validator, yielding `Err` if anything failed.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

// =============================================================================
// Predicates
// =============================================================================

/// Returns true if `value` is one of `permitted`.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.iter().any(|p| p == value)
}

/// Returns true if no element of `values` appears twice.
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(v))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_records_only_failures() {
        let mut v = Validator::new();
        v.check(true, "name", "must be provided");
        assert!(v.valid());

        v.check(false, "author", "must be provided");
        assert!(!v.valid());
        assert_eq!(v.errors().get("author"), Some("must be provided"));
        assert_eq!(v.errors().get("name"), None);
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let mut v = Validator::new();
        v.check(false, "type", "must be provided");
        v.check(false, "type", "must contain at least 1 type");

        assert_eq!(v.errors().len(), 1);
        assert_eq!(v.errors().get("type"), Some("must be provided"));
    }

    #[test]
    fn test_finish() {
        assert!(Validator::new().finish().is_ok());

        let mut v = Validator::new();
        v.add_error("page", "must be greater than zero");
        let errors = v.finish().unwrap_err();
        assert_eq!(errors.get("page"), Some("must be greater than zero"));
    }

    #[test]
    fn test_permitted_value() {
        let safelist = ["id", "-id", "name"];
        assert!(permitted_value(&"-id", &safelist));
        assert!(!permitted_value(&"ID", &safelist));
        assert!(!permitted_value(&" id", &safelist));
        assert!(!permitted_value(&"x", &[]));
    }

    #[test]
    fn test_unique() {
        assert!(unique::<i32>(&[]));
        assert!(unique(&[1, 2, 3]));
        assert!(!unique(&[1, 2, 1]));
        assert!(!unique(&["a", "a"]));
    }
}
