//! # Listing Filters
//!
//! Page, page size and sort parameters for listings, plus the pagination
//! metadata returned alongside a page.
//!
//! ## Sort Safelist
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               How a sort key becomes an ORDER BY clause                 │
//! │                                                                         │
//! │  ?sort=-author                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Filters::validate ── not in safelist? ──► "sort": "invalid sort value"│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sort_column()    → safelist entry "-author" with '-' stripped         │
//! │  sort_direction() → Descending                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ORDER BY author DESC, id ASC                                          │
//! │                                                                         │
//! │  The column text always comes from the safelist, never from the        │
//! │  request.                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::validation::{permitted_value, Validator};

/// Largest page number accepted.
pub const MAX_PAGE: i64 = 10_000_000;

/// Largest page size accepted.
pub const MAX_PAGE_SIZE: i64 = 100;

pub const DEFAULT_PAGE: i64 = 1;

pub const DEFAULT_PAGE_SIZE: i64 = 20;

pub const DEFAULT_SORT: &str = "id";

/// Sort keys accepted by the book listing.
pub const BOOK_SORT_SAFELIST: &[&str] = &[
    "id",
    "-id",
    "name",
    "-name",
    "author",
    "-author",
    "publisher",
    "-publisher",
];

// =============================================================================
// Sort Direction
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Paging and sorting for one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
    pub sort_safelist: &'static [&'static str],
}

impl Filters {
    /// Filters with the default page, page size and sort key.
    pub fn new(sort_safelist: &'static [&'static str]) -> Self {
        Filters {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort: DEFAULT_SORT.to_string(),
            sort_safelist,
        }
    }

    /// Defaults for the book listing.
    pub fn books() -> Self {
        Filters::new(BOOK_SORT_SAFELIST)
    }

    /// Checks page bounds and safelist membership.
    ///
    /// The sort key is compared verbatim; `" id"` or `"ID"` are rejected.
    pub fn validate(&self, v: &mut Validator) {
        v.check(self.page > 0, "page", "must be greater than zero");
        v.check(self.page <= MAX_PAGE, "page", "must be a maximum of 10 million");
        v.check(self.page_size > 0, "page_size", "must be greater than zero");
        v.check(self.page_size <= MAX_PAGE_SIZE, "page_size", "must be a maximum of 100");

        v.check(
            permitted_value(&self.sort.as_str(), self.sort_safelist),
            "sort",
            "invalid sort value",
        );
    }

    /// The column to order by, taken from the matching safelist entry.
    ///
    /// Fails with [`CoreError::UnsafeSortParameter`] if the key is not in
    /// the safelist. Callers are expected to have run [`Filters::validate`],
    /// so this branch indicates a bug.
    pub fn sort_column(&self) -> CoreResult<&'static str> {
        self.sort_safelist
            .iter()
            .copied()
            .find(|safe| *safe == self.sort)
            .map(|safe| safe.trim_start_matches('-'))
            .ok_or_else(|| CoreError::UnsafeSortParameter(self.sort.clone()))
    }

    /// Descending for a `-` prefixed key, ascending otherwise.
    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    #[inline]
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

// =============================================================================
// Pagination Metadata
// =============================================================================

/// Pagination details for a listing.
///
/// All fields are zero (and omitted from JSON) when nothing matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetaData {
    #[serde(skip_serializing_if = "is_zero")]
    pub current_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub page_size: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub first_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub last_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub total_records: i64,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

impl MetaData {
    /// Derives metadata from the total matching rows and the requested page.
    ///
    /// Zero records or a non-positive page size give the empty marker.
    ///
    /// ## Example
    /// ```rust
    /// use bookworm_core::MetaData;
    ///
    /// let meta = MetaData::calculate(53, 2, 20);
    /// assert_eq!(meta.last_page, 3);
    /// assert_eq!(MetaData::calculate(0, 2, 20), MetaData::default());
    /// ```
    pub fn calculate(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records <= 0 || page_size <= 0 {
            return MetaData::default();
        }

        MetaData {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: (total_records - 1) / page_size + 1,
            total_records,
        }
    }

    /// True for the "nothing matched" marker.
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(page: i64, page_size: i64, sort: &str) -> Filters {
        Filters {
            page,
            page_size,
            sort: sort.to_string(),
            sort_safelist: BOOK_SORT_SAFELIST,
        }
    }

    fn invalid_fields(f: &Filters) -> Vec<String> {
        let mut v = Validator::new();
        f.validate(&mut v);
        v.errors().fields().map(str::to_string).collect()
    }

    #[test]
    fn test_defaults_are_valid() {
        let f = Filters::books();
        assert_eq!((f.page, f.page_size, f.sort.as_str()), (1, 20, "id"));
        assert!(invalid_fields(&f).is_empty());
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(invalid_fields(&filters(0, 20, "id")), vec!["page"]);
        assert_eq!(invalid_fields(&filters(-3, 20, "id")), vec!["page"]);
        assert_eq!(invalid_fields(&filters(10_000_001, 20, "id")), vec!["page"]);
        assert!(invalid_fields(&filters(10_000_000, 20, "id")).is_empty());
    }

    #[test]
    fn test_page_size_bounds() {
        assert_eq!(invalid_fields(&filters(1, 0, "id")), vec!["page_size"]);
        assert_eq!(invalid_fields(&filters(1, 101, "id")), vec!["page_size"]);
        assert!(invalid_fields(&filters(1, 100, "id")).is_empty());
        assert!(invalid_fields(&filters(1, 1, "id")).is_empty());
    }

    #[test]
    fn test_sort_must_match_safelist_verbatim() {
        for sort in ["title", "ID", " id", "id ", "--id", "name; DROP TABLE books", ""] {
            assert_eq!(invalid_fields(&filters(1, 20, sort)), vec!["sort"], "{sort:?}");
        }
        for sort in BOOK_SORT_SAFELIST {
            assert!(invalid_fields(&filters(1, 20, sort)).is_empty());
        }
    }

    #[test]
    fn test_sort_column_and_direction() {
        let f = filters(1, 20, "-author");
        assert_eq!(f.sort_column(), Ok("author"));
        assert_eq!(f.sort_direction(), SortDirection::Descending);

        let f = filters(1, 20, "publisher");
        assert_eq!(f.sort_column(), Ok("publisher"));
        assert_eq!(f.sort_direction(), SortDirection::Ascending);
        assert_eq!(f.sort_direction().as_sql(), "ASC");
    }

    #[test]
    fn test_sort_column_outside_safelist_is_an_error() {
        let f = filters(1, 20, "created_at");
        assert_eq!(
            f.sort_column(),
            Err(CoreError::UnsafeSortParameter("created_at".to_string()))
        );
    }

    #[test]
    fn test_limit_and_offset() {
        let f = filters(3, 20, "id");
        assert_eq!(f.limit(), 20);
        assert_eq!(f.offset(), 40);
        assert_eq!(filters(1, 50, "id").offset(), 0);
    }

    #[test]
    fn test_metadata() {
        assert_eq!(
            MetaData::calculate(53, 2, 20),
            MetaData {
                current_page: 2,
                page_size: 20,
                first_page: 1,
                last_page: 3,
                total_records: 53,
            }
        );
        assert_eq!(MetaData::calculate(40, 1, 20).last_page, 2);
        assert_eq!(MetaData::calculate(1, 1, 100).last_page, 1);
    }

    #[test]
    fn test_metadata_empty_marker() {
        for (page, size) in [(1, 20), (7, 5), (0, 0)] {
            let meta = MetaData::calculate(0, page, size);
            assert!(meta.is_empty());
            assert_eq!(meta, MetaData::default());
        }
        assert_eq!(serde_json::to_string(&MetaData::default()).unwrap(), "{}");
    }

    #[test]
    fn test_metadata_never_fails() {
        assert_eq!(MetaData::calculate(5, 1, 0), MetaData::default());
        assert_eq!(MetaData::calculate(5, 1, -3), MetaData::default());
        assert_eq!(MetaData::calculate(-1, 1, 20), MetaData::default());
        assert_eq!(MetaData::calculate(i64::MAX, 1, 1).last_page, i64::MAX);
    }
}
