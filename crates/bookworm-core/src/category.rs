//! # Book Categories
//!
//! The closed set of categories a book can carry.
//!
//! ## Representations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Category, Three Forms                            │
//! │                                                                         │
//! │  JSON / query string      Rust                    PostgreSQL            │
//! │  ───────────────────      ────                    ──────────            │
//! │  "Islamic"            ◄─► Category::Islamic   ◄─► 1   (in int4[])       │
//! │  "Comparative Religion"◄─►Category::Compar..  ◄─► 2                     │
//! │                                                                         │
//! │  Code 0 is reserved: it means "no category" and is never stored.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Strict vs Permissive Decoding
//! - [`Category::decode`] (and `Deserialize`, `FromStr`) is for request bodies.
//!   Unknown labels fail with [`CoreError::InvalidCategoryFormat`].
//! - [`Category::parse_label`] is for listing filters. It title-cases the input
//!   first and yields `None` for anything unknown, so `?type=islamic,foo`
//!   still filters on `Islamic`.
//!
//! Codes read from storage that are outside the known set are dropped by
//! [`Category::from_codes`] rather than failing the whole row.

use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};

/// A book category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum Category {
    Islamic = 1,
    ComparativeReligion = 2,
}

impl Category {
    /// Every category, in code order.
    pub const ALL: [Category; 2] = [Category::Islamic, Category::ComparativeReligion];

    /// The integer persisted in the `types` column.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// The canonical external label.
    pub const fn label(self) -> &'static str {
        match self {
            Category::Islamic => "Islamic",
            Category::ComparativeReligion => "Comparative Religion",
        }
    }

    /// Maps a stored code back to a category. Unknown codes yield `None`.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Category::Islamic),
            2 => Some(Category::ComparativeReligion),
            _ => None,
        }
    }

    /// Label for a raw code; empty for anything outside the known set.
    pub fn label_of(code: i32) -> &'static str {
        Category::from_code(code).map_or("", Category::label)
    }

    /// Strict decoding of an external label.
    ///
    /// ## Example
    /// ```rust
    /// use bookworm_core::Category;
    ///
    /// assert_eq!(Category::decode("Islamic").unwrap(), Category::Islamic);
    /// assert!(Category::decode("islamic").is_err());
    /// ```
    pub fn decode(label: &str) -> CoreResult<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == label)
            .ok_or_else(|| CoreError::InvalidCategoryFormat(label.to_string()))
    }

    /// Permissive parsing for query parameters.
    ///
    /// The first letter of every word is upper-cased before comparison,
    /// the rest of the text is left alone.
    ///
    /// ## Example
    /// ```rust
    /// use bookworm_core::Category;
    ///
    /// assert_eq!(
    ///     Category::parse_label("comparative religion"),
    ///     Some(Category::ComparativeReligion)
    /// );
    /// assert_eq!(Category::parse_label("fiction"), None);
    /// ```
    pub fn parse_label(text: &str) -> Option<Self> {
        let normalized = title_case(text);
        Category::ALL.into_iter().find(|c| c.label() == normalized)
    }

    /// Permissive parsing that yields the raw code, `0` when nothing matches.
    ///
    /// Never fails; callers wanting a strict set filter out the zeros.
    pub fn parse_label_code(text: &str) -> i32 {
        Category::parse_label(text).map_or(0, Category::code)
    }

    /// Permissively parses many labels, discarding the ones that don't match.
    pub fn parse_labels<I, S>(labels: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .filter_map(|l| Category::parse_label(l.as_ref()))
            .collect()
    }

    /// Parses a textual integer as produced by the storage driver.
    ///
    /// Returns the raw code, which may be outside the known set; pair with
    /// [`Category::from_code`] to resolve it.
    pub fn scan_from_storage(raw: &[u8]) -> CoreResult<i32> {
        let incompatible =
            || CoreError::IncompatibleStorageValue(String::from_utf8_lossy(raw).into_owned());

        let text = std::str::from_utf8(raw).map_err(|_| incompatible())?;
        text.trim().parse::<i32>().map_err(|_| incompatible())
    }

    /// Resolves stored codes, dropping unknown ones.
    pub fn from_codes(codes: &[i32]) -> Vec<Self> {
        codes.iter().copied().filter_map(Category::from_code).collect()
    }

    /// Codes for persisting a category list.
    pub fn to_codes(categories: &[Category]) -> Vec<i32> {
        categories.iter().map(|c| c.code()).collect()
    }
}

/// Upper-cases the first letter of each word, leaving other letters as-is.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        word_start = !(c.is_alphanumeric() || c == '\'');
    }
    out
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::decode(s)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Category::decode(&label).map_err(de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for category in Category::ALL {
            let code = category.code();
            assert_eq!(Category::decode(Category::label_of(code)).unwrap().code(), code);
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(Category::Islamic.code(), 1);
        assert_eq!(Category::ComparativeReligion.code(), 2);
        assert_eq!(Category::from_code(0), None);
        assert_eq!(Category::from_code(3), None);
    }

    #[test]
    fn test_label_of_unknown_code_is_empty() {
        assert_eq!(Category::label_of(1), "Islamic");
        assert_eq!(Category::label_of(0), "");
        assert_eq!(Category::label_of(-7), "");
        assert_eq!(Category::label_of(99), "");
    }

    #[test]
    fn test_decode_is_strict() {
        for bad in ["", "islamic", "ISLAMIC", " Islamic", "Comparative religion", "Fiction"] {
            assert_eq!(
                Category::decode(bad),
                Err(CoreError::InvalidCategoryFormat(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!("Comparative Religion".parse::<Category>(), Ok(Category::ComparativeReligion));
    }

    #[test]
    fn test_parse_label_is_permissive() {
        assert_eq!(Category::parse_label("islamic"), Some(Category::Islamic));
        assert_eq!(Category::parse_label("Islamic"), Some(Category::Islamic));
        assert_eq!(
            Category::parse_label("comparative religion"),
            Some(Category::ComparativeReligion)
        );
        // Only word starts are changed, so shouting doesn't match.
        assert_eq!(Category::parse_label("ISLAMIC"), None);
        assert_eq!(Category::parse_label(""), None);
        assert_eq!(Category::parse_label("poetry"), None);
    }

    #[test]
    fn test_parse_label_code_is_total() {
        assert_eq!(Category::parse_label_code("islamic"), 1);
        assert_eq!(Category::parse_label_code("comparative religion"), 2);
        for text in ["", "poetry", "ISLAMIC", "  ", "1"] {
            assert_eq!(Category::parse_label_code(text), 0, "{text:?}");
        }
    }

    #[test]
    fn test_parse_labels_drops_unknown() {
        let parsed = Category::parse_labels(["islamic", "sci-fi", "comparative religion", ""]);
        assert_eq!(parsed, vec![Category::Islamic, Category::ComparativeReligion]);
        assert!(Category::parse_labels(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_scan_from_storage() {
        assert_eq!(Category::scan_from_storage(b"1"), Ok(1));
        assert_eq!(Category::scan_from_storage(b" 2 \n"), Ok(2));
        assert_eq!(Category::scan_from_storage(b"7"), Ok(7));
        assert!(matches!(
            Category::scan_from_storage(b"one"),
            Err(CoreError::IncompatibleStorageValue(_))
        ));
        assert!(Category::scan_from_storage(b"").is_err());
        assert!(Category::scan_from_storage(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_from_codes_filters_unknown() {
        assert_eq!(
            Category::from_codes(&[2, 0, 5, 1]),
            vec![Category::ComparativeReligion, Category::Islamic]
        );
        assert_eq!(Category::to_codes(&[Category::ComparativeReligion]), vec![2]);
    }

    #[test]
    fn test_serde() {
        let json =
            serde_json::to_string(&vec![Category::Islamic, Category::ComparativeReligion]).unwrap();
        assert_eq!(json, r#"["Islamic","Comparative Religion"]"#);

        let parsed: Vec<Category> = serde_json::from_str(r#"["Comparative Religion"]"#).unwrap();
        assert_eq!(parsed, vec![Category::ComparativeReligion]);

        let err = serde_json::from_str::<Category>(r#""History""#).unwrap_err();
        assert!(err.to_string().contains("invalid book type format"));
    }
}
