//! Catalog-level types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One document entry of the RFC index catalog.
///
/// Created once by the catalog parser and never mutated afterwards. Optional
/// attributes are present only if their bracketed tag appeared in the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Identifier token as written in the catalog (e.g. `RFC20`)
    pub name: String,

    /// Document title
    pub title: String,

    /// Author list, free text
    pub authors: String,

    /// Publication date, free text (e.g. `January 1970`)
    pub date: String,

    /// Available formats (`Format:` tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formats: Option<String>,

    /// Documents this one obsoletes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obsoletes: Option<String>,

    /// Documents obsoleting this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obsoleted_by: Option<String>,

    /// Documents this one updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updates: Option<String>,

    /// Documents updating this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,

    /// Sub-series membership (`Also STD0080`, `Also FYI0001`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub also: Option<String>,

    /// Publication status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Digital object identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
}

impl CatalogRecord {
    /// Create a record with the mandatory fields and no attributes.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        authors: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            authors: authors.into(),
            date: date.into(),
            formats: None,
            obsoletes: None,
            obsoleted_by: None,
            updates: None,
            updated_by: None,
            also: None,
            status: None,
            doi: None,
        }
    }

    /// Lowercase identifier, the unique key used for retrieval and file names.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Parse the free-text date into the first day of its month.
    ///
    /// Accepts `January 1970` and `1 April 1990`; returns `None` otherwise.
    pub fn published(&self) -> Option<NaiveDate> {
        let date = self.date.trim();
        NaiveDate::parse_from_str(&format!("1 {}", date), "%d %B %Y")
            .or_else(|_| NaiveDate::parse_from_str(date, "%d %B %Y"))
            .ok()
    }

    /// Check if a newer document obsoletes this one.
    pub fn is_obsolete(&self) -> bool {
        self.obsoleted_by.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_lowercase() {
        let record = CatalogRecord::new("RFC20", "ASCII format", "V.G. Cerf", "October 1969");
        assert_eq!(record.key(), "rfc20");
    }

    #[test]
    fn test_published_month_year() {
        let record = CatalogRecord::new("RFC20", "t", "a", "October 1969");
        assert_eq!(
            record.published(),
            NaiveDate::from_ymd_opt(1969, 10, 1)
        );
    }

    #[test]
    fn test_published_day_month_year() {
        let record = CatalogRecord::new("RFC1149", "t", "a", "1 April 1990");
        assert_eq!(record.published(), NaiveDate::from_ymd_opt(1990, 4, 1));
    }

    #[test]
    fn test_published_unparseable() {
        let record = CatalogRecord::new("RFC1", "t", "a", "sometime");
        assert!(record.published().is_none());
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let record = CatalogRecord::new("RFC1", "Host Software", "S. Crocker", "April 1969");
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("doi"));
        let back: CatalogRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
