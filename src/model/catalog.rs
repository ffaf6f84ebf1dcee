//! The parsed catalog: accepted records plus rejected entries.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::CatalogRecord;

/// A catalog entry the parser could not turn into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedEntry {
    /// The assembled entry line
    pub entry: String,
    /// Why the entry was rejected
    pub reason: String,
}

/// Result of one parse pass over the catalog page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Records in catalog order, unique by key
    pub records: Vec<CatalogRecord>,

    /// Entries skipped as malformed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedEntry>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from already-parsed records.
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        Self {
            records,
            rejected: Vec::new(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by key (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&CatalogRecord> {
        let key = name.to_lowercase();
        self.records.iter().find(|r| r.key() == key)
    }

    /// Lowercase keys of all records, in order.
    pub fn keys(&self) -> Vec<String> {
        self.records.iter().map(CatalogRecord::key).collect()
    }

    /// Drop records whose document could not be retrieved.
    ///
    /// Returns the number of records removed.
    pub fn retain_retrieved<S: AsRef<str>>(&mut self, failed: &[S]) -> usize {
        let failed: HashSet<String> = failed.iter().map(|f| f.as_ref().to_lowercase()).collect();
        let before = self.records.len();
        self.records.retain(|r| !failed.contains(&r.key()));
        before - self.records.len()
    }

    /// Iterate over records.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogRecord;
    type IntoIter = std::slice::Iter<'a, CatalogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
