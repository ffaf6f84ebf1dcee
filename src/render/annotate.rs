//! Synthetic "about" unit built from catalog metadata.

use crate::model::{CatalogRecord, DocumentRef, TextUnit};

/// Build the summary unit that opens every processed document.
///
/// The text only depends on the record, so repeated runs produce the same
/// line.
pub fn about_unit(record: &CatalogRecord) -> TextUnit {
    let document = DocumentRef::from(record);
    let body = format!(
        "The {} is about {}. It has been written by {}, and published in {}.",
        document.name,
        document.title,
        record.authors.trim(),
        record.date.trim()
    );
    TextUnit::about(document, body)
}
