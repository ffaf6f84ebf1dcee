//! Search passages: (title, text) pairs derived from processed lines.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::TextUnit;

/// One searchable passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Section label: document key, title and section path
    pub title: String,

    /// Paragraph text
    pub text: String,
}

impl Passage {
    /// Create a passage.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Build a passage straight from a reconstructed unit.
    pub fn from_unit(unit: &TextUnit) -> Self {
        Self::new(unit.section_label(), unit.body.trim())
    }

    /// Parse a processed line of the form `* title * text`.
    ///
    /// The title runs from the first to the second `*`; everything after the
    /// second `*` is text, even if it contains more asterisks.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.splitn(3, '*');
        let _lead = parts.next()?;
        let title = parts.next()?.trim();
        let text = parts.next()?.trim();
        Some(Self::new(title, text))
    }
}

impl From<&TextUnit> for Passage {
    fn from(unit: &TextUnit) -> Self {
        Self::from_unit(unit)
    }
}

/// Read every passage from a processed document file.
///
/// Processed files are UTF-8. Lines that do not have the `* title * text`
/// shape are skipped.
pub fn read_passages<P: AsRef<Path>>(path: P) -> Result<Vec<Passage>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let lines: Vec<&str> = content.lines().collect();
    let passages: Vec<Passage> = lines.iter().filter_map(|l| Passage::parse_line(l)).collect();
    if passages.len() < lines.iter().filter(|l| !l.trim().is_empty()).count() {
        log::warn!("{}: skipped unparseable lines", path.as_ref().display());
    }
    Ok(passages)
}
