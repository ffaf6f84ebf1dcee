//! Paragraph-level types produced by the section-tree reconstructor.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::CatalogRecord;

/// Characters that end a sentence-like line.
pub const SENTENCE_TERMINATORS: [char; 5] = ['!', '.', ':', ';', '?'];

/// A buffered entry of the section stack.
///
/// Indentation alone cannot tell a subsection title from a wrapped sentence,
/// so each entry is tagged when it is pushed: text ending in terminal
/// punctuation is a `Sentence`, anything else a `Label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Heading {
    /// A section label such as `3.1.  Message Format`
    Label(String),
    /// A sentence that was indented like a heading
    Sentence(String),
}

impl Heading {
    /// Tag a chunk by its final character.
    pub fn classify(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim_end().ends_with(SENTENCE_TERMINATORS) {
            Heading::Sentence(text)
        } else {
            Heading::Label(text)
        }
    }

    /// Get the text of the entry.
    pub fn text(&self) -> &str {
        match self {
            Heading::Label(t) | Heading::Sentence(t) => t,
        }
    }

    /// Check if this entry is a section label.
    pub fn is_label(&self) -> bool {
        matches!(self, Heading::Label(_))
    }
}

/// Ordered section labels active at a point in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionPath(Vec<String>);

impl SectionPath {
    /// Create an empty (top-level) path.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a path from labels, dropping blank ones.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path = Self::new();
        for label in labels {
            path.push(label);
        }
        path
    }

    /// Append a label. Blank labels are ignored.
    pub fn push(&mut self, label: impl Into<String>) {
        let label = label.into();
        if !label.trim().is_empty() {
            self.0.push(label);
        }
    }

    /// Get the labels, outermost first.
    pub fn labels(&self) -> &[String] {
        &self.0
    }

    /// Nesting depth.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Check if the path is top-level.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply a transformation to every label in place.
    pub fn map_labels(&mut self, f: impl Fn(&str) -> String) {
        for label in &mut self.0 {
            *label = f(label);
        }
        self.0.retain(|l| !l.trim().is_empty());
    }
}

impl fmt::Display for SectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" - "))
    }
}

/// Back-reference from a unit to the document it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Lowercase catalog key (e.g. `rfc20`)
    pub name: String,
    /// Document title
    pub title: String,
}

impl DocumentRef {
    /// Create a reference.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
        }
    }
}

impl From<&CatalogRecord> for DocumentRef {
    fn from(record: &CatalogRecord) -> Self {
        Self::new(record.key(), record.title.trim())
    }
}

/// Kind of a text unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Synthetic summary line built from catalog metadata
    About,
    /// A reconstructed paragraph
    #[default]
    Paragraph,
}

/// One reconstructed paragraph annotated with its section path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    /// Source document
    pub document: DocumentRef,

    /// Section path active when the paragraph started
    pub section: SectionPath,

    /// Paragraph text
    pub body: String,

    /// Unit kind
    #[serde(default)]
    pub kind: UnitKind,
}

impl TextUnit {
    /// Create a paragraph unit.
    pub fn paragraph(document: DocumentRef, section: SectionPath, body: impl Into<String>) -> Self {
        Self {
            document,
            section,
            body: body.into(),
            kind: UnitKind::Paragraph,
        }
    }

    /// Create an about unit.
    pub fn about(document: DocumentRef, body: impl Into<String>) -> Self {
        Self {
            document,
            section: SectionPath::new(),
            body: body.into(),
            kind: UnitKind::About,
        }
    }

    /// Section part of the line without the document prefix: `- a - b * body`.
    pub fn local_line(&self) -> String {
        if self.section.is_empty() {
            format!("* {}", self.body)
        } else {
            format!("- {} * {}", self.section, self.body)
        }
    }

    /// Full section label including the document: `rfc20 - Title - a - b`.
    pub fn section_label(&self) -> String {
        let mut label = format!("{} - {}", self.document.name, self.document.title);
        if !self.section.is_empty() {
            label.push_str(" - ");
            label.push_str(&self.section.to_string());
        }
        label
    }

    /// Render the unit as one output line: `* rfc20 - Title - a - b * body`.
    pub fn to_line(&self) -> String {
        format!("* {} * {}", self.section_label(), self.body)
    }
}

impl fmt::Display for TextUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> DocumentRef {
        DocumentRef::new("rfc20", "ASCII format for Network Interchange")
    }

    #[test]
    fn test_heading_classify() {
        assert!(Heading::classify("Introduction").is_label());
        assert!(!Heading::classify("This is a sentence.").is_label());
        assert!(!Heading::classify("as follows:").is_label());
        assert!(Heading::classify("1.  Scope").is_label());
    }

    #[test]
    fn test_section_path_ignores_blank_labels() {
        let path = SectionPath::from_labels(["", "Introduction", "   "]);
        assert_eq!(path.depth(), 1);
        assert_eq!(path.to_string(), "Introduction");
    }

    #[test]
    fn test_to_line_top_level() {
        let unit = TextUnit::paragraph(doc(), SectionPath::new(), "Body text.");
        assert_eq!(
            unit.to_line(),
            "* rfc20 - ASCII format for Network Interchange * Body text."
        );
        assert_eq!(unit.local_line(), "* Body text.");
    }

    #[test]
    fn test_to_line_nested() {
        let section = SectionPath::from_labels(["Introduction", "Background"]);
        let unit = TextUnit::paragraph(doc(), section, "Body text.");
        assert_eq!(
            unit.to_line(),
            "* rfc20 - ASCII format for Network Interchange - Introduction - Background * Body text."
        );
        assert_eq!(unit.local_line(), "- Introduction - Background * Body text.");
    }

    #[test]
    fn test_document_ref_from_record() {
        let record = CatalogRecord::new("RFC20", " ASCII format ", "V.G. Cerf", "October 1969");
        let r = DocumentRef::from(&record);
        assert_eq!(r.name, "rfc20");
        assert_eq!(r.title, "ASCII format");
    }
}
