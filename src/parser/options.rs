//! Parsing options and configuration.

use crate::render::CleanupOptions;

/// Error handling mode for the catalog parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first malformed entry
    Strict,
    /// Skip malformed entries and continue
    #[default]
    Lenient,
}

/// Options for parsing the catalog page.
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Prefix of the identifier token that starts every entry
    pub identifier_prefix: String,

    /// Marker of the first entry; text before it is page preamble
    pub first_entry: Option<String>,

    /// Phrase that marks a withdrawn or unissued entry
    pub withdrawn_marker: String,

    /// Error handling mode
    pub error_mode: ErrorMode,
}

impl CatalogOptions {
    /// Create new catalog options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier prefix.
    pub fn with_identifier_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.identifier_prefix = prefix.into();
        self
    }

    /// Set the first-entry marker.
    pub fn with_first_entry(mut self, marker: impl Into<String>) -> Self {
        self.first_entry = Some(marker.into());
        self
    }

    /// Keep any preamble text before the first entry.
    pub fn without_first_entry(mut self) -> Self {
        self.first_entry = None;
        self
    }

    /// Set the withdrawn-entry marker.
    pub fn with_withdrawn_marker(mut self, marker: impl Into<String>) -> Self {
        self.withdrawn_marker = marker.into();
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on the first malformed entry.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            identifier_prefix: "RFC".to_string(),
            first_entry: Some("RFC1 ".to_string()),
            withdrawn_marker: "Not Issued".to_string(),
            error_mode: ErrorMode::Lenient,
        }
    }
}

/// Options for the section-tree reconstructor.
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Noise filter settings
    pub cleanup: CleanupOptions,

    /// Strip `[Page N]` footers and running headers
    pub strip_page_furniture: bool,

    /// Prepend the synthetic "about" unit
    pub include_about: bool,

    /// Re-join paragraphs split by page breaks and figures
    pub merge_paragraphs: bool,
}

impl ReconstructOptions {
    /// Create new reconstruct options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Enable or disable header/footer stripping.
    pub fn with_page_furniture_stripping(mut self, strip: bool) -> Self {
        self.strip_page_furniture = strip;
        self
    }

    /// Enable or disable the about unit.
    pub fn with_about(mut self, include: bool) -> Self {
        self.include_about = include;
        self
    }

    /// Enable or disable the paragraph re-merge pass.
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge_paragraphs = merge;
        self
    }
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            cleanup: CleanupOptions::default(),
            strip_page_furniture: true,
            include_about: true,
            merge_paragraphs: true,
        }
    }
}
