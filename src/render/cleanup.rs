//! Noise filter for reconstructed paragraphs.
//!
//! Plain-text RFCs are full of layout that survives paragraph reconstruction:
//! table-of-contents dot leaders, ASCII-art diagrams, page numbers and
//! run-away merges. The stages below run in a fixed order over the whole
//! unit sequence.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::TextUnit;

use super::ReconstructStats;

/// Options for the noise filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupOptions {
    /// Drop units whose rendered line has at least this share of spaces
    pub max_space_ratio: f64,

    /// Collapse runs of two or more whitespace characters to one space
    pub collapse_whitespace: bool,

    /// Drop units whose non-alphanumeric share of non-space characters is at least this
    pub max_special_ratio: f64,

    /// Remove a leading page or figure number from the body
    pub strip_leading_number: bool,

    /// Drop units whose rendered line has at least this many characters
    pub max_line_chars: usize,
}

impl CleanupOptions {
    /// Create options with the standard thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that keep every unit and only normalize whitespace.
    pub fn whitespace_only() -> Self {
        Self {
            max_space_ratio: f64::INFINITY,
            collapse_whitespace: true,
            max_special_ratio: f64::INFINITY,
            strip_leading_number: false,
            max_line_chars: usize::MAX,
        }
    }

    /// Set the space ratio threshold.
    pub fn with_max_space_ratio(mut self, ratio: f64) -> Self {
        self.max_space_ratio = ratio;
        self
    }

    /// Set the special character ratio threshold.
    pub fn with_max_special_ratio(mut self, ratio: f64) -> Self {
        self.max_special_ratio = ratio;
        self
    }

    /// Set the line length limit.
    pub fn with_max_line_chars(mut self, chars: usize) -> Self {
        self.max_line_chars = chars;
        self
    }

    /// Enable or disable leading number stripping.
    pub fn with_strip_leading_number(mut self, strip: bool) -> Self {
        self.strip_leading_number = strip;
        self
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            max_space_ratio: 0.5,
            collapse_whitespace: true,
            max_special_ratio: 0.35,
            strip_leading_number: true,
            max_line_chars: 1500,
        }
    }
}

/// Noise filter pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &CleanupOptions {
        &self.options
    }

    /// Run all stages over the unit sequence, in order.
    pub fn process(&self, units: Vec<TextUnit>, stats: &mut ReconstructStats) -> Vec<TextUnit> {
        let opts = &self.options;

        // Stage 1: sparse lines (dot leaders, column layouts)
        let before = units.len();
        let mut units: Vec<TextUnit> = units
            .into_iter()
            .filter(|u| space_ratio(&u.local_line()) < opts.max_space_ratio)
            .collect();
        stats.dropped_sparse += before - units.len();

        // Stage 2: whitespace runs
        if opts.collapse_whitespace {
            for unit in &mut units {
                unit.body = collapse_whitespace(&unit.body);
                unit.section.map_labels(collapse_whitespace);
            }
            units.retain(|u| !u.body.is_empty());
        }

        // Stage 3: diagrams and ASCII art
        let before = units.len();
        units.retain(|u| special_ratio(&u.local_line()) < opts.max_special_ratio);
        stats.dropped_symbolic += before - units.len();

        // Stage 4: page and figure numbers
        if opts.strip_leading_number {
            for unit in &mut units {
                if let Some(rest) = strip_leading_number(&unit.body) {
                    unit.body = rest.to_string();
                    stats.numbers_stripped += 1;
                }
            }
        }

        // Stage 5: malformed merges
        let before = units.len();
        units.retain(|u| u.local_line().chars().count() < opts.max_line_chars);
        stats.dropped_oversized += before - units.len();

        log::debug!(
            "cleanup kept {} units (sparse -{}, symbolic -{}, oversized -{})",
            units.len(),
            stats.dropped_sparse,
            stats.dropped_symbolic,
            stats.dropped_oversized
        );

        units
    }
}

impl Default for CleanupPipeline {
    fn default() -> Self {
        Self::new(CleanupOptions::default())
    }
}

/// Share of space characters in a line.
pub fn space_ratio(line: &str) -> f64 {
    let len = line.chars().count();
    let spaces = line.chars().filter(|&c| c == ' ').count();
    spaces as f64 / len.max(1) as f64
}

/// Share of characters that are neither ASCII alphanumerics nor whitespace,
/// relative to the characters that are not spaces.
pub fn special_ratio(line: &str) -> f64 {
    let len = line.chars().count();
    let spaces = line.chars().filter(|&c| c == ' ').count();
    let special = line
        .chars()
        .filter(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace())
        .count();
    special as f64 / (len - spaces).max(1) as f64
}

/// Replace every run of two or more whitespace characters by one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s{2,}").unwrap());
    re.replace_all(text, " ").trim().to_string()
}

/// Remainder of `text` after a leading token that starts with a digit.
///
/// Returns `None` when the first token does not start with a digit or is
/// the only token.
pub fn strip_leading_number(text: &str) -> Option<&str> {
    let text = text.trim_start();
    let (first, rest) = text.split_once(char::is_whitespace)?;
    let rest = rest.trim_start();
    if first.starts_with(|c: char| c.is_ascii_digit()) && !rest.is_empty() {
        Some(rest)
    } else {
        None
    }
}
