//! Reconstruction result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::TextUnit;

/// Units of one document together with what happened to get them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconstruction {
    /// Surviving units in source order
    pub units: Vec<TextUnit>,

    /// Statistics
    pub stats: ReconstructStats,
}

impl Reconstruction {
    /// Render every unit as an output line.
    pub fn lines(&self) -> Vec<String> {
        self.units.iter().map(TextUnit::to_line).collect()
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if no unit survived.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Statistics collected while reconstructing a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructStats {
    /// Raw lines read
    pub lines_read: usize,

    /// Page footers and running headers removed
    pub furniture_stripped: usize,

    /// Headings pushed onto the section stack
    pub headings: usize,

    /// Paragraph units emitted before cleanup
    pub paragraphs: usize,

    /// Units dropped for too many spaces
    pub dropped_sparse: usize,

    /// Units dropped for too many special characters
    pub dropped_symbolic: usize,

    /// Units dropped for excessive length
    pub dropped_oversized: usize,

    /// Leading numbers removed
    pub numbers_stripped: usize,

    /// Adjacent units merged back together
    pub merges: usize,
}

impl ReconstructStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total units removed by the noise filter.
    pub fn dropped(&self) -> usize {
        self.dropped_sparse + self.dropped_symbolic + self.dropped_oversized
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ReconstructStats) {
        self.lines_read += other.lines_read;
        self.furniture_stripped += other.furniture_stripped;
        self.headings += other.headings;
        self.paragraphs += other.paragraphs;
        self.dropped_sparse += other.dropped_sparse;
        self.dropped_symbolic += other.dropped_symbolic;
        self.dropped_oversized += other.dropped_oversized;
        self.numbers_stripped += other.numbers_stripped;
        self.merges += other.merges;
    }
}
