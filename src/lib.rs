//! # rfcsearch
//!
//! Structural inference for the RFC series.
//!
//! This library turns the two raw inputs of an RFC search index into flat,
//! indexable records:
//!
//! - the **catalog page**, a column-wrapped listing of every RFC, becomes a
//!   list of [`CatalogRecord`]s (identifier, title, authors, date and the
//!   bracketed attributes);
//! - each **plain-text RFC** becomes a list of [`TextUnit`]s, one per
//!   paragraph, annotated with the section path recovered from indentation.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rfcsearch::{parse_catalog, reconstruct_file, render};
//!
//! fn main() -> rfcsearch::Result<()> {
//!     let page = std::fs::read_to_string("rfc-index.html")?;
//!     let catalog = parse_catalog(&page)?;
//!
//!     let record = catalog.get("rfc791").expect("listed");
//!     let result = reconstruct_file("raw/rfc791.txt", record)?;
//!     print!("{}", render::to_text(&result.units));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Catalog parsing**: bracket attributes, dates and abbreviation-aware
//!   title splitting, with strict or lenient error handling
//! - **Section reconstruction**: indentation stack with nearest-width
//!   backtracking, heading vs. lead-sentence classification
//! - **Cleanup pipeline**: drops dot leaders, diagrams and malformed merges
//! - **Ingestion driver**: injected source, embedder and index collaborators,
//!   parallel reconstruction with Rayon

pub mod decode;
pub mod error;
pub mod ingest;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ingest::{DocumentSource, Embedder, Passage, Pipeline, PipelineOptions, VectorIndex};
pub use model::{Catalog, CatalogRecord, DocumentRef, Heading, SectionPath, TextUnit, UnitKind};
pub use parser::{CatalogOptions, CatalogParser, ErrorMode, ReconstructOptions, SectionReconstructor};
pub use render::{CleanupOptions, JsonFormat, ReconstructStats, Reconstruction};

use std::path::Path;

/// Parse a catalog page (HTML or plain text).
///
/// Malformed entries are skipped and listed in [`Catalog::rejected`].
///
/// # Example
///
/// ```
/// use rfcsearch::parse_catalog;
///
/// let catalog = parse_catalog("RFC1 Host Software. S. Crocker. April 1969.").unwrap();
/// assert_eq!(catalog.records[0].title, "Host Software");
/// ```
pub fn parse_catalog(page: &str) -> Result<Catalog> {
    CatalogParser::new().parse(page)
}

/// Parse a catalog page with custom options.
///
/// # Example
///
/// ```
/// use rfcsearch::{parse_catalog_with_options, CatalogOptions};
///
/// let options = CatalogOptions::new().strict();
/// assert!(parse_catalog_with_options("RFCx Broken. A. B. May 1970.", options).is_err());
/// ```
pub fn parse_catalog_with_options(page: &str, options: CatalogOptions) -> Result<Catalog> {
    CatalogParser::with_options(options).parse(page)
}

/// Reconstruct a document from its lines.
///
/// # Example
///
/// ```
/// use rfcsearch::{reconstruct, CatalogRecord};
///
/// let record = CatalogRecord::new("RFC20", "ASCII format", "V.G. Cerf", "October 1969");
/// let lines = ["Scope", "", "   This standard specifies a code."];
/// let result = reconstruct(&lines, &record);
/// assert_eq!(
///     result.lines()[1],
///     "* rfc20 - ASCII format - Scope * This standard specifies a code."
/// );
/// ```
pub fn reconstruct<S: AsRef<str>>(lines: &[S], record: &CatalogRecord) -> Reconstruction {
    SectionReconstructor::new().reconstruct(lines, record)
}

/// Reconstruct a document from raw bytes, decoding them leniently.
pub fn reconstruct_bytes(data: &[u8], record: &CatalogRecord) -> Reconstruction {
    SectionReconstructor::new().reconstruct_bytes(data, record)
}

/// Reconstruct a document stored on disk.
///
/// # Example
///
/// ```no_run
/// use rfcsearch::{reconstruct_file, CatalogRecord};
///
/// let record = CatalogRecord::new("RFC791", "Internet Protocol", "J. Postel", "September 1981");
/// let result = reconstruct_file("raw/rfc791.txt", &record).unwrap();
/// println!("{} units", result.len());
/// ```
pub fn reconstruct_file<P: AsRef<Path>>(path: P, record: &CatalogRecord) -> Result<Reconstruction> {
    let lines = decode::read_lines(path)?;
    Ok(reconstruct(&lines, record))
}

/// Reconstruct a document with custom options.
pub fn reconstruct_with_options<S: AsRef<str>>(
    lines: &[S],
    record: &CatalogRecord,
    options: ReconstructOptions,
) -> Reconstruction {
    SectionReconstructor::with_options(options).reconstruct(lines, record)
}
