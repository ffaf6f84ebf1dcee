//! Ingestion pipeline with pluggable collaborators.
//!
//! The pipeline never owns a network client, an embedding model or an index
//! implementation. Each of them is a trait object handed to the operation
//! that needs it, so the same driver runs against HTTP in the CLI and against
//! in-memory fakes in tests.
//!
//! # Example
//!
//! ```no_run
//! use rfcsearch::ingest::{DirectorySource, Pipeline};
//!
//! fn main() -> rfcsearch::Result<()> {
//!     let page = std::fs::read_to_string("index.html")?;
//!     let catalog = rfcsearch::parse_catalog(&page)?;
//!
//!     let pipeline = Pipeline::new();
//!     let retrieval = pipeline.retrieve(&catalog, &DirectorySource::new("raw"));
//!     let processed = pipeline.reconstruct(&retrieval.documents);
//!     for passage in pipeline.passages(&processed) {
//!         println!("{}\t{}", passage.title, passage.text);
//!     }
//!     Ok(())
//! }
//! ```

mod passage;
mod pipeline;
mod source;

pub use passage::{read_passages, Passage};
pub use pipeline::{
    IndexDocument, OpType, Pipeline, PipelineOptions, ProcessedDocument, Retrieval,
    RetrievedDocument,
};
pub use source::{BulkWriter, DirectorySource};

use crate::error::Result;

/// Where raw document bytes come from.
///
/// Implementations must be shareable across threads.
pub trait DocumentSource: Send + Sync {
    /// Fetch the raw bytes of the document with the given lowercase key
    /// (for example `rfc791`).
    fn fetch(&self, key: &str) -> Result<Vec<u8>>;

    /// Human-readable name of the source, for logging.
    fn name(&self) -> &str {
        "source"
    }
}

/// Turns passage texts into fixed-size vectors.
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts.
    ///
    /// Must return exactly one vector per input text, in input order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Sink for embedded passages.
pub trait VectorIndex {
    /// Store one batch of documents.
    fn store(&mut self, docs: Vec<IndexDocument>) -> Result<()>;
}
