//! Error types for rfcsearch library.

use std::io;
use thiserror::Error;

/// Result type alias for rfcsearch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing or indexing RFC material.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A catalog entry whose identifier or title could not be recovered.
    #[error("Malformed catalog entry: {reason} in {entry:?}")]
    MalformedEntry {
        /// The assembled entry line
        entry: String,
        /// Why the entry was rejected
        reason: String,
    },

    /// The catalog page did not contain a single entry.
    #[error("Catalog contains no entries")]
    EmptyCatalog,

    /// A document could not be retrieved from its source.
    #[error("Failed to fetch {name}: {message}")]
    Fetch {
        /// Catalog key of the document
        name: String,
        /// Failure description from the source
        message: String,
    },

    /// The embedding collaborator failed or returned a bad batch.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// The index collaborator rejected a batch.
    #[error("Index error: {0}")]
    Index(String),

    /// Error during rendering (text lines, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a malformed-entry error.
    pub fn malformed(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedEntry {
            entry: entry.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
