//! File-system backed collaborators.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::{DocumentSource, IndexDocument, VectorIndex};

/// Reads documents from `<dir>/<key>.<extension>`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    extension: String,
}

impl DirectorySource {
    /// Create a source over `dir` reading `.txt` files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: "txt".to_string(),
        }
    }

    /// Set the file extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Directory being read.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding the given document.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, self.extension))
    }
}

impl DocumentSource for DirectorySource {
    fn fetch(&self, key: &str) -> Result<Vec<u8>> {
        fs::read(self.path_for(key)).map_err(|e| Error::Fetch {
            name: key.to_string(),
            message: e.to_string(),
        })
    }

    fn name(&self) -> &str {
        "directory"
    }
}

/// Writes stored documents as bulk-action JSON Lines.
///
/// Every [`IndexDocument`] becomes one line that a bulk loader can replay
/// against a search server.
pub struct BulkWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> BulkWriter<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of documents written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the inner writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> VectorIndex for BulkWriter<W> {
    fn store(&mut self, docs: Vec<IndexDocument>) -> Result<()> {
        for doc in &docs {
            let line = serde_json::to_string(doc)?;
            writeln!(self.writer, "{}", line)?;
        }
        self.written += docs.len();
        Ok(())
    }
}
