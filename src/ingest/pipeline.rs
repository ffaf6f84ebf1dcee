//! Pipeline driver: retrieve, reconstruct, convert, index.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Catalog, CatalogRecord};
use crate::parser::{ReconstructOptions, SectionReconstructor};
use crate::render::Reconstruction;

use super::{DocumentSource, Embedder, Passage, VectorIndex};

/// Options for the pipeline driver.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Reconstruct documents in parallel
    pub parallel: bool,

    /// Passages per embedding call
    pub batch_size: usize,

    /// Target index name
    pub index_name: String,

    /// Per-document reconstruction options
    pub reconstruct: ReconstructOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            batch_size: 256,
            index_name: "rfcsearch".to_string(),
            reconstruct: ReconstructOptions::default(),
        }
    }
}

impl PipelineOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the embedding batch size (at least 1).
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Set the index name.
    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = name.into();
        self
    }

    /// Set reconstruction options.
    pub fn with_reconstruct(mut self, options: ReconstructOptions) -> Self {
        self.reconstruct = options;
        self
    }
}

/// A catalog record with the raw bytes of its document.
#[derive(Debug, Clone)]
pub struct RetrievedDocument {
    /// Catalog entry the document was fetched for
    pub record: CatalogRecord,

    /// Undecoded document body
    pub bytes: Vec<u8>,
}

/// Outcome of retrieving every document of a catalog.
#[derive(Debug, Clone, Default)]
pub struct Retrieval {
    /// Documents fetched successfully, in catalog order
    pub documents: Vec<RetrievedDocument>,

    /// Keys whose fetch failed
    pub failed: Vec<String>,
}

/// One reconstructed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedDocument {
    /// Catalog entry of the document
    pub record: CatalogRecord,

    /// Units and statistics produced by the reconstructor
    pub reconstruction: Reconstruction,
}

impl ProcessedDocument {
    /// Catalog key of the document.
    pub fn key(&self) -> String {
        self.record.key()
    }

    /// Output lines of the document.
    pub fn lines(&self) -> Vec<String> {
        self.reconstruction.lines()
    }
}

/// Bulk action type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpType {
    /// Add or replace the document
    #[default]
    Index,
}

/// A passage with its embedding, ready for a bulk index request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDocument {
    /// Bulk action
    #[serde(rename = "_op_type", default)]
    pub op_type: OpType,

    /// Target index
    #[serde(rename = "_index")]
    pub index: String,

    /// Passage title (document key, title and section path)
    pub title: String,

    /// Passage body
    pub text: String,

    /// Embedding of `text`
    pub text_vector: Vec<f32>,
}

impl IndexDocument {
    /// Create an index action for a passage.
    pub fn new(index: impl Into<String>, passage: Passage, vector: Vec<f32>) -> Self {
        Self {
            op_type: OpType::Index,
            index: index.into(),
            title: passage.title,
            text: passage.text,
            text_vector: vector,
        }
    }
}

/// Drives documents from a catalog to an index.
///
/// Collaborators are passed per call; the pipeline itself only holds
/// options and a shared reconstructor.
pub struct Pipeline {
    options: PipelineOptions,
    reconstructor: SectionReconstructor,
}

impl Pipeline {
    /// Create a pipeline with default options.
    pub fn new() -> Self {
        Self::with_options(PipelineOptions::default())
    }

    /// Create a pipeline with custom options.
    pub fn with_options(options: PipelineOptions) -> Self {
        let reconstructor = SectionReconstructor::with_options(options.reconstruct.clone());
        Self {
            options,
            reconstructor,
        }
    }

    /// Get the options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Fetch every catalog document from `source`.
    ///
    /// A failed fetch is logged and recorded in [`Retrieval::failed`]; it
    /// never aborts the run.
    pub fn retrieve<S>(&self, catalog: &Catalog, source: &S) -> Retrieval
    where
        S: DocumentSource + ?Sized,
    {
        self.retrieve_with_progress(catalog, source, |_, _| {})
    }

    /// Like [`retrieve`](Self::retrieve), calling `progress` after each fetch
    /// with the record and whether it succeeded.
    pub fn retrieve_with_progress<S, F>(
        &self,
        catalog: &Catalog,
        source: &S,
        mut progress: F,
    ) -> Retrieval
    where
        S: DocumentSource + ?Sized,
        F: FnMut(&CatalogRecord, bool),
    {
        let mut retrieval = Retrieval::default();

        for record in catalog {
            let key = record.key();
            match source.fetch(&key) {
                Ok(bytes) => {
                    progress(record, true);
                    retrieval.documents.push(RetrievedDocument {
                        record: record.clone(),
                        bytes,
                    });
                }
                Err(e) => {
                    log::warn!("{}: {}", source.name(), e);
                    progress(record, false);
                    retrieval.failed.push(key);
                }
            }
        }

        log::info!(
            "Retrieved {} documents, {} failed",
            retrieval.documents.len(),
            retrieval.failed.len()
        );
        retrieval
    }

    /// Reconstruct every retrieved document.
    pub fn reconstruct(&self, documents: &[RetrievedDocument]) -> Vec<ProcessedDocument> {
        self.reconstruct_with_progress(documents, |_| {})
    }

    /// Like [`reconstruct`](Self::reconstruct), calling `progress` after each
    /// document. Output order matches input order in both modes.
    pub fn reconstruct_with_progress<F>(
        &self,
        documents: &[RetrievedDocument],
        progress: F,
    ) -> Vec<ProcessedDocument>
    where
        F: Fn(&ProcessedDocument) + Sync,
    {
        let process = |doc: &RetrievedDocument| {
            let processed = ProcessedDocument {
                record: doc.record.clone(),
                reconstruction: self.reconstructor.reconstruct_bytes(&doc.bytes, &doc.record),
            };
            progress(&processed);
            processed
        };

        if self.options.parallel {
            documents.par_iter().map(process).collect()
        } else {
            documents.iter().map(process).collect()
        }
    }

    /// Flatten processed documents into passages.
    pub fn passages(&self, processed: &[ProcessedDocument]) -> Vec<Passage> {
        processed
            .iter()
            .flat_map(|doc| doc.reconstruction.units.iter().map(Passage::from_unit))
            .collect()
    }

    /// Embed passages in batches and store them.
    ///
    /// Returns the number of documents stored. Stops at the first failing
    /// batch; earlier batches stay stored.
    pub fn index<E, I>(&self, passages: &[Passage], embedder: &E, index: &mut I) -> Result<usize>
    where
        E: Embedder + ?Sized,
        I: VectorIndex + ?Sized,
    {
        let mut stored = 0;

        for (n, batch) in passages.chunks(self.options.batch_size.max(1)).enumerate() {
            let texts: Vec<String> = batch.iter().map(|p| p.text.clone()).collect();
            let vectors = embedder.embed(&texts)?;
            if vectors.len() != batch.len() {
                return Err(Error::Embedding(format!(
                    "batch {}: got {} vectors for {} texts",
                    n,
                    vectors.len(),
                    batch.len()
                )));
            }

            let docs: Vec<IndexDocument> = batch
                .iter()
                .cloned()
                .zip(vectors)
                .map(|(passage, vector)| IndexDocument::new(&self.options.index_name, passage, vector))
                .collect();
            let count = docs.len();
            index.store(docs)?;
            stored += count;
            log::debug!("Stored batch {} ({} documents)", n, count);
        }

        log::info!("Indexed {} passages into {}", stored, self.options.index_name);
        Ok(stored)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MemorySource(HashMap<String, Vec<u8>>);

    impl DocumentSource for MemorySource {
        fn fetch(&self, key: &str) -> Result<Vec<u8>> {
            self.0.get(key).cloned().ok_or_else(|| Error::Fetch {
                name: key.to_string(),
                message: "not found".to_string(),
            })
        }
    }

    struct LengthEmbedder;

    impl Embedder for LengthEmbedder {
        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| vec![t.len() as f32]).collect())
        }
    }

    #[derive(Default)]
    struct RecordingIndex {
        batches: Vec<Vec<IndexDocument>>,
    }

    impl VectorIndex for RecordingIndex {
        fn store(&mut self, docs: Vec<IndexDocument>) -> Result<()> {
            self.batches.push(docs);
            Ok(())
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            CatalogRecord::new("RFC1", "Host Software", "S. Crocker", "April 1969"),
            CatalogRecord::new("RFC2", "Host software", "B. Duvall", "April 1969"),
        ])
    }

    fn source() -> MemorySource {
        let mut docs = HashMap::new();
        docs.insert("rfc1".to_string(), b"Introduction\n\n   First paragraph.\n".to_vec());
        MemorySource(docs)
    }

    #[test]
    fn test_retrieve_collects_failures() {
        let retrieval = Pipeline::new().retrieve(&catalog(), &source());
        assert_eq!(retrieval.documents.len(), 1);
        assert_eq!(retrieval.failed, vec!["rfc2"]);
    }

    #[test]
    fn test_reconstruct_and_passages() {
        let pipeline = Pipeline::with_options(PipelineOptions::new().sequential());
        let retrieval = pipeline.retrieve(&catalog(), &source());
        let processed = pipeline.reconstruct(&retrieval.documents);
        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].key(), "rfc1");

        let passages = pipeline.passages(&processed);
        assert_eq!(passages.len(), 2);
        assert!(passages[0].text.starts_with("The rfc1 is about Host Software."));
        assert_eq!(passages[1].title, "rfc1 - Host Software - Introduction");
        assert_eq!(passages[1].text, "First paragraph.");
    }

    #[test]
    fn test_index_batches() {
        let pipeline = Pipeline::with_options(PipelineOptions::new().with_batch_size(2));
        let passages: Vec<Passage> = (0..5)
            .map(|i| Passage::new(format!("rfc{}", i), "x".repeat(i)))
            .collect();

        let mut index = RecordingIndex::default();
        let stored = pipeline.index(&passages, &LengthEmbedder, &mut index).unwrap();

        assert_eq!(stored, 5);
        let sizes: Vec<usize> = index.batches.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(index.batches[1][1].text_vector, vec![3.0]);
        assert_eq!(index.batches[0][0].index, "rfcsearch");
    }

    #[test]
    fn test_index_rejects_short_embedding_batch() {
        struct Broken;
        impl Embedder for Broken {
            fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
                Ok(vec![])
            }
        }

        let passages = vec![Passage::new("t", "text")];
        let mut index = RecordingIndex::default();
        let result = Pipeline::new().index(&passages, &Broken, &mut index);
        assert!(matches!(result, Err(Error::Embedding(_))));
        assert!(index.batches.is_empty());
    }
}
