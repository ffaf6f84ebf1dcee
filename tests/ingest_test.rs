//! Integration tests for the ingestion pipeline.

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use rfcsearch::error::Result;
use rfcsearch::ingest::{
    read_passages, BulkWriter, DirectorySource, Embedder, IndexDocument, OpType, Passage,
    Pipeline, PipelineOptions,
};
use rfcsearch::render::{from_json_lines, to_json_lines, to_text};
use rfcsearch::{parse_catalog, reconstruct_bytes, Catalog, CatalogRecord};

const CATALOG: &str = "\
RFC1 Host Software. S. Crocker. April 1969.
RFC2 Host software. B. Duvall. April 1969.
RFC3 Documentation conventions. S.D. Crocker. April 1969.
";

/// Embeds every text as its length and counts calls.
struct CountingEmbedder {
    calls: AtomicUsize,
}

impl CountingEmbedder {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl Embedder for CountingEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| vec![t.len() as f32, 1.0]).collect())
    }
}

fn catalog() -> Catalog {
    parse_catalog(CATALOG).unwrap()
}

fn write_raw(dir: &std::path::Path) {
    fs::write(
        dir.join("rfc1.txt"),
        "Introduction\n\n   The software of a host.\n\n   It runs on the IMP\n\nCrocker                                                         [Page 1]\n\n   interface.\n",
    )
    .unwrap();
    fs::write(
        dir.join("rfc3.txt"),
        "Summary\n\n   Notes are numbered in sequence.\n",
    )
    .unwrap();
}

#[test]
fn test_pipeline_end_to_end() {
    let raw = tempfile::tempdir().unwrap();
    write_raw(raw.path());

    let mut catalog = catalog();
    let pipeline = Pipeline::new();

    let retrieval = pipeline.retrieve(&catalog, &DirectorySource::new(raw.path()));
    assert_eq!(retrieval.failed, vec!["rfc2"]);
    assert_eq!(catalog.retain_retrieved(&retrieval.failed), 1);
    assert_eq!(catalog.keys(), vec!["rfc1", "rfc3"]);

    let processed = pipeline.reconstruct(&retrieval.documents);
    let keys: Vec<String> = processed.iter().map(|d| d.key()).collect();
    assert_eq!(keys, vec!["rfc1", "rfc3"]);

    let rfc1 = to_text(&processed[0].reconstruction.units);
    assert!(rfc1.contains("* rfc1 - Host Software - Introduction * It runs on the IMP interface.\n"));
    assert_eq!(processed[0].reconstruction.stats.merges, 1);

    let passages = pipeline.passages(&processed);
    assert_eq!(passages.len(), 5);

    let embedder = CountingEmbedder::new();
    let mut writer = BulkWriter::new(Vec::new());
    let stored = pipeline.index(&passages, &embedder, &mut writer).unwrap();
    assert_eq!(stored, 5);
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);

    let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    let docs: Vec<IndexDocument> = from_json_lines(&output).unwrap();
    assert_eq!(docs.len(), 5);
    assert!(docs.iter().all(|d| d.op_type == OpType::Index && d.index == "rfcsearch"));
    assert_eq!(docs[0].title, "rfc1 - Host Software");
}

#[test]
fn test_sequential_matches_parallel() {
    let raw = tempfile::tempdir().unwrap();
    write_raw(raw.path());
    let source = DirectorySource::new(raw.path());

    let parallel = Pipeline::new();
    let sequential = Pipeline::with_options(PipelineOptions::new().sequential());

    let retrieval = parallel.retrieve(&catalog(), &source);
    let a = parallel.passages(&parallel.reconstruct(&retrieval.documents));
    let b = sequential.passages(&sequential.reconstruct(&retrieval.documents));
    assert_eq!(a, b);
}

#[test]
fn test_batching_with_custom_index_name() {
    let pipeline = Pipeline::with_options(
        PipelineOptions::new()
            .with_batch_size(3)
            .with_index_name("rfc-test"),
    );
    let passages: Vec<Passage> = (0..7)
        .map(|i| Passage::new(format!("rfc{}", i), format!("text {}", i)))
        .collect();

    let embedder = CountingEmbedder::new();
    let mut writer = BulkWriter::new(Vec::new());
    pipeline.index(&passages, &embedder, &mut writer).unwrap();

    assert_eq!(embedder.calls.load(Ordering::SeqCst), 3);
    assert_eq!(writer.written(), 7);

    let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    assert!(output.lines().all(|l| l.contains("\"_index\":\"rfc-test\"")));
}

#[test]
fn test_passages_json_lines() {
    let passages = vec![
        Passage::new("rfc1 - Host Software", "First."),
        Passage::new("rfc1 - Host Software - Summary", "Second."),
    ];
    let jsonl = to_json_lines(&passages).unwrap();
    assert_eq!(
        jsonl.lines().next(),
        Some(r#"{"title":"rfc1 - Host Software","text":"First."}"#)
    );
    let restored: Vec<Passage> = from_json_lines(&jsonl).unwrap();
    assert_eq!(restored, passages);
}

#[test]
fn test_processed_file_round_trip() {
    let record = CatalogRecord::new("RFC9999", "Synthetic Protocol", "A. Tester", "March 2024");
    let raw = b"Scope\n\n   The caf\xe9 protocol is described here.\n\n   Values a * b are multiplied together.\n";
    let result = reconstruct_bytes(raw, &record);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rfc9999.txt");
    fs::write(&path, to_text(&result.units)).unwrap();

    let read = read_passages(&path).unwrap();
    let direct: Vec<Passage> = result.units.iter().map(Passage::from_unit).collect();
    assert_eq!(read, direct);
    assert!(read.iter().any(|p| p.text == "The caf\u{e9} protocol is described here."));
    assert!(read.iter().any(|p| p.text == "Values a * b are multiplied together."));
}
