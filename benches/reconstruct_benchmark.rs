//! Benchmarks for rfcsearch parsing performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic RFC-style documents and catalog pages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rfcsearch::{CatalogRecord, SectionReconstructor};

/// Creates a synthetic plain-text RFC with the given number of pages.
fn create_test_document(page_count: usize) -> Vec<u8> {
    let mut content = String::new();

    for page in 0..page_count {
        content.push_str(&format!("{}.  Section {}\n\n", page + 1, page + 1));
        content.push_str(&format!("{}.1.  Details\n\n", page + 1));
        for para in 0..6 {
            content.push_str(&format!(
                "   Paragraph {} of page {} describes the behaviour of the\n   \
                 protocol in enough detail to wrap over two lines.\n\n",
                para,
                page + 1
            ));
        }
        content.push_str("      +--------+        +--------+\n");
        content.push_str("      | Client | -----> | Server |\n");
        content.push_str("      +--------+        +--------+\n\n");
        content.push_str(&format!(
            "Doe                        Informational                  [Page {}]\n\n",
            page + 1
        ));
        content.push_str("RFC 9999                  Benchmark Protocol            March 2024\n\n");
    }

    content.into_bytes()
}

/// Creates a synthetic catalog listing with the given number of entries.
fn create_test_catalog(entry_count: usize) -> String {
    let mut content = String::from("RFC INDEX\n\n");
    for i in 1..=entry_count {
        content.push_str(&format!(
            "RFC{} Benchmark entry number {}, v1.0. A.B. Author, C. Writer. March 2024.\n     \
             (Format: TXT=1234 bytes) (Status: INFORMATIONAL) (DOI: 10.17487/RFC{:04})\n\n",
            i, i, i
        ));
    }
    content
}

/// Benchmark section reconstruction at various document sizes.
fn bench_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruction");
    let record = CatalogRecord::new("RFC9999", "Benchmark Protocol", "J. Doe", "March 2024");
    let reconstructor = SectionReconstructor::new();

    for page_count in [1, 10, 50].iter() {
        let data = create_test_document(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| reconstructor.reconstruct_bytes(black_box(&data), &record));
        });
    }

    group.finish();
}

/// Benchmark catalog parsing.
fn bench_catalog_parsing(c: &mut Criterion) {
    let page = create_test_catalog(1000);

    c.bench_function("catalog_1000_entries", |b| {
        b.iter(|| rfcsearch::parse_catalog(black_box(&page)).unwrap());
    });
}

criterion_group!(benches, bench_reconstruction, bench_catalog_parsing);
criterion_main!(benches);
