//! Section-tree reconstruction for plain-text RFCs.
//!
//! Rebuilds the section hierarchy of a document from indentation alone and
//! reassembles wrapped lines into paragraphs, each annotated with the
//! section path that was open when it started.

use std::sync::OnceLock;

use regex::Regex;

use crate::decode::decode_lines;
use crate::model::{CatalogRecord, DocumentRef, Heading, TextUnit};
use crate::render::{
    about_unit, merge_paragraphs, CleanupPipeline, ReconstructStats, Reconstruction,
};

use super::options::ReconstructOptions;
use super::outline::{SectionStack, Step};

/// Rebuilds annotated paragraphs from the raw lines of one document.
///
/// The reconstructor holds no per-document state: every call builds its own
/// section stack, so one instance can be shared across threads.
pub struct SectionReconstructor {
    options: ReconstructOptions,
    cleanup: CleanupPipeline,
}

/// Page footer such as `Doe   Informational   [Page 3]`.
fn page_footer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[Page.*\]").unwrap())
}

impl SectionReconstructor {
    /// Create a reconstructor with default options.
    pub fn new() -> Self {
        Self::with_options(ReconstructOptions::default())
    }

    /// Create a reconstructor with custom options.
    pub fn with_options(options: ReconstructOptions) -> Self {
        let cleanup = CleanupPipeline::new(options.cleanup.clone());
        Self { options, cleanup }
    }

    /// Get the options.
    pub fn options(&self) -> &ReconstructOptions {
        &self.options
    }

    /// Reconstruct a document from raw bytes, decoding leniently.
    pub fn reconstruct_bytes(&self, bytes: &[u8], record: &CatalogRecord) -> Reconstruction {
        self.reconstruct(&decode_lines(bytes), record)
    }

    /// Reconstruct a document from its lines.
    ///
    /// Never fails: an empty document yields only the about unit (if
    /// enabled).
    pub fn reconstruct<S: AsRef<str>>(&self, lines: &[S], record: &CatalogRecord) -> Reconstruction {
        let mut stats = ReconstructStats::new();
        stats.lines_read = lines.len();

        let document = DocumentRef::from(record);
        let lines = self.strip_page_furniture(lines, record, &mut stats);
        let units = self.paragraphs(&lines, &document, &mut stats);
        let mut units = self.cleanup.process(units, &mut stats);

        if self.options.include_about {
            units.insert(0, about_unit(record));
        }

        if self.options.merge_paragraphs {
            let limit = self.options.cleanup.max_line_chars;
            units = merge_paragraphs(units, limit, &mut stats);
        }

        log::debug!(
            "{}: {} lines -> {} units ({} headings, {} dropped, {} merges)",
            document.name,
            stats.lines_read,
            units.len(),
            stats.headings,
            stats.dropped(),
            stats.merges
        );

        Reconstruction { units, stats }
    }

    /// Remove `[Page N]` footers and running headers repeating the date.
    fn strip_page_furniture<'a, S: AsRef<str>>(
        &self,
        lines: &'a [S],
        record: &CatalogRecord,
        stats: &mut ReconstructStats,
    ) -> Vec<&'a str> {
        let lines = lines.iter().map(|l| l.as_ref().trim_end());
        if !self.options.strip_page_furniture {
            return lines.collect();
        }

        let date = record.date.trim();
        let running_header = if date.is_empty() {
            None
        } else {
            Regex::new(&format!("RFC.*{}", regex::escape(date))).ok()
        };

        let kept: Vec<&str> = lines
            .filter(|line| {
                !page_footer().is_match(line)
                    && !running_header.as_ref().is_some_and(|re| re.is_match(line))
            })
            .collect();
        stats.furniture_stripped = stats.lines_read - kept.len();
        kept
    }

    /// Walk the lines, tracking indentation, and emit one unit per paragraph.
    fn paragraphs(
        &self,
        lines: &[&str],
        document: &DocumentRef,
        stats: &mut ReconstructStats,
    ) -> Vec<TextUnit> {
        let mut stack = SectionStack::new();
        let mut units = Vec::new();
        let mut chunk = String::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            i += 1;
            if line.trim().is_empty() {
                continue;
            }

            let width = indent_width(line);
            match stack.classify(width) {
                Step::Deeper => {
                    // The buffered chunk turned out to be a heading
                    stack.push(Heading::classify(chunk.trim_end()), width);
                    stats.headings += 1;
                }
                Step::Same => {
                    emit(&mut units, &stack, document, &chunk, stats);
                }
                Step::Shallower => {
                    emit(&mut units, &stack, document, &chunk, stats);
                    let popped = stack.backtrack(width);
                    log::trace!(
                        "{}: width {} closes {} section(s), depth now {}",
                        document.name,
                        width,
                        popped,
                        stack.depth()
                    );
                }
            }

            // Wrapped lines of the same paragraph run until the next blank line
            chunk.clear();
            chunk.push_str(line);
            while i < lines.len() && !lines[i].trim().is_empty() {
                append_wrapped(&mut chunk, lines[i]);
                i += 1;
            }
        }

        emit(&mut units, &stack, document, &chunk, stats);
        units
    }
}

impl Default for SectionReconstructor {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of leading whitespace characters.
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn append_wrapped(chunk: &mut String, line: &str) {
    if !line.starts_with(char::is_whitespace) {
        chunk.push(' ');
    }
    chunk.push_str(line);
}

fn emit(
    units: &mut Vec<TextUnit>,
    stack: &SectionStack,
    document: &DocumentRef,
    chunk: &str,
    stats: &mut ReconstructStats,
) {
    if chunk.trim().is_empty() {
        return;
    }

    let (section, mut lead) = stack.split();
    lead.push(chunk.to_string());
    units.push(TextUnit::paragraph(document.clone(), section, lead.join(" ")));
    stats.paragraphs += 1;
}
