//! Parser for the RFC index catalog.
//!
//! The catalog is a column-wrapped listing where every entry looks like
//!
//! ```text
//! RFC0020 ASCII format for network interchange. V.G. Cerf. October 1969.
//!      (Format: TXT=18504 bytes) (Also STD0080) (Status: INTERNET STANDARD)
//! ```
//!
//! Fields are recovered from punctuation alone: bracketed attribute tags,
//! a trailing period-delimited date, the leading identifier token, a title
//! ending at the first sentence-like period, and the authors in between.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Catalog, CatalogRecord, RejectedEntry};
use crate::render::collapse_whitespace;

use super::options::{CatalogOptions, ErrorMode};

/// Bracketed attribute tags and the record slot each one fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribute {
    Formats,
    Obsoletes,
    ObsoletedBy,
    Updates,
    UpdatedBy,
    Also,
    Status,
    Doi,
}

const ATTRIBUTE_TAGS: [(&str, Attribute); 8] = [
    ("Format:", Attribute::Formats),
    ("Obsoletes ", Attribute::Obsoletes),
    ("Obsoleted by ", Attribute::ObsoletedBy),
    ("Updates ", Attribute::Updates),
    ("Updated by ", Attribute::UpdatedBy),
    ("Also ", Attribute::Also),
    ("Status:", Attribute::Status),
    ("DOI:", Attribute::Doi),
];

impl Attribute {
    /// Classify a bracket's inner text by its tag prefix.
    fn classify(inner: &str) -> Option<(Attribute, &str)> {
        ATTRIBUTE_TAGS.iter().find_map(|(tag, attr)| {
            inner
                .strip_prefix(tag)
                .map(|value| (*attr, value.trim()))
        })
    }

    fn assign(self, record: &mut CatalogRecord, value: &str) {
        let slot = match self {
            Attribute::Formats => &mut record.formats,
            Attribute::Obsoletes => &mut record.obsoletes,
            Attribute::ObsoletedBy => &mut record.obsoleted_by,
            Attribute::Updates => &mut record.updates,
            Attribute::UpdatedBy => &mut record.updated_by,
            Attribute::Also => &mut record.also,
            Attribute::Status => &mut record.status,
            Attribute::Doi => &mut record.doi,
        };
        *slot = Some(value.to_string());
    }
}

/// Catalog page parser.
pub struct CatalogParser {
    options: CatalogOptions,
}

impl CatalogParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(CatalogOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(options: CatalogOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    /// Parse a catalog page (HTML or plain text) into records.
    ///
    /// In lenient mode malformed entries are logged, collected in
    /// [`Catalog::rejected`] and skipped; in strict mode the first one
    /// fails the parse.
    pub fn parse(&self, page: &str) -> Result<Catalog> {
        let text = extract_index_text(page, self.options.first_entry.as_deref());
        let entries = self.assemble_entries(&text);

        let mut catalog = Catalog::new();
        let mut seen = HashSet::new();

        for entry in entries {
            let parsed = self.parse_entry(&entry).and_then(|record| {
                if seen.insert(record.key()) {
                    Ok(record)
                } else {
                    Err(Error::malformed(&entry, format!("duplicate identifier {}", record.name)))
                }
            });

            match parsed {
                Ok(record) => catalog.records.push(record),
                Err(e) if self.options.error_mode == ErrorMode::Strict => return Err(e),
                Err(Error::MalformedEntry { entry, reason }) => {
                    log::warn!("Skipping catalog entry: {} ({:?})", reason, entry);
                    catalog.rejected.push(RejectedEntry { entry, reason });
                }
                Err(e) => return Err(e),
            }
        }

        if catalog.is_empty() && self.options.error_mode == ErrorMode::Strict {
            return Err(Error::EmptyCatalog);
        }

        log::info!(
            "Parsed {} catalog records ({} rejected)",
            catalog.len(),
            catalog.rejected.len()
        );
        Ok(catalog)
    }

    /// Join column-wrapped lines into one line per entry.
    ///
    /// A line starting with the identifier prefix opens an entry; every other
    /// non-blank line continues the previous one. Withdrawn entries are
    /// dropped.
    pub fn assemble_entries(&self, text: &str) -> Vec<String> {
        let prefix = self.options.identifier_prefix.as_str();
        let mut entries: Vec<String> = Vec::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if line.starts_with(prefix) {
                entries.push(line.to_string());
            } else if let Some(current) = entries.last_mut() {
                if !line.starts_with(char::is_whitespace) {
                    current.push(' ');
                }
                current.push_str(line);
            }
        }

        entries
            .iter()
            .map(|e| collapse_whitespace(e))
            .filter(|e| !e.contains(self.options.withdrawn_marker.as_str()))
            .collect()
    }

    /// Extract the fields of one assembled entry.
    pub fn parse_entry(&self, entry: &str) -> Result<CatalogRecord> {
        let mut record = CatalogRecord::new("", "", "", "");

        // 1. Bracketed attributes, removed from the line once recognized
        let mut line = String::with_capacity(entry.len());
        let mut last = 0;
        for caps in bracket_regex().captures_iter(entry) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if let Some((attr, value)) = Attribute::classify(inner.as_str()) {
                attr.assign(&mut record, value);
                line.push_str(&entry[last..whole.start()]);
                last = whole.end();
            }
        }
        line.push_str(&entry[last..]);
        let mut line = collapse_whitespace(&line);

        // 2. Trailing period-delimited date
        let segments: Vec<&str> = line.split('.').filter(|s| !s.is_empty()).collect();
        if segments.len() > 1 {
            let date = segments[segments.len() - 1].trim().to_string();
            if let Some(pos) = line.rfind(date.as_str()).filter(|_| !date.is_empty()) {
                line.truncate(pos);
            }
            record.date = date;
        }

        // 3. Identifier token
        let line = line.trim_start();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        if !self.is_identifier(name) {
            return Err(Error::malformed(entry, "missing identifier"));
        }
        record.name = name.to_string();

        // 4. Title up to the first sentence-like period, 5. authors after it
        let (title, authors) = split_title(rest);
        if title.is_empty() {
            return Err(Error::malformed(entry, "empty title"));
        }
        record.title = title.to_string();
        record.authors = authors.to_string();

        Ok(record)
    }

    fn is_identifier(&self, token: &str) -> bool {
        token
            .strip_prefix(self.options.identifier_prefix.as_str())
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
    }
}

impl Default for CatalogParser {
    fn default() -> Self {
        Self::new()
    }
}

fn bracket_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((.*?)\)").unwrap())
}

/// Split the text after the identifier into title and authors.
///
/// The title ends at the first period followed either by a space and an
/// uppercase letter (the start of an author's initial) or by nothing but
/// whitespace. Any other period (`Vol. 2`, `e.g.`, `v1.0`) belongs to the
/// title. With no such period, the whole text is the title.
pub fn split_title(text: &str) -> (&str, &str) {
    for (pos, _) in text.match_indices('.') {
        let after = &text[pos + 1..];
        let segment = after.split('.').next().unwrap_or("");

        let blank = segment.trim().is_empty() && (!segment.is_empty() || after.is_empty());
        let mut chars = segment.chars();
        let initial = chars.next() == Some(' ') && chars.next().is_some_and(char::is_uppercase);

        if blank || initial {
            let title = text[..pos].trim();
            let authors = after.trim();
            let authors = authors.strip_suffix('.').unwrap_or(authors).trim_end();
            return (title, authors);
        }
    }

    let title = text.trim();
    (title.strip_suffix('.').unwrap_or(title).trim_end(), "")
}

/// Get the catalog listing out of a fetched index page.
///
/// HTML pages carry the listing in their first `<pre>` block; tags inside it
/// are stripped and basic entities unescaped. Text before `first_entry` (at
/// a line start if possible) is page preamble and is dropped.
pub fn extract_index_text(page: &str, first_entry: Option<&str>) -> String {
    static PRE: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();

    let pre = PRE.get_or_init(|| Regex::new(r"(?is)<pre[^>]*>(.*?)</pre>").unwrap());
    let text = match pre.captures(page).and_then(|c| c.get(1)) {
        Some(body) => {
            let tag = TAG.get_or_init(|| Regex::new(r"<[^>]+>").unwrap());
            unescape_html(&tag.replace_all(body.as_str(), ""))
        }
        None => page.to_string(),
    };

    let Some(marker) = first_entry else {
        return text;
    };
    let start = if text.starts_with(marker) {
        Some(0)
    } else {
        text.find(&format!("\n{}", marker))
            .map(|p| p + 1)
            .or_else(|| text.find(marker))
    };
    match start {
        Some(pos) => text[pos..].to_string(),
        None => text,
    }
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
