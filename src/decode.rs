//! Lenient decoding of raw document bytes.
//!
//! The RFC series mixes encodings (ASCII, Latin-1, the odd UTF-8 file), so
//! documents are decoded byte-by-byte as Latin-1. Every byte sequence maps to
//! a valid string; stray multi-byte characters surface as noise that the
//! cleanup stage filters out.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Decode bytes as Latin-1. Never fails.
///
/// # Example
/// ```
/// use rfcsearch::decode::decode_lossy;
///
/// assert_eq!(decode_lossy(b"caf\xe9"), "café");
/// ```
pub fn decode_lossy(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Split decoded text into lines with trailing whitespace removed.
///
/// Handles `\n` and `\r\n` line endings; form feeds at the end of a page
/// disappear with the trailing whitespace.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(|l| l.trim_end().to_string()).collect()
}

/// Decode bytes and split them into lines in one step.
pub fn decode_lines(bytes: &[u8]) -> Vec<String> {
    split_lines(&decode_lossy(bytes))
}

/// Read a document from disk and return its lines.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let data = fs::read(path)?;
    Ok(decode_lines(&data))
}
