//! JSON rendering for catalog records, units and passages.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a value to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert items to JSON Lines, one compact object per line.
pub fn to_json_lines<T: Serialize>(items: &[T]) -> Result<String> {
    let mut output = String::new();
    for item in items {
        output.push_str(&serde_json::to_string(item)?);
        output.push('\n');
    }
    Ok(output)
}

/// Parse JSON Lines back into items. Blank lines are skipped.
pub fn from_json_lines<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            serde_json::from_str(l)
                .map_err(|e| Error::Render(format!("invalid JSON line {:?}: {}", l, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CatalogRecord;

    fn records() -> Vec<CatalogRecord> {
        vec![
            CatalogRecord::new("RFC1", "Host Software", "S. Crocker", "April 1969"),
            CatalogRecord::new("RFC2", "Host software", "B. Duvall", "April 1969"),
        ]
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&records(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Host Software"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&records(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_json_lines() {
        let text = to_json_lines(&records()).unwrap();
        assert_eq!(text.lines().count(), 2);
        let back: Vec<CatalogRecord> = from_json_lines(&text).unwrap();
        assert_eq!(back, records());
    }

    #[test]
    fn test_from_json_lines_reports_bad_line() {
        let result: Result<Vec<CatalogRecord>> = from_json_lines("{\"name\": 1}\n");
        assert!(matches!(result, Err(Error::Render(_))));
    }
}
