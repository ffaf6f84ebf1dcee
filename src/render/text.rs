//! Plain text rendering of reconstructed units.

use std::io::Write;

use crate::error::Result;
use crate::model::TextUnit;

/// Render units as output lines, one per unit.
pub fn to_lines(units: &[TextUnit]) -> Vec<String> {
    units.iter().map(TextUnit::to_line).collect()
}

/// Render units as text with a trailing newline after every line.
pub fn to_text(units: &[TextUnit]) -> String {
    let mut output = String::new();
    for unit in units {
        output.push_str(&unit.to_line());
        output.push('\n');
    }
    output
}

/// Write units to a writer, one line each.
pub fn write_text<W: Write>(mut writer: W, units: &[TextUnit]) -> Result<()> {
    for unit in units {
        writeln!(writer, "{}", unit.to_line())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentRef, SectionPath};

    fn units() -> Vec<TextUnit> {
        let doc = DocumentRef::new("rfc1", "Host Software");
        vec![
            TextUnit::paragraph(doc.clone(), SectionPath::new(), "First."),
            TextUnit::paragraph(doc, SectionPath::from_labels(["Summary"]), "Second."),
        ]
    }

    #[test]
    fn test_to_text() {
        let text = to_text(&units());
        assert_eq!(
            text,
            "* rfc1 - Host Software * First.\n* rfc1 - Host Software - Summary * Second.\n"
        );
    }

    #[test]
    fn test_write_text_matches_to_text() {
        let mut buf = Vec::new();
        write_text(&mut buf, &units()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), to_text(&units()));
    }

    #[test]
    fn test_to_lines_empty() {
        assert!(to_lines(&[]).is_empty());
        assert_eq!(to_text(&[]), "");
    }
}
