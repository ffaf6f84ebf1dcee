//! Re-join paragraphs split by page breaks, figures and tables.
//!
//! Once page footers and running headers are stripped, a paragraph that
//! crossed a page boundary shows up as two units in the same section: the
//! first stops mid-sentence and the second starts in lowercase.

use crate::model::TextUnit;

use super::ReconstructStats;

/// Check if `next` continues the sentence left open by `prev`.
pub fn is_continuation(prev: &TextUnit, next: &TextUnit) -> bool {
    let open_ended = prev
        .body
        .chars()
        .last()
        .is_some_and(|c| !c.is_ascii_punctuation());
    let lowercase_start = next.body.chars().next().is_some_and(char::is_lowercase);

    open_ended && lowercase_start && prev.section_label() == next.section_label()
}

/// Merge continuation units into their predecessor.
///
/// Scanning resumes from the merged unit, so a paragraph broken over several
/// pages is rebuilt in one pass. A merge that would make the line reach
/// `max_line_chars` is skipped.
pub fn merge_paragraphs(
    units: Vec<TextUnit>,
    max_line_chars: usize,
    stats: &mut ReconstructStats,
) -> Vec<TextUnit> {
    let mut merged: Vec<TextUnit> = Vec::with_capacity(units.len());

    for unit in units {
        if let Some(prev) = merged.last_mut() {
            if is_continuation(prev, &unit) {
                let combined = prev.local_line().chars().count() + 1 + unit.body.chars().count();
                if combined < max_line_chars {
                    prev.body.push(' ');
                    prev.body.push_str(&unit.body);
                    stats.merges += 1;
                    continue;
                }
                log::debug!(
                    "{}: not merging, line would reach {} characters",
                    prev.document.name,
                    combined
                );
            }
        }
        merged.push(unit);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentRef, SectionPath};

    fn unit(section: &[&str], body: &str) -> TextUnit {
        TextUnit::paragraph(
            DocumentRef::new("rfc791", "Internet Protocol"),
            SectionPath::from_labels(section.iter().copied()),
            body,
        )
    }

    fn merge(units: Vec<TextUnit>) -> Vec<TextUnit> {
        let mut stats = ReconstructStats::new();
        merge_paragraphs(units, 1500, &mut stats)
    }

    #[test]
    fn test_merge_split_sentence() {
        let units = vec![
            unit(&["Header"], "the value of this field"),
            unit(&["Header"], "is limited to 255."),
        ];
        let merged = merge(units);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].body, "the value of this field is limited to 255.");
    }

    #[test]
    fn test_no_merge_after_punctuation() {
        let units = vec![
            unit(&["Header"], "the value of this field)"),
            unit(&["Header"], "is limited to 255."),
        ];
        assert_eq!(merge(units).len(), 2);
    }

    #[test]
    fn test_no_merge_across_sections() {
        let units = vec![
            unit(&["Header"], "the value of this field"),
            unit(&["Options"], "is limited to 255."),
        ];
        assert_eq!(merge(units).len(), 2);
    }

    #[test]
    fn test_no_merge_on_uppercase_start() {
        let units = vec![
            unit(&["Header"], "the value of this field"),
            unit(&["Header"], "Is limited to 255."),
        ];
        assert_eq!(merge(units).len(), 2);
    }

    #[test]
    fn test_chained_merge() {
        let units = vec![
            unit(&[], "a paragraph broken"),
            unit(&[], "over two page"),
            unit(&[], "boundaries ends here."),
            unit(&[], "unrelated."),
        ];
        let mut stats = ReconstructStats::new();
        let merged = merge_paragraphs(units, 1500, &mut stats);
        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged[0].body,
            "a paragraph broken over two page boundaries ends here."
        );
        assert_eq!(stats.merges, 2);
    }

    #[test]
    fn test_merge_respects_length_limit() {
        let units = vec![unit(&[], "aaaa bbbb"), unit(&[], "cccc dddd")];
        let mut stats = ReconstructStats::new();
        // "* aaaa bbbb" + " cccc dddd" is 21 characters
        assert_eq!(merge_paragraphs(units.clone(), 21, &mut stats).len(), 2);
        assert_eq!(merge_paragraphs(units, 22, &mut stats).len(), 1);
    }
}
