//! Indentation stack used to infer the section outline.
//!
//! Plain-text RFCs carry no markup: a line indented deeper than the text
//! before it turns that text into a heading, and a shallower line closes one
//! or more sections. The stack keeps `(heading, width)` frames on top of an
//! implicit root at width 0.

use crate::model::{Heading, SectionPath};

/// A heading together with the indentation width that opened it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Buffered heading text
    pub heading: Heading,
    /// Leading whitespace width of the first line inside the section
    pub width: usize,
}

/// How an incoming line relates to the current section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Deeper than the stack top: the buffered chunk is a heading
    Deeper,
    /// Same width: the buffered chunk is a paragraph
    Same,
    /// Shallower: emit the chunk, then backtrack
    Shallower,
}

/// Explicit stack of open sections.
#[derive(Debug, Clone, Default)]
pub struct SectionStack {
    frames: Vec<Frame>,
}

impl SectionStack {
    /// Create a stack holding only the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Width of the innermost open section (0 at the root).
    pub fn top_width(&self) -> usize {
        self.frames.last().map_or(0, |f| f.width)
    }

    /// Number of open sections above the root.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Open frames, outermost first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Widths from the root outwards, root included.
    pub fn widths(&self) -> Vec<usize> {
        std::iter::once(0)
            .chain(self.frames.iter().map(|f| f.width))
            .collect()
    }

    /// Compare an incoming width against the stack top.
    pub fn classify(&self, width: usize) -> Step {
        let top = self.top_width();
        if width > top {
            Step::Deeper
        } else if width == top {
            Step::Same
        } else {
            Step::Shallower
        }
    }

    /// Open a section.
    pub fn push(&mut self, heading: Heading, width: usize) {
        self.frames.push(Frame { heading, width });
    }

    /// Number of frames to pop so the top width is nearest to `width`.
    ///
    /// Candidates are scanned from the top down; on a tie the shallower
    /// backtrack wins. The root is never popped.
    pub fn backtrack_steps(&self, width: usize) -> usize {
        self.widths()
            .iter()
            .rev()
            .enumerate()
            .min_by_key(|(_, w)| w.abs_diff(width))
            .map_or(0, |(steps, _)| steps)
    }

    /// Pop to the frame nearest to `width`; returns the number of popped frames.
    pub fn backtrack(&mut self, width: usize) -> usize {
        let steps = self.backtrack_steps(width);
        let keep = self.frames.len() - steps;
        self.frames.truncate(keep);
        steps
    }

    /// Split the open headings into a section path and a sentence lead.
    ///
    /// Sentence entries at the top of the stack are body continuation
    /// rather than section titles; everything below the last label stays in
    /// the path.
    pub fn split(&self) -> (SectionPath, Vec<String>) {
        let split = self
            .frames
            .iter()
            .rposition(|f| f.heading.is_label())
            .map_or(0, |i| i + 1);
        let (labels, sentences) = self.frames.split_at(split);

        let path = SectionPath::from_labels(labels.iter().map(|f| f.heading.text().to_string()));
        let lead = sentences
            .iter()
            .map(|f| f.heading.text().to_string())
            .collect();
        (path, lead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_with(widths: &[usize]) -> SectionStack {
        let mut stack = SectionStack::new();
        for (i, w) in widths.iter().enumerate() {
            stack.push(Heading::classify(format!("Section {}", i)), *w);
        }
        stack
    }

    #[test]
    fn test_classify() {
        let stack = stack_with(&[3]);
        assert_eq!(stack.classify(5), Step::Deeper);
        assert_eq!(stack.classify(3), Step::Same);
        assert_eq!(stack.classify(0), Step::Shallower);
    }

    #[test]
    fn test_backtrack_nearest_width() {
        // Widths [0, 2, 5], incoming 3: back to width 2, one pop
        let mut stack = stack_with(&[2, 5]);
        assert_eq!(stack.backtrack(3), 1);
        assert_eq!(stack.widths(), vec![0, 2]);
    }

    #[test]
    fn test_backtrack_to_root() {
        let mut stack = stack_with(&[3, 6]);
        assert_eq!(stack.backtrack(0), 2);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_backtrack_zero_steps() {
        // Widths [0, 4], incoming 3 is nearer to 4 than to 0: nothing popped
        let mut stack = stack_with(&[4]);
        assert_eq!(stack.backtrack(3), 0);
        assert_eq!(stack.widths(), vec![0, 4]);
    }

    #[test]
    fn test_backtrack_tie_prefers_fewer_pops() {
        // Widths [0, 2, 4], incoming 3 is equidistant from 2 and 4
        let mut stack = stack_with(&[2, 4]);
        assert_eq!(stack.backtrack(3), 0);
        assert_eq!(stack.top_width(), 4);
    }

    #[test]
    fn test_backtrack_on_empty_stack() {
        let mut stack = SectionStack::new();
        assert_eq!(stack.backtrack(0), 0);
    }

    #[test]
    fn test_split_trailing_sentences() {
        let mut stack = SectionStack::new();
        stack.push(Heading::classify("Introduction"), 3);
        stack.push(Heading::classify("The fields are as follows:"), 6);
        let (path, lead) = stack.split();
        assert_eq!(path.labels(), &["Introduction".to_string()]);
        assert_eq!(lead, vec!["The fields are as follows:".to_string()]);
    }

    #[test]
    fn test_split_keeps_inner_sentence_in_path() {
        let mut stack = SectionStack::new();
        stack.push(Heading::classify("Wrapped sentence."), 3);
        stack.push(Heading::classify("Details"), 6);
        let (path, lead) = stack.split();
        assert_eq!(path.depth(), 2);
        assert!(lead.is_empty());
    }
}
