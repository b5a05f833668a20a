//! A single forward walk over the lines of a document.
//!
//! The parser, the extractor and the validator all need the same thing: each
//! line with its number, its classification, the classification of the line
//! before it and a peek at the raw text after it. [`walk_lines`] computes that
//! once and hands it to a [`LineVisitor`].

use crate::{Classifier, ElementType};

/// One line as seen by a [`LineVisitor`].
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Raw line, including any trailing `\r`.
    pub text: &'a str,
    pub kind: ElementType,
    /// Type of the preceding line; `None` on the first line.
    pub previous: Option<ElementType>,
    /// Raw text of the following line; `None` on the last line.
    pub next_text: Option<&'a str>,
}

impl Line<'_> {
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.kind == ElementType::Empty
    }

    /// Whether the preceding line is blank or absent.
    pub fn follows_break(&self) -> bool {
        matches!(self.previous, None | Some(ElementType::Empty))
    }

    /// Whether a non-blank line follows.
    pub fn precedes_text(&self) -> bool {
        self.next_text.is_some_and(|next| !next.trim().is_empty())
    }
}

/// Consumes classified lines in document order.
pub trait LineVisitor {
    type Output;

    fn visit(&mut self, line: &Line<'_>);

    /// Called once after the last line with the document's line count.
    fn finish(self, line_count: usize) -> Self::Output;
}

/// Split a document into physical lines. Only `\n` separates lines.
pub fn split_lines(document: &str) -> Vec<&str> {
    document.split('\n').collect()
}

/// Classify every line of `document` and feed it to `visitor`.
pub fn walk_lines<V: LineVisitor>(document: &str, mut visitor: V) -> V::Output {
    let lines = split_lines(document);
    let mut classifier = Classifier::new();

    for (index, text) in lines.iter().enumerate() {
        let previous = classifier.previous();
        let kind = classifier.push(text);
        visitor.visit(&Line {
            number: index + 1,
            text,
            kind,
            previous,
            next_text: lines.get(index + 1).copied(),
        });
    }

    visitor.finish(lines.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder(Vec<(usize, ElementType, Option<ElementType>, bool)>);

    impl LineVisitor for Recorder {
        type Output = (Vec<(usize, ElementType, Option<ElementType>, bool)>, usize);

        fn visit(&mut self, line: &Line<'_>) {
            self.0
                .push((line.number, line.kind, line.previous, line.precedes_text()));
        }

        fn finish(self, line_count: usize) -> Self::Output {
            (self.0, line_count)
        }
    }

    #[test]
    fn test_walk_threads_previous_type() {
        let (lines, count) = walk_lines("JOHN\nHello.\n\nDone.", Recorder(Vec::new()));
        assert_eq!(count, 4);
        assert_eq!(
            lines,
            vec![
                (1, ElementType::Character, None, true),
                (2, ElementType::Dialogue, Some(ElementType::Character), false),
                (3, ElementType::Empty, Some(ElementType::Dialogue), true),
                (4, ElementType::Action, Some(ElementType::Empty), false),
            ]
        );
    }

    #[test]
    fn test_empty_document_is_one_blank_line() {
        let (lines, count) = walk_lines("", Recorder(Vec::new()));
        assert_eq!(count, 1);
        assert_eq!(lines, vec![(1, ElementType::Empty, None, false)]);
    }

    #[test]
    fn test_split_keeps_carriage_returns() {
        assert_eq!(split_lines("a\r\nb"), vec!["a\r", "b"]);
    }
}
