//! Line lexer with SIMD-accelerated scanning.
//!
//! The lexer splits the input into lines once, up front, and hands them to
//! the block parser through a forward-only cursor.
//!
//! # Behavior
//!
//! - Zero-copy: lines borrow directly from input
//! - Newlines located with `memchr_iter` (SIMD on supported platforms)
//! - Splits on `\n` only; a `\r` before the newline stays in the line
//! - A trailing newline yields a final empty line, so `n` newlines always
//!   produce `n + 1` lines

use memchr::memchr_iter;

use crate::range::TextRange;

/// A single line from the input with its source range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text (without the terminating newline).
    pub text: &'a str,
    /// Byte range in the original input, newline excluded.
    pub range: TextRange,
    /// Byte offset of `text` in the input, exact at any input size.
    offset: usize,
}

impl<'a> Line<'a> {
    /// Check if this line is empty after trimming whitespace.
    #[inline(always)]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Check if the line starts with the given prefix.
    #[inline(always)]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.text.as_bytes().starts_with(prefix.as_bytes())
    }

    /// Get the line text with leading/trailing whitespace removed.
    #[inline(always)]
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }

    /// Strip a prefix from the line, returning the remainder.
    #[inline(always)]
    pub fn strip_prefix(&self, prefix: &str) -> Option<&'a str> {
        self.text.strip_prefix(prefix)
    }

    /// Check if the line contains a table cell delimiter.
    #[inline(always)]
    pub fn has_pipe(&self) -> bool {
        memchr::memchr(b'|', self.text.as_bytes()).is_some()
    }
}

/// Forward-only cursor over the lines of a document.
///
/// The line sequence is built once and never mutated; parsing only moves
/// `pos`. Lookahead of any depth is available through [`Lexer::peek_nth`].
pub struct Lexer<'a> {
    /// The complete input text.
    input: &'a str,
    /// Every line of the input, in order.
    lines: Vec<Line<'a>>,
    /// Index of the next line to hand out.
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        let bytes = input.as_bytes();
        let mut lines = Vec::with_capacity(bytes.len() / 32 + 1);
        let mut start = 0;

        for newline in memchr_iter(b'\n', bytes) {
            lines.push(Self::make_line(input, start, newline));
            start = newline + 1;
        }
        lines.push(Self::make_line(input, start, bytes.len()));

        Self {
            input,
            lines,
            pos: 0,
        }
    }

    #[inline(always)]
    fn make_line(input: &'a str, start: usize, end: usize) -> Line<'a> {
        Line {
            // `\n` is a single ASCII byte, so both ends are char boundaries.
            text: &input[start..end],
            range: TextRange::from_offsets(start, end),
            offset: start,
        }
    }

    /// Zero-based index of the next line.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total number of lines in the input.
    #[inline(always)]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if all lines have been consumed.
    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Peek at the next line without consuming it.
    #[inline]
    pub fn peek_line(&self) -> Option<&Line<'a>> {
        self.lines.get(self.pos)
    }

    /// Peek `n` lines past the next one (`peek_nth(0)` equals `peek_line`).
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<&Line<'a>> {
        self.lines.get(self.pos + n)
    }

    /// Consume and return the next line.
    #[inline]
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        let line = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        Some(line)
    }

    /// Consume the next line only if it satisfies `pred`.
    #[inline]
    pub fn next_line_if(&mut self, pred: impl FnOnce(&Line<'a>) -> bool) -> Option<Line<'a>> {
        if self.peek_line().is_some_and(pred) {
            self.next_line()
        } else {
            None
        }
    }

    /// Skip blank lines and return the count skipped.
    #[inline]
    pub fn skip_blank_lines(&mut self) -> usize {
        let mut count = 0;
        while self.next_line_if(Line::is_blank).is_some() {
            count += 1;
        }
        count
    }

    /// Get a slice of the input by range.
    #[inline(always)]
    pub fn slice(&self, range: TextRange) -> &'a str {
        range.slice(self.input)
    }

    /// Input text from the start of `first` to the end of `last`, newlines
    /// in between included.
    ///
    /// Works on byte offsets rather than [`TextRange`], so it stays exact
    /// for inputs past `u32::MAX` bytes.
    #[inline]
    pub fn text_between(&self, first: &Line<'a>, last: &Line<'a>) -> &'a str {
        self.input
            .get(first.offset..last.offset + last.text.len())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(lexer: &Lexer<'a>) -> Vec<&'a str> {
        lexer.lines.iter().map(|l| l.text).collect()
    }

    #[test]
    fn splits_like_newline_split() {
        let input = "a\n\nb\n";
        let lexer = Lexer::new(input);
        assert_eq!(texts(&lexer), input.split('\n').collect::<Vec<_>>());
        assert_eq!(lexer.line_count(), 4);
    }

    #[test]
    fn empty_input_is_one_blank_line() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.line_count(), 1);
        assert_eq!(lexer.skip_blank_lines(), 1);
        assert!(lexer.is_eof());
    }

    #[test]
    fn carriage_return_is_kept() {
        let lexer = Lexer::new("one\r\ntwo");
        assert_eq!(texts(&lexer), vec!["one\r", "two"]);
        assert!(!lexer.lines[0].starts_with("one\n"));
        assert_eq!(lexer.lines[0].trimmed(), "one");
    }

    #[test]
    fn ranges_point_back_into_input() {
        let input = "## Title\nbody";
        let lexer = Lexer::new(input);
        assert_eq!(lexer.lines[0].range, TextRange::new(0, 8));
        assert_eq!(lexer.lines[1].range, TextRange::new(9, 13));
        assert_eq!(lexer.slice(lexer.lines[1].range), "body");
    }

    #[test]
    fn text_between_spans_whole_lines() {
        let input = "a\r\nbb\n\ncc\n";
        let lexer = Lexer::new(input);
        assert_eq!(lexer.text_between(&lexer.lines[0], &lexer.lines[3]), "a\r\nbb\n\ncc");
        assert_eq!(lexer.text_between(&lexer.lines[1], &lexer.lines[1]), "bb");
        assert_eq!(lexer.text_between(&lexer.lines[3], &lexer.lines[0]), "");
    }

    #[test]
    fn peek_and_consume() {
        let mut lexer = Lexer::new("a\nb\nc");
        assert_eq!(lexer.peek_nth(2).map(|l| l.text), Some("c"));
        assert_eq!(lexer.peek_nth(3), None);
        assert_eq!(lexer.next_line_if(|l| l.text == "b"), None);
        assert_eq!(lexer.next_line().map(|l| l.text), Some("a"));
        assert_eq!(lexer.position(), 1);
        assert_eq!(lexer.peek_line().map(|l| l.text), Some("b"));
    }

    #[test]
    fn pipe_detection() {
        let lexer = Lexer::new("| a |\nplain");
        assert!(lexer.lines[0].has_pipe());
        assert!(!lexer.lines[1].has_pipe());
    }
}
