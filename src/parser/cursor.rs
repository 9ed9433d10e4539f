//! Forward-only cursor over source lines.

use crate::model::SourceLine;

/// A forward-only cursor over an indexable slice of lines.
///
/// The block extractor and the table parser share one cursor; whoever
/// consumes lines advances it, so there is no hidden loop counter.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: &'a [SourceLine],
    position: usize,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor at the first line.
    pub fn new(lines: &'a [SourceLine]) -> Self {
        Self { lines, position: 0 }
    }

    /// The current line, if any.
    pub fn peek(&self) -> Option<&'a SourceLine> {
        self.lines.get(self.position)
    }

    /// Advance by `n` lines, stopping at the end.
    pub fn advance(&mut self, n: usize) {
        self.position = (self.position + n).min(self.lines.len());
    }

    /// Return the current line and advance past it.
    pub fn next_line(&mut self) -> Option<&'a SourceLine> {
        let line = self.peek()?;
        self.advance(1);
        Some(line)
    }

    /// Check if every line has been consumed.
    pub fn at_end(&self) -> bool {
        self.position >= self.lines.len()
    }

    /// Lines from the current position to the end.
    pub fn remaining(&self) -> &'a [SourceLine] {
        &self.lines[self.position..]
    }

    /// Zero-based index of the current line.
    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_walk() {
        let lines = SourceLine::split("a\nb\nc");
        let mut cursor = LineCursor::new(&lines);

        assert_eq!(cursor.peek().map(|l| l.text.as_str()), Some("a"));
        cursor.advance(2);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.remaining().len(), 1);
        assert_eq!(cursor.next_line().map(|l| l.text.as_str()), Some("c"));
        assert!(cursor.at_end());
        assert!(cursor.next_line().is_none());
    }

    #[test]
    fn test_advance_saturates() {
        let lines = SourceLine::split("a");
        let mut cursor = LineCursor::new(&lines);
        cursor.advance(10);
        assert!(cursor.at_end());
        assert!(cursor.remaining().is_empty());
    }
}
