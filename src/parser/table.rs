//! Pipe table parsing.

use crate::model::SourceLine;

use super::classify::{classify, is_separator_row, split_cells};
use super::cursor::LineCursor;

/// Rows parsed from a contiguous run of table lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    /// Kept rows; the first one is the header
    pub rows: Vec<Vec<String>>,

    /// Number of source lines consumed
    pub consumed: usize,

    /// Number of separator lines dropped
    pub separators: usize,

    /// Number of rows dropped because every cell was empty
    pub empty_rows: usize,
}

impl ParsedTable {
    /// Header row, if any row was kept.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Body rows (everything after the header).
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Widest row in cells; rows are not reconciled to a common width.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Parse consecutive table lines starting at `start`.
///
/// See [`parse_table_at`] for the rules.
pub fn parse_table(lines: &[SourceLine], start: usize) -> ParsedTable {
    let mut cursor = LineCursor::new(lines);
    cursor.advance(start);
    parse_table_at(&mut cursor)
}

/// Parse consecutive table lines at the cursor, advancing past them.
///
/// Separator lines are re-checked per line and dropped wherever they occur,
/// and rows whose cells are all empty are dropped silently. Parsing stops at
/// the first line that is not a table line, leaving the cursor on it.
pub fn parse_table_at(cursor: &mut LineCursor<'_>) -> ParsedTable {
    let start = cursor.position();
    let mut table = ParsedTable::default();

    while let Some(line) = cursor.peek() {
        if !classify(&line.text).is_table() {
            break;
        }
        cursor.advance(1);
        table.consumed += 1;

        let trimmed = line.text.trim();
        if is_separator_row(trimmed) {
            table.separators += 1;
            continue;
        }

        let cells = split_cells(trimmed);
        if cells.iter().all(|cell| cell.is_empty()) {
            table.empty_rows += 1;
            continue;
        }
        table.rows.push(cells);
    }

    log::trace!(
        "parse_table: start={} consumed={} rows={} separators={} empty={}",
        start,
        table.consumed,
        table.rows.len(),
        table.separators,
        table.empty_rows
    );

    table
}
