//! Line classification.
//!
//! Each source line is classified on its own, from its leading characters.
//! The first matching rule wins:
//!
//! 1. table row (`| ... |`), or table separator when every cell is made of
//!    dashes, colons and whitespace
//! 2. code fence delimiter (three backticks)
//! 3. heading (`### `, `## `, `# `)
//! 4. unordered list item (`* `, `- `)
//! 5. ordered list item (`12. `)
//! 6. quote (`> `)
//! 7. horizontal rule (`---`)
//! 8. blank
//! 9. paragraph

use crate::model::LineKind;

/// Backtick sequence that opens and closes a code fence.
pub const FENCE: &str = "```";

/// Classify one source line.
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();

    if is_table_line(trimmed) {
        return if is_separator_row(trimmed) {
            LineKind::TableSeparator
        } else {
            LineKind::TableRow
        };
    }

    if line.starts_with(FENCE) {
        return LineKind::CodeFenceDelimiter;
    }

    if let Some(level) = heading_level(line) {
        return LineKind::Heading { level };
    }

    if line.starts_with("* ") || line.starts_with("- ") {
        return LineKind::UnorderedListItem;
    }

    if ordered_marker_len(line).is_some() {
        return LineKind::OrderedListItem;
    }

    if line.starts_with("> ") {
        return LineKind::Quote;
    }

    if trimmed == "---" {
        return LineKind::Rule;
    }

    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    LineKind::Paragraph
}

/// Heading level for `#`, `##` and `###` prefixes.
pub(crate) fn heading_level(line: &str) -> Option<u8> {
    if line.starts_with("### ") {
        Some(3)
    } else if line.starts_with("## ") {
        Some(2)
    } else if line.starts_with("# ") {
        Some(1)
    } else {
        None
    }
}

/// Length in bytes of the digits and dot of an ordered list marker.
///
/// Matches `^\d+\.\s`; the whitespace is not included in the length.
pub(crate) fn ordered_marker_len(line: &str) -> Option<usize> {
    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some('.'), Some(c)) if c.is_whitespace() => Some(digits + 1),
        _ => None,
    }
}

fn is_table_line(trimmed: &str) -> bool {
    trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// Split a table line into trimmed cells.
///
/// The segments produced by the outer pipes are dropped, so `| a | b |`
/// yields `["a", "b"]`.
pub(crate) fn split_cells(trimmed: &str) -> Vec<String> {
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    if inner.is_empty() {
        return Vec::new();
    }
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Check if a table line is a header separator such as `|---|:--:|`.
///
/// Every cell must consist of dashes, colons and whitespace only, and the
/// row must contain at least one dash.
pub(crate) fn is_separator_row(trimmed: &str) -> bool {
    if !is_table_line(trimmed) {
        return false;
    }
    let cells = split_cells(trimmed);
    !cells.is_empty()
        && cells
            .iter()
            .all(|cell| cell.chars().all(|c| c.is_whitespace() || c == '-' || c == ':'))
        && cells.iter().any(|cell| cell.contains('-'))
}
