//! Block extraction: grouping classified lines into blocks.

use crate::model::{Block, LineKind, SourceLine};

use super::classify::{classify, ordered_marker_len, FENCE};
use super::cursor::LineCursor;
use super::table::parse_table_at;

/// Marker used for unordered list items.
pub const BULLET: &str = "•";

/// Extract blocks from a whole document string.
pub fn extract_text(input: &str) -> Vec<Block> {
    let lines = SourceLine::split(input);
    extract(&lines)
}

/// Extract blocks from source lines.
pub fn extract(lines: &[SourceLine]) -> Vec<Block> {
    let mut cursor = LineCursor::new(lines);
    let mut blocks = Vec::new();

    while let Some(line) = cursor.peek() {
        let kind = classify(&line.text);
        match kind {
            LineKind::CodeFenceDelimiter => {
                cursor.advance(1);
                blocks.push(collect_fence(&line.text, &mut cursor));
            }
            LineKind::TableRow | LineKind::TableSeparator => {
                let table = parse_table_at(&mut cursor);
                if table.rows.is_empty() {
                    log::debug!(
                        "extract: table at line {} has no rows, skipped",
                        line.index
                    );
                } else {
                    blocks.push(Block::Table { rows: table.rows });
                }
            }
            _ => {
                cursor.advance(1);
                blocks.push(single_line_block(kind, &line.text));
            }
        }
    }

    log::debug!("extract: {} lines -> {} blocks", lines.len(), blocks.len());
    blocks
}

/// Collect raw lines up to the closing fence, which is consumed.
///
/// Lines inside the fence are never classified. An unterminated fence runs
/// to the end of input.
fn collect_fence(opening: &str, cursor: &mut LineCursor<'_>) -> Block {
    let info = opening[FENCE.len()..].trim();
    let language = (!info.is_empty()).then(|| info.to_string());

    let start = cursor.position();
    let mut lines = Vec::new();
    let mut closed = false;

    while let Some(line) = cursor.next_line() {
        if classify(&line.text) == LineKind::CodeFenceDelimiter {
            closed = true;
            break;
        }
        lines.push(line.text.clone());
    }

    if !closed {
        log::warn!(
            "extract: code fence opened before line {} is never closed, running to end of input",
            start
        );
    }

    Block::CodeBlock { language, lines }
}

fn single_line_block(kind: LineKind, text: &str) -> Block {
    match kind {
        LineKind::Heading { level } => Block::Heading {
            level,
            text: text[level as usize + 1..].trim().to_string(),
        },
        LineKind::UnorderedListItem => Block::ListItem {
            ordered: false,
            marker: BULLET.to_string(),
            text: text[2..].trim().to_string(),
        },
        LineKind::OrderedListItem => {
            let marker_len = ordered_marker_len(text).unwrap_or(0);
            Block::ListItem {
                ordered: true,
                marker: text[..marker_len].to_string(),
                text: text[marker_len..].trim().to_string(),
            }
        }
        LineKind::Quote => Block::Quote {
            text: text[2..].trim().to_string(),
        },
        LineKind::Rule => Block::Rule,
        LineKind::Blank => Block::Blank,
        LineKind::Paragraph
        | LineKind::CodeFenceDelimiter
        | LineKind::TableRow
        | LineKind::TableSeparator => Block::Paragraph {
            text: text.trim().to_string(),
        },
    }
}
