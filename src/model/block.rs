//! Source-level types: lines, line kinds and blocks.

use serde::{Deserialize, Serialize};

/// A raw source line with its zero-based position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Zero-based line index
    pub index: usize,

    /// Line text without the trailing line separator
    pub text: String,
}

impl SourceLine {
    /// Create a new source line.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Split a document into source lines on `\n`.
    ///
    /// A trailing `\r` is stripped from each line so CRLF input behaves
    /// like LF input. An empty document yields no lines.
    pub fn split(input: &str) -> Vec<SourceLine> {
        if input.is_empty() {
            return Vec::new();
        }
        input
            .split('\n')
            .enumerate()
            .map(|(index, text)| SourceLine::new(index, text.strip_suffix('\r').unwrap_or(text)))
            .collect()
    }
}

/// Classification of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineKind {
    /// `#`, `##` or `###` heading
    Heading {
        /// Heading level (1-3)
        level: u8,
    },
    /// Triple-backtick fence delimiter
    CodeFenceDelimiter,
    /// Pipe-delimited table row
    TableRow,
    /// Table row made only of dashes, colons and whitespace
    TableSeparator,
    /// `> ` block quote
    Quote,
    /// `* ` or `- ` list item
    UnorderedListItem,
    /// `1. ` list item
    OrderedListItem,
    /// `---` horizontal rule
    Rule,
    /// Empty or whitespace-only line
    Blank,
    /// Anything else
    Paragraph,
}

impl LineKind {
    /// Check if this kind belongs to a table run.
    pub fn is_table(&self) -> bool {
        matches!(self, LineKind::TableRow | LineKind::TableSeparator)
    }
}

/// One semantic unit of document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading (levels 1-3)
    Heading {
        /// Heading level (1-3)
        level: u8,
        /// Heading text, markers removed
        text: String,
    },

    /// A fenced code block, rendered verbatim
    CodeBlock {
        /// Info string following the opening fence (e.g. `rust`)
        language: Option<String>,
        /// Raw lines between the fences
        lines: Vec<String>,
    },

    /// A pipe table; the first row is the header
    Table {
        /// Rows of trimmed cell strings
        rows: Vec<Vec<String>>,
    },

    /// A block quote line
    Quote {
        /// Quote text, marker removed
        text: String,
    },

    /// A list item
    ListItem {
        /// Whether the item is numbered
        ordered: bool,
        /// Bullet or ordinal (`•`, `3.`)
        marker: String,
        /// Item text, marker removed
        text: String,
    },

    /// A horizontal rule
    Rule,

    /// A blank line (vertical gap)
    Blank,

    /// A paragraph line
    Paragraph {
        /// Paragraph text
        text: String,
    },
}

impl Block {
    /// Create a heading block.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 3),
            text: text.into(),
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    /// Create a code block without a language tag.
    pub fn code<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Block::CodeBlock {
            language: None,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a table block from rows of cell strings.
    pub fn table<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Block::Table {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Short name of the block kind, used in logs and statistics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::CodeBlock { .. } => "code_block",
            Block::Table { .. } => "table",
            Block::Quote { .. } => "quote",
            Block::ListItem { .. } => "list_item",
            Block::Rule => "rule",
            Block::Blank => "blank",
            Block::Paragraph { .. } => "paragraph",
        }
    }

    /// Check if this block is a blank line.
    pub fn is_blank(&self) -> bool {
        matches!(self, Block::Blank)
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. }
            | Block::Quote { text }
            | Block::Paragraph { text } => text.clone(),
            Block::ListItem { marker, text, .. } => format!("{} {}", marker, text),
            Block::CodeBlock { lines, .. } => lines.join("\n"),
            Block::Table { rows } => rows
                .iter()
                .map(|row| row.join("\t"))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Rule | Block::Blank => String::new(),
        }
    }
}
