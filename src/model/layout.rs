//! Layout result types.

use super::{Block, DrawInstruction, PageGeometry};
use serde::{Deserialize, Serialize};

/// The output of one layout pass: draw instructions in emission order.
///
/// Page boundaries are explicit [`DrawInstruction::PageBreak`] markers; the
/// first page starts implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Geometry the layout was computed for
    pub geometry: PageGeometry,

    /// Instructions in emission order
    pub instructions: Vec<DrawInstruction>,

    /// Number of pages that received content (0 for an empty document)
    pub page_count: usize,

    /// Statistics collected during layout
    pub stats: LayoutStats,
}

impl Layout {
    /// Create an empty layout.
    pub fn empty(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            instructions: Vec::new(),
            page_count: 0,
            stats: LayoutStats::default(),
        }
    }

    /// Check if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Split the instruction sequence into pages, dropping the break markers.
    pub fn pages(&self) -> Vec<&[DrawInstruction]> {
        if self.instructions.is_empty() {
            return Vec::new();
        }
        self.instructions
            .split(|i| i.is_page_break())
            .collect()
    }

    /// Pair each non-marker instruction with its zero-based page index.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &DrawInstruction)> + '_ {
        let mut page = 0;
        self.instructions.iter().filter_map(move |instruction| {
            if let DrawInstruction::PageBreak { page_index } = instruction {
                page = *page_index;
                None
            } else {
                Some((page, instruction))
            }
        })
    }

    /// All text runs in emission order.
    pub fn text_runs(&self) -> impl Iterator<Item = &DrawInstruction> + '_ {
        self.instructions.iter().filter(|i| i.is_text())
    }

    /// Get plain text of every text run, one per line.
    pub fn plain_text(&self) -> String {
        self.instructions
            .iter()
            .filter_map(|i| i.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Statistics collected during layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Number of source lines
    pub line_count: u32,

    /// Number of headings laid out
    pub heading_count: u32,

    /// Number of paragraphs laid out
    pub paragraph_count: u32,

    /// Number of list items laid out
    pub list_item_count: u32,

    /// Number of quotes laid out
    pub quote_count: u32,

    /// Number of code blocks laid out
    pub code_block_count: u32,

    /// Number of tables laid out
    pub table_count: u32,

    /// Number of horizontal rules
    pub rule_count: u32,

    /// Number of blocks skipped because their text was empty
    pub skipped_count: u32,

    /// Number of text runs emitted
    pub text_run_count: u32,

    /// Number of table segments emitted (one per page a table touches)
    pub table_segment_count: u32,

    /// Number of page breaks inserted
    pub page_break_count: u32,
}

impl LayoutStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one laid-out block by kind.
    pub fn record(&mut self, block: &Block) {
        match block {
            Block::Heading { .. } => self.heading_count += 1,
            Block::Paragraph { .. } => self.paragraph_count += 1,
            Block::ListItem { .. } => self.list_item_count += 1,
            Block::Quote { .. } => self.quote_count += 1,
            Block::CodeBlock { .. } => self.code_block_count += 1,
            Block::Table { .. } => self.table_count += 1,
            Block::Rule => self.rule_count += 1,
            Block::Blank => {}
        }
    }

    /// Total number of content blocks laid out (blank lines excluded).
    pub fn block_count(&self) -> u32 {
        self.heading_count
            + self.paragraph_count
            + self.list_item_count
            + self.quote_count
            + self.code_block_count
            + self.table_count
            + self.rule_count
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &LayoutStats) {
        self.line_count += other.line_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_item_count += other.list_item_count;
        self.quote_count += other.quote_count;
        self.code_block_count += other.code_block_count;
        self.table_count += other.table_count;
        self.rule_count += other.rule_count;
        self.skipped_count += other.skipped_count;
        self.text_run_count += other.text_run_count;
        self.table_segment_count += other.table_segment_count;
        self.page_break_count += other.page_break_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Color;

    fn run(y: f32, text: &str) -> DrawInstruction {
        DrawInstruction::TextRun {
            x: 0.0,
            y,
            content: text.to_string(),
            font_size: 10.0,
            color: Color::BLACK,
        }
    }

    #[test]
    fn test_pages_split_on_breaks() {
        let mut layout = Layout::empty(PageGeometry::default());
        layout.instructions = vec![
            run(10.0, "a"),
            DrawInstruction::PageBreak { page_index: 1 },
            run(10.0, "b"),
            run(20.0, "c"),
        ];
        layout.page_count = 2;

        let pages = layout.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].len(), 2);

        let indexed: Vec<usize> = layout.indexed().map(|(p, _)| p).collect();
        assert_eq!(indexed, vec![0, 1, 1]);
        assert_eq!(layout.plain_text(), "a\nb\nc");
    }

    #[test]
    fn test_empty_layout_has_no_pages() {
        let layout = Layout::empty(PageGeometry::default());
        assert!(layout.pages().is_empty());
        assert!(layout.is_empty());
    }

    #[test]
    fn test_stats_merge() {
        let mut a = LayoutStats {
            heading_count: 1,
            table_count: 2,
            ..Default::default()
        };
        let b = LayoutStats {
            heading_count: 2,
            rule_count: 1,
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.heading_count, 3);
        assert_eq!(a.block_count(), 6);
    }
}
