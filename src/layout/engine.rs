//! Pagination engine.
//!
//! Blocks are placed one at a time. For each block the engine measures its
//! height, compares it against the space left below the cursor, starts a new
//! page if needed, then emits draw instructions and advances the cursor.
//! The break decision always uses the cursor position from before the block,
//! so no block ever starts below the bottom margin.
//!
//! Blocks move to the next page as a whole. Only a block taller than a full
//! page is split: code and text line by line, tables row by row.

use crate::error::Result;
use crate::model::{
    Block, Color, DrawInstruction, Layout, LayoutStats, PageGeometry, TableRowLayout,
};

use super::cursor::PageCursor;
use super::inline::strip_inline;
use super::measure::Measure;
use super::options::{LayoutOptions, TableHeaderPolicy};

/// Gap between a list marker and the item text.
const MARKER_GAP: f32 = 4.0;

/// Stroke width of heading underlines.
const UNDERLINE_WIDTH: f32 = 0.75;

/// Stroke width of horizontal rules.
const RULE_WIDTH: f32 = 1.0;

/// Lay out blocks into positioned draw instructions.
///
/// Fails only when the options are invalid or the measurement port fails;
/// nothing emitted before a failure is returned.
pub fn layout<M: Measure + ?Sized>(
    blocks: &[Block],
    options: &LayoutOptions,
    measure: &M,
) -> Result<Layout> {
    options.validate()?;
    LayoutEngine::new(options, measure).run(blocks)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// Decoration drawn once per page segment of a line run.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Decoration {
    None,
    Background(Color),
    LeftBar(Color, f32),
    Underline(Color),
}

/// Pre-wrapped lines of one block, ready to be positioned.
struct LineRun {
    lines: Vec<String>,
    x: f32,
    align: Align,
    font_size: f32,
    line_height: f32,
    color: Color,
    padding: f32,
    decoration: Decoration,
    marker: Option<(String, f32)>,
}

impl LineRun {
    fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height + 2.0 * self.padding
    }

    fn first_line_height(&self) -> f32 {
        self.line_height + 2.0 * self.padding
    }
}

/// Start of the part of a block that lives on one page.
struct Segment {
    index: usize,
    top: f32,
}

/// Column layout shared by every segment of one table.
struct TableGeometry {
    column_widths: Vec<f32>,
    font_size: f32,
    line_height: f32,
    padding: f32,
}

/// Walks blocks and produces positioned draw instructions.
///
/// An engine owns the page cursor of exactly one layout pass and is
/// consumed by [`LayoutEngine::run`].
pub struct LayoutEngine<'a, M: Measure + ?Sized> {
    options: &'a LayoutOptions,
    measure: &'a M,
    geometry: PageGeometry,
    cursor: PageCursor,
    out: Vec<DrawInstruction>,
    stats: LayoutStats,
}

impl<'a, M: Measure + ?Sized> LayoutEngine<'a, M> {
    /// Create an engine positioned at the top of the first page.
    pub fn new(options: &'a LayoutOptions, measure: &'a M) -> Self {
        let geometry = options.geometry();
        Self {
            options,
            measure,
            geometry,
            cursor: PageCursor::new(
                geometry.margins.top,
                options.body_font_size,
                options.colors.text,
            ),
            out: Vec::new(),
            stats: LayoutStats::new(),
        }
    }

    /// Lay out every block and return the finished layout.
    pub fn run(mut self, blocks: &[Block]) -> Result<Layout> {
        self.place_title()?;

        for block in blocks {
            log::trace!(
                "layout: {} at page {} y={:.1}",
                block.kind_name(),
                self.cursor.page_index,
                self.cursor.y
            );
            if block.is_blank() {
                self.advance_clamped(self.options.blank_spacing);
                continue;
            }
            if self.place_block(block)? {
                self.stats.record(block);
            } else {
                self.stats.skipped_count += 1;
            }
        }

        let page_count = if self.out.is_empty() {
            0
        } else {
            self.cursor.page_index + 1
        };
        log::debug!(
            "layout: {} blocks -> {} instructions on {} pages",
            blocks.len(),
            self.out.len(),
            page_count
        );

        Ok(Layout {
            geometry: self.geometry,
            instructions: self.out,
            page_count,
            stats: self.stats,
        })
    }

    /// Place one non-blank block. Returns false when it had nothing to draw.
    fn place_block(&mut self, block: &Block) -> Result<bool> {
        let options = self.options;
        let colors = options.colors;
        let left = self.geometry.margins.left;

        match block {
            Block::Heading { level, text } => {
                let size = options.heading_font_size(*level);
                let lines = self.wrap_inline(text, size, self.geometry.content_width())?;
                let decoration = if *level == 1 {
                    Decoration::Underline(colors.rule)
                } else {
                    Decoration::None
                };
                self.place_lines(LineRun {
                    lines,
                    x: left,
                    align: Align::Left,
                    font_size: size,
                    line_height: options.line_height(size),
                    color: colors.heading,
                    padding: options.heading_padding,
                    decoration,
                    marker: None,
                })
            }
            Block::Paragraph { text } => {
                self.place_body(text, 0.0, colors.text, None, Decoration::None)
            }
            Block::ListItem { marker, text, .. } => self.place_body(
                text,
                options.list_indent,
                colors.text,
                Some(marker.as_str()),
                Decoration::None,
            ),
            Block::Quote { text } => self.place_body(
                text,
                options.quote_indent,
                colors.quote,
                None,
                Decoration::LeftBar(colors.quote_bar, options.quote_bar_width),
            ),
            Block::CodeBlock { lines, .. } => {
                let lines = lines.iter().map(|l| l.replace('\t', "    ")).collect();
                self.place_lines(LineRun {
                    lines,
                    x: left + options.code_padding,
                    align: Align::Left,
                    font_size: options.code_font_size,
                    line_height: options.code_line_height(),
                    color: colors.code,
                    padding: options.code_padding,
                    decoration: Decoration::Background(colors.code_background),
                    marker: None,
                })
            }
            Block::Table { rows } => self.place_table(rows),
            Block::Rule => {
                self.place_rule();
                Ok(true)
            }
            Block::Blank => Ok(false),
        }
    }

    /// Title, subtitle and a separator rule at the top of the first page.
    fn place_title(&mut self) -> Result<()> {
        let options = self.options;
        let Some(title) = options.title.as_deref() else {
            return Ok(());
        };
        let width = self.geometry.content_width();
        let left = self.geometry.margins.left;

        let parts = [
            (Some(title), options.title_font_size, options.colors.heading),
            (
                options.subtitle.as_deref(),
                options.subtitle_font_size,
                options.colors.muted,
            ),
        ];
        for (text, size, color) in parts {
            let Some(text) = text else { continue };
            let lines = self.measure.wrap(text, size, width)?;
            self.place_lines(LineRun {
                lines,
                x: left,
                align: Align::Center,
                font_size: size,
                line_height: options.line_height(size),
                color,
                padding: 0.0,
                decoration: Decoration::None,
                marker: None,
            })?;
        }
        self.place_rule();
        Ok(())
    }

    /// Paragraph, list item or quote text at the body font size.
    fn place_body(
        &mut self,
        text: &str,
        indent: f32,
        color: Color,
        marker: Option<&str>,
        decoration: Decoration,
    ) -> Result<bool> {
        let options = self.options;
        let size = options.body_font_size;
        let left = self.geometry.margins.left;
        let lines = self.wrap_inline(text, size, self.geometry.content_width() - indent)?;

        let marker = match marker {
            Some(marker) => {
                let marker_width = self.measure.measure(marker, size)?;
                let x = left + (indent - marker_width - MARKER_GAP).max(0.0);
                Some((marker.to_string(), x))
            }
            None => None,
        };

        self.place_lines(LineRun {
            lines,
            x: left + indent,
            align: Align::Left,
            font_size: size,
            line_height: options.line_height(size),
            color,
            padding: 0.0,
            decoration,
            marker,
        })
    }

    fn wrap_inline(&self, text: &str, font_size: f32, width: f32) -> Result<Vec<String>> {
        let stripped = strip_inline(text);
        self.measure.wrap(&stripped, font_size, width)
    }

    fn place_lines(&mut self, run: LineRun) -> Result<bool> {
        if run.lines.is_empty() {
            self.end_block();
            return Ok(false);
        }

        // Positioning
        let height = run.height();
        let oversized = height > self.geometry.content_height();
        if !self.fits(height) && (!oversized || !self.fits(run.first_line_height())) {
            self.new_page();
        }

        // Emitting
        let limit = self.geometry.bottom_limit();
        let mut segment = self.begin_segment();
        let mut y = self.cursor.y + run.padding;
        let mut segment_lines = 0;

        for (i, line) in run.lines.iter().enumerate() {
            if oversized && segment_lines > 0 && y + run.line_height + run.padding > limit {
                self.finish_segment(&run, &segment, y + run.padding);
                self.new_page();
                segment = self.begin_segment();
                y = self.cursor.y + run.padding;
                segment_lines = 0;
            }

            if i == 0 {
                if let Some((marker, x)) = &run.marker {
                    self.emit_text(*x, y, marker, run.font_size, run.color);
                }
            }

            if !line.is_empty() {
                let x = match run.align {
                    Align::Left => run.x,
                    Align::Center => {
                        let width = self.measure.measure(line, run.font_size)?;
                        run.x + ((self.geometry.content_width() - width) / 2.0).max(0.0)
                    }
                };
                self.emit_text(x, y, line, run.font_size, run.color);
            }

            y += run.line_height;
            segment_lines += 1;
        }

        let bottom = y + run.padding;
        self.finish_segment(&run, &segment, bottom);
        self.cursor.y = bottom;
        self.end_block();
        Ok(true)
    }

    fn place_rule(&mut self) {
        let height = self.options.rule_height;
        if !self.fits(height) {
            self.new_page();
        }
        let y = self.cursor.y + height / 2.0;
        self.emit(DrawInstruction::Line {
            x1: self.geometry.margins.left,
            y1: y,
            x2: self.geometry.right_edge(),
            y2: y,
            color: self.options.colors.rule,
            width: RULE_WIDTH,
        });
        self.cursor.y += height;
        self.end_block();
    }

    fn place_table(&mut self, rows: &[Vec<String>]) -> Result<bool> {
        let options = self.options;
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            self.end_block();
            return Ok(false);
        }

        let font_size = options.table_font_size;
        let table = TableGeometry {
            column_widths: vec![self.geometry.content_width() / columns as f32; columns],
            font_size,
            line_height: options.line_height(font_size),
            padding: options.table_cell_padding,
        };

        // Single-line rows, logged against the measured height.
        let estimate = rows.len() as f32 * (table.line_height + 2.0 * table.padding);

        let mut laid = Vec::with_capacity(rows.len());
        for cells in rows {
            laid.push(self.layout_row(cells, &table)?);
        }
        let mut laid = laid.into_iter();
        let Some(header) = laid.next() else {
            self.end_block();
            return Ok(false);
        };
        let body: Vec<TableRowLayout> = laid.collect();

        let total = header.height + body.iter().map(|row| row.height).sum::<f32>();
        if (total - estimate).abs() > f32::EPSILON {
            log::debug!(
                "layout: table estimated at {:.1}pt, measured {:.1}pt",
                estimate,
                total
            );
        }

        // Positioning, against the measured height
        let oversized = total > self.geometry.content_height();
        if !self.fits(total) {
            let lead = header.height + body.first().map_or(0.0, |row| row.height);
            if !oversized || !self.fits(lead) {
                self.new_page();
            }
        }

        // Emitting, row by row against the measured heights
        let limit = self.geometry.bottom_limit();
        let repeat = options.table_header_policy == TableHeaderPolicy::Repeat;
        let mut show_header = true;
        let mut segment_top = self.cursor.y;
        let mut segment_rows: Vec<TableRowLayout> = Vec::new();
        let mut first_body_index = 0;
        let mut y = segment_top + header.height;

        for (index, row) in body.into_iter().enumerate() {
            if y + row.height > limit {
                let moved = if !segment_rows.is_empty() {
                    let header = show_header.then(|| header.clone());
                    let rows = std::mem::take(&mut segment_rows);
                    self.emit_table_segment(&table, segment_top, header, rows, first_body_index);
                    self.new_page();
                    show_header = repeat;
                    true
                } else if self.cursor.page_has_content {
                    self.new_page();
                    true
                } else {
                    // A single row taller than the page overflows
                    false
                };

                if moved {
                    segment_top = self.cursor.y;
                    y = segment_top + if show_header { header.height } else { 0.0 };
                    first_body_index = index;
                }
            }
            y += row.height;
            segment_rows.push(row);
        }

        let header = show_header.then_some(header);
        self.emit_table_segment(&table, segment_top, header, segment_rows, first_body_index);

        self.cursor.y = y;
        self.end_block();
        Ok(true)
    }

    /// Wrap every cell of a row and measure the row height.
    fn layout_row(&self, cells: &[String], table: &TableGeometry) -> Result<TableRowLayout> {
        let column_width = table.column_widths.first().copied().unwrap_or(0.0);
        let inner_width = (column_width - 2.0 * table.padding).max(1.0);

        let mut line_count = 1;
        let mut wrapped = Vec::with_capacity(cells.len());
        for cell in cells {
            let lines = self
                .measure
                .wrap(&strip_inline(cell), table.font_size, inner_width)?;
            line_count = line_count.max(lines.len());
            wrapped.push(lines.join("\n"));
        }

        let height = line_count as f32 * table.line_height + 2.0 * table.padding;
        Ok(TableRowLayout::new(wrapped, height))
    }

    fn emit_table_segment(
        &mut self,
        table: &TableGeometry,
        top: f32,
        header: Option<TableRowLayout>,
        body: Vec<TableRowLayout>,
        first_body_index: usize,
    ) {
        self.stats.table_segment_count += 1;
        self.emit(DrawInstruction::Table {
            x: self.geometry.margins.left,
            y: top,
            width: self.geometry.content_width(),
            column_widths: table.column_widths.clone(),
            header,
            body,
            first_body_index,
            font_size: table.font_size,
            cell_padding: table.padding,
        });
    }

    fn fits(&self, height: f32) -> bool {
        self.cursor.y + height <= self.geometry.bottom_limit()
    }

    /// Start a new page, or reuse the current one if nothing was drawn on it.
    fn new_page(&mut self) {
        let top = self.geometry.margins.top;
        if !self.cursor.page_has_content {
            self.cursor.y = top;
            return;
        }
        let page_index = self.cursor.next_page(top);
        self.stats.page_break_count += 1;
        log::trace!("layout: page break -> page {}", page_index);
        self.out.push(DrawInstruction::PageBreak { page_index });
    }

    fn begin_segment(&self) -> Segment {
        Segment {
            index: self.out.len(),
            top: self.cursor.y,
        }
    }

    fn finish_segment(&mut self, run: &LineRun, segment: &Segment, bottom: f32) {
        let left = self.geometry.margins.left;
        let height = bottom - segment.top;
        match run.decoration {
            Decoration::None => {}
            Decoration::Background(fill) => self.insert(
                segment.index,
                DrawInstruction::Rect {
                    x: left,
                    y: segment.top,
                    w: self.geometry.content_width(),
                    h: height,
                    fill,
                },
            ),
            Decoration::LeftBar(fill, width) => self.insert(
                segment.index,
                DrawInstruction::Rect {
                    x: left,
                    y: segment.top,
                    w: width,
                    h: height,
                    fill,
                },
            ),
            Decoration::Underline(color) => self.emit(DrawInstruction::Line {
                x1: left,
                y1: bottom,
                x2: self.geometry.right_edge(),
                y2: bottom,
                color,
                width: UNDERLINE_WIDTH,
            }),
        }
    }

    fn emit_text(&mut self, x: f32, y: f32, content: &str, font_size: f32, color: Color) {
        self.cursor.font_size = font_size;
        self.cursor.text_color = color;
        self.stats.text_run_count += 1;
        self.emit(DrawInstruction::TextRun {
            x,
            y,
            content: content.to_string(),
            font_size,
            color,
        });
    }

    fn emit(&mut self, instruction: DrawInstruction) {
        self.cursor.page_has_content = true;
        self.out.push(instruction);
    }

    /// Backgrounds go before the text they sit under.
    fn insert(&mut self, index: usize, instruction: DrawInstruction) {
        self.cursor.page_has_content = true;
        self.out.insert(index, instruction);
    }

    fn end_block(&mut self) {
        self.advance_clamped(self.options.block_spacing);
    }

    /// Advance the cursor without pushing it past the bottom margin.
    fn advance_clamped(&mut self, amount: f32) {
        let limit = self.geometry.bottom_limit();
        if self.cursor.y < limit {
            self.cursor.y = (self.cursor.y + amount).min(limit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::layout::FixedPitchMeasure;
    use crate::model::{Margins, PageSize};
    use crate::parser::extract_text;

    /// 10pt body text with 1.0 line height: every body line is 10pt tall and
    /// every character 5pt wide (36 characters per 180pt line).
    fn options(page_height: f32) -> LayoutOptions {
        LayoutOptions::new()
            .with_page_size(PageSize::Custom {
                width: 200.0,
                height: page_height,
            })
            .with_margins(Margins::all(10.0))
            .with_body_font_size(10.0)
            .with_heading_font_sizes([20.0, 16.0, 12.0])
            .with_code_font_size(10.0)
            .with_table_font_size(10.0)
            .with_line_height(1.0)
            .with_block_spacing(0.0)
            .with_blank_spacing(0.0)
            .with_padding(0.0)
    }

    fn measure() -> FixedPitchMeasure {
        FixedPitchMeasure::new(0.5)
    }

    fn texts(layout: &Layout) -> Vec<(usize, f32, String)> {
        layout
            .indexed()
            .filter_map(|(page, i)| match i {
                DrawInstruction::TextRun { y, content, .. } => Some((page, *y, content.clone())),
                _ => None,
            })
            .collect()
    }

    fn tables(layout: &Layout) -> Vec<(usize, &DrawInstruction)> {
        layout
            .indexed()
            .filter(|(_, i)| matches!(i, DrawInstruction::Table { .. }))
            .collect()
    }

    struct FailingMeasure;

    impl Measure for FailingMeasure {
        fn measure(&self, _text: &str, _font_size: f32) -> Result<f32> {
            Err(Error::Measure("no font loaded".to_string()))
        }
    }

    #[test]
    fn test_title_scenario() {
        let blocks = extract_text("# Title\n\nHello world");
        let layout = layout(&blocks, &options(500.0), &measure()).unwrap();

        assert_eq!(layout.page_count, 1);
        assert_eq!(
            texts(&layout),
            vec![
                (0, 10.0, "Title".to_string()),
                (0, 30.0, "Hello world".to_string()),
            ]
        );
        assert_eq!(layout.stats.heading_count, 1);
        assert_eq!(layout.stats.paragraph_count, 1);
    }

    #[test]
    fn test_heading_taller_than_paragraph() {
        let headed = [Block::heading(1, "Same"), Block::paragraph("next")];
        let plain = [Block::paragraph("Same"), Block::paragraph("next")];
        let opts = options(500.0);

        let headed = texts(&layout(&headed, &opts, &measure()).unwrap());
        let plain = texts(&layout(&plain, &opts, &measure()).unwrap());

        let heading_height = headed[1].1 - headed[0].1;
        let paragraph_height = plain[1].1 - plain[0].1;
        assert!(heading_height > paragraph_height);
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        // Limit is 30: two 10pt lines fill the page exactly from y=10.
        let blocks = [
            Block::paragraph("one"),
            Block::paragraph("two"),
            Block::paragraph("three"),
        ];
        let opts = options(40.0).with_heading_font_sizes([10.0, 10.0, 10.0]);
        let layout = layout(&blocks, &opts, &measure()).unwrap();

        let pages: Vec<usize> = texts(&layout).iter().map(|t| t.0).collect();
        assert_eq!(pages, vec![0, 0, 1]);
        assert_eq!(layout.page_count, 2);
        assert_eq!(layout.stats.page_break_count, 1);
    }

    #[test]
    fn test_text_runs_never_start_below_margin() {
        let mut input = String::from("# Report\n\n");
        for i in 0..40 {
            input.push_str(&format!(
                "## Section {i}\nSome paragraph text that is long enough to wrap across several lines of the page.\n- item\n> quote\n```\ncode {i}\nmore\n```\n| a | b |\n|---|---|\n| {i} | x |\n---\n\n"
            ));
        }
        let blocks = extract_text(&input);
        let opts = LayoutOptions::default();
        let layout = layout(&blocks, &opts, &FixedPitchMeasure::default()).unwrap();
        let limit = opts.geometry().bottom_limit();

        assert!(layout.page_count > 1);
        for (_, y, content) in texts(&layout) {
            assert!(y <= limit, "{:?} starts at {} below {}", content, y, limit);
        }
        for (_, table) in tables(&layout) {
            assert!(table.top().unwrap() <= limit);
        }
    }

    #[test]
    fn test_layout_is_idempotent() {
        let blocks = extract_text("# A\ntext\n| x | y |\n| 1 | 2 |\n```\ncode\n```");
        let opts = options(60.0);
        let first = layout(&blocks, &opts, &measure()).unwrap();
        let second = layout(&blocks, &opts, &measure()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_document() {
        let layout = layout(&[], &options(100.0), &measure()).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.page_count, 0);

        let blanks = extract_text("\n\n   \n");
        let layout = super::layout(&blanks, &options(100.0), &measure()).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.page_count, 0);
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let blocks = [Block::heading(1, ""), Block::paragraph("   "), Block::paragraph("x")];
        let layout = layout(&blocks, &options(100.0), &measure()).unwrap();

        assert_eq!(texts(&layout), vec![(0, 10.0, "x".to_string())]);
        assert_eq!(layout.stats.skipped_count, 2);
        assert_eq!(layout.stats.heading_count, 0);
    }

    #[test]
    fn test_inline_markers_stripped() {
        let blocks = [Block::paragraph("**bold** and `code`")];
        let layout = layout(&blocks, &options(100.0), &measure()).unwrap();
        assert_eq!(layout.plain_text(), "bold and code");
    }

    #[test]
    fn test_code_block_moves_whole() {
        // 7 of 10 lines used, a 4-line code block must move.
        let mut blocks: Vec<Block> = (0..7).map(|i| Block::paragraph(format!("p{i}"))).collect();
        blocks.push(Block::code(["a", "b", "c", "d"]));
        let layout = layout(&blocks, &options(120.0), &measure()).unwrap();

        let code_pages: Vec<usize> = texts(&layout)
            .into_iter()
            .filter(|t| t.2.len() == 1)
            .map(|t| t.0)
            .collect();
        assert_eq!(code_pages, vec![1, 1, 1, 1]);

        let rects: Vec<(usize, f32)> = layout
            .indexed()
            .filter_map(|(page, i)| match i {
                DrawInstruction::Rect { y, h, .. } => Some((page, *y + *h)),
                _ => None,
            })
            .collect();
        assert_eq!(rects, vec![(1, 50.0)]);
    }

    #[test]
    fn test_oversized_code_block_splits() {
        let lines: Vec<String> = (0..25).map(|i| format!("line {i}")).collect();
        let blocks = [Block::paragraph("intro"), Block::code(lines)];
        let opts = options(120.0);
        let layout = layout(&blocks, &opts, &measure()).unwrap();
        let limit = opts.geometry().bottom_limit();

        let runs = texts(&layout);
        // Intro plus nine code lines on the first page, ten on the second.
        assert_eq!(runs.iter().filter(|t| t.0 == 0).count(), 10);
        assert_eq!(runs.iter().filter(|t| t.0 == 1).count(), 10);
        assert_eq!(runs.iter().filter(|t| t.0 == 2).count(), 6);
        assert!(runs.iter().all(|t| t.1 <= limit));
        assert_eq!(runs.last().map(|t| t.2.as_str()), Some("line 24"));

        // One background per page segment, each drawn before its text.
        for page in layout.pages() {
            let first_rect = page
                .iter()
                .position(|i| matches!(i, DrawInstruction::Rect { .. }));
            let last_text = page.iter().rposition(|i| i.is_text());
            assert!(first_rect.is_some());
            assert!(first_rect < last_text);
        }
    }

    #[test]
    fn test_blank_first_page_is_reused() {
        let blocks = [Block::Blank, Block::paragraph("text")];
        let opts = options(60.0).with_blank_spacing(100.0);
        let layout = layout(&blocks, &opts, &measure()).unwrap();

        assert!(!layout.instructions.iter().any(|i| i.is_page_break()));
        assert_eq!(texts(&layout), vec![(0, 10.0, "text".to_string())]);
        assert_eq!(layout.page_count, 1);
    }

    #[test]
    fn test_table_moves_whole() {
        let mut blocks: Vec<Block> = (0..8).map(|i| Block::paragraph(format!("p{i}"))).collect();
        blocks.push(Block::table([["h1", "h2"], ["a", "b"], ["c", "d"]]));
        let layout = layout(&blocks, &options(120.0), &measure()).unwrap();

        let segments = tables(&layout);
        assert_eq!(segments.len(), 1);
        let (page, table) = segments[0];
        assert_eq!(page, 1);
        match table {
            DrawInstruction::Table {
                y, header, body, ..
            } => {
                assert_eq!(*y, 10.0);
                assert_eq!(header.as_ref().map(|h| h.cells.clone()), Some(vec!["h1".to_string(), "h2".to_string()]));
                assert_eq!(body.len(), 2);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    fn long_table(rows: usize) -> Block {
        let mut all = vec![vec!["#".to_string(), "name".to_string()]];
        all.extend((0..rows - 1).map(|i| vec![i.to_string(), format!("row {i}")]));
        Block::Table { rows: all }
    }

    #[test]
    fn test_long_table_repeats_header() {
        // 300pt of content: 30 rows of 10pt per page.
        let layout = layout(&[long_table(200)], &options(320.0), &measure()).unwrap();
        let segments = tables(&layout);

        let pages: std::collections::BTreeSet<usize> = segments.iter().map(|s| s.0).collect();
        assert!(pages.len() >= 2);
        assert_eq!(layout.page_count, pages.len());

        let mut next_index = 0;
        for (_, segment) in &segments {
            match segment {
                DrawInstruction::Table {
                    header,
                    body,
                    first_body_index,
                    ..
                } => {
                    assert_eq!(header.as_ref().map(|h| h.cells[1].as_str()), Some("name"));
                    assert_eq!(*first_body_index, next_index);
                    next_index += body.len();
                }
                other => panic!("expected table, got {:?}", other),
            }
        }
        assert_eq!(next_index, 199);
    }

    #[test]
    fn test_long_table_continuation_without_header() {
        let opts = options(320.0).with_table_headers(TableHeaderPolicy::Continue);
        let layout = layout(&[long_table(200)], &opts, &measure()).unwrap();
        let segments = tables(&layout);
        assert!(segments.len() >= 2);

        let headers: Vec<bool> = segments
            .iter()
            .map(|(_, s)| matches!(s, DrawInstruction::Table { header: Some(_), .. }))
            .collect();
        assert!(headers[0]);
        assert!(headers[1..].iter().all(|h| !h));

        let rows: usize = segments
            .iter()
            .map(|(_, s)| match s {
                DrawInstruction::Table { body, .. } => body.len(),
                _ => 0,
            })
            .sum();
        assert_eq!(rows, 199);
        // Without a repeated header a continuation page holds 30 rows.
        match segments[1].1 {
            DrawInstruction::Table { body, .. } => assert_eq!(body.len(), 30),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_table_height_uses_measured_rows() {
        // One column 180pt wide, so the body cell wraps onto two lines.
        let long = "word ".repeat(10);
        let blocks = [
            Block::table([vec!["head".to_string()], vec![long.trim().to_string()]]),
            Block::paragraph("after"),
        ];
        let layout = layout(&blocks, &options(200.0), &measure()).unwrap();

        match &tables(&layout)[0].1 {
            DrawInstruction::Table { header, body, .. } => {
                assert_eq!(header.as_ref().map(|h| h.height), Some(10.0));
                assert_eq!(body[0].height, 20.0);
                assert!(body[0].cells[0].contains('\n'));
            }
            other => panic!("expected table, got {:?}", other),
        }
        // Estimate says 20pt, the measured rows take 30pt.
        assert_eq!(texts(&layout), vec![(0, 40.0, "after".to_string())]);
    }

    fn segment_rows(layout: &Layout) -> Vec<(usize, usize, usize)> {
        tables(layout)
            .into_iter()
            .map(|(page, table)| match table {
                DrawInstruction::Table {
                    body,
                    first_body_index,
                    ..
                } => (page, body.len(), *first_body_index),
                other => panic!("expected table, got {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_wrapped_table_fitting_a_page_moves_whole() {
        // 40pt of content; the wrapped row makes the table exactly 40pt.
        let wrapped = "word ".repeat(10).trim().to_string();
        let blocks = [
            Block::paragraph("p0"),
            Block::table([vec!["h".to_string()], vec!["a".to_string()], vec![wrapped]]),
        ];
        let layout = layout(&blocks, &options(60.0), &measure()).unwrap();

        assert_eq!(segment_rows(&layout), vec![(1, 2, 0)]);
        assert_eq!(layout.page_count, 2);
    }

    #[test]
    fn test_table_measured_taller_than_page_splits_by_row() {
        // Estimated at 30pt, measured at 50pt on a 40pt content area.
        let wrapped = "word ".repeat(10).trim().to_string();
        let blocks = [
            Block::table([vec!["h".to_string()], vec![wrapped.clone()], vec![wrapped]]),
            Block::paragraph("after"),
        ];
        let layout = layout(&blocks, &options(60.0), &measure()).unwrap();

        assert_eq!(segment_rows(&layout), vec![(0, 1, 0), (1, 1, 1)]);
        assert_eq!(texts(&layout).last(), Some(&(1, 40.0, "after".to_string())));
    }

    #[test]
    fn test_list_marker_left_of_text() {
        let blocks = extract_text("1. first");
        let layout = layout(&blocks, &options(100.0), &measure()).unwrap();
        let runs: Vec<(f32, String)> = layout
            .text_runs()
            .filter_map(|i| match i {
                DrawInstruction::TextRun { x, content, .. } => Some((*x, content.clone())),
                _ => None,
            })
            .collect();

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].1, "1.");
        assert_eq!(runs[1], (28.0, "first".to_string()));
        assert!(runs[0].0 < runs[1].0);
    }

    #[test]
    fn test_title_is_centered() {
        let opts = options(200.0).with_title("Report");
        let layout = layout(&[Block::paragraph("body")], &opts, &measure()).unwrap();

        match layout.instructions.first() {
            Some(DrawInstruction::TextRun { x, content, .. }) => {
                assert_eq!(content, "Report");
                // 6 characters at 22pt are 66pt wide
                assert_eq!(*x, 10.0 + (180.0 - 66.0) / 2.0);
            }
            other => panic!("expected title run, got {:?}", other),
        }
        assert!(layout
            .instructions
            .iter()
            .any(|i| matches!(i, DrawInstruction::Line { .. })));
    }

    #[test]
    fn test_measurement_failure_propagates() {
        let blocks = [Block::paragraph("two words")];
        let result = layout(&blocks, &options(100.0), &FailingMeasure);
        assert!(matches!(result, Err(Error::Measure(_))));
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let opts = options(100.0).with_margins(Margins::all(60.0));
        let result = layout(&[Block::paragraph("x")], &opts, &measure());
        assert!(matches!(result, Err(Error::InvalidGeometry(_))));
    }
}
