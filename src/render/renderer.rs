//! Adapter from draw instructions to a [`DocumentSink`].

use crate::error::Result;
use crate::layout::Measure;
use crate::model::{DrawInstruction, Layout, TableRowLayout};

use super::options::TableStyle;
use super::sink::{DocumentSink, StyledCell, StyledRow, StyledTable};

/// Render a layout into a sink with the default table style.
pub fn render<M, S>(layout: &Layout, measure: &M, sink: &mut S) -> Result<()>
where
    M: Measure + ?Sized,
    S: DocumentSink + ?Sized,
{
    Renderer::new(measure).render(layout, sink)
}

/// Forwards draw instructions to a sink in emission order.
///
/// Text, rectangles and lines pass through unchanged. Table segments are
/// styled here: the header gets a filled background, inverted text and
/// centered cells, and body rows alternate backgrounds by their index in
/// the whole table so stripes stay continuous across pages.
pub struct Renderer<'a, M: Measure + ?Sized> {
    measure: &'a M,
    style: TableStyle,
}

impl<'a, M: Measure + ?Sized> Renderer<'a, M> {
    /// Create a renderer with the default table style.
    pub fn new(measure: &'a M) -> Self {
        Self {
            measure,
            style: TableStyle::default(),
        }
    }

    /// Set the table style.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Current table style.
    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    /// Send every instruction of `layout` to `sink`, then finish it.
    ///
    /// An empty layout begins no page; the sink only sees `finish`.
    pub fn render<S: DocumentSink + ?Sized>(&self, layout: &Layout, sink: &mut S) -> Result<()> {
        if !layout.is_empty() {
            sink.begin_page(0, &layout.geometry)?;
        }

        for instruction in &layout.instructions {
            match instruction {
                DrawInstruction::TextRun {
                    x,
                    y,
                    content,
                    font_size,
                    color,
                } => sink.draw_text(*x, *y, content, *font_size, *color)?,
                DrawInstruction::Rect { x, y, w, h, fill } => sink.draw_rect(*x, *y, *w, *h, *fill)?,
                DrawInstruction::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                    width,
                } => sink.draw_line(*x1, *y1, *x2, *y2, *color, *width)?,
                DrawInstruction::Table {
                    x,
                    y,
                    width,
                    column_widths,
                    header,
                    body,
                    first_body_index,
                    font_size,
                    cell_padding,
                } => {
                    let table = self.style_table(&TableSegment {
                        x: *x,
                        y: *y,
                        width: *width,
                        column_widths,
                        header: header.as_ref(),
                        body,
                        first_body_index: *first_body_index,
                        font_size: *font_size,
                        padding: *cell_padding,
                    })?;
                    sink.draw_table(&table)?;
                }
                DrawInstruction::PageBreak { page_index } => {
                    sink.begin_page(*page_index, &layout.geometry)?
                }
            }
        }

        log::debug!(
            "render: {} instructions on {} pages",
            layout.instructions.len(),
            layout.page_count
        );
        sink.finish()
    }

    /// Resolve styling and cell positions of one table segment.
    fn style_table(&self, segment: &TableSegment<'_>) -> Result<StyledTable> {
        let layout = RowLayout {
            x: segment.x,
            column_widths: segment.column_widths,
            font_size: segment.font_size,
            padding: segment.padding,
        };

        let mut rows = Vec::with_capacity(segment.body.len() + 1);
        let mut top = segment.y;
        if let Some(header) = segment.header {
            rows.push(self.style_row(&layout, header, top, None)?);
            top += header.height;
        }
        for (i, row) in segment.body.iter().enumerate() {
            let index = segment.first_body_index + i;
            rows.push(self.style_row(&layout, row, top, Some(index))?);
            top += row.height;
        }

        Ok(StyledTable {
            x: segment.x,
            y: segment.y,
            width: segment.width,
            height: top - segment.y,
            column_widths: segment.column_widths.to_vec(),
            font_size: segment.font_size,
            border: self.style.border.map(|color| (color, self.style.border_width)),
            rows,
        })
    }

    fn style_row(
        &self,
        layout: &RowLayout<'_>,
        row: &TableRowLayout,
        top: f32,
        body_index: Option<usize>,
    ) -> Result<StyledRow> {
        let is_header = body_index.is_none();
        let (fill, text_color) = match body_index {
            None => (Some(self.style.header_fill), self.style.header_text),
            Some(index) => (self.style.body_fill(index), self.style.body_text),
        };

        // Rows were measured as lines * line_height + 2 * padding.
        let line_count = row
            .cells
            .iter()
            .map(|c| c.lines().count())
            .max()
            .unwrap_or(0)
            .max(1);
        let line_height = (row.height - 2.0 * layout.padding).max(0.0) / line_count as f32;

        let mut cells = Vec::new();
        let mut column_x = layout.x;
        for (column, (text, column_width)) in row
            .cells
            .iter()
            .zip(layout.column_widths.iter().copied())
            .enumerate()
        {
            for (i, line) in text.lines().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let x = if is_header && self.style.center_header {
                    let text_width = self.measure.measure(line, layout.font_size)?;
                    column_x + ((column_width - text_width) / 2.0).max(layout.padding)
                } else {
                    column_x + layout.padding
                };
                cells.push(StyledCell {
                    column,
                    x,
                    y: top + layout.padding + i as f32 * line_height,
                    text: line.to_string(),
                });
            }
            column_x += column_width;
        }

        Ok(StyledRow {
            y: top,
            height: row.height,
            fill,
            text_color,
            is_header,
            body_index,
            cells,
        })
    }
}

/// Borrowed fields of one `DrawInstruction::Table`.
struct TableSegment<'a> {
    x: f32,
    y: f32,
    width: f32,
    column_widths: &'a [f32],
    header: Option<&'a TableRowLayout>,
    body: &'a [TableRowLayout],
    first_body_index: usize,
    font_size: f32,
    padding: f32,
}

struct RowLayout<'a> {
    x: f32,
    column_widths: &'a [f32],
    font_size: f32,
    padding: f32,
}
