//! Output port for rendered pages.
//!
//! A [`DocumentSink`] is the collaborator that turns positioned drawing
//! calls into an artifact: a PDF writer, a canvas, a text preview. Only the
//! primitive methods are required; [`DocumentSink::draw_table`] decomposes a
//! styled table into rectangles, text and lines unless a sink overrides it.
//!
//! # Example
//!
//! ```
//! use mdpage::error::Result;
//! use mdpage::model::{Color, PageGeometry};
//! use mdpage::render::DocumentSink;
//!
//! #[derive(Default)]
//! struct CountingSink {
//!     pages: usize,
//!     runs: usize,
//! }
//!
//! impl DocumentSink for CountingSink {
//!     fn begin_page(&mut self, _index: usize, _geometry: &PageGeometry) -> Result<()> {
//!         self.pages += 1;
//!         Ok(())
//!     }
//!
//!     fn draw_text(&mut self, _x: f32, _y: f32, _text: &str, _size: f32, _color: Color) -> Result<()> {
//!         self.runs += 1;
//!         Ok(())
//!     }
//!
//!     fn draw_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _fill: Color) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn draw_line(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _color: Color, _width: f32) -> Result<()> {
//!         Ok(())
//!     }
//! }
//! ```

use crate::error::Result;
use crate::model::{Color, PageGeometry};

/// Receives drawing calls in emission order.
///
/// Errors returned by a sink abort rendering and are passed to the caller
/// unchanged.
pub trait DocumentSink {
    /// Start page `index`. Called once before anything is drawn on it.
    fn begin_page(&mut self, index: usize, geometry: &PageGeometry) -> Result<()>;

    /// Draw one line of text whose line box starts at `y`.
    fn draw_text(&mut self, x: f32, y: f32, text: &str, font_size: f32, color: Color)
        -> Result<()>;

    /// Fill a rectangle.
    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: Color) -> Result<()>;

    /// Stroke a straight line.
    fn draw_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        width: f32,
    ) -> Result<()>;

    /// Draw one styled table segment.
    fn draw_table(&mut self, table: &StyledTable) -> Result<()> {
        for row in &table.rows {
            if let Some(fill) = row.fill {
                self.draw_rect(table.x, row.y, table.width, row.height, fill)?;
            }
            for cell in &row.cells {
                self.draw_text(cell.x, cell.y, &cell.text, table.font_size, row.text_color)?;
            }
        }

        if let Some((color, width)) = table.border {
            let bottom = table.y + table.height;
            let right = table.x + table.width;
            let mut y = table.y;
            self.draw_line(table.x, y, right, y, color, width)?;
            for row in &table.rows {
                y = row.y + row.height;
                self.draw_line(table.x, y, right, y, color, width)?;
            }
            let mut x = table.x;
            self.draw_line(x, table.y, x, bottom, color, width)?;
            for column in &table.column_widths {
                x += column;
                self.draw_line(x, table.y, x, bottom, color, width)?;
            }
        }
        Ok(())
    }

    /// Called once after the last instruction.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: DocumentSink + ?Sized> DocumentSink for &mut S {
    fn begin_page(&mut self, index: usize, geometry: &PageGeometry) -> Result<()> {
        (**self).begin_page(index, geometry)
    }

    fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        color: Color,
    ) -> Result<()> {
        (**self).draw_text(x, y, text, font_size, color)
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: Color) -> Result<()> {
        (**self).draw_rect(x, y, w, h, fill)
    }

    fn draw_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        width: f32,
    ) -> Result<()> {
        (**self).draw_line(x1, y1, x2, y2, color, width)
    }

    fn draw_table(&mut self, table: &StyledTable) -> Result<()> {
        (**self).draw_table(table)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// A table segment with styling resolved and every cell line positioned.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledTable {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Total width
    pub width: f32,
    /// Total height of all rows
    pub height: f32,
    /// Width of every column
    pub column_widths: Vec<f32>,
    /// Font size of all cell text
    pub font_size: f32,
    /// Grid color and stroke width, if a grid is drawn
    pub border: Option<(Color, f32)>,
    /// Rows from top to bottom
    pub rows: Vec<StyledRow>,
}

/// One row of a [`StyledTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRow {
    /// Top edge
    pub y: f32,
    /// Row height
    pub height: f32,
    /// Background fill
    pub fill: Option<Color>,
    /// Text color of every cell
    pub text_color: Color,
    /// Header row flag
    pub is_header: bool,
    /// Index among body rows of the whole table; `None` for the header
    pub body_index: Option<usize>,
    /// Positioned cell lines
    pub cells: Vec<StyledCell>,
}

/// One wrapped line of one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledCell {
    /// Zero-based column
    pub column: usize,
    /// Text origin x
    pub x: f32,
    /// Top of the line box
    pub y: f32,
    /// Text content
    pub text: String,
}
