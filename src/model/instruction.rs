//! Positioned draw instructions produced by the layout engine.

use serde::{Deserialize, Serialize};

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
}

impl Color {
    /// Black
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// White
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create a color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a gray color.
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Format as a `#rrggbb` hex string.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// One laid-out table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRowLayout {
    /// Cell texts; rows may be jagged
    pub cells: Vec<String>,

    /// Measured row height in points
    pub height: f32,
}

impl TableRowLayout {
    /// Create a row layout.
    pub fn new(cells: Vec<String>, height: f32) -> Self {
        Self { cells, height }
    }
}

/// An atomic, positioned rendering command.
///
/// Coordinates are points with the origin at the top-left corner of the
/// page and y growing downward. A text run's `y` is the top of its line box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawInstruction {
    /// A single styleless run of text
    TextRun {
        /// Left edge
        x: f32,
        /// Top of the line box
        y: f32,
        /// Text to draw
        content: String,
        /// Font size in points
        font_size: f32,
        /// Text color
        color: Color,
    },

    /// A filled rectangle
    Rect {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        w: f32,
        /// Height
        h: f32,
        /// Fill color
        fill: Color,
    },

    /// A stroked line segment
    Line {
        /// Start x
        x1: f32,
        /// Start y
        y1: f32,
        /// End x
        x2: f32,
        /// End y
        y2: f32,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f32,
    },

    /// One page segment of a table
    Table {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Total table width
        width: f32,
        /// Width of every column
        column_widths: Vec<f32>,
        /// Header row, absent on continuation segments without repeated headers
        header: Option<TableRowLayout>,
        /// Body rows in this segment
        body: Vec<TableRowLayout>,
        /// Index of the first body row within the whole table
        first_body_index: usize,
        /// Font size for cell text
        font_size: f32,
        /// Inner cell padding
        cell_padding: f32,
    },

    /// Start of a new page
    PageBreak {
        /// Zero-based index of the page being started
        page_index: usize,
    },
}

impl DrawInstruction {
    /// Check if this instruction is a page break marker.
    pub fn is_page_break(&self) -> bool {
        matches!(self, DrawInstruction::PageBreak { .. })
    }

    /// Check if this instruction is a text run.
    pub fn is_text(&self) -> bool {
        matches!(self, DrawInstruction::TextRun { .. })
    }

    /// Top y coordinate of the instruction, if it has one.
    pub fn top(&self) -> Option<f32> {
        match self {
            DrawInstruction::TextRun { y, .. }
            | DrawInstruction::Rect { y, .. }
            | DrawInstruction::Table { y, .. } => Some(*y),
            DrawInstruction::Line { y1, y2, .. } => Some(y1.min(*y2)),
            DrawInstruction::PageBreak { .. } => None,
        }
    }

    /// Text content of a text run.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawInstruction::TextRun { content, .. } => Some(content),
            _ => None,
        }
    }
}
