//! Table styling applied by the renderer.

use crate::model::Color;

/// Colors and strokes used when a table segment is handed to a sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    /// Background of the header row
    pub header_fill: Color,

    /// Text color of the header row
    pub header_text: Color,

    /// Background of odd body rows; `None` disables striping
    pub stripe_fill: Option<Color>,

    /// Text color of body rows
    pub body_text: Color,

    /// Grid line color; `None` draws no grid
    pub border: Option<Color>,

    /// Grid line width
    pub border_width: f32,

    /// Center header cell text
    pub center_header: bool,
}

impl TableStyle {
    /// Create a table style with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header fill and text colors.
    pub fn with_header(mut self, fill: Color, text: Color) -> Self {
        self.header_fill = fill;
        self.header_text = text;
        self
    }

    /// Set or disable the stripe fill of odd body rows.
    pub fn with_stripes(mut self, fill: Option<Color>) -> Self {
        self.stripe_fill = fill;
        self
    }

    /// Set the body text color.
    pub fn with_body_text(mut self, color: Color) -> Self {
        self.body_text = color;
        self
    }

    /// Set or disable the grid lines.
    pub fn with_border(mut self, color: Option<Color>, width: f32) -> Self {
        self.border = color;
        self.border_width = width;
        self
    }

    /// Enable or disable centered header text.
    pub fn with_centered_header(mut self, center: bool) -> Self {
        self.center_header = center;
        self
    }

    /// Fill of the body row at `index`, counted across all segments of a table.
    pub fn body_fill(&self, index: usize) -> Option<Color> {
        if index % 2 == 1 {
            self.stripe_fill
        } else {
            None
        }
    }
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header_fill: Color::rgb(52, 73, 94),
            header_text: Color::WHITE,
            stripe_fill: Some(Color::gray(242)),
            body_text: Color::rgb(33, 33, 33),
            border: Some(Color::gray(200)),
            border_width: 0.5,
            center_header: true,
        }
    }
}
