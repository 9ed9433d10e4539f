//! Mutable page position tracked during one layout pass.

use crate::model::Color;

/// Vertical position and page index of the layout pass.
///
/// Exactly one cursor exists per layout call and it never leaves the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    /// Offset from the page top
    pub y: f32,

    /// Zero-based page index
    pub page_index: usize,

    /// Font size of the last emitted text
    pub font_size: f32,

    /// Color of the last emitted text
    pub text_color: Color,

    /// Whether anything was drawn on the current page
    pub page_has_content: bool,
}

impl PageCursor {
    /// Create a cursor at the top of the first page.
    pub fn new(top: f32, font_size: f32, text_color: Color) -> Self {
        Self {
            y: top,
            page_index: 0,
            font_size,
            text_color,
            page_has_content: false,
        }
    }

    /// Move to the top of the next page and return its index.
    pub fn next_page(&mut self, top: f32) -> usize {
        self.page_index += 1;
        self.y = top;
        self.page_has_content = false;
        self.page_index
    }
}
