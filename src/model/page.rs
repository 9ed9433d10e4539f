//! Page geometry types.

use serde::{Deserialize, Serialize};

/// Standard and custom page sizes in points (1 point = 1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    /// ISO A4 (210 x 297 mm)
    #[default]
    A4,
    /// US Letter (8.5 x 11 inches)
    Letter,
    /// US Legal (8.5 x 14 inches)
    Legal,
    /// Arbitrary width and height
    Custom {
        /// Width in points
        width: f32,
        /// Height in points
        height: f32,
    },
}

impl PageSize {
    /// Page dimensions as (width, height).
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.0, 842.0), // 210mm * 2.834, 297mm * 2.834
            PageSize::Letter => (612.0, 792.0), // 8.5 * 72, 11 * 72
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin
    pub top: f32,
    /// Right margin
    pub right: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
}

impl Margins {
    /// Same margin on all four sides.
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Vertical and horizontal margins.
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::all(50.0)
    }
}

/// Resolved page geometry used during one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Page margins
    pub margins: Margins,
}

impl PageGeometry {
    /// Create geometry from a page size and margins.
    pub fn new(size: PageSize, margins: Margins) -> Self {
        let (width, height) = size.dimensions();
        Self {
            width,
            height,
            margins,
        }
    }

    /// Lowest y at which a block may begin.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margins.bottom
    }

    /// Horizontal space between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    /// Vertical space between the top and bottom margins.
    pub fn content_height(&self) -> f32 {
        self.bottom_limit() - self.margins.top
    }

    /// Right edge of the content area.
    pub fn right_edge(&self) -> f32 {
        self.width - self.margins.right
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::new(PageSize::default(), Margins::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_sizes() {
        assert_eq!(PageSize::A4.dimensions(), (595.0, 842.0));
        assert_eq!(PageSize::Letter.dimensions(), (612.0, 792.0));
        let custom = PageSize::Custom {
            width: 300.0,
            height: 200.0,
        };
        assert!(PageGeometry::new(custom, Margins::all(10.0)).is_landscape());
    }

    #[test]
    fn test_content_area() {
        let geometry = PageGeometry::new(PageSize::Letter, Margins::symmetric(72.0, 36.0));
        assert_eq!(geometry.content_width(), 540.0);
        assert_eq!(geometry.bottom_limit(), 720.0);
        assert_eq!(geometry.content_height(), 648.0);
        assert_eq!(geometry.right_edge(), 576.0);
    }
}
