//! Layout options and configuration.

use crate::error::{Error, Result};
use crate::model::{Color, Margins, PageGeometry, PageSize};

/// Options controlling page geometry, typography and spacing.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Page size
    pub page_size: PageSize,

    /// Page margins
    pub margins: Margins,

    /// Font size of paragraphs, list items and quotes
    pub body_font_size: f32,

    /// Font sizes of heading levels 1-3
    pub heading_font_sizes: [f32; 3],

    /// Font size of code block lines
    pub code_font_size: f32,

    /// Font size of table cells
    pub table_font_size: f32,

    /// Font size of the document title
    pub title_font_size: f32,

    /// Font size of the document subtitle
    pub subtitle_font_size: f32,

    /// Line height as a multiple of the font size
    pub line_height_factor: f32,

    /// Code line height as a multiple of the code font size
    pub code_line_height_factor: f32,

    /// Vertical gap after every block
    pub block_spacing: f32,

    /// Vertical gap produced by a blank line
    pub blank_spacing: f32,

    /// Padding above and below headings
    pub heading_padding: f32,

    /// Padding inside the code block background
    pub code_padding: f32,

    /// Inner padding of table cells
    pub table_cell_padding: f32,

    /// Text indent of list items
    pub list_indent: f32,

    /// Text indent of quotes
    pub quote_indent: f32,

    /// Width of the bar drawn left of quotes
    pub quote_bar_width: f32,

    /// Total height taken by a horizontal rule
    pub rule_height: f32,

    /// Colors used for text and decorations
    pub colors: Palette,

    /// Whether tables split across pages repeat their header row
    pub table_header_policy: TableHeaderPolicy,

    /// Title drawn at the top of the first page
    pub title: Option<String>,

    /// Subtitle drawn below the title (e.g. an export date)
    pub subtitle: Option<String>,

    /// Normalize input to Unicode NFC before parsing
    pub normalize_unicode: bool,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the body font size.
    pub fn with_body_font_size(mut self, size: f32) -> Self {
        self.body_font_size = size;
        self
    }

    /// Set the heading font sizes for levels 1-3.
    pub fn with_heading_font_sizes(mut self, sizes: [f32; 3]) -> Self {
        self.heading_font_sizes = sizes;
        self
    }

    /// Set the code font size.
    pub fn with_code_font_size(mut self, size: f32) -> Self {
        self.code_font_size = size;
        self
    }

    /// Set the table font size.
    pub fn with_table_font_size(mut self, size: f32) -> Self {
        self.table_font_size = size;
        self
    }

    /// Set the line height factor for text and code.
    pub fn with_line_height(mut self, factor: f32) -> Self {
        self.line_height_factor = factor;
        self.code_line_height_factor = factor;
        self
    }

    /// Set the vertical gap after every block.
    pub fn with_block_spacing(mut self, spacing: f32) -> Self {
        self.block_spacing = spacing;
        self
    }

    /// Set the vertical gap of blank lines.
    pub fn with_blank_spacing(mut self, spacing: f32) -> Self {
        self.blank_spacing = spacing;
        self
    }

    /// Set heading, code and table cell padding at once.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.heading_padding = padding;
        self.code_padding = padding;
        self.table_cell_padding = padding;
        self
    }

    /// Set the color palette.
    pub fn with_colors(mut self, colors: Palette) -> Self {
        self.colors = colors;
        self
    }

    /// Set the table header policy.
    pub fn with_table_headers(mut self, policy: TableHeaderPolicy) -> Self {
        self.table_header_policy = policy;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Resolved page geometry.
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(self.page_size, self.margins)
    }

    /// Font size for a heading level; levels outside 1-3 are clamped.
    pub fn heading_font_size(&self, level: u8) -> f32 {
        let index = level.clamp(1, 3) as usize - 1;
        self.heading_font_sizes[index]
    }

    /// Line height for text at `font_size`.
    pub fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_height_factor
    }

    /// Line height for code lines.
    pub fn code_line_height(&self) -> f32 {
        self.code_font_size * self.code_line_height_factor
    }

    /// Check that the options leave room for content.
    pub fn validate(&self) -> Result<()> {
        let geometry = self.geometry();
        if !(geometry.width > 0.0 && geometry.height > 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "page size {}x{} must be positive",
                geometry.width, geometry.height
            )));
        }

        let sizes = [
            ("body font size", self.body_font_size),
            ("heading 1 font size", self.heading_font_sizes[0]),
            ("heading 2 font size", self.heading_font_sizes[1]),
            ("heading 3 font size", self.heading_font_sizes[2]),
            ("code font size", self.code_font_size),
            ("table font size", self.table_font_size),
            ("title font size", self.title_font_size),
            ("subtitle font size", self.subtitle_font_size),
            ("line height factor", self.line_height_factor),
            ("code line height factor", self.code_line_height_factor),
        ];
        if let Some((name, value)) = sizes.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(Error::InvalidGeometry(format!("{} {} must be positive", name, value)));
        }

        // The cursor only moves down the page.
        let distances = [
            ("block spacing", self.block_spacing),
            ("blank spacing", self.blank_spacing),
            ("heading padding", self.heading_padding),
            ("code padding", self.code_padding),
            ("table cell padding", self.table_cell_padding),
            ("list indent", self.list_indent),
            ("quote indent", self.quote_indent),
            ("quote bar width", self.quote_bar_width),
            ("rule height", self.rule_height),
        ];
        if let Some((name, value)) = distances.iter().find(|(_, v)| !(v.is_finite() && *v >= 0.0)) {
            return Err(Error::InvalidGeometry(format!("{} {} must not be negative", name, value)));
        }

        if !(geometry.content_width() > self.list_indent.max(self.quote_indent)) {
            return Err(Error::InvalidGeometry(format!(
                "content width {} leaves no room for indented text",
                geometry.content_width()
            )));
        }

        let tallest_line = self
            .heading_font_sizes
            .iter()
            .copied()
            .fold(self.body_font_size, f32::max)
            * self.line_height_factor;
        if !(geometry.content_height() >= tallest_line) {
            return Err(Error::InvalidGeometry(format!(
                "content height {} is smaller than one line ({})",
                geometry.content_height(),
                tallest_line
            )));
        }

        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margins: Margins::default(),
            body_font_size: 11.0,
            heading_font_sizes: [20.0, 16.0, 13.0],
            code_font_size: 9.0,
            table_font_size: 9.0,
            title_font_size: 22.0,
            subtitle_font_size: 10.0,
            line_height_factor: 1.4,
            code_line_height_factor: 1.35,
            block_spacing: 4.0,
            blank_spacing: 6.0,
            heading_padding: 4.0,
            code_padding: 6.0,
            table_cell_padding: 4.0,
            list_indent: 18.0,
            quote_indent: 14.0,
            quote_bar_width: 3.0,
            rule_height: 12.0,
            colors: Palette::default(),
            table_header_policy: TableHeaderPolicy::Repeat,
            title: None,
            subtitle: None,
            normalize_unicode: true,
        }
    }
}

/// Colors used by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Body text
    pub text: Color,
    /// Headings and title
    pub heading: Color,
    /// Subtitle
    pub muted: Color,
    /// Quote text
    pub quote: Color,
    /// Bar left of quotes
    pub quote_bar: Color,
    /// Code text
    pub code: Color,
    /// Code block background
    pub code_background: Color,
    /// Horizontal rules and heading underlines
    pub rule: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Color::rgb(33, 33, 33),
            heading: Color::rgb(20, 20, 20),
            muted: Color::gray(120),
            quote: Color::gray(90),
            quote_bar: Color::gray(190),
            code: Color::rgb(40, 40, 40),
            code_background: Color::gray(245),
            rule: Color::gray(200),
        }
    }
}

/// How tables split across pages treat their header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableHeaderPolicy {
    /// Repeat the header at the top of every continuation page
    #[default]
    Repeat,
    /// Draw the header once, on the first page only
    Continue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_options_builder() {
        let options = LayoutOptions::new()
            .with_page_size(PageSize::Letter)
            .with_body_font_size(12.0)
            .with_table_headers(TableHeaderPolicy::Continue)
            .with_title("Export");

        assert_eq!(options.geometry().width, 612.0);
        assert_eq!(options.body_font_size, 12.0);
        assert_eq!(options.table_header_policy, TableHeaderPolicy::Continue);
        assert_eq!(options.title.as_deref(), Some("Export"));
    }

    #[test]
    fn test_heading_font_size_clamped() {
        let options = LayoutOptions::default();
        assert_eq!(options.heading_font_size(0), 20.0);
        assert_eq!(options.heading_font_size(3), 13.0);
        assert_eq!(options.heading_font_size(9), 13.0);
    }

    #[test]
    fn test_validate_defaults() {
        assert!(LayoutOptions::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_margins() {
        let options = LayoutOptions::new().with_margins(Margins::all(400.0));
        assert!(matches!(
            options.validate(),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_font() {
        let options = LayoutOptions::new().with_body_font_size(0.0);
        assert!(matches!(options.validate(), Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn test_validate_rejects_bad_heading_and_title_sizes() {
        let headings = LayoutOptions::new().with_heading_font_sizes([20.0, -1.0, 12.0]);
        assert!(matches!(headings.validate(), Err(Error::InvalidGeometry(msg)) if msg.contains("heading 2")));

        let mut title = LayoutOptions::new();
        title.title_font_size = f32::NAN;
        assert!(matches!(title.validate(), Err(Error::InvalidGeometry(msg)) if msg.contains("title")));
    }

    #[test]
    fn test_validate_rejects_negative_spacing() {
        let spacing = LayoutOptions::new().with_block_spacing(-5.0);
        assert!(matches!(spacing.validate(), Err(Error::InvalidGeometry(msg)) if msg.contains("block spacing")));

        let blank = LayoutOptions::new().with_blank_spacing(-1.0);
        assert!(matches!(blank.validate(), Err(Error::InvalidGeometry(_))));

        let padding = LayoutOptions::new().with_padding(-2.0);
        assert!(padding.validate().is_err());
    }
}
