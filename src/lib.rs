//! # mdpage
//!
//! Paginated layout of a markdown subset.
//!
//! This library turns markdown-style text (headings, paragraphs, lists,
//! quotes, fenced code, pipe tables and rules) into positioned draw
//! instructions split across fixed-size pages, and forwards them to any
//! output sink.
//!
//! ## Quick Start
//!
//! ```
//! use mdpage::{layout_markdown, FixedPitchMeasure, LayoutOptions};
//!
//! fn main() -> mdpage::Result<()> {
//!     let options = LayoutOptions::default();
//!     let layout = layout_markdown("# Title\n\nHello world", &options, &FixedPitchMeasure::default())?;
//!
//!     assert_eq!(layout.page_count, 1);
//!     println!("{}", mdpage::render::to_json(&layout, mdpage::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Line classifier**: every source line gets a [`LineKind`]
//! - **Block extractor**: lines are grouped into [`Block`]s
//! - **Table parser**: pipe tables become rows of trimmed cells
//! - **Pagination engine**: blocks become [`DrawInstruction`]s on pages
//! - **Renderer**: instructions go to a [`DocumentSink`], tables styled

pub mod error;
pub mod layout;
pub mod model;
pub mod naming;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{
    layout, FixedPitchMeasure, LayoutOptions, Measure, Palette, TableHeaderPolicy,
};
pub use model::{
    Block, Color, DrawInstruction, Layout, LayoutStats, LineKind, Margins, PageGeometry,
    PageSize, SourceLine, TableRowLayout,
};
pub use parser::{classify, extract, extract_text, parse_table};
pub use render::{DocumentSink, JsonFormat, Renderer, TableStyle, TextSink};

use std::borrow::Cow;

use unicode_normalization::{is_nfc, UnicodeNormalization};

/// Apply input normalization configured in `options`.
fn prepare<'a>(text: &'a str, options: &LayoutOptions) -> Cow<'a, str> {
    if options.normalize_unicode && !is_nfc(text) {
        Cow::Owned(text.nfc().collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Extract blocks from text, normalizing it first if enabled.
///
/// # Example
///
/// ```
/// use mdpage::{extract_blocks, Block, LayoutOptions};
///
/// let blocks = extract_blocks("## Notes\n- first", &LayoutOptions::default());
/// assert_eq!(blocks[0], Block::heading(2, "Notes"));
/// ```
pub fn extract_blocks(text: &str, options: &LayoutOptions) -> Vec<Block> {
    extract_text(&prepare(text, options))
}

/// Parse and lay out a markdown document.
///
/// # Arguments
///
/// * `text` - Document text, `\n` delimited
/// * `options` - Page geometry and typography
/// * `measure` - Text measurement, ready to use
///
/// # Errors
///
/// Returns the first measurement failure, or
/// [`Error::InvalidGeometry`] when the options leave no room for content.
pub fn layout_markdown<M: Measure + ?Sized>(
    text: &str,
    options: &LayoutOptions,
    measure: &M,
) -> Result<Layout> {
    let text = prepare(text, options);
    let lines = SourceLine::split(&text);
    let blocks = parser::extract(&lines);

    let mut result = layout::layout(&blocks, options, measure)?;
    result.stats.line_count = lines.len() as u32;
    Ok(result)
}

/// Lay out many documents, one independent engine per document.
///
/// Results are returned in input order. With the `parallel` feature the
/// documents are processed on the rayon thread pool.
pub fn layout_batch<S, M>(documents: &[S], options: &LayoutOptions, measure: &M) -> Vec<Result<Layout>>
where
    S: AsRef<str> + Sync,
    M: Measure + Sync + ?Sized,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        documents
            .par_iter()
            .map(|doc| layout_markdown(doc.as_ref(), options, measure))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        documents
            .iter()
            .map(|doc| layout_markdown(doc.as_ref(), options, measure))
            .collect()
    }
}

/// Builder for laying out and rendering documents.
///
/// # Example
///
/// ```
/// use mdpage::{MdPage, PageSize, TableHeaderPolicy};
///
/// let preview = MdPage::new()
///     .with_page_size(PageSize::Letter)
///     .with_title("Conversation")
///     .with_subtitle("2024-03-09")
///     .with_table_headers(TableHeaderPolicy::Continue)
///     .layout("Hello **world**")?
///     .to_text()?;
/// assert!(preview.contains("Hello world"));
/// # Ok::<(), mdpage::Error>(())
/// ```
pub struct MdPage<M: Measure = FixedPitchMeasure> {
    options: LayoutOptions,
    style: TableStyle,
    measure: M,
}

impl MdPage<FixedPitchMeasure> {
    /// Create a new builder with the fixed-pitch measure.
    pub fn new() -> Self {
        Self {
            options: LayoutOptions::default(),
            style: TableStyle::default(),
            measure: FixedPitchMeasure::default(),
        }
    }
}

impl Default for MdPage<FixedPitchMeasure> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Measure> MdPage<M> {
    /// Use another measurement implementation.
    pub fn with_measure<N: Measure>(self, measure: N) -> MdPage<N> {
        MdPage {
            options: self.options,
            style: self.style,
            measure,
        }
    }

    /// Replace all layout options.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.options = self.options.with_page_size(size);
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.options = self.options.with_margins(margins);
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    /// Set the document subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.options = self.options.with_subtitle(subtitle);
        self
    }

    /// Set the table header policy.
    pub fn with_table_headers(mut self, policy: TableHeaderPolicy) -> Self {
        self.options = self.options.with_table_headers(policy);
        self
    }

    /// Set the table style used when rendering.
    pub fn with_table_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Current layout options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lay out a document and return a result wrapper.
    ///
    /// The result keeps the measure and table style for rendering.
    pub fn layout(self, text: &str) -> Result<MdPageResult<M>> {
        let layout = layout_markdown(text, &self.options, &self.measure)?;
        Ok(MdPageResult {
            layout,
            style: self.style,
            measure: self.measure,
        })
    }
}

/// Result of laying out one document.
pub struct MdPageResult<M: Measure = FixedPitchMeasure> {
    /// The finished layout
    pub layout: Layout,
    style: TableStyle,
    measure: M,
}

impl<M: Measure> MdPageResult<M> {
    /// Render into a sink with the builder's table style.
    pub fn render<S: DocumentSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        Renderer::new(&self.measure)
            .with_style(self.style)
            .render(&self.layout, sink)
    }

    /// Plain-text preview, one section per page.
    pub fn to_text(&self) -> Result<String> {
        let mut sink = TextSink::new();
        self.render(&mut sink)?;
        Ok(sink.to_text())
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.layout, format)
    }

    /// Number of pages with content.
    pub fn page_count(&self) -> usize {
        self.layout.page_count
    }

    /// Get the layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}
