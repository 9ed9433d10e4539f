//! Rendering of laid-out pages.
//!
//! The [`Renderer`] forwards draw instructions to a [`DocumentSink`] and
//! resolves table styling on the way. [`TextSink`] is a plain-text preview
//! sink; [`to_json`] exports the layout itself.

mod json;
mod options;
mod renderer;
mod sink;
mod text;

pub use json::{to_json, JsonFormat};
pub use options::TableStyle;
pub use renderer::{render, Renderer};
pub use sink::{DocumentSink, StyledCell, StyledRow, StyledTable};
pub use text::{to_text, TextSink};
