//! Pagination of extracted blocks into positioned draw instructions.
//!
//! [`layout`] takes the block stream produced by the parser, a set of
//! [`LayoutOptions`] and a [`Measure`] implementation, and returns a
//! [`Layout`](crate::model::Layout) with explicit page breaks.

mod cursor;
mod engine;
mod inline;
mod measure;
mod options;

pub use cursor::PageCursor;
pub use engine::{layout, LayoutEngine};
pub use inline::strip_inline;
pub use measure::{wrap_greedy, FixedPitchMeasure, Measure};
pub use options::{LayoutOptions, Palette, TableHeaderPolicy};
