//! Document model types for layout input and output.
//!
//! This module defines the intermediate representation that bridges
//! Markdown parsing and page layout: source lines and blocks on the input
//! side, positioned draw instructions on the output side.

mod block;
mod instruction;
mod layout;
mod page;

pub use block::{Block, LineKind, SourceLine};
pub use instruction::{Color, DrawInstruction, TableRowLayout};
pub use layout::{Layout, LayoutStats};
pub use page::{Margins, PageGeometry, PageSize};
