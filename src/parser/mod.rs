//! Markdown subset parsing: line classification and block extraction.

mod classify;
mod cursor;
mod extract;
mod table;

pub use classify::{classify, FENCE};
pub use cursor::LineCursor;
pub use extract::{extract, extract_text, BULLET};
pub use table::{parse_table, parse_table_at, ParsedTable};
