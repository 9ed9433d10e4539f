//! JSON export of layouts.

use crate::error::{Error, Result};
use crate::model::Layout;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a layout, instructions and statistics included.
pub fn to_json(layout: &Layout, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(layout),
        JsonFormat::Compact => serde_json::to_string(layout),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout, FixedPitchMeasure, LayoutOptions};
    use crate::model::Block;

    fn sample() -> Layout {
        let blocks = [Block::heading(1, "Title"), Block::paragraph("Hello")];
        layout(&blocks, &LayoutOptions::default(), &FixedPitchMeasure::default()).unwrap()
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"op\": \"text_run\""));
        assert!(json.contains("Hello"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"page_count\":1"));
    }

    #[test]
    fn test_json_round_trip_of_layout() {
        let layout = sample();
        let json = to_json(&layout, JsonFormat::Compact).unwrap();
        let back: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
    }
}
