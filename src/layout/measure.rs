//! Text measurement port.
//!
//! The layout engine never inspects fonts itself. Callers hand it a ready
//! [`Measure`] implementation (fonts loaded, metrics cached) and the engine
//! asks it for widths and line wraps.

use unicode_width::UnicodeWidthStr;

use crate::error::{Error, Result};

/// Measures rendered text width and wraps text to a column width.
pub trait Measure {
    /// Rendered width of `text` at `font_size`, in points.
    fn measure(&self, text: &str, font_size: f32) -> Result<f32>;

    /// Split `text` into lines no wider than `available_width`.
    ///
    /// The default is a greedy word wrap on whitespace. Words are never
    /// split: a word wider than the column gets a line of its own.
    fn wrap(&self, text: &str, font_size: f32, available_width: f32) -> Result<Vec<String>> {
        wrap_greedy(self, text, font_size, available_width)
    }
}

impl<M: Measure + ?Sized> Measure for &M {
    fn measure(&self, text: &str, font_size: f32) -> Result<f32> {
        (**self).measure(text, font_size)
    }

    fn wrap(&self, text: &str, font_size: f32, available_width: f32) -> Result<Vec<String>> {
        (**self).wrap(text, font_size, available_width)
    }
}

/// Greedy word wrap using `measure` for line widths.
pub fn wrap_greedy<M: Measure + ?Sized>(
    measure: &M,
    text: &str,
    font_size: f32,
    available_width: f32,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if measure.measure(&candidate, font_size)? <= available_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    Ok(lines)
}

/// Fixed-pitch approximation of glyph widths.
///
/// Every display column is `font_size * char_width_ratio` wide; East Asian
/// wide characters take two columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPitchMeasure {
    /// Glyph advance as a fraction of the font size
    pub char_width_ratio: f32,
}

impl FixedPitchMeasure {
    /// Create a measure with the given advance ratio.
    pub fn new(char_width_ratio: f32) -> Self {
        Self { char_width_ratio }
    }
}

impl Default for FixedPitchMeasure {
    fn default() -> Self {
        // Close to the average advance of Helvetica
        Self::new(0.5)
    }
}

impl Measure for FixedPitchMeasure {
    fn measure(&self, text: &str, font_size: f32) -> Result<f32> {
        if !font_size.is_finite() || font_size < 0.0 {
            return Err(Error::Measure(format!("invalid font size {}", font_size)));
        }
        Ok(text.width() as f32 * font_size * self.char_width_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_pitch_width() {
        let measure = FixedPitchMeasure::new(0.5);
        assert_eq!(measure.measure("abcd", 10.0).unwrap(), 20.0);
        assert_eq!(measure.measure("", 10.0).unwrap(), 0.0);
        // Wide characters count double
        assert_eq!(measure.measure("한글", 10.0).unwrap(), 20.0);
    }

    #[test]
    fn test_invalid_font_size() {
        let measure = FixedPitchMeasure::default();
        assert!(matches!(
            measure.measure("x", f32::NAN),
            Err(Error::Measure(_))
        ));
    }

    #[test]
    fn test_wrap_greedy() {
        // 1 point per character
        let measure = FixedPitchMeasure::new(1.0);
        let lines = measure.wrap("aaa bbb ccc dddd", 1.0, 7.0).unwrap();
        assert_eq!(lines, vec!["aaa bbb", "ccc", "dddd"]);
    }

    #[test]
    fn test_wrap_keeps_long_words_whole() {
        let measure = FixedPitchMeasure::new(1.0);
        let lines = measure.wrap("a supercalifragilistic b", 1.0, 5.0).unwrap();
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        let measure = FixedPitchMeasure::default();
        assert!(measure.wrap("   ", 10.0, 100.0).unwrap().is_empty());
    }

    #[test]
    fn test_wrap_exact_width_fits() {
        let measure = FixedPitchMeasure::new(1.0);
        let lines = measure.wrap("ab cd", 1.0, 5.0).unwrap();
        assert_eq!(lines, vec!["ab cd"]);
    }
}
