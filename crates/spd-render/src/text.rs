use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    /// Multiplier applied to `font_size` for each line box.
    pub line_height: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 14.0,
            line_height: 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Display width of one character in half-width cells: 2 for wide, fullwidth and ambiguous
/// East Asian characters, 1 otherwise.
pub fn char_cells(ch: char) -> usize {
    match ch.width_cjk() {
        Some(2) => 2,
        _ => 1,
    }
}

pub fn display_width(line: &str) -> usize {
    line.chars().map(char_cells).sum()
}

/// Estimates text extents from East Asian display width: each half-width cell is half an em.
///
/// No font is consulted, so output is stable across machines.
#[derive(Debug, Clone, Copy, Default)]
pub struct EastAsianWidthTextMeasurer;

impl TextMeasurer for EastAsianWidthTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let mut width: f64 = 0.0;
        let mut line_count = 0usize;
        for line in text.split('\n') {
            line_count += 1;
            width = width.max(display_width(line) as f64 * style.font_size / 2.0);
        }
        TextMetrics {
            width,
            height: line_count as f64 * style.font_size * style.line_height,
            line_count,
        }
    }
}
