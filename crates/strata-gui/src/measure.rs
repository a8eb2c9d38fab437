//! Font metrics used to compute preferred sizes.
//!
//! The kernel never shapes or rasterizes text. It only needs advance widths and
//! line metrics to turn a label into a preferred cell size; the host supplies
//! them through [`FontMetrics`].

/// Opaque handle to a host font
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

/// Vertical metrics of a font at a given size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_height: f32,
}

/// Glyph advance and line metric queries.
///
/// Implementors should be cheap: these are called for every text cell on
/// every frame.
pub trait FontMetrics {
    /// Horizontal advance of `ch` at `size` pixels
    fn advance(&self, font: FontId, size: f32, ch: char) -> f32;

    fn line_metrics(&self, font: FontId, size: f32) -> LineMetrics;

    /// Width of a single line of text (sum of advances)
    fn measure_text(&self, font: FontId, size: f32, text: &str) -> f32 {
        text.chars().map(|ch| self.advance(font, size, ch)).sum()
    }
}

/// Fixed-advance metrics for headless hosts and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Advance as a fraction of the font size
    pub advance_ratio: f32,
    /// Line height as a multiple of the font size
    pub line_height_ratio: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.5,
            line_height_ratio: 1.25,
        }
    }
}

impl FontMetrics for MonospaceMetrics {
    fn advance(&self, _font: FontId, size: f32, ch: char) -> f32 {
        if ch.is_control() {
            0.0
        } else {
            size * self.advance_ratio
        }
    }

    fn line_metrics(&self, _font: FontId, size: f32) -> LineMetrics {
        let line_height = size * self.line_height_ratio;
        LineMetrics {
            ascent: size * 0.8,
            descent: size * 0.2,
            line_height,
        }
    }
}
