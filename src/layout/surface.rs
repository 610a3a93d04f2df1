//! Measurement surface abstraction

use crate::document::strip_markup;
use unicode_segmentation::UnicodeSegmentation;

/// A rendering surface a page is bound to.
///
/// The pagination loop queries the occupied extent after every mutation, so
/// implementations must measure synchronously. In production this wraps a
/// real layout target; tests use [`EstimatingSurface`] with unit metrics as
/// a fixed-size oracle.
pub trait Surface {
    /// Append a rendered unit to the surface
    fn push(&mut self, markup: &str);
    /// Remove the most recently appended unit
    fn pop(&mut self);
    /// Currently occupied extent, in the same units as the page extent
    fn extent(&self) -> f32;
}

/// Metrics for estimating the extent of a rendered block
#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    /// Line height in logical pixels
    pub line_height: f32,
    /// Characters that fit on one line
    pub chars_per_line: usize,
    /// Vertical spacing after each block
    pub block_spacing: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        // 14px * 1.2 line height, ~78 monospace chars on an A4 text column
        Self {
            line_height: 16.8,
            chars_per_line: 78,
            block_spacing: 8.0,
        }
    }
}

impl TextMetrics {
    /// Metrics where one character occupies exactly one extent unit
    pub fn unit() -> Self {
        Self {
            line_height: 1.0,
            chars_per_line: 1,
            block_spacing: 0.0,
        }
    }

    /// Estimated extent of one rendered unit
    pub fn measure(&self, markup: &str) -> f32 {
        let chars = strip_markup(markup).graphemes(true).count();
        let per_line = self.chars_per_line.max(1);
        let lines = chars.div_ceil(per_line).max(1);
        lines as f32 * self.line_height + self.block_spacing
    }
}

/// A surface that estimates extent from stripped text length.
#[derive(Debug, Clone)]
pub struct EstimatingSurface {
    metrics: TextMetrics,
    extents: Vec<f32>,
}

impl Default for EstimatingSurface {
    fn default() -> Self {
        Self::new(TextMetrics::default())
    }
}

impl EstimatingSurface {
    pub fn new(metrics: TextMetrics) -> Self {
        Self {
            metrics,
            extents: Vec::new(),
        }
    }

    /// Number of units currently on the surface
    pub fn unit_count(&self) -> usize {
        self.extents.len()
    }
}

impl Surface for EstimatingSurface {
    fn push(&mut self, markup: &str) {
        self.extents.push(self.metrics.measure(markup));
    }

    fn pop(&mut self) {
        self.extents.pop();
    }

    fn extent(&self) -> f32 {
        self.extents.iter().sum()
    }
}
