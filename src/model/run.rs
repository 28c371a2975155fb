//! Positioned text fragments reported by a text-run source.

use serde::{Deserialize, Serialize};

/// A contiguous string fragment with its baseline and glyph height.
///
/// Runs are consumed in the order the source reports them; nothing in the
/// pipeline reorders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Literal glyph sequence
    pub text: String,
    /// Vertical baseline coordinate in page space
    pub baseline_y: f32,
    /// Glyph bounding-box height (proxy for font size)
    pub height: f32,
}

impl TextRun {
    /// Create a new text run.
    pub fn new(text: impl Into<String>, baseline_y: f32, height: f32) -> Self {
        Self {
            text: text.into(),
            baseline_y,
            height,
        }
    }

    /// Check whether this run sits on the same baseline and height as another.
    pub fn same_line_as(&self, other: &TextRun) -> bool {
        self.baseline_y == other.baseline_y && self.height == other.height
    }
}
