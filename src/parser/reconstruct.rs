//! Page text reconstruction: groups a page's text runs into segments.
//!
//! A new segment starts whenever the baseline moves or the glyph height
//! changes by more than the tolerance. Bold and italic faces report slightly
//! different heights on the same line, hence the tolerance. A segment that
//! closes because the *next* line has a different height gets a trailing
//! `\n`, which the renderer turns into a hard paragraph break.
//!
//! Interior segments that are empty or purely numeric (page numbers) are
//! dropped. The final segment is pushed unconditionally, even when empty or
//! numeric; downstream stages tolerate both.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{trim_text, Segment, TextRun};

use super::options::{ReflowOptions, DEFAULT_HEIGHT_TOLERANCE};

/// Groups text runs into line/paragraph segments.
#[derive(Debug, Clone, Copy)]
pub struct PageTextReconstructor {
    height_tolerance: f32,
}

impl PageTextReconstructor {
    /// Create a reconstructor with the given line-break height tolerance.
    pub fn new(height_tolerance: f32) -> Self {
        Self { height_tolerance }
    }

    /// Create a reconstructor from reflow options.
    pub fn from_options(options: &ReflowOptions) -> Self {
        Self::new(options.height_tolerance)
    }

    /// Reconstruct one page's segments from its ordered runs.
    pub fn reconstruct(&self, runs: &[TextRun]) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut current = String::new();
        // (baseline_y, height) of the line being accumulated
        let mut last_line: Option<(f32, f32)> = None;

        for run in runs {
            let line_broke = match last_line {
                None => true,
                Some((y, height)) => {
                    y != run.baseline_y || (height - run.height).abs() > self.height_tolerance
                }
            };

            if line_broke {
                let trimmed = trim_text(&current);
                if !trimmed.is_empty() && !is_numeric(trimmed) {
                    let mut text = trimmed.to_string();
                    if last_line.is_some_and(|(_, height)| height != run.height) {
                        text.push('\n');
                    }
                    segments.push(Segment::new(text));
                }
                current.clear();
                last_line = Some((run.baseline_y, run.height));
            }

            current.push_str(&run.text);
        }

        // TODO: apply the blank/numeric filter to the trailing segment too;
        // left unfiltered so output matches existing conversions.
        segments.push(Segment::new(trim_text(&current)));
        segments
    }
}

impl Default for PageTextReconstructor {
    fn default() -> Self {
        Self::new(DEFAULT_HEIGHT_TOLERANCE)
    }
}

/// Check whether text reads as a bare number (typically a page number).
///
/// Accepts what a JavaScript `Number()` conversion accepts: signed decimals
/// with optional fraction and exponent, `Infinity`, and unsigned hex, octal
/// and binary literals. Only ASCII digits count, and surrounding whitespace
/// and byte-order marks are ignored.
pub fn is_numeric(text: &str) -> bool {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    let re = NUMERIC.get_or_init(|| {
        Regex::new(
            r"^(?:[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)|0[xX][0-9a-fA-F]+|0[oO][0-7]+|0[bB][01]+)$",
        )
        .expect("numeric pattern is valid")
    });
    re.is_match(trim_text(text))
}
