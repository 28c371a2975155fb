//! Reflow options and tuning constants.
//!
//! The numeric defaults are empirical: they were tuned against real light
//! novel PDFs and have no closed-form derivation. They are exposed so callers
//! can adjust them per corpus.

use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// Maximum glyph-height difference still considered the same line.
pub const DEFAULT_HEIGHT_TOLERANCE: f32 = 1.45;

/// Number of leading segments per page inspected for running headers.
pub const DEFAULT_HEADER_WINDOW: usize = 5;

/// Fraction of pages a key must appear on to count as boilerplate.
pub const DEFAULT_BOILERPLATE_THRESHOLD: f64 = 0.8;

/// Pages whose flowed text is shorter than this are dropped.
pub const DEFAULT_MIN_PAGE_CHARS: usize = 175;

/// Options controlling extraction, filtering and rendering.
#[derive(Debug, Clone)]
pub struct ReflowOptions {
    /// Line-break height tolerance
    pub height_tolerance: f32,

    /// Header window size for boilerplate counting
    pub header_window: usize,

    /// Boilerplate frequency threshold (0.0..=1.0)
    pub boilerplate_threshold: f64,

    /// Minimum flowed page length in characters
    pub min_page_chars: usize,

    /// Whether to extract pages in parallel
    pub parallel: bool,

    /// How to treat pages whose text runs cannot be extracted
    pub error_mode: ErrorMode,

    /// Which pages to process
    pub pages: PageSelection,
}

impl ReflowOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line-break height tolerance.
    pub fn with_height_tolerance(mut self, tolerance: f32) -> Self {
        self.height_tolerance = tolerance;
        self
    }

    /// Set the header window size.
    pub fn with_header_window(mut self, window: usize) -> Self {
        self.header_window = window;
        self
    }

    /// Set the boilerplate frequency threshold.
    pub fn with_boilerplate_threshold(mut self, threshold: f64) -> Self {
        self.boilerplate_threshold = threshold;
        self
    }

    /// Set the minimum flowed page length.
    pub fn with_min_page_chars(mut self, chars: usize) -> Self {
        self.min_page_chars = chars;
        self
    }

    /// Enable or disable parallel extraction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel extraction.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail the whole conversion when any page cannot be extracted.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Check the tuning values for sanity.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.boilerplate_threshold) {
            return Err(Error::Other(format!(
                "boilerplate threshold must be within 0..=1, got {}",
                self.boilerplate_threshold
            )));
        }
        if !self.height_tolerance.is_finite() || self.height_tolerance < 0.0 {
            return Err(Error::Other(format!(
                "height tolerance must be a non-negative number, got {}",
                self.height_tolerance
            )));
        }
        Ok(())
    }
}

impl Default for ReflowOptions {
    fn default() -> Self {
        Self {
            height_tolerance: DEFAULT_HEIGHT_TOLERANCE,
            header_window: DEFAULT_HEADER_WINDOW,
            boilerplate_threshold: DEFAULT_BOILERPLATE_THRESHOLD,
            min_page_chars: DEFAULT_MIN_PAGE_CHARS,
            parallel: true,
            error_mode: ErrorMode::Lenient,
            pages: PageSelection::All,
        }
    }
}

/// Page extraction failure policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Abort the conversion on the first failed page
    Strict,
    /// Treat a failed page as a page without text runs
    #[default]
    Lenient,
}

/// Page selection (1-indexed page numbers).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// An inclusive page range
    Range(RangeInclusive<u32>),
    /// An explicit list of pages
    Pages(Vec<u32>),
    /// Sorted, non-overlapping inclusive ranges
    Ranges(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number is selected.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
            PageSelection::Ranges(ranges) => ranges.iter().any(|range| range.contains(&page)),
        }
    }

    /// Parse a selection such as `"all"`, `"3-9"` or `"1,4,10-12"`.
    pub fn parse(selection: &str) -> Result<Self> {
        let selection = selection.trim();
        if selection.is_empty() || selection.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let parts: Vec<&str> = selection.split(',').map(str::trim).collect();
        if let [single] = parts.as_slice() {
            if let Some(range) = parse_range(single)? {
                return Ok(PageSelection::Range(range));
            }
        }

        let mut ranges = Vec::with_capacity(parts.len());
        let mut has_range = false;
        for part in parts {
            match parse_range(part)? {
                Some(range) => {
                    has_range = true;
                    ranges.push(range);
                }
                None => {
                    let page = parse_page(part)?;
                    ranges.push(page..=page);
                }
            }
        }
        let ranges = merge_ranges(ranges);

        if has_range {
            Ok(PageSelection::Ranges(ranges))
        } else {
            Ok(PageSelection::Pages(
                ranges.into_iter().map(|range| *range.start()).collect(),
            ))
        }
    }
}

/// Sort ranges and merge the ones that overlap or touch.
fn merge_ranges(mut ranges: Vec<RangeInclusive<u32>>) -> Vec<RangeInclusive<u32>> {
    ranges.sort_unstable_by_key(|range| *range.start());
    let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

fn parse_range(part: &str) -> Result<Option<RangeInclusive<u32>>> {
    let Some((start, end)) = part.split_once('-') else {
        return Ok(None);
    };
    let start = parse_page(start)?;
    let end = parse_page(end)?;
    if start > end {
        return Err(Error::InvalidPageRange(part.to_string()));
    }
    Ok(Some(start..=end))
}

fn parse_page(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(s.trim().to_string())),
        Ok(n) => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let options = ReflowOptions::default();
        assert_eq!(options.height_tolerance, 1.45);
        assert_eq!(options.header_window, 5);
        assert_eq!(options.boilerplate_threshold, 0.8);
        assert_eq!(options.min_page_chars, 175);
        assert!(options.parallel);
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let options = ReflowOptions::new()
            .with_height_tolerance(2.0)
            .with_header_window(3)
            .with_boilerplate_threshold(0.5)
            .with_min_page_chars(0)
            .sequential()
            .strict();

        assert_eq!(options.height_tolerance, 2.0);
        assert_eq!(options.header_window, 3);
        assert_eq!(options.boilerplate_threshold, 0.5);
        assert_eq!(options.min_page_chars, 0);
        assert!(!options.parallel);
        assert_eq!(options.error_mode, ErrorMode::Strict);
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        assert!(ReflowOptions::new()
            .with_boilerplate_threshold(1.5)
            .validate()
            .is_err());
        assert!(ReflowOptions::new()
            .with_height_tolerance(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_page_selection_parse() {
        assert_eq!(PageSelection::parse("all").unwrap(), PageSelection::All);
        assert_eq!(PageSelection::parse("").unwrap(), PageSelection::All);
        assert_eq!(
            PageSelection::parse("3-9").unwrap(),
            PageSelection::Range(3..=9)
        );
        assert_eq!(
            PageSelection::parse("4, 1,4").unwrap(),
            PageSelection::Pages(vec![1, 4])
        );
        assert_eq!(
            PageSelection::parse("10-12, 1,4,4,11-14,5").unwrap(),
            PageSelection::Ranges(vec![1..=1, 4..=5, 10..=14])
        );
    }

    #[test]
    fn test_page_selection_huge_list_stays_compact() {
        let selection = PageSelection::parse("1,1-4000000000,7").unwrap();
        assert_eq!(selection, PageSelection::Ranges(vec![1..=4_000_000_000]));
        assert!(selection.includes(1));
        assert!(selection.includes(4_000_000_000));
        assert!(!selection.includes(4_000_000_001));

        let selection = PageSelection::parse("2,5-4294967295").unwrap();
        assert_eq!(selection, PageSelection::Ranges(vec![2..=2, 5..=u32::MAX]));
        assert!(!selection.includes(3));
        assert!(selection.includes(u32::MAX));
    }

    #[test]
    fn test_page_selection_parse_errors() {
        assert!(matches!(
            PageSelection::parse("9-3"),
            Err(Error::InvalidPageRange(_))
        ));
        assert!(PageSelection::parse("0").is_err());
        assert!(PageSelection::parse("a,b").is_err());
    }

    #[test]
    fn test_page_selection_includes() {
        assert!(PageSelection::All.includes(99));
        assert!(PageSelection::Range(2..=4).includes(4));
        assert!(!PageSelection::Range(2..=4).includes(5));
        assert!(PageSelection::Pages(vec![1, 3]).includes(3));
        assert!(!PageSelection::Pages(vec![1, 3]).includes(2));
        assert!(PageSelection::Ranges(vec![1..=2, 8..=9]).includes(8));
        assert!(!PageSelection::Ranges(vec![1..=2, 8..=9]).includes(5));
    }
}
