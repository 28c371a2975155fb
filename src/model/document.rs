//! Whole-document segment aggregate.

use super::Segment;
use serde::{Deserialize, Serialize};

/// One page's segments after reconstruction and boilerplate removal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentedPage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Segments in appearance order
    pub segments: Vec<Segment>,
}

impl SegmentedPage {
    /// Create a new page.
    pub fn new(number: u32, segments: Vec<Segment>) -> Self {
        Self { number, segments }
    }

    /// Iterate over the segment texts.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.text.as_str())
    }
}

/// A document as an ordered sequence of segmented pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentedDocument {
    /// Pages in document order
    pub pages: Vec<SegmentedPage>,

    /// Normalized keys detected as running headers/footers
    pub boilerplate_keys: Vec<String>,

    /// Number of segments before boilerplate removal
    pub segment_count: usize,

    /// Number of segments removed as boilerplate
    pub segments_removed: usize,

    /// Pages whose extraction failed and were treated as empty
    pub failed_pages: Vec<u32>,
}

impl SegmentedDocument {
    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&SegmentedPage> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
