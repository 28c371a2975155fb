//! Page flowing and paragraph splitting.
//!
//! A page's surviving segments are joined into one flowed string: each
//! segment is preceded by a space unless the text so far ends in a hard
//! break. Pages whose flowed text is too short are treated as images or
//! placeholders and dropped; the rest split into paragraphs at every `\n`.

use crate::model::{Segment, SegmentedDocument, SegmentedPage};
use crate::parser::{ReflowOptions, DEFAULT_MIN_PAGE_CHARS};

use super::output::{ReflowOutput, ReflowStats, RenderedPage};

/// Turns segmented pages into paragraphs.
#[derive(Debug, Clone, Copy)]
pub struct PageRenderer {
    min_page_chars: usize,
}

impl PageRenderer {
    /// Create a renderer dropping pages shorter than `min_page_chars`.
    pub fn new(min_page_chars: usize) -> Self {
        Self { min_page_chars }
    }

    /// Create a renderer from reflow options.
    pub fn from_options(options: &ReflowOptions) -> Self {
        Self::new(options.min_page_chars)
    }

    /// Join a page's non-blank segments into flowed text.
    ///
    /// A non-empty result always starts with a space.
    pub fn flow(&self, segments: &[Segment]) -> String {
        let mut text = String::new();
        for segment in segments.iter().filter(|s| !s.is_blank()) {
            if !text.ends_with('\n') {
                text.push(' ');
            }
            text.push_str(&segment.text);
        }
        text
    }

    /// Paragraphs of one page, or none if the page is too short.
    ///
    /// Every `\n`-separated chunk is a paragraph, empty chunks included.
    /// The length is counted in Unicode scalar values, so a character outside
    /// the Basic Multilingual Plane (an emoji, a CJK Extension B ideograph)
    /// counts once, not as the two UTF-16 code units it would occupy.
    pub fn render(&self, segments: &[Segment]) -> Vec<String> {
        let text = self.flow(segments);
        if text.chars().count() < self.min_page_chars {
            return Vec::new();
        }
        text.split('\n').map(str::to_string).collect()
    }

    /// Render a single page, returning `None` when it is discarded.
    ///
    /// Uses the same scalar-value length as [`render`](Self::render).
    pub fn render_page(&self, page: &SegmentedPage) -> Option<RenderedPage> {
        let text = self.flow(&page.segments);
        let char_count = text.chars().count();
        if char_count < self.min_page_chars {
            log::debug!(
                "Page {} discarded ({} < {} chars)",
                page.number,
                char_count,
                self.min_page_chars
            );
            return None;
        }

        Some(RenderedPage {
            number: page.number,
            paragraphs: text.split('\n').map(str::to_string).collect(),
            char_count,
        })
    }

    /// Render every page of a segmented document, in page order.
    pub fn render_document(&self, doc: &SegmentedDocument) -> ReflowOutput {
        let pages: Vec<RenderedPage> = doc
            .pages
            .iter()
            .filter_map(|page| self.render_page(page))
            .collect();

        let stats = ReflowStats {
            page_count: doc.page_count(),
            pages_rendered: pages.len() as u32,
            pages_discarded: doc.page_count() - pages.len() as u32,
            segment_count: doc.segment_count,
            segments_removed: doc.segments_removed,
            paragraph_count: pages.iter().map(|p| p.paragraphs.len()).sum(),
            boilerplate_keys: doc.boilerplate_keys.clone(),
            failed_pages: doc.failed_pages.clone(),
        };

        ReflowOutput {
            metadata: None,
            pages,
            stats,
        }
    }
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PAGE_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(texts: &[&str]) -> Vec<Segment> {
        texts.iter().map(|t| Segment::new(*t)).collect()
    }

    #[test]
    fn test_flow_spacing() {
        let renderer = PageRenderer::default();
        let flowed = renderer.flow(&segments(&["Heading\n", "First", "", "  ", "second"]));
        assert_eq!(flowed, " Heading\nFirst second");
    }

    #[test]
    fn test_flow_empty_page() {
        assert_eq!(PageRenderer::default().flow(&segments(&[""])), "");
        assert_eq!(PageRenderer::default().flow(&[]), "");
    }

    #[test]
    fn test_threshold_counts_leading_space() {
        let renderer = PageRenderer::default();

        // 174 chars of text + leading space = 175: kept
        let kept = "a".repeat(174);
        assert_eq!(renderer.render(&segments(&[kept.as_str()])), vec![format!(" {}", kept)]);

        // 173 + 1 = 174: dropped
        let dropped = "a".repeat(173);
        assert!(renderer.render(&segments(&[dropped.as_str()])).is_empty());
    }

    #[test]
    fn test_threshold_counts_chars_not_bytes() {
        // 174 three-byte chars plus the leading space
        let text = "あ".repeat(174);
        assert_eq!(PageRenderer::default().render(&segments(&[text.as_str()])).len(), 1);
    }

    #[test]
    fn test_threshold_counts_astral_chars_once() {
        let renderer = PageRenderer::default();

        // 174 supplementary-plane chars plus the leading space = 175: kept
        let kept = "𠀋".repeat(174);
        let page = SegmentedPage::new(1, segments(&[kept.as_str()]));
        assert_eq!(renderer.render_page(&page).map(|p| p.char_count), Some(175));

        // 173 + 1 = 174, even though it is 347 UTF-16 units: dropped
        let dropped = "😀".repeat(173);
        assert!(renderer.render(&segments(&[dropped.as_str()])).is_empty());
    }

    #[test]
    fn test_paragraph_split_keeps_empty_chunks() {
        let renderer = PageRenderer::new(0);
        let paragraphs = renderer.render(&segments(&["Title\n", "Body line", "End\n"]));
        assert_eq!(paragraphs, vec![" Title", "Body line End", ""]);
    }

    #[test]
    fn test_render_page_and_document() {
        let long = "x".repeat(200);
        let doc = SegmentedDocument {
            pages: vec![
                SegmentedPage::new(1, segments(&["cover"])),
                SegmentedPage::new(2, segments(&["Chapter\n", long.as_str()])),
            ],
            segment_count: 5,
            segments_removed: 2,
            boilerplate_keys: vec!["Running Title".to_string()],
            failed_pages: vec![],
        };

        let output = PageRenderer::default().render_document(&doc);
        assert_eq!(output.pages.len(), 1);
        assert_eq!(output.pages[0].number, 2);
        assert_eq!(output.pages[0].paragraphs, vec![" Chapter".to_string(), long]);
        assert_eq!(output.pages[0].char_count, 209);
        assert_eq!(output.stats.page_count, 2);
        assert_eq!(output.stats.pages_rendered, 1);
        assert_eq!(output.stats.pages_discarded, 1);
        assert_eq!(output.stats.paragraph_count, 2);
        assert_eq!(output.stats.segments_removed, 2);
    }
}
