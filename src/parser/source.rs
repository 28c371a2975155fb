//! Text-run source abstraction.
//!
//! The reflow pipeline never touches a PDF library directly. Anything that
//! can enumerate pages and report ordered, positioned text runs per page can
//! feed it: the lopdf-backed [`PdfTextSource`](super::PdfTextSource), an
//! in-memory [`MemorySource`], or a caller's own rendering engine.

use crate::error::{Error, Result};
use crate::model::TextRun;

/// A page-iterating provider of text runs.
pub trait TextRunSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Text runs of one page (0-indexed), in reading order.
    fn text_runs(&self, page_index: usize) -> Result<Vec<TextRun>>;
}

impl<T: TextRunSource + ?Sized> TextRunSource for &T {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn text_runs(&self, page_index: usize) -> Result<Vec<TextRun>> {
        (**self).text_runs(page_index)
    }
}

/// Text runs already held in memory, one vector per page.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Vec<TextRun>>,
}

impl MemorySource {
    /// Create a source from per-page runs.
    pub fn new(pages: Vec<Vec<TextRun>>) -> Self {
        Self { pages }
    }

    /// Append a page.
    pub fn push_page(&mut self, runs: Vec<TextRun>) {
        self.pages.push(runs);
    }
}

impl From<Vec<Vec<TextRun>>> for MemorySource {
    fn from(pages: Vec<Vec<TextRun>>) -> Self {
        Self::new(pages)
    }
}

impl TextRunSource for MemorySource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn text_runs(&self, page_index: usize) -> Result<Vec<TextRun>> {
        self.pages.get(page_index).cloned().ok_or(Error::PageOutOfRange(
            page_index as u32 + 1,
            self.pages.len() as u32,
        ))
    }
}
