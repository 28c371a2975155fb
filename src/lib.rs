//! # pdfreflow
//!
//! Reflows the text of PDF documents (typically light novels) into clean
//! paragraphs for a reading view.
//!
//! Each page's positioned text runs are grouped into line segments, running
//! headers and footers repeated across most pages are removed, and every page
//! is flowed into paragraphs. Pages with too little text (covers, images,
//! placeholders) are dropped.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfreflow::reflow_file;
//!
//! fn main() -> pdfreflow::Result<()> {
//!     let output = reflow_file("novel.pdf")?;
//!     for paragraph in output.paragraphs() {
//!         println!("{}", paragraph);
//!     }
//!     println!("{}", output.stats);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line reconstruction**: runs grouped by baseline and glyph height
//! - **Boilerplate removal**: digit-insensitive running header detection
//! - **Paragraph output**: HTML, plain text, JSON
//! - **Pluggable engines**: any [`TextRunSource`] can feed the pipeline
//! - **Parallel processing**: uses Rayon for per-page extraction
//! - **Host bridge**: single-shot delivery to a reader host via [`ReaderBridge`]

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
#[cfg(feature = "async")]
pub use convert::reflow_bytes_async;
pub use convert::{
    reflow, reflow_pdf, segment_document, BridgeMessage, EnvelopeSink, OutputSink, ReaderBridge,
    MISSING_INPUT_MESSAGE,
};
pub use detect::{is_pdf_bytes, sniff_bytes, sniff_path, PdfHeader};
pub use error::{Error, Result};
pub use model::{Metadata, Segment, SegmentedDocument, SegmentedPage, TextRun};
pub use parser::{
    BoilerplateFilter, ErrorMode, MemorySource, PageSelection, PageTextReconstructor,
    PdfTextSource, ReflowOptions, TextRunSource,
};
pub use render::{JsonFormat, OutputFormat, PageRenderer, ReflowOutput, ReflowStats, RenderedPage};

use std::io::Read;
use std::path::Path;

/// Reflow a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::reflow_file;
///
/// let output = reflow_file("novel.pdf").unwrap();
/// println!("Paragraphs: {}", output.stats.paragraph_count);
/// ```
pub fn reflow_file<P: AsRef<Path>>(path: P) -> Result<ReflowOutput> {
    reflow_file_with_options(path, &ReflowOptions::default())
}

/// Reflow a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::{reflow_file_with_options, ReflowOptions};
///
/// let options = ReflowOptions::new().with_min_page_chars(0).sequential();
/// let output = reflow_file_with_options("novel.pdf", &options).unwrap();
/// ```
pub fn reflow_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ReflowOptions,
) -> Result<ReflowOutput> {
    let source = PdfTextSource::open(path)?;
    reflow_pdf(&source, options)
}

/// Reflow a PDF from bytes.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::reflow_bytes;
///
/// let data = std::fs::read("novel.pdf").unwrap();
/// let output = reflow_bytes(&data).unwrap();
/// ```
pub fn reflow_bytes(data: &[u8]) -> Result<ReflowOutput> {
    reflow_bytes_with_options(data, &ReflowOptions::default())
}

/// Reflow a PDF from bytes with custom options.
pub fn reflow_bytes_with_options(data: &[u8], options: &ReflowOptions) -> Result<ReflowOutput> {
    let source = PdfTextSource::from_bytes(data)?;
    reflow_pdf(&source, options)
}

/// Reflow a PDF from a reader.
pub fn reflow_reader<R: Read>(reader: R) -> Result<ReflowOutput> {
    let source = PdfTextSource::from_reader(reader)?;
    reflow_pdf(&source, &ReflowOptions::default())
}

/// Extract reflowed plain text from a PDF file, one paragraph per line.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::extract_text;
///
/// let text = extract_text("novel.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(reflow_file(path)?.to_text())
}

/// Convert a PDF file to `<p>` paragraph markup.
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(reflow_file(path)?.to_html())
}

/// Builder for reflowing PDF documents.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::Reflow;
///
/// let html = Reflow::new()
///     .with_min_page_chars(120)
///     .with_boilerplate_threshold(0.7)
///     .strict()
///     .file("novel.pdf")?
///     .to_html();
/// # Ok::<(), pdfreflow::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reflow {
    options: ReflowOptions,
}

impl Reflow {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line-break height tolerance.
    pub fn with_height_tolerance(mut self, tolerance: f32) -> Self {
        self.options = self.options.with_height_tolerance(tolerance);
        self
    }

    /// Set the running-header window size.
    pub fn with_header_window(mut self, window: usize) -> Self {
        self.options = self.options.with_header_window(window);
        self
    }

    /// Set the boilerplate frequency threshold.
    pub fn with_boilerplate_threshold(mut self, threshold: f64) -> Self {
        self.options = self.options.with_boilerplate_threshold(threshold);
        self
    }

    /// Set the minimum flowed page length.
    pub fn with_min_page_chars(mut self, chars: usize) -> Self {
        self.options = self.options.with_min_page_chars(chars);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Fail on the first page that cannot be extracted.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Get the accumulated options.
    pub fn options(&self) -> &ReflowOptions {
        &self.options
    }

    /// Reflow a PDF file.
    pub fn file<P: AsRef<Path>>(&self, path: P) -> Result<ReflowOutput> {
        reflow_file_with_options(path, &self.options)
    }

    /// Reflow a PDF from bytes.
    pub fn bytes(&self, data: &[u8]) -> Result<ReflowOutput> {
        reflow_bytes_with_options(data, &self.options)
    }

    /// Reflow any text-run source.
    pub fn source<S: TextRunSource + Sync>(&self, source: &S) -> Result<ReflowOutput> {
        reflow(source, &self.options)
    }
}
