//! Page text reconstruction and boilerplate removal.
//!
//! Text runs are read from a [`TextRunSource`], grouped into segments by
//! [`PageTextReconstructor`], and filtered document-wide by
//! [`BoilerplateFilter`].

mod boilerplate;
mod content;
mod options;
mod pdf_source;
mod reconstruct;
mod source;

pub use boilerplate::{BoilerplateFilter, BoilerplateReport};
pub use options::{
    ErrorMode, PageSelection, ReflowOptions, DEFAULT_BOILERPLATE_THRESHOLD,
    DEFAULT_HEADER_WINDOW, DEFAULT_HEIGHT_TOLERANCE, DEFAULT_MIN_PAGE_CHARS,
};
pub use pdf_source::PdfTextSource;
pub use reconstruct::{is_numeric, PageTextReconstructor};
pub use source::{MemorySource, TextRunSource};
