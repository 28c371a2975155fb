//! Document model types for page reflow.
//!
//! Text runs come in from a [`TextRunSource`](crate::parser::TextRunSource),
//! segments are what the reconstruction and boilerplate stages work on, and
//! the segmented document is the whole-document aggregate that rendering
//! consumes.

mod document;
mod metadata;
mod run;
mod segment;

pub use document::{SegmentedDocument, SegmentedPage};
pub use metadata::Metadata;
pub use run::TextRun;
pub(crate) use segment::trim_text;
pub use segment::Segment;
