//! Conversion pipeline and host bridge.
//!
//! # Example
//!
//! ```no_run
//! use pdfreflow::convert::{reflow, ReaderBridge};
//! use pdfreflow::parser::{PdfTextSource, ReflowOptions};
//!
//! fn main() -> pdfreflow::Result<()> {
//!     let source = PdfTextSource::open("novel.pdf")?;
//!     let output = reflow(&source, &ReflowOptions::default())?;
//!     println!("{}", output.to_text());
//!
//!     let mut bridge = ReaderBridge::new(|payload: String| println!("{}", payload));
//!     let data = std::fs::read("novel.pdf")?;
//!     bridge.convert(Some(data.as_slice()));
//!     Ok(())
//! }
//! ```

mod bridge;
mod pipeline;
#[cfg(feature = "async")]
mod task;

pub use bridge::{
    decode_base64, BridgeMessage, EnvelopeSink, OutputSink, ReaderBridge, FAILURE_PREFIX,
    MISSING_INPUT_MESSAGE,
};
pub use pipeline::{reflow, reflow_pdf, segment_document};
#[cfg(feature = "async")]
pub use task::reflow_bytes_async;
