//! Conversion on a tokio blocking task.

use crate::error::{Error, Result};
use crate::parser::{PdfTextSource, ReflowOptions};
use crate::render::ReflowOutput;

use super::pipeline::reflow_pdf;

/// Reflow PDF bytes without blocking the async runtime.
///
/// Dropping the returned future abandons the result; the conversion owns its
/// input, so nothing from an abandoned call reaches later ones.
pub async fn reflow_bytes_async(data: Vec<u8>, options: ReflowOptions) -> Result<ReflowOutput> {
    tokio::task::spawn_blocking(move || {
        let source = PdfTextSource::from_bytes(&data)?;
        reflow_pdf(&source, &options)
    })
    .await
    .map_err(|e| Error::Other(format!("conversion task failed: {}", e)))?
}
