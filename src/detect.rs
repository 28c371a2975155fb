//! PDF header sniffing.
//!
//! Readers accept a `%PDF-x.y` marker anywhere in the first kilobyte of the
//! file, so leading garbage (mail headers, BOMs) does not disqualify a
//! document.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // "1.7"
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Header information found at the start of a PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
    /// Byte offset of the `%PDF-` marker
    pub offset: usize,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Locate and validate the PDF header in a byte buffer.
pub fn sniff_bytes(data: &[u8]) -> Result<PdfHeader> {
    if data.is_empty() {
        return Err(Error::InputMissing);
    }

    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    let offset = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let start = offset + PDF_MAGIC.len();
    let version_bytes = data
        .get(start..start + VERSION_LEN)
        .ok_or(Error::UnknownFormat)?;

    match version_bytes {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => Ok(PdfHeader {
            version: String::from_utf8_lossy(version_bytes).into_owned(),
            offset,
        }),
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version_bytes).into_owned(),
        )),
    }
}

/// Locate and validate the PDF header of a file.
pub fn sniff_path<P: AsRef<Path>>(path: P) -> Result<PdfHeader> {
    let mut head = Vec::with_capacity(HEADER_SEARCH_WINDOW);
    File::open(path)?
        .take(HEADER_SEARCH_WINDOW as u64 + VERSION_LEN as u64)
        .read_to_end(&mut head)?;
    sniff_bytes(&head)
}

/// Check if bytes look like a PDF.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    sniff_bytes(data).is_ok()
}
