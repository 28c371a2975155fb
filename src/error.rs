//! Error types for pdfreflow.

use std::io;
use thiserror::Error;

/// Result type alias for pdfreflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reflowing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No document bytes were supplied.
    #[error("No document data supplied")]
    InputMissing,

    /// The input is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries a version we cannot read.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and could not be opened.
    #[error("Document is encrypted")]
    Encrypted,

    /// The text-run source could not produce runs for a page.
    #[error("Text extraction failed on page {page}: {reason}")]
    PageExtraction {
        /// 1-indexed page number
        page: u32,
        /// Underlying failure description
        reason: String,
    },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Input text could not be decoded (e.g. malformed base64).
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error while producing the output string.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InputMissing;
        assert_eq!(err.to_string(), "No document data supplied");

        let err = Error::PageExtraction {
            page: 3,
            reason: "bad stream".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Text extraction failed on page 3: bad stream"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_base64_error_conversion() {
        use base64::Engine;
        let decoded = base64::engine::general_purpose::STANDARD.decode("!!!");
        let err: Error = decoded.unwrap_err().into();
        assert!(matches!(err, Error::Encoding(_)));
    }
}
