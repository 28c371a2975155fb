//! lopdf-backed text-run source.

use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::detect::{sniff_bytes, sniff_path, PdfHeader};
use crate::error::{Error, Result};
use crate::model::{Metadata, TextRun};

use super::content::{decode_text_simple, RunCollector};
use super::source::TextRunSource;

/// A loaded PDF document that reports per-page text runs.
pub struct PdfTextSource {
    doc: LopdfDocument,
    header: PdfHeader,
    page_ids: Vec<ObjectId>,
}

impl PdfTextSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let header = sniff_path(path)?;
        let doc = LopdfDocument::load(path)?;
        Ok(Self::from_document(doc, header))
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let header = sniff_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc, header))
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_document(doc: LopdfDocument, header: PdfHeader) -> Self {
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        log::debug!(
            "Loaded {} with {} pages{}",
            header,
            page_ids.len(),
            if doc.is_encrypted() { " (encrypted)" } else { "" }
        );
        Self {
            doc,
            header,
            page_ids,
        }
    }

    /// PDF version from the file header.
    pub fn version(&self) -> &str {
        &self.header.version
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Read document metadata from the Info dictionary.
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::with_version(self.header.version.clone());
        metadata.page_count = self.page_ids.len() as u32;
        metadata.encrypted = self.doc.is_encrypted();

        let info = self
            .doc
            .trailer
            .get(b"Info")
            .ok()
            .and_then(|obj| match obj {
                Object::Reference(id) => self.doc.get_dictionary(*id).ok(),
                Object::Dictionary(dict) => Some(dict),
                _ => None,
            });

        if let Some(info) = info {
            metadata.title = info_string(info, b"Title");
            metadata.author = info_string(info, b"Author");
            metadata.subject = info_string(info, b"Subject");
            metadata.producer = info_string(info, b"Producer");
            metadata.created = info_string(info, b"CreationDate").and_then(|s| parse_pdf_date(&s));
            metadata.modified = info_string(info, b"ModDate").and_then(|s| parse_pdf_date(&s));
        }

        metadata
    }
}

impl TextRunSource for PdfTextSource {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn text_runs(&self, page_index: usize) -> Result<Vec<TextRun>> {
        let page_id = *self.page_ids.get(page_index).ok_or(Error::PageOutOfRange(
            page_index as u32 + 1,
            self.page_ids.len() as u32,
        ))?;
        RunCollector::new(&self.doc).page_runs(page_id)
    }
}

fn info_string(dict: &Dictionary, key: &[u8]) -> Option<String> {
    let value = match dict.get(key).ok()? {
        Object::String(bytes, _) => decode_text_simple(bytes),
        Object::Name(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        _ => return None,
    };
    let value = value.trim_end_matches('\0');
    (!value.trim().is_empty()).then(|| value.to_string())
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSS` with optional trailing zone).
///
/// Missing components default to the start of the period; the zone suffix is
/// ignored and the result is taken as UTC.
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let digits = s.trim().strip_prefix("D:").unwrap_or(s.trim());
    let field = |range: std::ops::Range<usize>, default: u32| -> Option<u32> {
        match digits.get(range) {
            Some(part) if part.bytes().all(|b| b.is_ascii_digit()) => part.parse().ok(),
            _ => Some(default),
        }
    };

    let year: i32 = digits.get(0..4)?.parse().ok()?;
    chrono::NaiveDate::from_ymd_opt(year, field(4..6, 1)?, field(6..8, 1)?)?
        .and_hms_opt(field(8..10, 0)?, field(10..12, 0)?, field(12..14, 0)?)
        .map(|naive| naive.and_utc())
}
