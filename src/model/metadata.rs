//! Document metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document information read from the PDF Info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages
    pub page_count: u32,

    /// Whether the document is encrypted
    pub encrypted: bool,
}

impl Metadata {
    /// Create new metadata with PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }

    /// Human-readable `key: value` lines, skipping absent fields.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let fields = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Producer", &self.producer),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                lines.push(format!("{}: {}", label, value));
            }
        }
        if let Some(created) = self.created {
            lines.push(format!("Created: {}", created.to_rfc3339()));
        }
        if let Some(modified) = self.modified {
            lines.push(format!("Modified: {}", modified.to_rfc3339()));
        }
        lines.push(format!("PDF version: {}", self.pdf_version));
        lines.push(format!("Pages: {}", self.page_count));
        lines.push(format!("Encrypted: {}", if self.encrypted { "yes" } else { "no" }));
        lines
    }
}
