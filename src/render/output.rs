//! Reflow output with statistics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Metadata;

use super::{html, json, text, JsonFormat};

/// One page that survived the length threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Paragraphs in order; may include empty paragraphs
    pub paragraphs: Vec<String>,

    /// Length of the flowed page text in characters
    pub char_count: usize,
}

/// Result of reflowing a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReflowOutput {
    /// Document metadata, when the source provides it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Rendered pages in page order
    pub pages: Vec<RenderedPage>,

    /// Conversion statistics
    pub stats: ReflowStats,
}

impl ReflowOutput {
    /// Iterate over all paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|page| page.paragraphs.iter().map(String::as_str))
    }

    /// Check if no page survived.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Plain text, one paragraph per line.
    pub fn to_text(&self) -> String {
        text::to_text(self)
    }

    /// HTML paragraph markup.
    pub fn to_html(&self) -> String {
        html::to_html(self)
    }

    /// JSON serialization.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        json::to_json(self, format)
    }

    /// Format the output. JSON is pretty-printed.
    pub fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Html => Ok(self.to_html()),
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => self.to_json(JsonFormat::Pretty),
        }
    }
}

/// Statistics collected during a reflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReflowStats {
    /// Pages processed
    pub page_count: u32,

    /// Pages at or above the length threshold
    pub pages_rendered: u32,

    /// Pages dropped as too short
    pub pages_discarded: u32,

    /// Segments before boilerplate removal
    pub segment_count: usize,

    /// Segments removed as boilerplate
    pub segments_removed: usize,

    /// Paragraphs in the output
    pub paragraph_count: usize,

    /// Keys classified as running headers/footers
    pub boilerplate_keys: Vec<String>,

    /// Pages whose extraction failed (1-indexed)
    pub failed_pages: Vec<u32>,
}

impl fmt::Display for ReflowStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages ({} rendered, {} discarded), {} paragraphs, {} of {} segments removed as boilerplate",
            self.page_count,
            self.pages_rendered,
            self.pages_discarded,
            self.paragraph_count,
            self.segments_removed,
            self.segment_count
        )?;
        if !self.failed_pages.is_empty() {
            write!(f, ", {} failed pages", self.failed_pages.len())?;
        }
        Ok(())
    }
}

/// Output string format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<p>` markup, as delivered to the reader host
    #[default]
    Html,
    /// Plain text, one paragraph per line
    Text,
    /// Serialized [`ReflowOutput`]
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::Other(format!("unknown output format: {}", other))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Html => "html",
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        })
    }
}
