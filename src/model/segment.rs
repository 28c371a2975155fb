//! Reconstructed line/paragraph fragments.

use serde::{Deserialize, Serialize};

/// Trim whitespace and the byte-order mark (U+FEFF) from both ends.
pub(crate) fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// One visually grouped line of text, possibly ending in a paragraph break.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Segment {
    /// Accumulated, trimmed text; a trailing `\n` marks a font-size change
    pub text: String,
}

impl Segment {
    /// Create a new segment.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Key used for boilerplate frequency counting.
    ///
    /// ASCII digits are stripped before trimming so that "Page 1" and
    /// "Page 12" share the key "Page".
    pub fn normalized_key(&self) -> String {
        let stripped: String = self.text.chars().filter(|c| !c.is_ascii_digit()).collect();
        trim_text(&stripped).to_string()
    }

    /// Check if the segment has no visible text.
    pub fn is_blank(&self) -> bool {
        trim_text(&self.text).is_empty()
    }

    /// Check if the segment carries a hard paragraph break.
    pub fn ends_paragraph(&self) -> bool {
        self.text.ends_with('\n')
    }
}

impl From<&str> for Segment {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Segment {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
