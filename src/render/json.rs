//! JSON rendering.

use crate::error::{Error, Result};

use super::ReflowOutput;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a reflow output to JSON.
pub fn to_json(output: &ReflowOutput, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(output),
        JsonFormat::Compact => serde_json::to_string(output),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
