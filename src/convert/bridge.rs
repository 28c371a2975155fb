//! Single-shot output channel to a reader host.
//!
//! A host hands over document bytes (or base64 text) and expects exactly one
//! message back per conversion: the formatted output on success, or a
//! placeholder string when the input is missing or the conversion fails.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::{PdfTextSource, ReflowOptions};
use crate::render::OutputFormat;

use super::pipeline::reflow_pdf;

/// Payload sent when no document data was supplied.
pub const MISSING_INPUT_MESSAGE: &str = "document data not found";

/// Prefix of the payload sent when a conversion fails.
pub const FAILURE_PREFIX: &str = "conversion failed: ";

// Browsers' atob accepts input with or without padding.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Receiver of conversion payloads.
pub trait OutputSink {
    /// Deliver one payload.
    fn emit(&mut self, payload: String);
}

impl<F: FnMut(String)> OutputSink for F {
    fn emit(&mut self, payload: String) {
        self(payload)
    }
}

impl OutputSink for Vec<String> {
    fn emit(&mut self, payload: String) {
        self.push(payload);
    }
}

/// Converts documents and reports each result to its sink exactly once.
///
/// Conversions take `&mut self`, so one bridge never has two in flight.
pub struct ReaderBridge<S: OutputSink> {
    sink: S,
    options: ReflowOptions,
    format: OutputFormat,
}

impl<S: OutputSink> ReaderBridge<S> {
    /// Create a bridge emitting HTML with default options.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            options: ReflowOptions::default(),
            format: OutputFormat::Html,
        }
    }

    /// Set reflow options.
    pub fn with_options(mut self, options: ReflowOptions) -> Self {
        self.options = options;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Get the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the bridge, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Convert raw document bytes.
    pub fn convert(&mut self, data: Option<&[u8]>) {
        let payload = match data {
            Some(data) if !data.is_empty() => self.render(data).unwrap_or_else(failure_message),
            _ => {
                log::warn!("No document data supplied");
                MISSING_INPUT_MESSAGE.to_string()
            }
        };
        self.sink.emit(payload);
    }

    /// Convert base64-encoded document bytes.
    pub fn convert_base64(&mut self, data: Option<&str>) {
        match data.map(decode_base64) {
            Some(Ok(bytes)) => self.convert(Some(bytes.as_slice())),
            Some(Err(e)) => self.sink.emit(failure_message(e)),
            None => self.convert(None),
        }
    }

    fn render(&self, data: &[u8]) -> Result<String> {
        let source = PdfTextSource::from_bytes(data)?;
        let output = reflow_pdf(&source, &self.options)?;
        output.format(self.format)
    }
}

fn failure_message(err: crate::error::Error) -> String {
    log::warn!("Conversion failed: {}", err);
    format!("{}{}", FAILURE_PREFIX, err)
}

/// Decode base64 text, ignoring ASCII whitespace.
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(BASE64.decode(compact)?)
}

/// Host message envelope: `{"source": "<payload>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeMessage {
    /// The delivered payload
    pub source: String,
}

impl BridgeMessage {
    /// Serialize to a single JSON line.
    pub fn to_json(&self) -> String {
        serde_json::json!({ "source": self.source }).to_string()
    }

    /// Parse a JSON envelope.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| crate::error::Error::Encoding(format!("invalid bridge message: {}", e)))
    }
}

/// Sink adapter wrapping every payload in a [`BridgeMessage`].
pub struct EnvelopeSink<S: OutputSink> {
    inner: S,
}

impl<S: OutputSink> EnvelopeSink<S> {
    /// Wrap a sink.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Unwrap the inner sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: OutputSink> OutputSink for EnvelopeSink<S> {
    fn emit(&mut self, payload: String) {
        let message = BridgeMessage { source: payload };
        self.inner.emit(message.to_json());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_emits_once() {
        let mut calls: Vec<String> = Vec::new();
        {
            let mut bridge = ReaderBridge::new(|payload: String| calls.push(payload));
            bridge.convert(None);
        }
        assert_eq!(calls, vec![MISSING_INPUT_MESSAGE.to_string()]);
    }

    #[test]
    fn test_empty_input_is_missing() {
        let mut calls: Vec<String> = Vec::new();
        {
            let mut bridge = ReaderBridge::new(|payload: String| calls.push(payload));
            bridge.convert(Some(&b""[..]));
            bridge.convert_base64(Some(""));
            bridge.convert_base64(None);
        }
        assert_eq!(calls, vec![MISSING_INPUT_MESSAGE.to_string(); 3]);
    }

    #[test]
    fn test_invalid_document_emits_failure() {
        let mut calls: Vec<String> = Vec::new();
        {
            let mut bridge = ReaderBridge::new(|payload: String| calls.push(payload));
            bridge.convert(Some(&b"definitely not a pdf"[..]));
            bridge.convert_base64(Some("%%% not base64 %%%"));
        }
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.starts_with(FAILURE_PREFIX)));
    }

    #[test]
    fn test_envelope_sink() {
        let mut lines: Vec<String> = Vec::new();
        {
            let mut sink = EnvelopeSink::new(|line: String| lines.push(line));
            sink.emit("<p> a \"quoted\" line</p>".to_string());
        }
        assert_eq!(lines.len(), 1);
        let message = BridgeMessage::from_json(&lines[0]).unwrap();
        assert_eq!(message.source, "<p> a \"quoted\" line</p>");
    }

    #[test]
    fn test_decode_base64_variants() {
        assert_eq!(decode_base64("JVBERi0=").unwrap(), b"%PDF-");
        assert_eq!(decode_base64("JVBERi0").unwrap(), b"%PDF-");
        assert_eq!(decode_base64("JVBE\nRi0=\n").unwrap(), b"%PDF-");
        assert!(decode_base64("@@@@").is_err());
    }

    #[test]
    fn test_into_sink_returns_collected_payloads() {
        let mut bridge = ReaderBridge::new(EnvelopeSink::new(Vec::<String>::new()))
            .with_format(OutputFormat::Text)
            .with_options(ReflowOptions::default().sequential());
        bridge.convert(None);

        let lines = bridge.into_sink().into_inner();
        assert_eq!(lines, vec![r#"{"source":"document data not found"}"#.to_string()]);
    }
}
