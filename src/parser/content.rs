//! Content stream walking: turns a page's text-showing operators into
//! positioned [`TextRun`]s.
//!
//! Only the text state needed for baseline and glyph height is tracked. The
//! current transformation matrix is ignored, which matches how reader-oriented
//! documents (one column, no rotated text) are typically produced.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::TextRun;

/// TJ adjustments beyond this (thousandths of text space) read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Walks page content streams of one document.
pub(crate) struct RunCollector<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> RunCollector<'a> {
    pub(crate) fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Collect the text runs of a page in content-stream order.
    pub(crate) fn page_runs(&self, page_id: ObjectId) -> Result<Vec<TextRun>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let content = self.page_content(page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }

        let content = Content::decode(&content).map_err(|e| Error::PdfParse(e.to_string()))?;
        let mut walker = TextWalker::new(self.doc, &fonts);
        for op in &content.operations {
            walker.apply(&op.operator, &op.operands);
        }
        Ok(walker.runs)
    }

    /// Concatenated, decompressed content streams of a page.
    ///
    /// A page without `/Contents` is blank and yields an empty buffer.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        match contents {
            Object::Reference(r) => self.stream_content(*r),
            Object::Array(parts) => {
                let mut content = Vec::new();
                for part in parts {
                    if let Object::Reference(r) = part {
                        match self.stream_content(*r) {
                            Ok(data) => {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                            Err(e) => log::warn!("Skipping content stream {:?}: {}", r, e),
                        }
                    }
                }
                Ok(content)
            }
            Object::Stream(s) => Ok(s
                .decompressed_content()
                .unwrap_or_else(|_| s.content.clone())),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn stream_content(&self, id: ObjectId) -> Result<Vec<u8>> {
        match self.doc.get_object(id)? {
            Object::Stream(s) => Ok(s
                .decompressed_content()
                .unwrap_or_else(|_| s.content.clone())),
            _ => Err(Error::PdfParse(format!(
                "Content object {} {} is not a stream",
                id.0, id.1
            ))),
        }
    }
}

/// Text state machine over a decoded operation list.
struct TextWalker<'a, 'f> {
    doc: &'a LopdfDocument,
    fonts: &'f BTreeMap<Vec<u8>, &'a Dictionary>,
    matrix: TextMatrix,
    font: Vec<u8>,
    font_size: f32,
    leading: f32,
    in_text: bool,
    runs: Vec<TextRun>,
}

impl<'a, 'f> TextWalker<'a, 'f> {
    fn new(doc: &'a LopdfDocument, fonts: &'f BTreeMap<Vec<u8>, &'a Dictionary>) -> Self {
        Self {
            doc,
            fonts,
            matrix: TextMatrix::default(),
            font: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
            leading: 0.0,
            in_text: false,
            runs: Vec::new(),
        }
    }

    fn apply(&mut self, operator: &str, operands: &[Object]) {
        match (operator, operands) {
            ("BT", _) => {
                self.in_text = true;
                self.matrix = TextMatrix::default();
            }
            ("ET", _) => self.in_text = false,
            ("Tf", [Object::Name(name), size, ..]) => {
                self.font = name.clone();
                self.font_size = number(size).unwrap_or(DEFAULT_FONT_SIZE);
            }
            ("TL", [leading, ..]) => self.leading = number(leading).unwrap_or(0.0),
            ("Td", [tx, ty, ..]) => {
                self.matrix
                    .translate(number(tx).unwrap_or(0.0), number(ty).unwrap_or(0.0));
            }
            ("TD", [tx, ty, ..]) => {
                let ty = number(ty).unwrap_or(0.0);
                self.leading = -ty;
                self.matrix.translate(number(tx).unwrap_or(0.0), ty);
            }
            ("Tm", [a, b, c, d, e, f, ..]) => {
                self.matrix = TextMatrix {
                    a: number(a).unwrap_or(1.0),
                    b: number(b).unwrap_or(0.0),
                    c: number(c).unwrap_or(0.0),
                    d: number(d).unwrap_or(1.0),
                    e: number(e).unwrap_or(0.0),
                    f: number(f).unwrap_or(0.0),
                };
            }
            ("T*", _) => self.next_line(),
            ("Tj", [Object::String(bytes, _), ..]) => {
                let text = self.decode(bytes);
                self.emit(text);
            }
            ("TJ", [Object::Array(items), ..]) => {
                let text = self.decode_array(items);
                self.emit(text);
            }
            ("'", [Object::String(bytes, _), ..]) => {
                self.next_line();
                let text = self.decode(bytes);
                self.emit(text);
            }
            ("\"", [_, _, Object::String(bytes, _), ..]) => {
                self.next_line();
                let text = self.decode(bytes);
                self.emit(text);
            }
            _ => {}
        }
    }

    fn next_line(&mut self) {
        self.matrix.translate(0.0, -self.leading);
    }

    fn emit(&mut self, text: String) {
        if !self.in_text || text.is_empty() {
            return;
        }
        self.runs.push(TextRun::new(
            text,
            self.matrix.f,
            self.font_size * self.matrix.vertical_scale(),
        ));
    }

    fn decode(&self, bytes: &[u8]) -> String {
        self.fonts
            .get(self.font.as_slice())
            .and_then(|font| font.get_font_encoding(self.doc).ok())
            .and_then(|encoding| LopdfDocument::decode_text(&encoding, bytes).ok())
            .unwrap_or_else(|| decode_text_simple(bytes))
    }

    /// Decode a TJ array, turning large negative kerning into word spaces.
    fn decode_array(&self, items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(bytes)),
                other => {
                    let Some(adjustment) = number(other) else {
                        continue;
                    };
                    let wants_space = -adjustment > TJ_SPACE_THRESHOLD
                        && combined
                            .chars()
                            .last()
                            .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                    if wants_space {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }
}

/// Text matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    /// Length of the transformed unit vertical vector.
    fn vertical_scale(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Scripts written without spaces between words (Han, kana).
/// Hangul is excluded: Korean separates words with spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x3000..=0x303F     // CJK symbols and punctuation
        | 0x3040..=0x309F   // Hiragana
        | 0x30A0..=0x30FF   // Katakana
        | 0x3400..=0x4DBF   // CJK Extension A
        | 0x4E00..=0x9FFF   // CJK Unified Ideographs
        | 0x20000..=0x2EBEF // CJK Extensions B-F
    )
}

/// Decode string bytes when the font offers no usable encoding.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(ops: Vec<(&str, Vec<Object>)>) -> Vec<TextRun> {
        let doc = LopdfDocument::with_version("1.5");
        let fonts = BTreeMap::new();
        let mut walker = TextWalker::new(&doc, &fonts);
        for (operator, operands) in ops {
            walker.apply(operator, &operands);
        }
        walker.runs
    }

    fn string(s: &str) -> Object {
        Object::string_literal(s)
    }

    #[test]
    fn test_tj_runs_share_baseline() {
        let runs = walk(vec![
            ("BT", vec![]),
            ("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(11)]),
            ("Td", vec![Object::Integer(72), Object::Integer(700)]),
            ("Tj", vec![string("Hello ")]),
            ("Tj", vec![string("world")]),
            ("ET", vec![]),
        ]);

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], TextRun::new("Hello ", 700.0, 11.0));
        assert_eq!(runs[1], TextRun::new("world", 700.0, 11.0));
    }

    #[test]
    fn test_leading_moves_baseline() {
        let runs = walk(vec![
            ("BT", vec![]),
            ("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(10)]),
            ("TD", vec![Object::Integer(72), Object::Integer(-14)]),
            ("Tj", vec![string("one")]),
            ("T*", vec![]),
            ("Tj", vec![string("two")]),
            ("TL", vec![Object::Integer(20)]),
            ("'", vec![string("three")]),
            ("ET", vec![]),
        ]);

        let baselines: Vec<f32> = runs.iter().map(|r| r.baseline_y).collect();
        assert_eq!(baselines, vec![-14.0, -28.0, -48.0]);
    }

    #[test]
    fn test_tm_scales_height() {
        let runs = walk(vec![
            ("BT", vec![]),
            ("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(1)]),
            (
                "Tm",
                vec![
                    Object::Integer(18),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(18),
                    Object::Integer(72),
                    Object::Real(500.5),
                ],
            ),
            ("Tj", vec![string("Chapter")]),
            ("ET", vec![]),
        ]);

        assert_eq!(runs, vec![TextRun::new("Chapter", 500.5, 18.0)]);
    }

    #[test]
    fn test_tj_array_kerning_space() {
        let runs = walk(vec![
            ("BT", vec![]),
            (
                "TJ",
                vec![Object::Array(vec![
                    string("Hello"),
                    Object::Integer(-250),
                    string("world"),
                    Object::Integer(-50),
                    string("!"),
                ])],
            ),
            ("ET", vec![]),
        ]);

        assert_eq!(runs[0].text, "Hello world!");
    }

    #[test]
    fn test_text_outside_bt_is_ignored() {
        let runs = walk(vec![("Tj", vec![string("stray")])]);
        assert!(runs.is_empty());
    }

    #[test]
    fn test_empty_strings_are_skipped_but_spaces_kept() {
        let runs = walk(vec![
            ("BT", vec![]),
            ("Tj", vec![string("")]),
            ("Tj", vec![string(" ")]),
            ("ET", vec![]),
        ]);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, " ");
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0x48, 0x65, 0x6C, 0x6C, 0xE9]), "Hellé");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
    }

    #[test]
    fn test_spaceless_script() {
        assert!(is_spaceless_script_char('日'));
        assert!(is_spaceless_script_char('カ'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }
}
