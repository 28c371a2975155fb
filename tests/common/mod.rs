//! Shared fixtures: PDFs built in memory with lopdf.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text placed at an absolute baseline.
#[derive(Debug, Clone)]
pub struct Line {
    pub text: String,
    pub y: f32,
    pub size: i64,
}

impl Line {
    pub fn new(text: impl Into<String>, y: f32, size: i64) -> Self {
        Self {
            text: text.into(),
            y,
            size,
        }
    }
}

const WORDS: [&str; 12] = [
    "amber", "birch", "cedar", "dune", "ember", "fjord", "grove", "heath", "inlet", "juniper",
    "kestrel", "lagoon",
];

/// Body line unique per (page, line) even with digits stripped.
pub fn prose(page: usize, line: usize) -> String {
    format!(
        "The {} path wound past the {} toward a quiet {} beyond.",
        WORDS[page % WORDS.len()],
        WORDS[line % WORDS.len()],
        WORDS[(page + line + 5) % WORDS.len()]
    )
}

/// A novel page: running title, five body lines, page number.
pub fn novel_page(index: usize) -> Vec<Line> {
    let mut lines = vec![Line::new("Running Title", 800.0, 10)];
    lines.extend((0..5).map(|l| Line::new(prose(index, l), 700.0 - l as f32 * 16.0, 12)));
    lines.push(Line::new((index + 1).to_string(), 40.0, 10));
    lines
}

pub fn novel(pages: usize) -> Vec<Vec<Line>> {
    (0..pages).map(novel_page).collect()
}

/// Build a PDF whose pages show the given lines in order.
///
/// A page with no lines gets no `/Contents` entry at all.
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    build_pdf_with_title(pages, None)
}

pub fn build_pdf_with_title(pages: &[Vec<Line>], title: Option<&str>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        };

        if !lines.is_empty() {
            let mut operations = Vec::new();
            for line in lines {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(line.size)],
                ));
                operations.push(Operation::new(
                    "Td",
                    vec![Object::Integer(72), Object::Real(line.y)],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(line.text.as_str())],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            page.set("Contents", content_id);
        }

        kids.push(Object::Reference(doc.add_object(page)));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
            "CreationDate" => Object::string_literal("D:20240115103045Z"),
        });
        doc.trailer.set("Info", info_id);
    }

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}
