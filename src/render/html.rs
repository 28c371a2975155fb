//! HTML paragraph rendering.
//!
//! Produces the markup a DOM container holds after one `<p>` per paragraph
//! has been appended with its text content: paragraphs are concatenated
//! without separators, and text is escaped the way `innerHTML` serializes it.

use super::ReflowOutput;

/// Render all paragraphs as `<p>` elements.
pub fn to_html(output: &ReflowOutput) -> String {
    let mut html = String::new();
    for paragraph in output.paragraphs() {
        html.push_str("<p>");
        escape_into(&mut html, paragraph);
        html.push_str("</p>");
    }
    html
}

/// Escape text content for HTML.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    escape_into(&mut escaped, text);
    escaped
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}
