//! Plain text rendering.

use super::ReflowOutput;

/// Join all paragraphs with newlines.
pub fn to_text(output: &ReflowOutput) -> String {
    output.paragraphs().collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderedPage;

    #[test]
    fn test_to_text() {
        let output = ReflowOutput {
            pages: vec![
                RenderedPage {
                    number: 1,
                    paragraphs: vec![" Hello, world!".into(), "Second paragraph.".into()],
                    char_count: 175,
                },
                RenderedPage {
                    number: 2,
                    paragraphs: vec![" Next page".into()],
                    char_count: 175,
                },
            ],
            ..Default::default()
        };

        assert_eq!(
            to_text(&output),
            " Hello, world!\nSecond paragraph.\n Next page"
        );
    }
}
