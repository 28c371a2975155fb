//! Rendering of segmented documents into paragraphs and output strings.

mod html;
mod json;
mod output;
mod page;
mod text;

pub use html::{escape_text, to_html};
pub use json::{to_json, JsonFormat};
pub use output::{OutputFormat, ReflowOutput, ReflowStats, RenderedPage};
pub use page::PageRenderer;
pub use text::to_text;
