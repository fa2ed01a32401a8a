// file: src/exporter/text.rs
// description: plain text export by stripping all markup

use crate::parser::plain_text;

pub struct TextExporter;

impl TextExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, content: &str) -> String {
        plain_text(content)
    }
}

impl Default for TextExporter {
    fn default() -> Self {
        Self::new()
    }
}
