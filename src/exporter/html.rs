// file: src/exporter/html.rs
// description: wraps document content in a standalone serif-styled html page

use crate::parser::escape_text;

const STYLES: &str = "    body { font-family: 'Merriweather', Georgia, serif; max-width: 650px; margin: 40px auto; padding: 0 20px; line-height: 1.8; color: #333; }
    h1 { font-size: 2em; margin-bottom: 0.5em; }
    h2 { font-size: 1.5em; margin-top: 1.5em; margin-bottom: 0.5em; }
    p { margin-bottom: 1em; }
    blockquote { margin-left: 0; padding-left: 1em; border-left: 3px solid #ccc; font-style: italic; }";

pub struct HtmlExporter;

impl HtmlExporter {
    pub fn new() -> Self {
        Self
    }

    /// The body is the stored markup, unchanged.
    pub fn export(&self, title: &str, content: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n  <title>{}</title>\n  <style>\n{}\n  </style>\n</head>\n<body>\n  {}\n</body>\n</html>\n",
            escape_text(title),
            STYLES,
            content
        )
    }
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wraps_content_verbatim() {
        let content = "<h1>Hi</h1><p>Some <em>text</em></p>";
        let page = HtmlExporter::new().export("Notes", content);

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Notes</title>"));
        assert!(page.contains(content));
        assert!(page.contains("Merriweather"));
    }

    #[test]
    fn test_title_is_escaped() {
        let page = HtmlExporter::new().export("<b>Q&A</b>", "<p>x</p>");
        assert!(page.contains("<title>&lt;b&gt;Q&amp;A&lt;/b&gt;</title>"));
    }
}
