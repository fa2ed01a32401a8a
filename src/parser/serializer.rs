// file: src/parser/serializer.rs
// description: renders a markup tree back into the editor's markup string
// reference: internal markup tree model

use crate::models::{Block, MarkupTree, Run};
use std::borrow::Cow;

pub struct MarkupSerializer;

impl MarkupSerializer {
    pub fn new() -> Self {
        Self
    }

    pub fn serialize(&self, tree: &MarkupTree) -> String {
        let mut out = String::new();
        for block in tree.iter() {
            write_block(&mut out, block);
        }
        out
    }
}

impl Default for MarkupSerializer {
    fn default() -> Self {
        Self::new()
    }
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { level, text } => {
            let tag = level.tag();
            out.push_str(&format!("<{tag}>{}</{tag}>", escape_text(text)));
        }
        Block::Paragraph { runs } if runs.is_empty() => out.push_str("<p><br></p>"),
        Block::Paragraph { runs } => {
            out.push_str("<p>");
            for run in runs {
                write_run(out, run);
            }
            out.push_str("</p>");
        }
        Block::List { kind, items } => {
            let tag = kind.tag();
            out.push_str(&format!("<{tag}>"));
            for item in items {
                out.push_str(&format!("<li>{}</li>", escape_text(item)));
            }
            out.push_str(&format!("</{tag}>"));
        }
        Block::Quote { text } => {
            out.push_str(&format!("<blockquote>{}</blockquote>", escape_text(text)));
        }
        Block::LineBreak => out.push_str("<br>"),
        Block::Unsupported { markup, .. } => out.push_str(markup),
    }
}

fn write_run(out: &mut String, run: &Run) {
    if run.bold {
        out.push_str("<strong>");
    }
    if run.italic {
        out.push_str("<em>");
    }
    if run.underline {
        out.push_str("<u>");
    }

    out.push_str(&escape_text(&run.text));

    if run.underline {
        out.push_str("</u>");
    }
    if run.italic {
        out.push_str("</em>");
    }
    if run.bold {
        out.push_str("</strong>");
    }
}

pub fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
