// file: src/parser/dom.rs
// description: lightweight element tree built from tokens, with text content extraction
// reference: https://dom.spec.whatwg.org/#dom-node-textcontent

use crate::parser::tokenizer::{HtmlTokenizer, Token};
use std::ops::Range;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const BLOCK_ELEMENTS: &[&str] = &[
    "blockquote", "br", "div", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "ol", "p", "pre",
    "table", "td", "th", "tr", "ul",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Byte range of the element in the source, from its start tag to its
    /// end tag (or last child when the end tag is missing).
    pub span: Range<usize>,
}

impl Node {
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.write_text(out);
                }
            }
        }
    }

    fn write_separated(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                let block = BLOCK_ELEMENTS.contains(&element.tag.as_str());
                if block {
                    out.push('\n');
                }
                for child in &element.children {
                    child.write_separated(out);
                }
                if block {
                    out.push('\n');
                }
            }
        }
    }
}

impl Element {
    pub fn text_content(&self) -> String {
        text_content(&self.children)
    }

    /// Descendant elements with the given tag, in document order.
    pub fn descendants_named<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_named(&self.children, tag, &mut found);
        found
    }
}

fn collect_named<'a>(nodes: &'a [Node], tag: &str, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(element) = node {
            if element.tag == tag {
                found.push(element);
            }
            collect_named(&element.children, tag, found);
        }
    }
}

pub fn text_content(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_text(&mut out);
    }
    out
}

/// Parses a markup fragment into top-level nodes. Unmatched end tags are
/// ignored and unclosed elements are closed at the end of input.
pub fn parse_fragment(input: &str) -> Vec<Node> {
    let mut builder = TreeBuilder::default();

    for token in HtmlTokenizer::new().tokenize(input) {
        match token {
            Token::Text { text, span } => builder.append(Node::Text(text), span.end),
            Token::StartTag {
                name,
                attrs,
                self_closing,
                span,
            } => {
                let end = span.end;
                let element = Element {
                    tag: name,
                    attrs,
                    children: Vec::new(),
                    span,
                };
                if self_closing || VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    builder.append(Node::Element(element), end);
                } else {
                    builder.open.push(element);
                }
            }
            Token::EndTag { name, span } => builder.close(&name, span.end),
        }
    }

    builder.finish()
}

/// Plain text of a markup string: all text nodes concatenated, entities
/// decoded, no separators added between blocks.
pub fn plain_text(markup: &str) -> String {
    text_content(&parse_fragment(markup))
}

/// Like [`plain_text`] but with a newline around every block element, so
/// text from adjacent blocks never fuses into one word.
pub fn block_separated_text(markup: &str) -> String {
    let mut out = String::new();
    for node in parse_fragment(markup) {
        node.write_separated(&mut out);
    }
    out
}

#[derive(Default)]
struct TreeBuilder {
    open: Vec<Element>,
    roots: Vec<Node>,
}

impl TreeBuilder {
    fn append(&mut self, node: Node, end: usize) {
        match self.open.last_mut() {
            Some(parent) => {
                parent.span.end = parent.span.end.max(end);
                parent.children.push(node);
            }
            None => self.roots.push(node),
        }
    }

    fn close(&mut self, name: &str, end: usize) {
        let Some(position) = self.open.iter().rposition(|e| e.tag == name) else {
            return;
        };

        while self.open.len() > position {
            let Some(mut element) = self.open.pop() else {
                break;
            };
            if self.open.len() == position {
                element.span.end = end;
            }
            let element_end = element.span.end;
            self.append(Node::Element(element), element_end);
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while let Some(element) = self.open.pop() {
            let end = element.span.end;
            self.append(Node::Element(element), end);
        }
        self.roots
    }
}
