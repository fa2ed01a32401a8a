// file: src/parser/markup.rs
// description: maps parsed markup elements onto the closed set of block and run kinds
// reference: internal markup tree model

use crate::models::{Block, HeadingLevel, ListKind, MarkupTree, Run};
use crate::parser::dom::{self, Element, Node};
use tracing::debug;

const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "cite", "code", "em", "font", "i", "kbd", "mark", "s", "small", "span",
    "strike", "strong", "sub", "sup", "u",
];

#[derive(Debug, Clone, Copy, Default)]
struct InlineFlags {
    bold: bool,
    italic: bool,
    underline: bool,
}

impl InlineFlags {
    fn enter(self, tag: &str) -> Self {
        let mut flags = self;
        match tag {
            "strong" | "b" => flags.bold = true,
            "em" | "i" => flags.italic = true,
            "u" => flags.underline = true,
            _ => {}
        }
        flags
    }

    fn run(self, text: &str) -> Run {
        Run::new(text, self.bold, self.italic, self.underline)
    }
}

pub struct MarkupParser;

impl MarkupParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses a markup string into blocks. Loose top-level text and inline
    /// elements are gathered into an implicit paragraph.
    pub fn parse(&self, markup: &str) -> MarkupTree {
        let nodes = dom::parse_fragment(markup);
        let mut blocks = Vec::new();
        let mut loose: Vec<Run> = Vec::new();

        for node in &nodes {
            match node {
                Node::Text(text) => loose.push(Run::plain(text.as_str())),
                Node::Element(element) if INLINE_ELEMENTS.contains(&element.tag.as_str()) => {
                    collect_runs(
                        std::slice::from_ref(node),
                        InlineFlags::default(),
                        &mut loose,
                    );
                    debug!("Gathered loose <{}> into implicit paragraph", element.tag);
                }
                Node::Element(element) => {
                    flush_loose(&mut loose, &mut blocks);
                    blocks.push(self.block_from_element(element, markup));
                }
            }
        }

        flush_loose(&mut loose, &mut blocks);
        MarkupTree::new(blocks)
    }

    fn block_from_element(&self, element: &Element, source: &str) -> Block {
        match element.tag.as_str() {
            "h1" => Block::heading(HeadingLevel::H1, element.text_content()),
            "h2" => Block::heading(HeadingLevel::H2, element.text_content()),
            "p" => {
                let mut runs = Vec::new();
                collect_runs(&element.children, InlineFlags::default(), &mut runs);
                Block::paragraph(runs)
            }
            "ul" => Block::list(ListKind::Bullet, list_items(element)),
            "ol" => Block::list(ListKind::Numbered, list_items(element)),
            "blockquote" => Block::quote(element.text_content()),
            "br" => Block::LineBreak,
            other => {
                debug!("Keeping unsupported <{}> block", other);
                Block::Unsupported {
                    tag: other.to_string(),
                    markup: source
                        .get(element.span.clone())
                        .unwrap_or_default()
                        .to_string(),
                }
            }
        }
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

fn list_items(element: &Element) -> Vec<String> {
    element
        .descendants_named("li")
        .into_iter()
        .map(Element::text_content)
        .collect()
}

/// Each text node becomes a run carrying every flag of its enclosing inline
/// elements, so nested bold and italic land on the same run. A `<br>` inside
/// a paragraph reads as a space.
fn collect_runs(nodes: &[Node], flags: InlineFlags, runs: &mut Vec<Run>) {
    for node in nodes {
        match node {
            Node::Text(text) => runs.push(flags.run(text)),
            Node::Element(element) if element.tag == "br" => runs.push(flags.run(" ")),
            Node::Element(element) => {
                collect_runs(&element.children, flags.enter(&element.tag), runs)
            }
        }
    }
}

fn flush_loose(loose: &mut Vec<Run>, blocks: &mut Vec<Block>) {
    if loose.iter().any(|r| !r.is_blank()) {
        blocks.push(Block::paragraph(std::mem::take(loose)));
    } else {
        loose.clear();
    }
}
