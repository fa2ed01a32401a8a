// file: src/models/markup.rs
// description: markup tree of block and inline nodes shared by the serializer, counter and docx converters
// reference: internal data structures

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
}

impl HeadingLevel {
    pub fn from_number(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListKind {
    Bullet,
    Numbered,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Bullet => "ul",
            Self::Numbered => "ol",
        }
    }
}

/// A span of text sharing one set of inline formatting flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Run {
    pub fn new(text: impl Into<String>, bold: bool, italic: bool, underline: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            italic,
            underline,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, false, false, false)
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn same_format(&self, other: &Run) -> bool {
        self.bold == other.bold && self.italic == other.italic && self.underline == other.underline
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Heading { level: HeadingLevel, text: String },
    Paragraph { runs: Vec<Run> },
    List { kind: ListKind, items: Vec<String> },
    Quote { text: String },
    LineBreak,
    /// An element with no block mapping. The raw markup is kept so stored
    /// content survives a parse/serialize cycle.
    Unsupported { tag: String, markup: String },
}

impl Block {
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self::Heading {
            level,
            text: text.into(),
        }
    }

    /// Builds a paragraph in canonical form: whitespace-only runs are folded
    /// into a neighbour and adjacent runs with identical flags are merged.
    pub fn paragraph(runs: Vec<Run>) -> Self {
        Self::Paragraph {
            runs: normalize_runs(runs),
        }
    }

    pub fn empty_paragraph() -> Self {
        Self::Paragraph { runs: Vec::new() }
    }

    pub fn list(kind: ListKind, items: Vec<String>) -> Self {
        Self::List { kind, items }
    }

    pub fn quote(text: impl Into<String>) -> Self {
        Self::Quote { text: text.into() }
    }

    /// Concatenated text of the block, with list items joined by newlines.
    pub fn text(&self) -> String {
        match self {
            Block::Heading { text, .. } | Block::Quote { text } => text.clone(),
            Block::Paragraph { runs } => runs.iter().map(|r| r.text.as_str()).collect(),
            Block::List { items, .. } => items.join("\n"),
            Block::LineBreak | Block::Unsupported { .. } => String::new(),
        }
    }
}

fn normalize_runs(runs: Vec<Run>) -> Vec<Run> {
    let mut kept: Vec<Run> = Vec::with_capacity(runs.len());
    let mut leading_space = String::new();

    for run in runs {
        if run.text.is_empty() {
            continue;
        }

        if run.is_blank() {
            match kept.last_mut() {
                Some(previous) => previous.text.push_str(&run.text),
                None => leading_space.push_str(&run.text),
            }
            continue;
        }

        let mut run = run;
        if !leading_space.is_empty() {
            run.text.insert_str(0, &leading_space);
            leading_space.clear();
        }

        match kept.last_mut() {
            Some(previous) if previous.same_format(&run) => previous.text.push_str(&run.text),
            _ => kept.push(run),
        }
    }

    kept
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupTree {
    pub blocks: Vec<Block>,
}

impl MarkupTree {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn unsupported_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Unsupported { .. }))
            .count()
    }
}

impl From<Vec<Block>> for MarkupTree {
    fn from(blocks: Vec<Block>) -> Self {
        Self::new(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paragraph_merges_matching_runs() {
        let block = Block::paragraph(vec![
            Run::plain("Hello "),
            Run::plain("world"),
            Run::new("!", true, false, false),
        ]);

        assert_eq!(
            block,
            Block::Paragraph {
                runs: vec![Run::plain("Hello world"), Run::new("!", true, false, false)]
            }
        );
    }

    #[test]
    fn test_blank_runs_fold_into_neighbours() {
        let block = Block::paragraph(vec![
            Run::new("a", true, false, false),
            Run::plain(" "),
            Run::new("b", false, true, false),
        ]);

        assert_eq!(
            block,
            Block::Paragraph {
                runs: vec![
                    Run::new("a ", true, false, false),
                    Run::new("b", false, true, false)
                ]
            }
        );

        let leading = Block::paragraph(vec![Run::plain("  "), Run::new("x", true, false, false)]);
        assert_eq!(
            leading,
            Block::Paragraph {
                runs: vec![Run::new("  x", true, false, false)]
            }
        );
    }

    #[test]
    fn test_all_blank_paragraph_is_empty() {
        assert_eq!(
            Block::paragraph(vec![Run::plain("   "), Run::plain("")]),
            Block::empty_paragraph()
        );
    }

    #[test]
    fn test_block_text() {
        let list = Block::list(ListKind::Bullet, vec!["one".into(), "two".into()]);
        assert_eq!(list.text(), "one\ntwo");
        assert_eq!(Block::LineBreak.text(), "");
        assert_eq!(HeadingLevel::from_number(3), None);
        assert_eq!(HeadingLevel::H2.tag(), "h2");
    }
}
