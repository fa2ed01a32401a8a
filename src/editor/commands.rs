// file: src/editor/commands.rs
// description: toggle-style formatting commands applied to a selection within the markup tree
// reference: rich-text toolbar commands (bold, italic, underline, headings, lists, quote)

use crate::models::{Block, HeadingLevel, ListKind, MarkupTree, Run};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Heading(HeadingLevel),
    BulletList,
    NumberedList,
    Quote,
}

impl FormatCommand {
    pub fn is_inline(self) -> bool {
        matches!(self, Self::Bold | Self::Italic | Self::Underline)
    }
}

impl FromStr for FormatCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            "underline" => Ok(Self::Underline),
            "bullet" | "ul" | "bullet-list" => Ok(Self::BulletList),
            "numbered" | "ol" | "numbered-list" => Ok(Self::NumberedList),
            "quote" | "blockquote" => Ok(Self::Quote),
            other => other
                .strip_prefix("heading")
                .or_else(|| other.strip_prefix('h'))
                .and_then(|level| level.parse().ok())
                .and_then(HeadingLevel::from_number)
                .map(Self::Heading)
                .ok_or_else(|| format!("unknown format command: {}", other)),
        }
    }
}

/// A character range inside one block. `start == end` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub block: usize,
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(block: usize, start: usize, end: usize) -> Self {
        Self {
            block,
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn caret(block: usize, offset: usize) -> Self {
        Self::new(block, offset, offset)
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy)]
enum Attribute {
    Bold,
    Italic,
    Underline,
}

impl Attribute {
    fn get(self, run: &Run) -> bool {
        match self {
            Attribute::Bold => run.bold,
            Attribute::Italic => run.italic,
            Attribute::Underline => run.underline,
        }
    }

    fn set(self, run: &mut Run, value: bool) {
        match self {
            Attribute::Bold => run.bold = value,
            Attribute::Italic => run.italic = value,
            Attribute::Underline => run.underline = value,
        }
    }
}

/// Applies `command` and returns the edited tree; the input is left as is.
/// Without a selection every command is a no-op. A collapsed selection only
/// affects block commands.
pub fn apply_command(
    tree: &MarkupTree,
    command: FormatCommand,
    selection: Option<&Selection>,
) -> MarkupTree {
    let Some(selection) = selection else {
        debug!("No selection, ignoring {:?}", command);
        return tree.clone();
    };

    let Some(block) = tree.blocks.get(selection.block) else {
        debug!("Selection block {} out of range", selection.block);
        return tree.clone();
    };

    let replacement = match command {
        FormatCommand::Bold => toggle_inline(block, selection, Attribute::Bold),
        FormatCommand::Italic => toggle_inline(block, selection, Attribute::Italic),
        FormatCommand::Underline => toggle_inline(block, selection, Attribute::Underline),
        FormatCommand::Heading(level) => convert_block(
            block,
            |text| Block::heading(level, text),
            |b| matches!(b, Block::Heading { level: current, .. } if *current == level),
        ),
        FormatCommand::Quote => convert_block(
            block,
            |text| Block::quote(text),
            |b| matches!(b, Block::Quote { .. }),
        ),
        FormatCommand::BulletList => convert_list(block, ListKind::Bullet),
        FormatCommand::NumberedList => convert_list(block, ListKind::Numbered),
    };

    let Some(replacement) = replacement else {
        return tree.clone();
    };

    let mut blocks = Vec::with_capacity(tree.len() + replacement.len());
    blocks.extend_from_slice(&tree.blocks[..selection.block]);
    blocks.extend(replacement);
    blocks.extend_from_slice(&tree.blocks[selection.block + 1..]);
    MarkupTree::new(blocks)
}

fn toggle_inline(block: &Block, selection: &Selection, attribute: Attribute) -> Option<Vec<Block>> {
    let Block::Paragraph { runs } = block else {
        return None;
    };

    if selection.is_collapsed() {
        return None;
    }

    let total: usize = runs.iter().map(|r| r.text.chars().count()).sum();
    let start = selection.start.min(total);
    let end = selection.end.min(total);
    if start == end {
        return None;
    }

    let pieces = split_runs(runs, start, end);
    let already = pieces
        .iter()
        .filter(|(inside, _)| *inside)
        .all(|(_, run)| attribute.get(run));

    let edited = pieces
        .into_iter()
        .map(|(inside, mut run)| {
            if inside {
                attribute.set(&mut run, !already);
            }
            run
        })
        .collect();

    Some(vec![Block::paragraph(edited)])
}

/// Splits runs at the character offsets `start` and `end`, tagging each
/// piece with whether it falls inside the range.
fn split_runs(runs: &[Run], start: usize, end: usize) -> Vec<(bool, Run)> {
    let mut pieces = Vec::new();
    let mut offset = 0;

    for run in runs {
        let chars: Vec<char> = run.text.chars().collect();
        let run_start = offset;
        let run_end = offset + chars.len();
        offset = run_end;

        let cuts = [
            run_start,
            start.clamp(run_start, run_end),
            end.clamp(run_start, run_end),
            run_end,
        ];
        for window in cuts.windows(2) {
            let (from, to) = (window[0], window[1]);
            if from == to {
                continue;
            }
            let text: String = chars[from - run_start..to - run_start].iter().collect();
            let inside = from >= start && to <= end;
            let mut piece = run.clone();
            piece.text = text;
            pieces.push((inside, piece));
        }
    }

    pieces
}

fn convert_block(
    block: &Block,
    build: impl Fn(String) -> Block,
    is_target: impl Fn(&Block) -> bool,
) -> Option<Vec<Block>> {
    match block {
        Block::Unsupported { .. } => None,
        b if is_target(b) => Some(vec![paragraph_from_text(b.text())]),
        Block::List { items, .. } => Some(items.iter().cloned().map(&build).collect()),
        other => Some(vec![build(other.text())]),
    }
}

fn convert_list(block: &Block, kind: ListKind) -> Option<Vec<Block>> {
    match block {
        Block::Unsupported { .. } => None,
        Block::List { kind: current, items } if *current == kind => {
            Some(items.iter().cloned().map(paragraph_from_text).collect())
        }
        Block::List { items, .. } => Some(vec![Block::list(kind, items.clone())]),
        other => Some(vec![Block::list(kind, vec![other.text()])]),
    }
}

fn paragraph_from_text(text: String) -> Block {
    Block::paragraph(vec![Run::plain(text)])
}
