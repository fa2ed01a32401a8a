// file: src/models/docx.rs
// description: paragraph and run structures handed to the docx packager
// reference: wordprocessingml paragraph/run model

use crate::models::markup::{HeadingLevel, ListKind};
use serde::Serialize;

/// Left indent applied to quote paragraphs, in twentieths of a point.
pub const QUOTE_INDENT_TWIPS: i32 = 720;

/// Reference shared by every numbered list entry.
pub const DEFAULT_NUMBERING: &str = "default-numbering";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParagraphKind {
    Normal,
    Heading(HeadingLevel),
    Bullet { level: usize },
    Numbered { reference: String, level: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocxRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl DocxRun {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            underline: false,
        }
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocxParagraph {
    pub kind: ParagraphKind,
    pub runs: Vec<DocxRun>,
    pub indent_left: Option<i32>,
}

impl DocxParagraph {
    pub fn new(kind: ParagraphKind, runs: Vec<DocxRun>) -> Self {
        Self {
            kind,
            runs,
            indent_left: None,
        }
    }

    /// A normal paragraph holding one empty run.
    pub fn empty() -> Self {
        Self::new(ParagraphKind::Normal, vec![DocxRun::text("")])
    }

    pub fn with_indent(mut self, twips: i32) -> Self {
        self.indent_left = Some(twips);
        self
    }

    pub fn list_entry(kind: ListKind, text: impl Into<String>) -> Self {
        let kind = match kind {
            ListKind::Bullet => ParagraphKind::Bullet { level: 0 },
            ListKind::Numbered => ParagraphKind::Numbered {
                reference: DEFAULT_NUMBERING.to_string(),
                level: 0,
            },
        };
        Self::new(kind, vec![DocxRun::text(text)])
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}
