// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod docx;
pub mod markup;

pub use document::{Document, DocumentId};
pub use docx::{DocxParagraph, DocxRun, ParagraphKind};
pub use markup::{Block, HeadingLevel, ListKind, MarkupTree, Run};
