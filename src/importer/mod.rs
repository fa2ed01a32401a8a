// file: src/importer/mod.rs
// description: docx import through an html conversion boundary
// reference: internal module structure

pub mod converter;
pub mod docx;

pub use converter::{HtmlConverter, OoxmlHtmlConverter};
pub use docx::{DocxImporter, EMPTY_CONTENT, ImportedDocument, title_from_path};
