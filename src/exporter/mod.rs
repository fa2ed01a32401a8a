// file: src/exporter/mod.rs
// description: document export to txt, html and docx files
// reference: internal module structure

pub mod docx;
pub mod html;
pub mod packer;
pub mod text;

pub use docx::DocxExporter;
pub use html::HtmlExporter;
pub use packer::DocxPackager;
pub use text::TextExporter;

use crate::error::{EditorError, Result};
use crate::models::Document;
use crate::parser::MarkupParser;
use crate::utils::validation::Validator;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Html,
    Docx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Html => "html",
            Self::Docx => "docx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Txt),
            "html" | "htm" => Ok(Self::Html),
            "docx" | "word" => Ok(Self::Docx),
            other => Err(format!("unknown export format '{}'", other)),
        }
    }
}

/// `{title}.{extension}`, with the title sanitized when `sanitize` is set.
pub fn export_file_name(title: &str, format: ExportFormat, sanitize: bool) -> String {
    let stem = if sanitize {
        Validator::sanitize_file_name(title)
    } else {
        title.to_string()
    };
    format!("{}.{}", stem, format.extension())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    pub async fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| EditorError::file_operation(dir, e))?;

        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)
            .await
            .map_err(|e| EditorError::file_operation(&path, e))?;

        info!("Wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

#[derive(Debug, Clone)]
pub struct DocumentExporter {
    sanitize_file_names: bool,
}

impl DocumentExporter {
    pub fn new(sanitize_file_names: bool) -> Self {
        Self {
            sanitize_file_names,
        }
    }

    pub async fn export(&self, document: &Document, format: ExportFormat) -> Result<ExportedFile> {
        let bytes = match format {
            ExportFormat::Txt => TextExporter::new().export(&document.content).into_bytes(),
            ExportFormat::Html => HtmlExporter::new()
                .export(&document.title, &document.content)
                .into_bytes(),
            ExportFormat::Docx => {
                let tree = MarkupParser::new().parse(&document.content);
                let paragraphs = DocxExporter::new().export(&tree);
                DocxPackager::new().pack_async(paragraphs).await?
            }
        };

        Ok(ExportedFile {
            file_name: export_file_name(&document.title, format, self.sanitize_file_names),
            format,
            bytes,
        })
    }
}
