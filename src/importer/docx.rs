// file: src/importer/docx.rs
// description: turns converted docx html into a markup tree and a new document draft
// reference: internal data structures

use crate::editor::metrics::{TextMetrics, count_metrics};
use crate::error::{EditorError, Result};
use crate::importer::converter::{HtmlConverter, OoxmlHtmlConverter};
use crate::models::MarkupTree;
use crate::parser::{MarkupParser, MarkupSerializer};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const EMPTY_CONTENT: &str = "<p><br></p>";

/// Everything needed to create a document from an imported file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDocument {
    pub title: String,
    pub content: String,
    pub tree: MarkupTree,
    pub metrics: TextMetrics,
}

#[derive(Clone)]
pub struct DocxImporter {
    converter: Arc<dyn HtmlConverter>,
}

impl DocxImporter {
    pub fn new() -> Self {
        Self::with_converter(Arc::new(OoxmlHtmlConverter::new()))
    }

    pub fn with_converter(converter: Arc<dyn HtmlConverter>) -> Self {
        Self { converter }
    }

    /// Maps converter html onto the tree. Headings below h2, tables and any
    /// other unknown element survive only as unsupported blocks.
    pub fn import_html(&self, html: &str) -> MarkupTree {
        let tree = MarkupParser::new().parse(html);

        let unsupported = tree.unsupported_count();
        if unsupported > 0 {
            warn!(
                "{} block(s) have no editor equivalent and are kept as raw markup",
                unsupported
            );
        }

        tree
    }

    pub fn import_bytes(&self, title: &str, bytes: &[u8]) -> Result<ImportedDocument> {
        let html = self.converter.convert(bytes)?;
        debug!("Converted '{}' into {} bytes of html", title, html.len());

        let tree = self.import_html(&html);
        let content = if tree.is_empty() {
            EMPTY_CONTENT.to_string()
        } else {
            MarkupSerializer::new().serialize(&tree)
        };
        let metrics = count_metrics(&content);

        Ok(ImportedDocument {
            title: title.to_string(),
            content,
            tree,
            metrics,
        })
    }

    /// Reads and converts on the blocking pool. The title is the file name
    /// without its extension.
    pub async fn import_file(&self, path: &Path) -> Result<ImportedDocument> {
        let title = title_from_path(path)?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| EditorError::file_operation(path, e))?;

        info!("Importing {} ({} bytes)", path.display(), bytes.len());

        let importer = self.clone();
        tokio::task::spawn_blocking(move || importer.import_bytes(&title, &bytes))
            .await
            .map_err(|e| EditorError::Task(format!("DOCX import task failed: {}", e)))?
    }
}

impl Default for DocxImporter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn title_from_path(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            EditorError::Validation(format!("Cannot derive a title from {}", path.display()))
        })
}
