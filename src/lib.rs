// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod editor;
pub mod error;
pub mod exporter;
pub mod importer;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod store;
pub mod utils;

pub use config::{Config, EditorConfig, ExportConfig, ImportConfig, StorageConfig};
pub use editor::{FormatCommand, Selection, Surface, TextMetrics, apply_command, count_metrics};
pub use error::{EditorError, Result};
pub use exporter::{
    DocumentExporter, DocxExporter, DocxPackager, ExportFormat, ExportedFile, export_file_name,
};
pub use importer::{DocxImporter, HtmlConverter, ImportedDocument, OoxmlHtmlConverter};
pub use models::{
    Block, Document, DocumentId, DocxParagraph, DocxRun, HeadingLevel, ListKind, MarkupTree,
    ParagraphKind, Run,
};
pub use parser::{MarkupParser, MarkupSerializer};
pub use pipeline::{
    BatchImporter, EditorSession, ImportStats, Notification, NotificationLevel, ProgressTracker,
};
pub use store::{AutoSaver, DocumentStore, FileStore, KeyValueStore, MemoryStore};
pub use utils::Validator;
