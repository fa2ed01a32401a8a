// file: src/pipeline/session.rs
// description: editor session wiring the store, autosave, import and export together
// reference: application orchestration

use crate::config::Config;
use crate::editor::{FormatCommand, Selection, Surface};
use crate::error::{EditorError, Result};
use crate::exporter::{DocumentExporter, ExportFormat};
use crate::importer::{DocxImporter, EMPTY_CONTENT};
use crate::models::DocumentId;
use crate::pipeline::notification::Notification;
use crate::store::{AutoSaver, DocumentStore, FileStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

pub struct EditorSession {
    store: Arc<Mutex<DocumentStore>>,
    autosaver: AutoSaver,
    importer: DocxImporter,
    exporter: DocumentExporter,
    export_dir: PathBuf,
}

impl EditorSession {
    pub fn new(store: DocumentStore, config: &Config) -> Self {
        let store = Arc::new(Mutex::new(store));
        let autosaver = AutoSaver::new(Arc::clone(&store), config.editor.autosave_debounce());

        Self {
            store,
            autosaver,
            importer: DocxImporter::new(),
            exporter: DocumentExporter::new(config.export.sanitize_file_names),
            export_dir: config.export.output_dir.clone(),
        }
    }

    /// Opens the file-backed store from `config.storage`.
    pub fn open(config: &Config) -> Result<Self> {
        let backend = FileStore::new(&config.storage.data_dir)?;
        let store = DocumentStore::open(
            Box::new(backend),
            config.storage.storage_key.as_str(),
            &config.editor,
        )?;
        Ok(Self::new(store, config))
    }

    pub fn store(&self) -> Arc<Mutex<DocumentStore>> {
        Arc::clone(&self.store)
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// Stages the new content and (re)starts the autosave timer. Without a
    /// current document nothing happens.
    pub async fn change_content(&mut self, content: String) -> bool {
        let staged = self.store.lock().await.stage_content(content);
        if staged {
            self.autosaver.schedule();
        }
        staged
    }

    pub async fn change_title(&mut self, title: &str) -> Result<bool> {
        self.store.lock().await.rename_current(title)
    }

    pub async fn select(&mut self, id: DocumentId) -> Result<()> {
        self.autosaver.flush().await?;
        self.store.lock().await.select(id)
    }

    /// Creates an empty document, titled from config unless `title` is given.
    pub async fn new_document(&mut self, title: Option<&str>) -> Notification {
        let mut store = self.store.lock().await;
        let created = match title {
            Some(title) => store.create(title, EMPTY_CONTENT),
            None => store.create_untitled(),
        };

        match created {
            Ok(id) => {
                info!("Created document {}", id);
                Notification::success("New document created")
            }
            Err(e) => {
                error!("Failed to create document: {}", e);
                Notification::error("Failed to create document")
            }
        }
    }

    pub async fn delete_document(&mut self, id: DocumentId) -> Notification {
        match self.store.lock().await.delete(id) {
            Ok(true) => Notification::success("Document deleted"),
            Ok(false) => Notification::error(format!("No document with id {}", id)),
            Err(e) => {
                error!("Failed to delete document {}: {}", id, e);
                Notification::error("Failed to delete document")
            }
        }
    }

    /// Runs a formatting command against the current document's content.
    /// Returns whether the content changed.
    pub async fn apply_format(
        &mut self,
        command: FormatCommand,
        selection: Option<Selection>,
    ) -> bool {
        let content = match self.store.lock().await.current() {
            Some(document) => document.content.clone(),
            None => return false,
        };

        let mut surface = Surface::from_markup(&content);
        if let Some(selection) = selection {
            surface.select(selection);
        }

        if !surface.apply(command) {
            return false;
        }
        self.change_content(surface.markup()).await
    }

    /// Converts the file and adds it as the new current document. Nothing is
    /// committed when conversion fails.
    pub async fn import_docx_file(&mut self, path: &Path) -> Result<DocumentId> {
        let imported = self.importer.import_file(path).await?;
        self.store.lock().await.insert_imported(&imported)
    }

    pub async fn import_docx(&mut self, path: &Path) -> Notification {
        match self.import_docx_file(path).await {
            Ok(id) => {
                let store = self.store.lock().await;
                let title = store.get(id).map(|doc| doc.title.clone()).unwrap_or_default();
                Notification::success(format!("Imported: {}", title))
            }
            Err(e) => {
                error!("Import error for {}: {}", path.display(), e);
                Notification::error("Failed to import DOCX file")
            }
        }
    }

    pub async fn export_current(&self, format: ExportFormat) -> Result<PathBuf> {
        let document = self
            .store
            .lock()
            .await
            .current()
            .cloned()
            .ok_or(EditorError::MissingCurrentDocument)?;

        let file = self.exporter.export(&document, format).await?;
        file.write_to(&self.export_dir).await
    }

    pub async fn export(&self, format: ExportFormat) -> Notification {
        match self.export_current(format).await {
            Ok(path) => {
                info!("Exported to {}", path.display());
                Notification::success(format!("Document exported as {}", format))
            }
            Err(EditorError::MissingCurrentDocument) => {
                Notification::error("No document to export")
            }
            Err(e) => {
                error!("Export error: {}", e);
                Notification::error(format!("Failed to export {} file", format))
            }
        }
    }

    /// Writes any pending autosave before the session ends.
    pub async fn flush(&mut self) -> Result<()> {
        self.autosaver.flush().await
    }
}
