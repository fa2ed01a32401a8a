// file: src/pipeline/batch.rs
// description: imports every .docx file under a directory with bounded concurrency
// reference: https://docs.rs/walkdir, https://docs.rs/futures

use crate::config::ImportConfig;
use crate::error::{EditorError, Result};
use crate::importer::{DocxImporter, ImportedDocument};
use crate::pipeline::progress::{ImportStats, ProgressTracker};
use crate::store::DocumentStore;
use crate::utils::validation::Validator;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq)]
pub struct ScannedDocx {
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
}

#[derive(Clone)]
pub struct BatchImporter {
    importer: DocxImporter,
    parallel_workers: usize,
    max_file_size: u64,
}

impl BatchImporter {
    pub fn new(config: &ImportConfig) -> Self {
        Self {
            importer: DocxImporter::new(),
            parallel_workers: config.parallel_workers.max(1),
            max_file_size: (config.max_file_size_mb as u64) * 1024 * 1024,
        }
    }

    /// Finds `.docx` files under `root`, skipping Word lock files (`~$`) and
    /// anything over the size limit. Sorted by relative path.
    pub fn scan_directory(&self, root: &Path) -> Result<Vec<ScannedDocx>> {
        Validator::validate_directory(root)?;
        info!("Scanning directory: {}", root.display());

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let is_lock_file = entry.file_name().to_string_lossy().starts_with("~$");
            if is_lock_file || Validator::validate_docx_extension(path).is_err() {
                continue;
            }

            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if metadata.len() > self.max_file_size {
                debug!(
                    "Skipping large file ({} MB): {}",
                    metadata.len() / 1024 / 1024,
                    path.display()
                );
                continue;
            }

            let relative_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();

            files.push(ScannedDocx {
                path: path.to_path_buf(),
                relative_path,
                size: metadata.len(),
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        info!("Found {} docx files", files.len());
        Ok(files)
    }

    /// Converts the files concurrently, then commits the successes to the
    /// store in scan order. A failed file never produces a document.
    pub async fn import_directory(
        &self,
        root: &Path,
        store: &Arc<Mutex<DocumentStore>>,
        progress: Arc<ProgressTracker>,
    ) -> Result<ImportStats> {
        let scan_root = root.to_path_buf();
        let scanner = self.clone();
        let files = tokio::task::spawn_blocking(move || scanner.scan_directory(&scan_root))
            .await
            .map_err(|e| EditorError::Task(format!("File scanning task failed: {}", e)))??;

        if files.is_empty() {
            warn!("No docx files found under {}", root.display());
            return Ok(progress.get_stats());
        }

        let tasks = files.into_iter().enumerate().map(|(index, file)| {
            let importer = self.importer.clone();
            let progress = Arc::clone(&progress);

            async move {
                progress.set_message(format!("Converting {}", file.relative_path));

                match importer.import_file(&file.path).await {
                    Ok(imported) => {
                        progress.add_bytes_read(file.size);
                        Some((index, imported))
                    }
                    Err(e) => {
                        progress.inc_files_failed();
                        warn!("Failed to import {}: {}", file.relative_path, e);
                        None
                    }
                }
            }
        });

        let mut converted: Vec<(usize, ImportedDocument)> = stream::iter(tasks)
            .buffer_unordered(self.parallel_workers)
            .filter_map(|result| async move { result })
            .collect()
            .await;
        converted.sort_by_key(|(index, _)| *index);

        let mut store = store.lock().await;
        for (_, imported) in converted {
            match store.insert_imported(&imported) {
                Ok(_) => progress.inc_files_imported(imported.metrics.words),
                Err(e) => {
                    progress.inc_files_failed();
                    warn!("Failed to save imported '{}': {}", imported.title, e);
                }
            }
        }

        progress.set_message("Import complete".to_string());
        let stats = progress.get_stats();
        info!(
            "Imported {} files ({} failed, {} words)",
            stats.files_imported, stats.files_failed, stats.words_imported
        );
        Ok(stats)
    }
}
