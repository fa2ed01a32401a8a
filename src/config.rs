// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{EditorError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub editor: EditorConfig,
    pub export: ExportConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EditorConfig {
    pub autosave_debounce_ms: u64,
    pub default_title: String,
    pub welcome_title: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub sanitize_file_names: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    pub parallel_workers: usize,
    pub max_file_size_mb: usize,
}

impl EditorConfig {
    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("WRITEFLOW")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| EditorError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| EditorError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: PathBuf::from("./data"),
                storage_key: "documents".to_string(),
            },
            editor: EditorConfig {
                autosave_debounce_ms: 500,
                default_title: "Untitled Document".to_string(),
                welcome_title: "Welcome to WriteFlow".to_string(),
            },
            export: ExportConfig {
                output_dir: PathBuf::from("./exports"),
                sanitize_file_names: true,
            },
            import: ImportConfig {
                parallel_workers: 4,
                max_file_size_mb: 20,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.storage.storage_key.trim().is_empty() {
            return Err(EditorError::Config(
                "storage_key must not be empty".to_string(),
            ));
        }

        if self.editor.autosave_debounce_ms == 0 {
            return Err(EditorError::Config(
                "autosave_debounce_ms must be greater than 0".to_string(),
            ));
        }

        if self.import.parallel_workers == 0 {
            return Err(EditorError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.import.max_file_size_mb == 0 {
            return Err(EditorError::Config(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
