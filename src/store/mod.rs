// file: src/store/mod.rs
// description: document store, storage backends and debounced autosave
// reference: internal module structure

pub mod autosave;
pub mod documents;
pub mod storage;

pub use autosave::AutoSaver;
pub use documents::{DocumentStore, WELCOME_CONTENT};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
