// file: src/store/documents.rs
// description: document collection with display order, active selection and persistence
// reference: internal data structures

use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::importer::{EMPTY_CONTENT, ImportedDocument};
use crate::models::{Document, DocumentId};
use crate::store::storage::KeyValueStore;
use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub const WELCOME_CONTENT: &str = "<h1>Welcome to WriteFlow</h1><p>A minimal, beautiful writing experience.</p><p><br></p><p>Start typing to create your masterpiece...</p>";

/// Owns every [`Document`]. Newest documents come first, and whenever the
/// collection is non-empty exactly one of them is current.
pub struct DocumentStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
    default_title: String,
    documents: Vec<Document>,
    current: Option<DocumentId>,
}

impl DocumentStore {
    /// Loads the snapshot under `key`. An absent or unreadable snapshot is
    /// replaced by a single welcome document, which is persisted right away.
    pub fn open(
        backend: Box<dyn KeyValueStore>,
        key: impl Into<String>,
        editor: &EditorConfig,
    ) -> Result<Self> {
        let key = key.into();

        let loaded = match backend.load(&key)? {
            None => {
                info!("No saved documents under '{}', creating welcome document", key);
                None
            }
            Some(raw) => match parse_snapshot(&raw) {
                Ok(documents) => Some(documents),
                Err(e) => {
                    warn!("{}, falling back to welcome document", e);
                    None
                }
            },
        };

        let seeded = loaded.is_none();
        let documents = loaded.unwrap_or_else(|| {
            vec![Document::new(
                DocumentId(Utc::now().timestamp_millis()),
                editor.welcome_title.as_str(),
                WELCOME_CONTENT,
            )]
        });

        let store = Self {
            backend,
            key,
            default_title: editor.default_title.clone(),
            current: documents.first().map(|doc| doc.id),
            documents,
        };

        if seeded {
            store.persist()?;
        }

        info!("Opened store with {} documents", store.documents.len());
        Ok(store)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    pub fn current_id(&self) -> Option<DocumentId> {
        self.current
    }

    pub fn current(&self) -> Option<&Document> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn select(&mut self, id: DocumentId) -> Result<()> {
        if self.get(id).is_none() {
            return Err(EditorError::Validation(format!("No document with id {}", id)));
        }
        self.current = Some(id);
        Ok(())
    }

    /// Adds a document at the top, makes it current and persists.
    pub fn create(&mut self, title: &str, content: &str) -> Result<DocumentId> {
        let document = Document::new(self.next_id(), title, content);
        let id = document.id;

        let mut documents = Vec::with_capacity(self.documents.len() + 1);
        documents.push(document);
        documents.extend(self.documents.iter().cloned());
        self.commit(documents, Some(id))?;

        debug!("Created document {} '{}'", id, title);
        Ok(id)
    }

    pub fn create_untitled(&mut self) -> Result<DocumentId> {
        let title = self.default_title.clone();
        self.create(&title, EMPTY_CONTENT)
    }

    pub fn insert_imported(&mut self, imported: &ImportedDocument) -> Result<DocumentId> {
        self.create(&imported.title, &imported.content)
    }

    /// Removes `id`. If it was current, the first remaining document becomes
    /// current.
    pub fn delete(&mut self, id: DocumentId) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let documents: Vec<Document> = self
            .documents
            .iter()
            .filter(|doc| doc.id != id)
            .cloned()
            .collect();

        let current = if self.current == Some(id) {
            documents.first().map(|doc| doc.id)
        } else {
            self.current
        };

        self.commit(documents, current)?;
        debug!("Deleted document {}, current is now {:?}", id, self.current);
        Ok(true)
    }

    /// Updates the current document in memory only. Returns false when no
    /// document is current.
    pub fn stage_content(&mut self, content: String) -> bool {
        match self.current_mut() {
            Some(document) => {
                document.set_content(content);
                true
            }
            None => false,
        }
    }

    /// Titles persist immediately.
    pub fn rename_current(&mut self, title: &str) -> Result<bool> {
        let Some(id) = self.current else {
            return Ok(false);
        };

        let mut documents = self.documents.clone();
        if let Some(document) = documents.iter_mut().find(|doc| doc.id == id) {
            document.set_title(title.to_string());
        }

        self.commit(documents, Some(id))?;
        Ok(true)
    }

    pub fn persist(&self) -> Result<()> {
        self.save_snapshot(&self.documents)
    }

    /// Saves `documents` first and only then adopts them, so a failed save
    /// leaves the store as it was.
    fn commit(&mut self, documents: Vec<Document>, current: Option<DocumentId>) -> Result<()> {
        self.save_snapshot(&documents)?;
        self.documents = documents;
        self.current = current;
        Ok(())
    }

    fn save_snapshot(&self, documents: &[Document]) -> Result<()> {
        let snapshot = serde_json::to_string(documents)?;
        self.backend.save(&self.key, &snapshot)?;
        debug!("Persisted {} documents", documents.len());
        Ok(())
    }

    /// Millisecond timestamp, bumped past the largest existing id on collision.
    fn next_id(&self) -> DocumentId {
        let now = Utc::now().timestamp_millis();
        let max = self.documents.iter().map(|doc| doc.id.0).max();

        match max {
            Some(max) if max >= now => DocumentId(max + 1),
            _ => DocumentId(now),
        }
    }

    fn current_mut(&mut self) -> Option<&mut Document> {
        let id = self.current?;
        self.documents.iter_mut().find(|doc| doc.id == id)
    }
}

fn parse_snapshot(raw: &str) -> Result<Vec<Document>> {
    let documents: Vec<Document> = serde_json::from_str(raw)
        .map_err(|e| EditorError::PersistedStateCorrupt(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(documents.len());

    for mut document in documents {
        if !seen.insert(document.id) {
            warn!("Dropping duplicate document id {}", document.id);
            continue;
        }
        if document.repair() {
            debug!("Repaired stored fields of document {}", document.id);
        }
        kept.push(document);
    }

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::storage::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    const KEY: &str = "documents";

    fn open(backend: &MemoryStore) -> DocumentStore {
        DocumentStore::open(
            Box::new(backend.clone()),
            KEY,
            &Config::default_config().editor,
        )
        .unwrap()
    }

    fn store_with(titles: &[&str]) -> DocumentStore {
        let mut store = open(&MemoryStore::with_entry(KEY, "[]"));
        for title in titles.iter().rev() {
            store.create(title, "<p>x</p>").unwrap();
        }
        store
    }

    fn titles(store: &DocumentStore) -> Vec<&str> {
        store.documents().iter().map(|d| d.title.as_str()).collect()
    }

    #[test]
    fn test_absent_state_seeds_welcome_document() {
        let backend = MemoryStore::new();
        let store = open(&backend);

        assert_eq!(titles(&store), vec!["Welcome to WriteFlow"]);
        assert_eq!(store.current().unwrap().content, WELCOME_CONTENT);
        assert_eq!(backend.writes(), 1);
    }

    #[test]
    fn test_corrupt_state_seeds_welcome_document() {
        let backend = MemoryStore::with_entry(KEY, "{not json");
        let store = open(&backend);

        assert_eq!(store.len(), 1);
        assert_eq!(store.current_id(), Some(store.documents()[0].id));
        assert!(backend.load(KEY).unwrap().unwrap().starts_with('['));
    }

    #[test]
    fn test_saved_state_reloads_in_order() {
        let backend = MemoryStore::with_entry(KEY, "[]");
        {
            let mut store = open(&backend);
            store.create("First", "<p>a</p>").unwrap();
            store.create("Second", "<p>b c</p>").unwrap();
        }

        let store = open(&backend);
        assert_eq!(titles(&store), vec!["Second", "First"]);
        assert_eq!(store.current().unwrap().title, "Second");
        assert_eq!(store.documents()[0].word_count, 2);
    }

    #[test]
    fn test_empty_saved_list_stays_empty() {
        let store = open(&MemoryStore::with_entry(KEY, "[]"));
        assert!(store.is_empty());
        assert!(store.current().is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let store = store_with(&["a", "b", "c"]);
        let ids: HashSet<_> = store.documents().iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_delete_current_selects_first_remaining() {
        let mut store = store_with(&["a", "b", "c"]);
        let b = store.documents()[1].id;
        store.select(b).unwrap();

        assert!(store.delete(b).unwrap());
        assert_eq!(store.current().unwrap().title, "a");
    }

    #[test]
    fn test_delete_current_first_selects_next() {
        let mut store = store_with(&["a", "b"]);
        let a = store.documents()[0].id;
        store.select(a).unwrap();

        store.delete(a).unwrap();
        assert_eq!(store.current().unwrap().title, "b");
    }

    #[test]
    fn test_delete_non_current_keeps_selection() {
        let mut store = store_with(&["a", "b", "c"]);
        let current = store.current_id();
        let c = store.documents()[2].id;

        store.delete(c).unwrap();
        assert_eq!(store.current_id(), current);
        assert!(!store.delete(c).unwrap());
    }

    #[test]
    fn test_delete_only_document_clears_current() {
        let mut store = store_with(&["only"]);
        let id = store.documents()[0].id;

        store.delete(id).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.current_id(), None);
    }

    #[test]
    fn test_stage_content_without_current_is_noop() {
        let backend = MemoryStore::with_entry(KEY, "[]");
        let mut store = open(&backend);

        assert!(!store.stage_content("<p>lost</p>".to_string()));
        assert!(!store.rename_current("Nothing").unwrap());
        assert_eq!(backend.writes(), 0);
    }

    #[test]
    fn test_stage_content_does_not_persist() {
        let backend = MemoryStore::with_entry(KEY, "[]");
        let mut store = open(&backend);
        store.create_untitled().unwrap();
        let writes = backend.writes();

        assert!(store.stage_content("<p>one two</p>".to_string()));
        assert_eq!(store.current().unwrap().word_count, 2);
        assert_eq!(backend.writes(), writes);

        assert!(store.rename_current("Renamed").unwrap());
        assert_eq!(backend.writes(), writes + 1);
        assert_eq!(store.current().unwrap().title, "Renamed");
    }

    #[test]
    fn test_select_unknown_id_fails() {
        let mut store = store_with(&["a"]);
        assert!(store.select(DocumentId(-1)).is_err());
    }

    /// Loads normally but refuses every save once `broken` is set.
    #[derive(Clone, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        broken: Arc<AtomicBool>,
    }

    impl KeyValueStore for FlakyStore {
        fn load(&self, key: &str) -> Result<Option<String>> {
            self.inner.load(key)
        }

        fn save(&self, key: &str, value: &str) -> Result<()> {
            if self.broken.load(Ordering::SeqCst) {
                return Err(EditorError::Storage("disk full".to_string()));
            }
            self.inner.save(key, value)
        }
    }

    #[test]
    fn test_failed_save_leaves_store_unchanged() {
        let backend = FlakyStore::default();
        let mut store =
            DocumentStore::open(Box::new(backend.clone()), KEY, &Config::default_config().editor)
                .unwrap();
        store.create("kept", "<p>x</p>").unwrap();
        let before = store.documents().to_vec();
        let current = store.current_id();
        backend.broken.store(true, Ordering::SeqCst);

        assert!(store.create("ghost", "<p>y</p>").is_err());
        assert!(store.delete(before[1].id).is_err());
        assert!(store.rename_current("renamed").is_err());

        assert_eq!(store.documents(), before.as_slice());
        assert_eq!(store.current_id(), current);
        assert_eq!(store.current().unwrap().title, "kept");
    }

    #[test]
    fn test_duplicate_ids_dropped_on_load() {
        let doc = Document::new(DocumentId(7), "Dup", "<p>x</p>");
        let raw = serde_json::to_string(&vec![doc.clone(), doc]).unwrap();
        let store = open(&MemoryStore::with_entry(KEY, &raw));
        assert_eq!(store.len(), 1);
    }
}
