// file: src/store/autosave.rs
// description: debounced persistence of staged document content
// reference: https://docs.rs/tokio

use crate::store::documents::DocumentStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Persists the store once edits have been quiet for `delay`. Every new
/// [`AutoSaver::schedule`] aborts the pending save, so a stale snapshot can
/// never land after a newer one.
pub struct AutoSaver {
    store: Arc<Mutex<DocumentStore>>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl AutoSaver {
    pub fn new(store: Arc<Mutex<DocumentStore>>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            pending: None,
        }
    }

    pub fn schedule(&mut self) {
        self.cancel();

        let store = Arc::clone(&self.store);
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let store = store.lock().await;
            match store.persist() {
                Ok(()) => debug!("Autosaved after {:?} of inactivity", delay),
                Err(e) => error!("Autosave failed: {}", e),
            }
        }));
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Runs a pending save now instead of waiting out the delay.
    pub async fn flush(&mut self) -> crate::error::Result<()> {
        if !self.is_pending() {
            self.pending = None;
            return Ok(());
        }

        self.cancel();
        self.store.lock().await.persist()
    }
}

impl Drop for AutoSaver {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::storage::{KeyValueStore, MemoryStore};

    const KEY: &str = "documents";

    fn shared_store(backend: &MemoryStore) -> Arc<Mutex<DocumentStore>> {
        let mut store = DocumentStore::open(
            Box::new(backend.clone()),
            KEY,
            &Config::default_config().editor,
        )
        .unwrap();
        store.create_untitled().unwrap();
        Arc::new(Mutex::new(store))
    }

    async fn edit(store: &Arc<Mutex<DocumentStore>>, saver: &mut AutoSaver, content: &str) {
        store.lock().await.stage_content(content.to_string());
        saver.schedule();
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_edits_persists_once_with_last_content() {
        let backend = MemoryStore::with_entry(KEY, "[]");
        let store = shared_store(&backend);
        let mut saver = AutoSaver::new(Arc::clone(&store), Duration::from_millis(500));
        let baseline = backend.writes();

        edit(&store, &mut saver, "<p>one</p>").await;
        tokio::time::sleep(Duration::from_millis(200)).await;
        edit(&store, &mut saver, "<p>one two</p>").await;
        tokio::time::sleep(Duration::from_millis(200)).await;
        edit(&store, &mut saver, "<p>one two three</p>").await;
        assert_eq!(backend.writes(), baseline);

        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(backend.writes(), baseline + 1);
        let saved = backend.load(KEY).unwrap().unwrap();
        assert!(saved.contains("<p>one two three</p>"));
        assert!(!saver.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_saves_immediately() {
        let backend = MemoryStore::with_entry(KEY, "[]");
        let store = shared_store(&backend);
        let mut saver = AutoSaver::new(Arc::clone(&store), Duration::from_millis(500));
        let baseline = backend.writes();

        edit(&store, &mut saver, "<p>draft</p>").await;
        saver.flush().await.unwrap();
        assert_eq!(backend.writes(), baseline + 1);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(backend.writes(), baseline + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_save() {
        let backend = MemoryStore::with_entry(KEY, "[]");
        let store = shared_store(&backend);
        let mut saver = AutoSaver::new(Arc::clone(&store), Duration::from_millis(500));
        let baseline = backend.writes();

        edit(&store, &mut saver, "<p>draft</p>").await;
        assert!(saver.is_pending());
        saver.cancel();

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(backend.writes(), baseline);
        saver.flush().await.unwrap();
        assert_eq!(backend.writes(), baseline);
    }
}
