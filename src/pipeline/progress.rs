// file: src/pipeline/progress.rs
// description: progress bar and counters for batch imports
// reference: https://docs.rs/indicatif

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Outcome of one batch import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportStats {
    pub files_imported: usize,
    pub files_failed: usize,
    pub words_imported: usize,
    pub bytes_read: u64,
    pub elapsed: Duration,
}

impl ImportStats {
    pub fn success_rate(&self) -> f64 {
        let attempted = self.files_imported + self.files_failed;
        if attempted == 0 {
            return 0.0;
        }
        self.files_imported as f64 * 100.0 / attempted as f64
    }

    pub fn summary(&self) -> String {
        format!(
            "Imported {} files ({} failed, {} words, {} KB) in {:.1}s, {:.1}% success",
            self.files_imported,
            self.files_failed,
            self.words_imported,
            self.bytes_read / 1024,
            self.elapsed.as_secs_f64(),
            self.success_rate()
        )
    }
}

/// Shared between concurrent conversions; every counter is atomic.
pub struct ProgressTracker {
    bar: ProgressBar,
    imported: AtomicUsize,
    failed: AtomicUsize,
    words: AtomicUsize,
    bytes: AtomicU64,
    started: Instant,
}

impl ProgressTracker {
    pub fn with_color(total_files: usize, colored: bool) -> Self {
        let bar = ProgressBar::new(total_files as u64);
        let template = if colored {
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}"
        } else {
            "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template(template)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Self::from_bar(bar)
    }

    /// Counts without drawing.
    pub fn hidden(total_files: usize) -> Self {
        Self::from_bar(ProgressBar::with_draw_target(
            Some(total_files as u64),
            ProgressDrawTarget::hidden(),
        ))
    }

    fn from_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            imported: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            words: AtomicUsize::new(0),
            bytes: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    pub fn inc_files_imported(&self, words: usize) {
        self.imported.fetch_add(1, Ordering::SeqCst);
        self.words.fetch_add(words, Ordering::SeqCst);
        self.bar.inc(1);
    }

    pub fn inc_files_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
        self.bar.inc(1);
    }

    pub fn add_bytes_read(&self, bytes: u64) {
        self.bytes.fetch_add(bytes, Ordering::SeqCst);
    }

    pub fn set_message(&self, message: String) {
        self.bar.set_message(message);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> ImportStats {
        ImportStats {
            files_imported: self.imported.load(Ordering::SeqCst),
            files_failed: self.failed.load(Ordering::SeqCst),
            words_imported: self.words.load(Ordering::SeqCst),
            bytes_read: self.bytes.load(Ordering::SeqCst),
            elapsed: self.started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        let stats = ImportStats {
            files_imported: 9,
            files_failed: 1,
            ..ImportStats::default()
        };
        assert!((stats.success_rate() - 90.0).abs() < 0.01);
        assert_eq!(ImportStats::default().success_rate(), 0.0);
    }

    #[test]
    fn test_tracker_counts() {
        let tracker = ProgressTracker::hidden(3);

        tracker.inc_files_imported(12);
        tracker.inc_files_imported(3);
        tracker.inc_files_failed();
        tracker.add_bytes_read(2048);

        let stats = tracker.get_stats();
        assert_eq!(stats.files_imported, 2);
        assert_eq!(stats.files_failed, 1);
        assert_eq!(stats.words_imported, 15);
        assert_eq!(stats.bytes_read, 2048);
        assert!(stats.summary().starts_with("Imported 2 files (1 failed, 15 words, 2 KB)"));
    }
}
