// file: src/models/document.rs
// description: persisted document record with identity, timestamps and cached word count
// reference: internal data structures

use crate::editor::metrics::count_metrics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Creation timestamp in milliseconds, unique within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub i64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(DocumentId)
            .map_err(|e| format!("invalid document id '{}': {}", s, e))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub word_count: usize,
}

impl Document {
    pub fn new(id: DocumentId, title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let now = Utc::now();
        let word_count = count_metrics(&content).words;

        Self {
            id,
            title: title.into(),
            content,
            created_at: now,
            updated_at: now,
            word_count,
        }
    }

    pub fn set_content(&mut self, content: String) {
        self.word_count = count_metrics(&content).words;
        self.content = content;
        self.touch();
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }

    /// Restores `updatedAt >= createdAt` and the cached word count on records
    /// loaded from storage.
    pub fn repair(&mut self) -> bool {
        let mut repaired = false;

        if self.updated_at < self.created_at {
            self.updated_at = self.created_at;
            repaired = true;
        }

        let words = count_metrics(&self.content).words;
        if self.word_count != words {
            self.word_count = words;
            repaired = true;
        }

        repaired
    }

    /// Sidebar-style relative date for the last update.
    pub fn updated_label(&self, now: DateTime<Utc>) -> String {
        let hours = (now - self.updated_at).num_minutes() as f64 / 60.0;

        if hours < 24.0 {
            "Today".to_string()
        } else if hours < 48.0 {
            "Yesterday".to_string()
        } else {
            self.updated_at.format("%b %-d").to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_document_creation() {
        let doc = Document::new(DocumentId(1), "Notes", "<p>Hello world</p>");

        assert_eq!(doc.title, "Notes");
        assert_eq!(doc.word_count, 2);
        assert!(doc.updated_at >= doc.created_at);
    }

    #[test]
    fn test_set_content_recounts_words() {
        let mut doc = Document::new(DocumentId(1), "Notes", "<p><br></p>");
        assert_eq!(doc.word_count, 0);

        doc.set_content("<p>one two three</p>".to_string());
        assert_eq!(doc.word_count, 3);
        assert!(doc.updated_at >= doc.created_at);
    }

    #[test]
    fn test_serialized_field_names() {
        let doc = Document::new(DocumentId(1700000000000), "T", "<p>x</p>");
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["id"], 1700000000000i64);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["wordCount"], 1);
    }

    #[test]
    fn test_parses_browser_timestamps() {
        let json = r#"{"id":1,"title":"t","content":"<p>a b</p>","createdAt":"2024-03-05T10:00:00.000Z","updatedAt":"2024-03-05T11:00:00.000Z","wordCount":2}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.created_at, Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_repair_fixes_inverted_timestamps() {
        let mut doc = Document::new(DocumentId(1), "t", "<p>a</p>");
        doc.updated_at = doc.created_at - Duration::hours(1);
        doc.word_count = 40;

        assert!(doc.repair());
        assert_eq!(doc.updated_at, doc.created_at);
        assert_eq!(doc.word_count, 1);
    }

    #[test]
    fn test_updated_label() {
        let mut doc = Document::new(DocumentId(1), "t", "");
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();

        doc.updated_at = now - Duration::hours(2);
        assert_eq!(doc.updated_label(now), "Today");

        doc.updated_at = now - Duration::hours(30);
        assert_eq!(doc.updated_label(now), "Yesterday");

        doc.updated_at = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();
        assert_eq!(doc.updated_label(now), "Mar 5");
    }

    #[test]
    fn test_document_id_parse() {
        assert_eq!("42".parse::<DocumentId>().unwrap(), DocumentId(42));
        assert!("abc".parse::<DocumentId>().is_err());
    }
}
