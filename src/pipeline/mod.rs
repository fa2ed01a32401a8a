// file: src/pipeline/mod.rs
// description: editor session, batch import and progress reporting
// reference: pipeline orchestration

pub mod batch;
pub mod notification;
pub mod progress;
pub mod session;

pub use batch::{BatchImporter, ScannedDocx};
pub use notification::{Notification, NotificationLevel};
pub use progress::{ImportStats, ProgressTracker};
pub use session::EditorSession;
