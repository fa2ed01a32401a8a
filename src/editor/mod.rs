// file: src/editor/mod.rs
// description: editing surface, formatting commands and text metrics
// reference: internal module structure

pub mod commands;
pub mod metrics;
pub mod surface;

pub use commands::{FormatCommand, Selection, apply_command};
pub use metrics::{TextMetrics, count_metrics};
pub use surface::Surface;
