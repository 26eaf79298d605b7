//! Per-viewer runtime state and status reporting for Turnstile.

pub mod status;
pub mod viewer;

pub use status::{StatusFeed, StatusReporter, StatusStore, StoredStatus, TrimStatus};
pub use viewer::{PerformanceWarning, ViewerState};
