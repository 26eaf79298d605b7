//! Application state shared across all handlers.

use crate::intercept::WatchRule;
use crate::upstream::Upstream;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;
use turnstile_core::TrimSettings;
use turnstile_session::{StatusReporter, ViewerState};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<RwLock<TrimSettings>>,
    pub viewer: Arc<Mutex<ViewerState>>,
    pub reporter: StatusReporter,
    pub upstream: Arc<dyn Upstream>,
    pub watch: WatchRule,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(upstream: Arc<dyn Upstream>, settings: TrimSettings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings.normalized())),
            viewer: Arc::new(Mutex::new(ViewerState::new())),
            reporter: StatusReporter::new(),
            upstream,
            watch: WatchRule::default(),
            start_time: Instant::now(),
        }
    }

    /// Settings are read once per interception and used consistently
    /// for that whole call.
    pub fn settings_snapshot(&self) -> TrimSettings {
        self.settings.read().unwrap().clone()
    }

    pub fn update_settings(&self, settings: TrimSettings) -> TrimSettings {
        let normalized = settings.normalized();
        *self.settings.write().unwrap() = normalized.clone();
        normalized
    }
}
