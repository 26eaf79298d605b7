//! Status publication to external UI collaborators.
//!
//! Statuses go out on a broadcast feed for collaborators that are
//! already listening, and into a location-keyed store for ones that
//! initialize after the notification fired.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Summary counters published after every successful rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimStatus {
    pub total_messages: usize,
    pub rendered_messages: usize,
    pub extra_messages: u32,
    pub has_older_messages: bool,
}

/// A published status together with where and when it was observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredStatus {
    #[serde(flatten)]
    pub status: TrimStatus,
    pub location: String,
    pub recorded_at: DateTime<Utc>,
}

/// Live fan-out of status updates.
#[derive(Debug, Clone)]
pub struct StatusFeed {
    tx: broadcast::Sender<StoredStatus>,
}

impl StatusFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoredStatus> {
        self.tx.subscribe()
    }

    /// Send to whoever is listening; nobody listening is fine.
    pub fn publish(&self, entry: StoredStatus) {
        let _ = self.tx.send(entry);
    }
}

impl Default for StatusFeed {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Last status per page location.
#[derive(Debug, Clone, Default)]
pub struct StatusStore {
    inner: Arc<RwLock<HashMap<String, StoredStatus>>>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, entry: StoredStatus) {
        self.inner
            .write()
            .unwrap()
            .insert(entry.location.clone(), entry);
    }

    pub fn get(&self, location: &str) -> Option<StoredStatus> {
        self.inner.read().unwrap().get(location).cloned()
    }

    pub fn remove(&self, location: &str) -> Option<StoredStatus> {
        self.inner.write().unwrap().remove(location)
    }

    pub fn clear(&self) {
        self.inner.write().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }
}

/// One-way notification channel plus its recovery mirror.
#[derive(Debug, Clone, Default)]
pub struct StatusReporter {
    pub feed: StatusFeed,
    pub store: StatusStore,
}

impl StatusReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, location: &str, status: TrimStatus) -> StoredStatus {
        let entry = StoredStatus {
            status,
            location: location.to_string(),
            recorded_at: Utc::now(),
        };
        self.store.insert(entry.clone());
        self.feed.publish(entry.clone());
        entry
    }

    pub fn last_for(&self, location: &str) -> Option<StoredStatus> {
        self.store.get(location)
    }
}
