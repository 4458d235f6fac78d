//! Shared store for the latest rendered view of a session.
//!
//! The session actor writes a fresh `ExecutionView` after every snapshot; the
//! consumer (TUI, plain CLI output) reads it whenever it redraws. Nothing in
//! here is persisted, and the stored view is replaced wholesale rather than
//! patched.

use std::sync::Arc;
use tokio::sync::RwLock;

use super::timeline::{ExecutionSummary, TimelineEntry};

/// Snapshot-derived display state: the execution summary header plus the
/// flattened timeline entries, newest step first.
#[derive(Debug, Clone, Default)]
pub struct ExecutionView {
    pub summary: ExecutionSummary,
    pub entries: Vec<TimelineEntry>,
}

/// Thread-safe holder for the most recent `ExecutionView`.
#[derive(Clone, Default)]
pub struct ViewStore {
    inner: Arc<RwLock<ExecutionView>>,
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored view. Called once per successful snapshot.
    pub async fn set(&self, view: ExecutionView) {
        let mut slot = self.inner.write().await;
        *slot = view;
    }

    /// Read the current view.
    pub async fn get(&self) -> ExecutionView {
        let slot = self.inner.read().await;
        slot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn starts_empty() {
        let store = ViewStore::new();
        let view = store.get().await;

        assert_eq!(view.summary, ExecutionSummary::default());
        assert!(view.entries.is_empty());
    }

    #[tokio::test]
    async fn set_replaces_the_whole_view() {
        let store = ViewStore::new();

        store
            .set(ExecutionView {
                summary: ExecutionSummary {
                    name: Some("Job A".to_string()),
                    ..Default::default()
                },
                entries: vec![
                    TimelineEntry::History {
                        datetime: Utc::now(),
                        status: "In Progress".to_string(),
                    };
                    3
                ],
            })
            .await;
        store
            .set(ExecutionView {
                summary: ExecutionSummary {
                    name: Some("Job B".to_string()),
                    ..Default::default()
                },
                entries: vec![],
            })
            .await;

        let view = store.get().await;
        assert_eq!(view.summary.name.as_deref(), Some("Job B"));
        assert!(view.entries.is_empty());
    }
}
