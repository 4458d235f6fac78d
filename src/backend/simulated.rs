//! Simulated backend for demos and tests.
//!
//! Fabricates a single-step job that advances Not Started -> In Progress ->
//! Successful across a fixed number of progress fetches, recording each
//! transition in the step's history the way a real orchestrator would.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::{BackendError, ProgressBackend};
use crate::core::models::{JobExecution, JobStep, ProgressSnapshot, StatusHistoryEvent};

/// Fetches it takes a simulated job to complete.
const DEFAULT_FETCHES_TO_COMPLETE: u32 = 4;

struct SimState {
    execution_id: Option<String>,
    subject_id: String,
    started_at: DateTime<Utc>,
    fetches: u32,
}

pub struct SimulatedBackend {
    fetches_to_complete: u32,
    state: Mutex<SimState>,
}

impl SimulatedBackend {
    pub fn new() -> Self {
        Self::with_fetches(DEFAULT_FETCHES_TO_COMPLETE)
    }

    pub fn with_fetches(fetches_to_complete: u32) -> Self {
        Self {
            fetches_to_complete: fetches_to_complete.max(1),
            state: Mutex::new(SimState {
                execution_id: None,
                subject_id: String::new(),
                started_at: Utc::now(),
                fetches: 0,
            }),
        }
    }

    fn status_after(&self, fetches: u32) -> &'static str {
        if fetches >= self.fetches_to_complete {
            "Successful"
        } else if fetches > 1 {
            "In Progress"
        } else {
            "Not Started"
        }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressBackend for SimulatedBackend {
    async fn start_job(&self, subject_id: &str) -> Result<String, BackendError> {
        let mut state = self.state.lock().unwrap();

        let id = Uuid::now_v7().to_string();
        state.execution_id = Some(id.clone());
        state.subject_id = subject_id.to_string();
        state.started_at = Utc::now();
        state.fetches = 0;

        Ok(id)
    }

    async fn fetch_progress(
        &self,
        _execution_ids: &[String],
    ) -> Result<ProgressSnapshot, BackendError> {
        let mut state = self.state.lock().unwrap();

        let Some(execution_id) = state.execution_id.clone() else {
            // Nothing started yet; "all accessible executions" is empty here.
            return Ok(ProgressSnapshot::default());
        };

        state.fetches += 1;
        let fetches = state.fetches.min(self.fetches_to_complete);
        let status = self.status_after(fetches);

        let execution = JobExecution {
            id: execution_id.clone(),
            name: Some(format!("Job for {}", state.subject_id)),
            status: Some(status.to_string()),
            created_at: Some(state.started_at),
            error_message: None,
            template_name: Some("Simulated Deployment".to_string()),
        };

        // One transition recorded per completed fetch after the first.
        let history = (2..=fetches)
            .map(|n| StatusHistoryEvent {
                created_at: state.started_at + Duration::seconds(n as i64),
                new_value: Some(self.status_after(n).to_string()),
            })
            .collect();

        let step = JobStep {
            id: format!("{execution_id}-step-1"),
            name: Some("Execute changes".to_string()),
            created_at: state.started_at,
            execution: Some(execution),
            log_documents: vec![],
            history,
        };

        Ok(ProgressSnapshot { steps: vec![step] })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_before_any_start() {
        let backend = SimulatedBackend::new();
        let snapshot = backend.fetch_progress(&[]).await.unwrap();
        assert!(snapshot.steps.is_empty());
    }

    #[tokio::test]
    async fn advances_to_successful() {
        let backend = SimulatedBackend::with_fetches(3);
        let execution_id = backend.start_job("US-1").await.unwrap();

        let status_of = |snapshot: &ProgressSnapshot| {
            snapshot.steps[0]
                .execution
                .as_ref()
                .and_then(|e| e.status.clone())
                .unwrap()
        };

        let first = backend.fetch_progress(&[execution_id.clone()]).await.unwrap();
        assert_eq!(status_of(&first), "Not Started");
        assert!(first.steps[0].history.is_empty());

        let second = backend.fetch_progress(&[execution_id.clone()]).await.unwrap();
        assert_eq!(status_of(&second), "In Progress");
        assert_eq!(second.steps[0].history.len(), 1);

        let third = backend.fetch_progress(&[execution_id.clone()]).await.unwrap();
        assert_eq!(status_of(&third), "Successful");
        assert_eq!(third.steps[0].history.len(), 2);

        // Stable after completion.
        let fourth = backend.fetch_progress(&[execution_id]).await.unwrap();
        assert_eq!(status_of(&fourth), "Successful");
        assert_eq!(fourth.steps[0].history.len(), 2);
    }

    #[tokio::test]
    async fn restart_resets_the_job() {
        let backend = SimulatedBackend::with_fetches(2);
        let first_id = backend.start_job("US-1").await.unwrap();
        backend.fetch_progress(&[]).await.unwrap();
        backend.fetch_progress(&[]).await.unwrap();

        let second_id = backend.start_job("US-1").await.unwrap();
        assert_ne!(first_id, second_id);

        let snapshot = backend.fetch_progress(&[]).await.unwrap();
        let status = snapshot.steps[0]
            .execution
            .as_ref()
            .and_then(|e| e.status.as_deref())
            .unwrap();
        assert_eq!(status, "Not Started");
    }
}
