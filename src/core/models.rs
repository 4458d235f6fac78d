//! Wire model for job progress snapshots.
//!
//! These records mirror what the orchestrator returns from a progress query:
//! an ordered list of job steps, each carrying a back-reference to its
//! execution and the ordered history of status changes recorded so far.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One run instance of a triggered backend job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobExecution {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Backend-defined status string. "Not Started" and "In Progress" are the
    /// two non-terminal values; anything else ends polling.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub template_name: Option<String>,
}

/// A discrete unit of work within an execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStep {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Back-reference to the owning execution. May be absent when the backend
    /// could not resolve it; readers tolerate that.
    #[serde(default)]
    pub execution: Option<JobExecution>,
    /// Ids of log documents attached to this step, in attachment order.
    #[serde(default)]
    pub log_documents: Vec<String>,
    #[serde(default)]
    pub history: Vec<StatusHistoryEvent>,
}

/// A recorded status transition on a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryEvent {
    pub created_at: DateTime<Utc>,
    /// The status value after the transition. Entries without one are invalid
    /// and skipped by the timeline builder.
    #[serde(default)]
    pub new_value: Option<String>,
}

/// A point-in-time read of execution/step/history state. Always fetched in
/// full, never incrementally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub steps: Vec<JobStep>,
}
