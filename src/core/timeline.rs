//! Flattens a progress snapshot into display entries.

use chrono::{DateTime, Utc};

use super::models::{JobStep, ProgressSnapshot};

/// Execution fields shown in the monitor header.
///
/// Rebuilt on every snapshot. The summary is overwritten once per step while
/// iterating in reverse, so the last write wins and it ends up reflecting the
/// execution of the snapshot's *first* step in stored order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionSummary {
    pub link: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub template_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

/// One row of the rendered timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEntry {
    /// A job step, shown with its execution's current status.
    Step {
        datetime: DateTime<Utc>,
        step: Option<String>,
        status: Option<String>,
        link: String,
        log_id: Option<String>,
    },
    /// A recorded status transition beneath its owning step.
    History {
        datetime: DateTime<Utc>,
        status: String,
    },
}

impl TimelineEntry {
    pub fn datetime(&self) -> DateTime<Utc> {
        match self {
            TimelineEntry::Step { datetime, .. } | TimelineEntry::History { datetime, .. } => {
                *datetime
            }
        }
    }
}

/// Build the display list from a snapshot.
///
/// Steps come out latest-recorded first, and each step's history is reversed
/// beneath it. History events without a new value are dropped. The list is
/// rebuilt from scratch on every call; nothing is patched incrementally.
pub fn build_timeline(snapshot: &ProgressSnapshot) -> (ExecutionSummary, Vec<TimelineEntry>) {
    let mut summary = ExecutionSummary::default();
    let mut entries = Vec::new();

    for step in snapshot.steps.iter().rev() {
        summary = summarize(step);
        entries.push(step_entry(step));

        for event in step.history.iter().rev() {
            let Some(status) = &event.new_value else {
                continue;
            };
            entries.push(TimelineEntry::History {
                datetime: event.created_at,
                status: status.clone(),
            });
        }
    }

    (summary, entries)
}

fn summarize(step: &JobStep) -> ExecutionSummary {
    let execution = step.execution.as_ref();
    ExecutionSummary {
        link: execution.map(|e| format!("/{}", e.id)),
        name: execution.and_then(|e| e.name.clone()),
        status: execution.and_then(|e| e.status.clone()),
        template_name: execution.and_then(|e| e.template_name.clone()),
        created_at: execution.and_then(|e| e.created_at),
        error_message: execution.and_then(|e| e.error_message.clone()),
    }
}

fn step_entry(step: &JobStep) -> TimelineEntry {
    TimelineEntry::Step {
        datetime: step.created_at,
        step: step.name.clone(),
        status: step.execution.as_ref().and_then(|e| e.status.clone()),
        link: format!("/{}", step.id),
        log_id: step.log_documents.first().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{JobExecution, StatusHistoryEvent};
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn execution(id: &str, status: &str) -> JobExecution {
        JobExecution {
            id: id.to_string(),
            name: Some(format!("Execution {id}")),
            status: Some(status.to_string()),
            created_at: Some(ts(0)),
            error_message: None,
            template_name: Some("Deploy Template".to_string()),
        }
    }

    fn step(
        id: &str,
        at: i64,
        execution: Option<JobExecution>,
        history: Vec<StatusHistoryEvent>,
    ) -> JobStep {
        JobStep {
            id: id.to_string(),
            name: Some(format!("Step {id}")),
            created_at: ts(at),
            execution,
            log_documents: vec![],
            history,
        }
    }

    fn event(at: i64, value: Option<&str>) -> StatusHistoryEvent {
        StatusHistoryEvent {
            created_at: ts(at),
            new_value: value.map(String::from),
        }
    }

    #[test]
    fn reverses_steps_and_history() {
        let snapshot = ProgressSnapshot {
            steps: vec![
                step(
                    "s1",
                    10,
                    Some(execution("e1", "In Progress")),
                    vec![event(1, Some("Not Started")), event(2, Some("In Progress"))],
                ),
                step(
                    "s2",
                    20,
                    Some(execution("e1", "In Progress")),
                    vec![event(21, Some("Not Started"))],
                ),
            ],
        };

        let (_, entries) = build_timeline(&snapshot);

        assert_eq!(entries.len(), 5);
        assert!(matches!(&entries[0], TimelineEntry::Step { link, .. } if link == "/s2"));
        assert!(
            matches!(&entries[1], TimelineEntry::History { status, .. } if status == "Not Started")
        );
        assert!(matches!(&entries[2], TimelineEntry::Step { link, .. } if link == "/s1"));
        assert_eq!(entries[3].datetime(), ts(2));
        assert_eq!(entries[4].datetime(), ts(1));
    }

    #[test]
    fn summary_reflects_first_step_in_stored_order() {
        let snapshot = ProgressSnapshot {
            steps: vec![
                step("s1", 10, Some(execution("early", "In Progress")), vec![]),
                step("s2", 20, Some(execution("late", "Successful")), vec![]),
            ],
        };

        let (summary, _) = build_timeline(&snapshot);

        assert_eq!(summary.link.as_deref(), Some("/early"));
        assert_eq!(summary.name.as_deref(), Some("Execution early"));
        assert_eq!(summary.status.as_deref(), Some("In Progress"));
    }

    #[test]
    fn skips_history_without_new_value_preserving_order() {
        let snapshot = ProgressSnapshot {
            steps: vec![step(
                "s1",
                10,
                Some(execution("e1", "In Progress")),
                vec![
                    event(1, Some("Not Started")),
                    event(2, None),
                    event(3, Some("In Progress")),
                ],
            )],
        };

        let (_, entries) = build_timeline(&snapshot);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].datetime(), ts(3));
        assert_eq!(entries[2].datetime(), ts(1));
    }

    #[test]
    fn empty_snapshot_yields_empty_view() {
        let (summary, entries) = build_timeline(&ProgressSnapshot::default());

        assert_eq!(summary, ExecutionSummary::default());
        assert!(entries.is_empty());
    }

    #[test]
    fn absent_execution_passes_through_as_none() {
        let snapshot = ProgressSnapshot {
            steps: vec![step("s1", 10, None, vec![])],
        };

        let (summary, entries) = build_timeline(&snapshot);

        assert_eq!(summary.link, None);
        assert_eq!(summary.status, None);
        match &entries[0] {
            TimelineEntry::Step { status, step, .. } => {
                assert_eq!(status.as_deref(), None);
                assert_eq!(step.as_deref(), Some("Step s1"));
            }
            other => panic!("expected step entry, got {other:?}"),
        }
    }

    #[test]
    fn log_id_is_first_attached_document() {
        let mut with_logs = step("s1", 10, None, vec![]);
        with_logs.log_documents = vec!["doc-1".to_string(), "doc-2".to_string()];
        let snapshot = ProgressSnapshot {
            steps: vec![with_logs, step("s2", 20, None, vec![])],
        };

        let (_, entries) = build_timeline(&snapshot);

        match &entries[0] {
            TimelineEntry::Step { log_id, .. } => assert_eq!(log_id.as_deref(), None),
            other => panic!("expected step entry, got {other:?}"),
        }
        match &entries[1] {
            TimelineEntry::Step { log_id, .. } => assert_eq!(log_id.as_deref(), Some("doc-1")),
            other => panic!("expected step entry, got {other:?}"),
        }
    }
}
