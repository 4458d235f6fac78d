//! Command implementations for the jobwatch binary.

pub mod tui;

use anyhow::{Context, Result, bail};
use tokio::sync::watch;

use crate::backend;
use crate::config::AppConfig;
use crate::core::notifications;
use crate::core::session::{SessionHandle, SessionState};
use crate::core::timeline::{ExecutionSummary, TimelineEntry, build_timeline};

/// Start a job for the subject and monitor it until it finishes.
pub async fn watch(config: &AppConfig, subject_id: &str, plain: bool) -> Result<()> {
    let backend = backend::create_backend(config);
    let notifier = notifications::create_notifier(&config.notifications);
    let handle = SessionHandle::spawn(backend, subject_id, notifier);

    // Subscribe before activating so no transition can be missed.
    let state = handle.state();
    handle.activate();

    if plain {
        run_plain(handle, state).await
    } else {
        tui::run(handle).await
    }
}

/// One-shot: fetch whatever executions are visible and print their timeline.
pub async fn status(config: &AppConfig) -> Result<()> {
    let backend = backend::create_backend(config);
    let snapshot = backend
        .fetch_progress(&[])
        .await
        .context("Failed to fetch job progress")?;

    let (summary, entries) = build_timeline(&snapshot);
    if entries.is_empty() {
        println!("No job executions visible.");
        return Ok(());
    }

    print_summary(&summary);
    for entry in &entries {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

/// Wait for the session to finish and print the final timeline.
async fn run_plain(
    handle: SessionHandle,
    mut state: watch::Receiver<SessionState>,
) -> Result<()> {
    // The first borrow is the pre-activation Idle; any Idle observed after a
    // transition means the job start failed.
    let mut first = true;
    loop {
        let current = *state.borrow_and_update();
        match current {
            SessionState::Terminal | SessionState::Disposed => break,
            SessionState::Idle if !first => bail!("job start failed, see log output"),
            _ => {}
        }
        first = false;
        if state.changed().await.is_err() {
            break;
        }
    }

    let view = handle.view().await;
    print_summary(&view.summary);
    for entry in &view.entries {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

fn print_summary(summary: &ExecutionSummary) {
    println!(
        "{}  {}  {}",
        summary.name.as_deref().unwrap_or("(unknown job)"),
        summary.status.as_deref().unwrap_or("-"),
        summary.template_name.as_deref().unwrap_or(""),
    );
    if let Some(error) = &summary.error_message {
        println!("error: {error}");
    }
}

fn format_entry(entry: &TimelineEntry) -> String {
    match entry {
        TimelineEntry::Step {
            datetime,
            step,
            status,
            ..
        } => format!(
            "{}  {}  {}",
            datetime.format("%Y-%m-%d %H:%M:%S"),
            step.as_deref().unwrap_or("-"),
            status.as_deref().unwrap_or("-"),
        ),
        TimelineEntry::History { datetime, status } => format!(
            "{}      -> {}",
            datetime.format("%Y-%m-%d %H:%M:%S"),
            status,
        ),
    }
}
