//! Job session lifecycle.
//!
//! A session owns one job: it starts it exactly once, then polls the backend
//! for progress snapshots until the execution reaches a terminal status, the
//! consumer disposes it, or a fetch failure stalls the loop. All mutation
//! happens on a single actor task fed by an unbounded channel; timers and the
//! consumer handle only ever send messages into it, so at most one snapshot
//! request is in flight at any time.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::backend::ProgressBackend;
use crate::core::notifications::{JobOutcome, NotificationChannel};
use crate::core::schedule;
use crate::core::timeline::{ExecutionSummary, build_timeline};
use crate::core::view::{ExecutionView, ViewStore};

/// Lifecycle state of a session, published on a watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Starting,
    Polling,
    Terminal,
    Disposed,
}

enum SessionMsg {
    Activate,
    PollTick,
    Dispose,
}

/// Consumer-facing handle to a running session.
///
/// Dropping the handle disposes the session.
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionMsg>,
    active: CancellationToken,
    view: ViewStore,
    state: watch::Receiver<SessionState>,
}

impl SessionHandle {
    /// Spawn a session actor for the given subject. The job is not started
    /// until the first `activate()`.
    pub fn spawn(
        backend: Arc<dyn ProgressBackend>,
        subject_id: impl Into<String>,
        notifier: Option<Arc<dyn NotificationChannel>>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SessionState::Idle);
        let view = ViewStore::new();
        let active = CancellationToken::new();

        let session = JobSession {
            backend,
            subject_id: subject_id.into(),
            notifier,
            view: view.clone(),
            active: active.clone(),
            tx: tx.clone(),
            state: state_tx,
            execution_id: None,
            poll_start: None,
            timer: None,
            initialized: false,
        };
        tokio::spawn(session.run(rx));

        Self {
            tx,
            active,
            view,
            state: state_rx,
        }
    }

    /// Signal that the consumer is (still) showing this session. The first
    /// activation starts the job; later ones are no-ops unless the start
    /// failed, in which case the start is attempted again.
    pub fn activate(&self) {
        let _ = self.tx.send(SessionMsg::Activate);
    }

    /// Tear the session down. Any pending timer is cancelled and no further
    /// poll will be scheduled, even by a snapshot response still in flight.
    pub fn dispose(&self) {
        self.active.cancel();
        let _ = self.tx.send(SessionMsg::Dispose);
    }

    /// Latest summary + timeline entries.
    pub async fn view(&self) -> ExecutionView {
        self.view.get().await
    }

    /// Watch channel of lifecycle state transitions.
    pub fn state(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

struct JobSession {
    backend: Arc<dyn ProgressBackend>,
    subject_id: String,
    notifier: Option<Arc<dyn NotificationChannel>>,
    view: ViewStore,
    active: CancellationToken,
    tx: mpsc::UnboundedSender<SessionMsg>,
    state: watch::Sender<SessionState>,

    execution_id: Option<String>,
    /// Fixed at the first scheduling decision; never reset while active.
    poll_start: Option<Instant>,
    timer: Option<JoinHandle<()>>,
    initialized: bool,
}

impl JobSession {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<SessionMsg>) {
        while let Some(msg) = rx.recv().await {
            match msg {
                SessionMsg::Activate => self.on_activate().await,
                SessionMsg::PollTick => self.on_poll().await,
                SessionMsg::Dispose => {
                    self.on_dispose();
                    break;
                }
            }
        }
    }

    async fn on_activate(&mut self) {
        if self.initialized {
            debug!("session already initialized, ignoring activation");
            return;
        }

        self.set_state(SessionState::Starting);
        match self.backend.start_job(&self.subject_id).await {
            Ok(execution_id) => {
                info!(%execution_id, "job accepted");
                self.execution_id = Some(execution_id);
                self.initialized = true;
                self.set_state(SessionState::Polling);
                self.on_poll().await;
            }
            Err(e) => {
                // Not retried automatically; the next activation attempts the
                // start again.
                error!(error = %e, subject_id = %self.subject_id, "failed to start job");
                self.set_state(SessionState::Idle);
            }
        }
    }

    async fn on_poll(&mut self) {
        if self.active.is_cancelled() {
            return;
        }

        let ids: Vec<String> = self.execution_id.clone().into_iter().collect();
        match self.backend.fetch_progress(&ids).await {
            Ok(snapshot) => {
                let (summary, entries) = build_timeline(&snapshot);
                for entry in &entries {
                    debug!(?entry, "timeline entry");
                }
                self.view
                    .set(ExecutionView {
                        summary: summary.clone(),
                        entries,
                    })
                    .await;
                self.schedule_or_finish(&summary);
            }
            Err(e) => {
                // The loop stalls here until something re-drives it; a failed
                // fetch never reschedules on its own.
                error!(error = %e, "failed to read job progress, will retry on next refresh");
            }
        }
    }

    fn schedule_or_finish(&mut self, summary: &ExecutionSummary) {
        let status = summary.status.as_deref();
        if !schedule::should_continue(status) {
            info!(status = status.unwrap_or("<none>"), "job reached terminal status");
            self.set_state(SessionState::Terminal);
            self.notify_terminal(summary);
            return;
        }

        // A snapshot response may land after dispose; keep the data but never
        // schedule from a dead session.
        if self.active.is_cancelled() {
            return;
        }

        let now = Instant::now();
        let poll_start = *self.poll_start.get_or_insert(now);
        let delay = schedule::next_delay(now - poll_start);
        debug!(delay_secs = delay.as_secs(), "scheduling next poll");

        let tx = self.tx.clone();
        let active = self.active.clone();
        self.timer = Some(tokio::spawn(async move {
            sleep(delay).await;
            if active.is_cancelled() {
                return;
            }
            let _ = tx.send(SessionMsg::PollTick);
        }));
    }

    fn on_dispose(&mut self) {
        self.active.cancel();
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.set_state(SessionState::Disposed);
        info!("session disposed");
    }

    fn notify_terminal(&self, summary: &ExecutionSummary) {
        let Some(notifier) = self.notifier.clone() else {
            return;
        };

        let outcome = JobOutcome {
            execution_id: self.execution_id.clone().unwrap_or_default(),
            name: summary.name.clone(),
            status: summary.status.clone(),
            error_message: summary.error_message.clone(),
        };
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(outcome).await {
                error!(error = %e, "failed to send job notification");
            }
        });
    }

    fn set_state(&self, state: SessionState) {
        debug!(?state, "session state");
        self.state.send_replace(state);
    }
}
