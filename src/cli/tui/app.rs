//! Monitor view state.

use crate::core::session::{SessionHandle, SessionState};
use crate::core::view::ExecutionView;

/// Actions that can be triggered by user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Activate,
    ScrollUp,
    ScrollDown,
}

/// State backing the monitor view.
pub struct MonitorApp {
    handle: SessionHandle,
    pub view: ExecutionView,
    pub state: SessionState,
    pub scroll: u16,
    pub running: bool,
}

impl MonitorApp {
    pub fn new(handle: SessionHandle) -> Self {
        let state = *handle.state().borrow();
        Self {
            handle,
            view: ExecutionView::default(),
            state,
            scroll: 0,
            running: true,
        }
    }

    /// Pull the latest view and lifecycle state from the session.
    pub async fn refresh(&mut self) {
        self.view = self.handle.view().await;
        self.state = *self.handle.state().borrow();
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Activate => self.handle.activate(),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
        }
    }

    pub fn dispose(&self) {
        self.handle.dispose();
    }
}
