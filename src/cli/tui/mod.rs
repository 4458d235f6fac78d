//! Interactive monitor view.
//!
//! Renders the execution summary and timeline for one session, refreshing on
//! a fixed cadence while the session polls in the background. Quitting the
//! view disposes the session.

mod app;
mod input;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::core::session::SessionHandle;

use app::MonitorApp;

/// Run the monitor TUI for the given session.
pub async fn run(handle: SessionHandle) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = MonitorApp::new(handle);
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut MonitorApp,
) -> Result<()> {
    // Redraw cadence; the session polls on its own schedule.
    let tick = Duration::from_millis(250);

    while app.running {
        app.refresh().await;
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(tick)? {
            let event = event::read()?;
            if let Some(action) = input::handle_event(event) {
                app.handle_action(action);
            }
        }
    }

    app.dispose();
    Ok(())
}
