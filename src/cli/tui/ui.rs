//! Rendering for the monitor view.

use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::core::session::SessionState;
use crate::core::timeline::TimelineEntry;

use super::app::MonitorApp;

pub fn render(frame: &mut Frame, app: &MonitorApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary header
            Constraint::Min(0),    // Timeline
            Constraint::Length(3), // Footer/help
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_timeline(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &MonitorApp, area: Rect) {
    let summary = &app.view.summary;

    let mut lines = vec![Line::from(vec![
        Span::styled(
            summary
                .name
                .as_deref()
                .unwrap_or("(no execution yet)")
                .to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        status_span(summary.status.as_deref()),
    ])];

    let mut details = Vec::new();
    if let Some(template) = &summary.template_name {
        details.push(format!("template: {template}"));
    }
    if let Some(created) = summary.created_at {
        details.push(format!("started: {}", format_time(created)));
    }
    if !details.is_empty() {
        lines.push(Line::from(details.join("   ")));
    }
    if let Some(error) = &summary.error_message {
        lines.push(Line::from(Span::styled(
            format!("error: {error}"),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .title(format!("jobwatch — {}", state_label(app.state)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_timeline(frame: &mut Frame, app: &MonitorApp, area: Rect) {
    let block = Block::default()
        .title("Timeline")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.view.entries.is_empty() {
        let text = Paragraph::new("  Waiting for progress data...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = app
        .view
        .entries
        .iter()
        .skip(app.scroll as usize)
        .map(entry_item)
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn entry_item(entry: &TimelineEntry) -> ListItem<'_> {
    let line = match entry {
        TimelineEntry::Step {
            datetime,
            step,
            status,
            log_id,
            ..
        } => {
            let mut spans = vec![
                Span::raw(format!("  {}  ", format_time(*datetime))),
                Span::styled(
                    step.as_deref().unwrap_or("(unnamed step)").to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                status_span(status.as_deref()),
            ];
            if log_id.is_some() {
                spans.push(Span::styled(
                    "  [log]",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
        TimelineEntry::History { datetime, status } => Line::from(vec![
            Span::raw(format!("      {}  ", format_time(*datetime))),
            status_span(Some(status.as_str())),
        ]),
    };

    ListItem::new(line)
}

fn render_footer(frame: &mut Frame, app: &MonitorApp, area: Rect) {
    let hint = match app.state {
        SessionState::Idle => "r retry start · q quit",
        SessionState::Terminal => "job finished · q quit",
        _ => "q quit · ↑/↓ scroll",
    };

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block),
        area,
    );
}

fn status_span(status: Option<&str>) -> Span<'static> {
    let style = match status {
        Some("Successful") | Some("Completed") => Style::default().fg(Color::Green),
        Some("Failed") | Some("Error") => Style::default().fg(Color::Red),
        Some("Cancelled") => Style::default().fg(Color::DarkGray),
        Some(_) => Style::default().fg(Color::Yellow),
        None => Style::default().fg(Color::DarkGray),
    };
    Span::styled(status.unwrap_or("-").to_string(), style)
}

fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "idle",
        SessionState::Starting => "starting",
        SessionState::Polling => "polling",
        SessionState::Terminal => "finished",
        SessionState::Disposed => "disposed",
    }
}

fn format_time(ts: DateTime<Utc>) -> String {
    ts.format("%H:%M:%S").to_string()
}
