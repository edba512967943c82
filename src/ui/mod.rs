//! UI rendering module for the feedscope dashboard
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components. The shared
//! chrome (tab bar, status line, footer hints, error branch) lives here;
//! each view renders its own body.

pub mod feed;
pub mod help_overlay;
pub mod top_users;
pub mod trending;

pub use feed::render as render_feed;
pub use help_overlay::render as render_help_overlay;
pub use top_users::render as render_top_users;
pub use trending::render as render_trending;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, AppState};

/// Splits the frame into header, body, and footer areas
pub(crate) fn view_chunks(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Renders the tab bar and refresh status line
pub(crate) fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let tab = |state: AppState, key: &str, label: &str| -> Span<'static> {
        let style = if app.state == state {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!(" {} {} ", key, label), style)
    };

    let tabs = Line::from(vec![
        tab(AppState::Feed, "1", "Feed"),
        tab(AppState::TopUsers, "2", "Top Users"),
        tab(AppState::Trending, "3", "Trending"),
    ]);

    frame.render_widget(Paragraph::new(vec![tabs, status_line(app)]), area);
}

/// Builds the refresh status line under the tabs
fn status_line(app: &App) -> Line<'static> {
    let mut spans = Vec::new();

    if app.refreshing {
        spans.push(Span::styled(
            " refreshing...",
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(at) = app.last_refresh {
        spans.push(Span::styled(
            format!(" updated {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if app.load_error.is_some() {
        spans.push(Span::styled(" (stale)", Style::default().fg(Color::Red)));
    }

    Line::from(spans)
}

/// Renders the bottom key hints
pub(crate) fn render_footer(frame: &mut Frame, area: Rect) {
    let hints = Line::from(Span::styled(
        " q quit · Tab/1-3 views · j/k move · r refresh · ? help",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(hints), area);
}

/// Renders the error branch a view falls back to when it has no data at all
pub(crate) fn render_error(frame: &mut Frame, area: Rect, headline: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(2),
            Constraint::Percentage(40),
        ])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            headline.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Please try again later".to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[1],
    );
}

/// Renders a centered placeholder for a view whose list is legitimately empty
pub(crate) fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center),
        area,
    );
}
