//! Trending posts screen rendering
//!
//! Renders the posts sharing the maximum comment count.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui;

/// Renders the trending posts view
pub fn render(frame: &mut Frame, app: &App) {
    let (header, body, footer) = ui::view_chunks(frame.area());
    ui::render_header(frame, app, header);
    ui::render_footer(frame, footer);

    if app.snapshot.trending.is_empty() {
        if app.load_error.is_some() {
            ui::render_error(frame, body, "Error loading trending posts");
        } else {
            ui::render_empty(frame, body, "Nothing trending yet");
        }
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, entry) in app.snapshot.trending.iter().enumerate() {
        let selected = i == app.selected_index;
        let marker = if selected { "▶ " } else { "  " };
        let author = app
            .snapshot
            .user_name(&entry.post.user_id)
            .unwrap_or("Unknown")
            .to_string();

        let content_style = if selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
            Span::raw("\u{1F525} "), // 🔥
            Span::styled(entry.post.content.clone(), content_style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("      "),
            Span::styled(author, Style::default().fg(Color::Green)),
            Span::styled(
                format!("  💬 {}", entry.comment_count),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("  #{}", entry.post.id),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let title = format!(" Trending Posts ({}) ", app.snapshot.trending.len());
    let block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), body);
}
