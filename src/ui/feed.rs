//! Feed screen rendering
//!
//! Renders all posts newest first with author, content, and comment count.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui;

/// Palette used to tint author markers
const AUTHOR_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Green,
    Color::Magenta,
    Color::Yellow,
    Color::Blue,
    Color::LightRed,
];

/// Lines each post occupies in the list
const LINES_PER_POST: u16 = 3;

/// Deterministic color for a user id, so an author keeps their tint across
/// refreshes
fn author_color(user_id: &str) -> Color {
    let hash: usize = user_id.bytes().map(usize::from).sum();
    AUTHOR_COLORS[hash % AUTHOR_COLORS.len()]
}

/// Renders the feed view
pub fn render(frame: &mut Frame, app: &App) {
    let (header, body, footer) = ui::view_chunks(frame.area());
    ui::render_header(frame, app, header);
    ui::render_footer(frame, footer);

    if app.snapshot.feed.is_empty() {
        if app.load_error.is_some() {
            ui::render_error(frame, body, "Error loading posts");
        } else {
            ui::render_empty(frame, body, "No posts yet");
        }
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, post) in app.snapshot.feed.iter().enumerate() {
        let selected = i == app.selected_index;
        let marker = if selected { "▶ " } else { "  " };
        let author = app
            .snapshot
            .user_name(&post.user_id)
            .unwrap_or("Unknown")
            .to_string();

        let content_style = if selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
            Span::styled(
                author,
                Style::default()
                    .fg(author_color(&post.user_id))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  #{}", post.id), Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(post.content.clone(), content_style),
            Span::styled(
                format!("  💬 {}", app.snapshot.comment_count(post.id)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let title = format!(" Latest Posts ({}) ", app.snapshot.feed.len());
    let block = Block::default().title(title).borders(Borders::ALL);

    // Keep the selected post inside the visible window
    let visible_posts = body.height.saturating_sub(2) / LINES_PER_POST;
    let first_visible =
        (app.selected_index as u16).saturating_sub(visible_posts.saturating_sub(1));
    let scroll = first_visible * LINES_PER_POST;

    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), body);
}
