//! Top users screen rendering
//!
//! Renders the most active users ranked by post count, with medal colors for
//! the podium and a block bar visualizing relative activity.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui;

/// Width of the activity bar in cells
const BAR_WIDTH: usize = 20;

/// Medal icon for a ranking position
fn medal_icon(rank: usize) -> &'static str {
    match rank {
        0 => "\u{1F947}", // 🥇
        1 => "\u{1F948}", // 🥈
        2 => "\u{1F949}", // 🥉
        _ => "  ",
    }
}

/// Medal color for a ranking position
fn medal_color(rank: usize) -> Color {
    match rank {
        0 => Color::Yellow,
        1 => Color::White,
        2 => Color::LightRed,
        _ => Color::Cyan,
    }
}

/// Scales a post count into a block bar relative to the leader
///
/// Rounds up so any nonzero count shows at least one block.
fn activity_bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = (count * BAR_WIDTH).div_ceil(max);
    "█".repeat(filled.min(BAR_WIDTH))
}

/// Renders the top users view
pub fn render(frame: &mut Frame, app: &App) {
    let (header, body, footer) = ui::view_chunks(frame.area());
    ui::render_header(frame, app, header);
    ui::render_footer(frame, footer);

    if app.snapshot.top_users.is_empty() {
        if app.load_error.is_some() {
            ui::render_error(frame, body, "Error loading top users");
        } else {
            ui::render_empty(frame, body, "No users yet");
        }
        return;
    }

    let max_posts = app
        .snapshot
        .top_users
        .iter()
        .map(|entry| entry.post_count)
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::new();
    for (rank, entry) in app.snapshot.top_users.iter().enumerate() {
        let selected = rank == app.selected_index;
        let marker = if selected { "▶ " } else { "  " };

        let name_style = Style::default()
            .fg(medal_color(rank))
            .add_modifier(Modifier::BOLD);

        lines.push(Line::from(vec![
            Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
            Span::raw(format!("{} ", medal_icon(rank))),
            Span::styled(format!("{:<20}", entry.user.name), name_style),
            Span::styled(
                format!("{:<width$}", activity_bar(entry.post_count, max_posts), width = BAR_WIDTH),
                Style::default().fg(medal_color(rank)),
            ),
            Span::styled(
                format!(
                    " {} {}",
                    entry.post_count,
                    if entry.post_count == 1 { "post" } else { "posts" }
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let block = Block::default().title(" Top Users ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), body);
}
