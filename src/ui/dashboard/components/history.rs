//! Operation history panel

use super::super::state::DashboardState;
use crate::consts::cli_consts::HISTORY_DISPLAY_LIMIT;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

/// The entries shown in the panel: the most recent ones, oldest first.
pub fn recent_history(history: &[String]) -> &[String] {
    &history[history.len().saturating_sub(HISTORY_DISPLAY_LIMIT)..]
}

pub fn render_history_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let lines: Vec<Line> = if state.history.is_empty() {
        vec![Line::styled(
            "No operations yet",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        recent_history(&state.history)
            .iter()
            .map(|entry| Line::styled(entry.as_str(), Style::default().fg(Color::White)))
            .collect()
    };

    let block = Block::default()
        .title("OPERATION HISTORY")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
