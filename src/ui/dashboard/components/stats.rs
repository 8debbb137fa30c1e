//! Dashboard statistics cards

use super::super::state::DashboardState;
use super::super::view::stats;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_stats(f: &mut Frame, area: Rect, state: &DashboardState) {
    let stats = stats(&state.proposals);
    let cards = [
        ("Total Multi-Sigs", stats.total, Color::Cyan),
        ("Pending", stats.pending, Color::LightYellow),
        ("Completed", stats.completed, Color::LightGreen),
        ("Waiting Signatures", stats.waiting, Color::LightMagenta),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);

    for (chunk, (label, value, color)) in chunks.iter().zip(cards) {
        let card = Paragraph::new(vec![
            Line::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Line::styled(label, Style::default().fg(Color::Gray)),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(card, *chunk);
    }
}
