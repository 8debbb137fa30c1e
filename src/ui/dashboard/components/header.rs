//! Dashboard header component
//!
//! Renders the title and the activity gauge

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and current activity.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title_text = format!(
        "FHE SECURE MULTI-SIG v{} - Encrypted Multi-Signature Transactions",
        env!("CARGO_PKG_VERSION")
    );
    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    // Creation takes priority, then refreshing
    let (progress_text, gauge_color, progress_percent) = if state.is_creating {
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        (
            "CREATING - Encrypting and submitting".to_string(),
            Color::LightGreen,
            progress,
        )
    } else if state.is_refreshing() {
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        (
            "REFRESHING - Loading proposals".to_string(),
            Color::LightBlue,
            progress,
        )
    } else {
        let wallet = state
            .wallet
            .as_ref()
            .map(|w| w.short_address())
            .unwrap_or_else(|| "no wallet".to_string());
        (format!("READY - {}", wallet), Color::LightBlue, 100)
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
