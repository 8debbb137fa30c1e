//! Dashboard info panel component
//!
//! Renders the FHE process steps and the connection details

use crate::environment::Environment;
use crate::keys::short_address;

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

const PROCESS_STEPS: [(&str, &str); 3] = [
    ("Data Encryption", "Transaction amounts encrypted with FHE"),
    ("Multi-Signature", "Multiple signatures required for approval"),
    (
        "Homomorphic Verification",
        "Signatures verified without decryption",
    ),
];

pub fn render_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut info_lines = Vec::new();

    for (number, (title, detail)) in PROCESS_STEPS.iter().enumerate() {
        info_lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", number + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(*title, Style::default().add_modifier(Modifier::BOLD)),
        ]));
        info_lines.push(Line::styled(
            format!("  {}", detail),
            Style::default().fg(Color::Gray),
        ));
    }
    info_lines.push(Line::from(""));

    let wallet_text = match &state.wallet {
        Some(wallet) => format!("Wallet: {}", wallet.short_address()),
        None => "Wallet: Disconnected".to_string(),
    };
    info_lines.push(Line::styled(
        wallet_text,
        Style::default().fg(Color::LightBlue),
    ));

    // Environment with color coding
    let env_color = match state.environment {
        Environment::Sepolia => Color::Green,
        Environment::Local => Color::Yellow,
        Environment::Sandbox => Color::LightMagenta,
    };
    info_lines.push(Line::styled(
        format!("Env: {}", state.environment),
        Style::default().fg(env_color),
    ));
    info_lines.push(Line::styled(
        format!("Contract: {}", short_address(&state.contract_address)),
        Style::default().fg(Color::LightCyan),
    ));

    let info_block = Block::default()
        .title("FHE PROCESS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let info_paragraph = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });
    f.render_widget(info_paragraph, area);
}
