//! Full-screen views shown before the dashboard is ready

use super::super::state::{DashboardState, FheStatus};
use super::super::utils::spinner;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn centered_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(2))
}

pub fn render_connect_prompt(f: &mut Frame, area: Rect, configured_wallet: Option<&str>) {
    let mut lines = vec![
        Line::styled(
            "🔐 Connect Your Wallet to Continue",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from("Please connect your wallet to initialize the FHE-based multi-signature system."),
        Line::from(""),
    ];
    let steps = [
        "Connect your wallet",
        "FHE system initialization",
        "Create and manage encrypted multi-signatures",
    ];
    for (number, step) in steps.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}  ", number + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(*step),
        ]));
    }
    lines.push(Line::from(""));
    match configured_wallet {
        Some(address) => lines.push(Line::styled(
            format!("Press [C] to connect {}", address),
            Style::default().fg(Color::LightGreen),
        )),
        None => lines.push(Line::styled(
            "No wallet configured. Run `fhe-multisig connect --wallet-address <ADDRESS>` first.",
            Style::default().fg(Color::LightYellow),
        )),
    }

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(centered_block("FHE SECURE MULTI-SIG")),
        area,
    );
}

pub fn render_initializing(f: &mut Frame, area: Rect, state: &DashboardState) {
    let lines = match &state.fhe_status {
        FheStatus::Failed(reason) => vec![
            Line::styled(
                "FHE initialization failed",
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::styled(reason.clone(), Style::default().fg(Color::Gray)),
            Line::from(""),
            Line::from("Press [R] to retry"),
        ],
        _ => vec![
            Line::styled(
                format!("{} Initializing FHE Encryption System...", spinner(state.tick)),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::styled(
                "Secure multi-signature system loading",
                Style::default().fg(Color::Gray),
            ),
        ],
    };
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(centered_block("FHE SECURE MULTI-SIG")),
        area,
    );
}

pub fn render_loading(f: &mut Frame, area: Rect, state: &DashboardState) {
    let line = Line::styled(
        format!(
            "{} Loading encrypted multi-signature system...",
            spinner(state.tick)
        ),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(centered_block("FHE SECURE MULTI-SIG")),
        area,
    );
}
