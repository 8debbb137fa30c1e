//! Splash screen rendering module.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub const LOGO_NAME: &str = r#"
  ███████╗  ██╗  ██╗  ███████╗
  ██╔════╝  ██║  ██║  ██╔════╝
  █████╗    ███████║  █████╗  
  ██╔══╝    ██╔══██║  ██╔══╝  
  ██║       ██║  ██║  ███████╗
  ╚═╝       ╚═╝  ╚═╝  ╚══════╝
"#;

const TAGLINE: &str = "Secure Multi-Sig - Privacy-Preserving Multi-Signature Wallet";

/// Logo, tagline and version, top to bottom.
fn splash_lines() -> Vec<Line<'static>> {
    let logo_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = LOGO_NAME
        .trim_matches('\n')
        .lines()
        .map(|line| Line::from(Span::styled(line, logo_style)))
        .collect();

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(TAGLINE, Style::default().fg(Color::Gray))));
    lines.push(Line::from(Span::styled(
        format!("Version {}", env!("CARGO_PKG_VERSION")),
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::ITALIC),
    )));
    lines
}

pub fn render_splash(f: &mut Frame) {
    let lines = splash_lines();
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

    let [_, centered, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(f.area());

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
}
