//! Dashboard footer component
//!
//! Renders the key bindings of the current view

use super::super::state::{DashboardScreen, DashboardState, FheStatus};
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn footer_text(state: &DashboardState) -> &'static str {
    if state.show_create_form {
        return "[Tab] Next field | [Enter] Create | [Esc] Cancel";
    }
    if state.details.is_some() {
        if state.details_proposal().is_some_and(|p| p.is_verified) {
            return "[D] Decrypt | [Esc] Close";
        }
        return "[S] Sign | [D] Decrypt | [Esc] Close";
    }
    if state.search_focused {
        return "Type to search | [Enter] Done | [Esc] Done";
    }
    match state.screen() {
        DashboardScreen::Disconnected => "[C] Connect wallet | [Q] Quit",
        DashboardScreen::FheInitializing if matches!(state.fhe_status, FheStatus::Failed(_)) => {
            "[R] Retry | [X] Disconnect | [Q] Quit"
        }
        DashboardScreen::FheInitializing | DashboardScreen::DataLoading => {
            "[X] Disconnect | [Q] Quit"
        }
        DashboardScreen::Ready => {
            "[↑↓] Select | [←→] Page | [Enter] Details | [S] Sign | [D] Decrypt | [N] New | [/] Search | [R] Refresh | [C] Check Status | [X] Disconnect | [Q] Quit"
        }
    }
}

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let footer = Paragraph::new(footer_text(state))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
