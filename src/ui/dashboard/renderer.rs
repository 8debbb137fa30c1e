//! Dashboard main renderer

use super::components::{
    footer, header, history, info_panel, logs, modals, notification, proposals, screens, stats,
};
use super::state::{DashboardScreen, DashboardState};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    match state.screen() {
        DashboardScreen::Disconnected => screens::render_connect_prompt(
            f,
            main_chunks[1],
            state.configured_wallet.as_deref(),
        ),
        DashboardScreen::FheInitializing => screens::render_initializing(f, main_chunks[1], state),
        DashboardScreen::DataLoading => screens::render_loading(f, main_chunks[1], state),
        DashboardScreen::Ready => render_ready(f, main_chunks[1], state),
    }

    notification::render_notification(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], state);
}

fn render_ready(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(25),
        ])
        .split(area);

    stats::render_stats(f, chunks[0], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);
    proposals::render_proposals_panel(f, content_chunks[0], state);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Fill(1)])
        .split(content_chunks[1]);
    history::render_history_panel(f, sidebar[0], state);
    info_panel::render_info_panel(f, sidebar[1], state);

    logs::render_logs_panel(f, chunks[2], state);

    if state.show_create_form {
        modals::render_create_form(f, area, state);
    } else if state.details.is_some() {
        modals::render_details(f, area, state);
    }
}
