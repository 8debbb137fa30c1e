//! Proposal queue component
//!
//! Renders the search box, the visible page of proposals and the pager

use super::super::state::DashboardState;
use crate::proposal::Proposal;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table};

pub fn render_proposals_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title("MULTI-SIGNATURE QUEUE")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(inner);

    render_search(f, chunks[0], state);

    let view = state.list_view();
    let visible = view.visible();
    if visible.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::styled(
                "No multi-signature proposals found",
                Style::default().fg(Color::Gray),
            ),
            Line::styled(
                "Press [N] to create the first multi-sig",
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .alignment(Alignment::Center);
        f.render_widget(empty, chunks[1]);
    } else {
        let rows = visible
            .iter()
            .enumerate()
            .map(|(index, proposal)| proposal_row(proposal, index == state.cursor));
        let table = Table::new(
            rows,
            [
                Constraint::Fill(2),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(11),
                Constraint::Fill(3),
            ],
        )
        .header(
            Row::new(["Name", "Status", "Signatures", "Created", "Description"])
                .style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(table, chunks[1]);
    }

    // Pager only when there is more than one page
    if view.total_pages > 1 {
        let pager = Paragraph::new(format!(
            "[<] Previous   Page {} of {}   Next [>]",
            view.page, view.total_pages
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
        f.render_widget(pager, chunks[2]);
    }
}

fn render_search(f: &mut Frame, area: Rect, state: &DashboardState) {
    let (text, style) = if state.search_focused {
        (
            format!("{}▏", state.search_term),
            Style::default().fg(Color::White),
        )
    } else if state.search_term.is_empty() {
        (
            "Search multi-signatures... [/]".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (state.search_term.clone(), Style::default().fg(Color::Gray))
    };
    let refresh = if state.is_refreshing() {
        "Refreshing..."
    } else {
        "[R] Refresh"
    };
    let line = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::Cyan)),
        Span::styled(text, style),
        Span::raw("  "),
        Span::styled(refresh, Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn proposal_row(proposal: &Proposal, selected: bool) -> Row<'_> {
    let (status, status_color) = if proposal.is_verified {
        ("✅ Verified", Color::LightGreen)
    } else {
        ("⏳ Pending", Color::LightYellow)
    };
    let created = proposal
        .created_at()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let row = Row::new(vec![
        Cell::from(proposal.name.as_str()),
        Cell::from(status).style(Style::default().fg(status_color)),
        Cell::from(format!(
            "{}/{}",
            proposal.current_signatures, proposal.required_signatures
        )),
        Cell::from(created),
        Cell::from(proposal.description.as_str()).style(Style::default().fg(Color::Gray)),
    ]);
    if selected {
        row.style(
            Style::default()
                .bg(Color::Rgb(40, 48, 56))
                .add_modifier(Modifier::BOLD),
        )
    } else {
        row
    }
}
