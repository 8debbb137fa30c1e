//! Overlays drawn on top of the dashboard: the creation form and the
//! proposal details.

use super::super::state::DashboardState;
use super::super::utils::centered_rect;
use crate::controller::form::FormField;
use crate::proposal::Proposal;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

const FORM_FIELDS: [FormField; 4] = [
    FormField::Name,
    FormField::Amount,
    FormField::RequiredSignatures,
    FormField::Description,
];

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Name => "Enter multi-signature name",
        FormField::Amount => "Enter amount to encrypt",
        FormField::RequiredSignatures => "2",
        FormField::Description => "Enter multi-signature description",
    }
}

pub fn render_create_form(f: &mut Frame, area: Rect, state: &DashboardState) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let mut lines = Vec::new();
    for field in FORM_FIELDS {
        let focused = state.form.focus == field;
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::styled(field.label(), label_style));

        let value = state.form.field(field);
        let value_span = if value.is_empty() && !focused {
            Span::styled(placeholder(field), Style::default().fg(Color::DarkGray))
        } else if focused {
            Span::styled(format!("{}▏", value), Style::default().fg(Color::White))
        } else {
            Span::styled(value.to_string(), Style::default().fg(Color::White))
        };
        lines.push(Line::from(vec![Span::raw("  "), value_span]));
        if field == FormField::Amount {
            lines.push(Line::styled(
                "  Integer only - will be FHE encrypted",
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(""));
    }

    let submit = if state.is_creating {
        Span::styled("Creating...", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            "[Enter] Create Multi-Sig",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
    };
    lines.push(Line::from(vec![
        submit,
        Span::raw("   "),
        Span::styled("[Esc] Cancel", Style::default().fg(Color::Gray)),
    ]));

    let block = Block::default()
        .title("NEW MULTI-SIGNATURE")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

fn detail_line<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

pub fn detail_lines(proposal: &Proposal) -> Vec<Line<'static>> {
    let (status, status_color) = if proposal.is_verified {
        ("Verified", Color::LightGreen)
    } else {
        ("Pending Signatures", Color::LightYellow)
    };
    let created = proposal
        .created_at()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut lines = vec![
        detail_line("Name:", proposal.name.clone(), Color::White),
        detail_line("Status:", status.to_string(), status_color),
        detail_line(
            "Signatures:",
            format!(
                "{}/{}",
                proposal.current_signatures, proposal.required_signatures
            ),
            Color::White,
        ),
        detail_line("Created:", created, Color::White),
        detail_line("Creator:", proposal.creator.clone(), Color::LightBlue),
        detail_line("Id:", proposal.id.clone(), Color::DarkGray),
        Line::from(""),
        Line::styled("Description:", Style::default().fg(Color::Gray)),
        Line::from(proposal.description.clone()),
        Line::from(""),
    ];
    if proposal.is_verified {
        lines.push(detail_line(
            "Amount:",
            proposal.decrypted_value.to_string(),
            Color::LightGreen,
        ));
    } else {
        lines.push(detail_line(
            "Amount:",
            "🔒 FHE encrypted - press [D] to decrypt".to_string(),
            Color::LightMagenta,
        ));
    }
    lines
}

pub fn render_details(f: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(proposal) = state.details_proposal() else {
        return;
    };
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title("MULTI-SIGNATURE DETAILS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));
    f.render_widget(
        Paragraph::new(detail_lines(proposal))
            .block(block)
            .wrap(Wrap { trim: false }),
        popup,
    );
}
