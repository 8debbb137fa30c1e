//! Transient notification banner

use super::super::state::DashboardState;
use super::super::utils::{notification_color, spinner};
use crate::notification::NotificationStatus;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::widgets::Paragraph;

pub fn render_notification(f: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(notification) = state.notification.current() else {
        return;
    };
    let icon = match notification.status {
        NotificationStatus::Pending => spinner(state.tick),
        NotificationStatus::Success => "✓",
        NotificationStatus::Error => "✗",
    };
    let banner = Paragraph::new(format!("{} {}", icon, notification.message))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(notification_color(notification.status))
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(banner, area);
}
