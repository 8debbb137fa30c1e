//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Source;
use crate::notification::NotificationStatus;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Color;

const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Get a ratatui color for an activity source
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Wallet => Color::LightBlue,
        Source::Encryption => Color::Magenta,
        Source::Loader => Color::Cyan,
        Source::Creator => Color::Green,
        Source::Signer => Color::Yellow,
        Source::Decryptor => Color::LightMagenta,
        Source::Probe => Color::Gray,
    }
}

pub fn notification_color(status: NotificationStatus) -> Color {
    match status {
        NotificationStatus::Pending => Color::LightYellow,
        NotificationStatus::Success => Color::LightGreen,
        NotificationStatus::Error => Color::LightRed,
    }
}

pub fn spinner(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("error sending request") || msg.contains("ConnectTimeout") {
        return "Gateway unreachable".to_string();
    }
    if msg.contains("operation timed out") || msg.contains("TimedOut") {
        return "Request timed out".to_string();
    }
    msg.to_string()
}

/// A rectangle of the given percentage size centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_timestamp() {
        assert_eq!(format_compact_timestamp("2025-06-01 14:03:59"), "06-01 14:03");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 50, area);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 20);
        assert_eq!(rect.x, 20);
    }
}
