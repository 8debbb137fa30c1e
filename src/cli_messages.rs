//! CLI command messaging
//!
//! Consistent console output for the one-shot commands: wallet connection,
//! headless operations and their notifications.

use crate::notification::{Notification, NotificationStatus};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
    Success,
}

impl MessageKind {
    fn label(self) -> &'static str {
        match self {
            MessageKind::Info => "\x1b[1;33m[INFO]\x1b[0m",
            MessageKind::Error => "\x1b[1;31m[ERROR]\x1b[0m",
            MessageKind::Success => "\x1b[1;32m[SUCCESS]\x1b[0m",
        }
    }
}

impl From<NotificationStatus> for MessageKind {
    fn from(status: NotificationStatus) -> Self {
        match status {
            NotificationStatus::Pending => MessageKind::Info,
            NotificationStatus::Success => MessageKind::Success,
            NotificationStatus::Error => MessageKind::Error,
        }
    }
}

/// One console line: label, title and optional tab-separated details.
pub fn format_message(kind: MessageKind, title: &str, details: &str) -> String {
    if details.is_empty() {
        format!("{} {}", kind.label(), title)
    } else {
        format!("{} {}\t {}", kind.label(), title, details)
    }
}

pub fn print_info(title: &str, details: &str) {
    println!("{}", format_message(MessageKind::Info, title, details));
}

/// Errors go to stderr so they never mix with command output.
pub fn print_error(title: &str) {
    eprintln!("{}", format_message(MessageKind::Error, title, ""));
}

pub fn print_success(title: &str, details: &str) {
    println!("{}", format_message(MessageKind::Success, title, details));
}

/// Prints a dashboard notification the way its status reads.
pub fn print_notification(notification: &Notification) {
    match MessageKind::from(notification.status) {
        MessageKind::Error => print_error(&notification.message),
        kind => println!("{}", format_message(kind, &notification.message, "")),
    }
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_are_tab_separated() {
        let line = format_message(MessageKind::Success, "Connected", "0xabc");
        assert!(line.ends_with("Connected\t 0xabc"));
        assert_eq!(
            format_message(MessageKind::Info, "Waiting", ""),
            format!("{} Waiting", MessageKind::Info.label())
        );
    }

    #[test]
    fn pending_notifications_read_as_info() {
        assert_eq!(
            MessageKind::from(NotificationStatus::Pending),
            MessageKind::Info
        );
        assert_eq!(
            MessageKind::from(NotificationStatus::Error),
            MessageKind::Error
        );
    }
}
