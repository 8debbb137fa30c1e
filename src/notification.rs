//! Transient status notifications.
//!
//! The dashboard has a single notification slot: showing a new notification
//! replaces the visible one, and success and error notifications dismiss
//! themselves after a fixed delay. Pending notifications stay until replaced.

use crate::consts::cli_consts::notifications::{error_display, success_display};
use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum NotificationStatus {
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub status: NotificationStatus,
    pub message: String,
}

impl Notification {
    pub fn pending(message: impl Into<String>) -> Self {
        Self {
            status: NotificationStatus::Pending,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: NotificationStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: NotificationStatus::Error,
            message: message.into(),
        }
    }

    /// How long the notification stays visible, `None` for "until replaced".
    pub fn lifetime(&self) -> Option<Duration> {
        match self.status {
            NotificationStatus::Pending => None,
            NotificationStatus::Success => Some(success_display()),
            NotificationStatus::Error => Some(error_display()),
        }
    }
}

#[derive(Debug, Default)]
pub struct NotificationSlot {
    current: Option<(Notification, Instant)>,
}

impl NotificationSlot {
    /// Shows a notification, pre-empting the visible one.
    pub fn show(&mut self, notification: Notification, now: Instant) {
        self.current = Some((notification, now));
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(notification, _)| notification)
    }

    /// Dismisses the visible notification once its lifetime has elapsed.
    pub fn expire(&mut self, now: Instant) {
        let expired = match &self.current {
            Some((notification, shown_at)) => notification
                .lifetime()
                .is_some_and(|lifetime| now.saturating_duration_since(*shown_at) >= lifetime),
            None => false,
        };
        if expired {
            self.current = None;
        }
    }
}
