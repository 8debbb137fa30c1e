//! Event System
//!
//! Activity records produced by controller actions and shown in the dashboard
//! activity log or printed by headless commands.

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

/// The part of the controller an event originates from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    Wallet,
    Encryption,
    Loader,
    Creator,
    Signer,
    Decryptor,
    Probe,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn success(source: Source, msg: impl Into<String>) -> Self {
        Self::new(source, msg.into(), EventType::Success, LogLevel::Info)
    }

    pub fn error(source: Source, msg: impl Into<String>, log_level: LogLevel) -> Self {
        Self::new(source, msg.into(), EventType::Error, log_level)
    }

    pub fn refresh(source: Source, msg: impl Into<String>) -> Self {
        Self::new(source, msg.into(), EventType::Refresh, LogLevel::Debug)
    }

    pub fn waiting(source: Source, msg: impl Into<String>) -> Self {
        Self::new(source, msg.into(), EventType::Waiting, LogLevel::Info)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.source, self.msg
        )
    }
}
