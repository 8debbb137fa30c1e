//! Unified messaging system for session operations

use crate::environment::Environment;

// ANSI Color Codes for session messages
pub const COLOR_INFO: &str = "\x1b[1;36m"; // Bold Cyan
pub const COLOR_SUCCESS: &str = "\x1b[1;32m"; // Bold Green
pub const COLOR_RESET: &str = "\x1b[0m";

/// Session-specific message types
#[derive(Debug, Clone)]
pub enum SessionMessage {
    Info(String),
    Success(String),
}

impl SessionMessage {
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    pub fn print(&self) {
        match self {
            Self::Info(msg) => {
                println!("{}[INFO]{} {}", COLOR_INFO, COLOR_RESET, msg);
            }
            Self::Success(msg) => {
                println!("{}[SUCCESS]{} {}", COLOR_SUCCESS, COLOR_RESET, msg);
            }
        }
    }
}

fn starting_message(mode: &str, environment: Environment, wallet: Option<&str>) -> String {
    match wallet {
        Some(address) => format!(
            "Starting {} mode on {} with wallet {}",
            mode,
            environment,
            crate::keys::short_address(address)
        ),
        None => format!("Starting {} mode on {} without a wallet", mode, environment),
    }
}

pub fn print_session_starting(mode: &str, environment: Environment, wallet: Option<&str>) {
    SessionMessage::info(starting_message(mode, environment, wallet)).print();
}

pub fn print_session_shutdown() {
    SessionMessage::info("Shutting down...").print();
}

pub fn print_session_exit_success() {
    SessionMessage::success("FHE Multi-Sig dashboard exited successfully").print();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_message_names_the_wallet() {
        let msg = starting_message(
            "TUI",
            Environment::Sandbox,
            Some("0xde709f2102306220921060314715629080e2fb77"),
        );
        assert_eq!(msg, "Starting TUI mode on Sandbox with wallet 0xde70…2fb77");
        assert!(starting_message("headless", Environment::Local, None).ends_with("without a wallet"));
    }
}
