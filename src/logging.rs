//! Display threshold for activity events, taken from `RUST_LOG`.

use std::env;

/// Target name matched against `RUST_LOG` directives.
const CRATE_TARGET: &str = "fhe_multisig";

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, strum::Display)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

pub fn get_rust_log_level() -> LogLevel {
    env::var("RUST_LOG")
        .map(|value| parse_rust_log_level(&value))
        .unwrap_or(LogLevel::Info)
}

/// Resolves a `RUST_LOG` value to a threshold for this crate.
///
/// A `fhe_multisig=<level>` directive wins over a bare `<level>`; anything
/// unparseable falls back to info.
pub fn parse_rust_log_level(rust_log: &str) -> LogLevel {
    let mut bare = None;
    for directive in rust_log.split(',') {
        match directive.split_once('=') {
            Some((target, level)) if target.trim() == CRATE_TARGET => {
                if let Some(level) = LogLevel::from_name(level) {
                    return level;
                }
            }
            Some(_) => {}
            None => bare = bare.or(LogLevel::from_name(directive)),
        }
    }
    bare.unwrap_or(LogLevel::Info)
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    should_log(event_level, get_rust_log_level())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_levels() {
        assert_eq!(parse_rust_log_level("debug"), LogLevel::Debug);
        assert_eq!(parse_rust_log_level("WARNING"), LogLevel::Warn);
        assert_eq!(parse_rust_log_level("trace"), LogLevel::Trace);
        assert_eq!(parse_rust_log_level("invalid"), LogLevel::Info);
        assert_eq!(parse_rust_log_level(""), LogLevel::Info);
    }

    #[test]
    fn test_crate_directive_wins() {
        assert_eq!(
            parse_rust_log_level("error,fhe_multisig=debug"),
            LogLevel::Debug
        );
        assert_eq!(parse_rust_log_level("reqwest=trace,warn"), LogLevel::Warn);
        // Other targets alone do not lower the threshold
        assert_eq!(parse_rust_log_level("reqwest=trace"), LogLevel::Info);
    }

    #[test]
    fn test_should_log() {
        assert!(should_log(LogLevel::Error, LogLevel::Debug));
        assert!(should_log(LogLevel::Warn, LogLevel::Warn));
        assert!(!should_log(LogLevel::Debug, LogLevel::Error));
    }
}
