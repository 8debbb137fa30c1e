use crate::consts::cli_consts::error_markers::{ALREADY_VERIFIED, USER_REJECTED};
use crate::controller::error::ActionError;
use crate::fhe::error::EncryptionError;
use crate::ledger::error::LedgerError;
use crate::logging::LogLevel;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_ledger_error(&self, error: &LedgerError) -> LogLevel {
        match error {
            // Non-critical: Temporary gateway issues
            LedgerError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            LedgerError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: Auth
            LedgerError::Http { status, .. } if *status == 401 => LogLevel::Error,
            LedgerError::Http { status, .. } if *status == 403 => LogLevel::Error,

            // The contract refused the transaction
            LedgerError::Reverted { .. } => LogLevel::Error,

            // Network issues, missing records - usually temporary
            _ => LogLevel::Warn,
        }
    }

    pub fn classify_encryption_error(&self, error: &EncryptionError) -> LogLevel {
        match error {
            EncryptionError::Submission(inner) => self.classify_ledger_error(inner),
            EncryptionError::NotInitialized => LogLevel::Error,
            EncryptionError::MalformedResponse(_) => LogLevel::Error,
            EncryptionError::MissingClearValue(_) => LogLevel::Error,
            _ => LogLevel::Warn,
        }
    }

    pub fn classify_action_error(&self, error: &ActionError) -> LogLevel {
        match error {
            // The user chose this
            ActionError::SubmissionRejected => LogLevel::Info,
            ActionError::NotConnected => LogLevel::Warn,
            ActionError::LoadFailure(_) => LogLevel::Warn,
            ActionError::AvailabilityFailure(_) => LogLevel::Warn,
            ActionError::InitializationFailure(_) => LogLevel::Error,
            ActionError::SubmissionFailure(_) => LogLevel::Error,
            ActionError::SigningFailure(_) => LogLevel::Error,
            ActionError::DecryptionFailure(_) => LogLevel::Error,
        }
    }

    /// Maps a failed creation to the rejection or the generic failure.
    pub fn classify_submission(&self, message: &str) -> ActionError {
        if Self::is_user_rejection(message) {
            ActionError::SubmissionRejected
        } else {
            ActionError::SubmissionFailure(Self::message_or_unknown(message))
        }
    }

    pub fn is_user_rejection(message: &str) -> bool {
        message.contains(USER_REJECTED)
    }

    pub fn is_already_verified(message: &str) -> bool {
        message.contains(ALREADY_VERIFIED)
    }

    pub fn message_or_unknown(message: &str) -> String {
        if message.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            message.to_string()
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
