//! Failures of user-triggered dashboard actions.
//!
//! The `Display` text of each variant is what the user sees in the
//! notification slot.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    /// No wallet session.
    #[error("Please connect wallet first")]
    NotConnected,

    /// The encryption service failed to start.
    #[error("FHE initialization failed")]
    InitializationFailure(String),

    /// The record enumeration failed.
    #[error("Failed to load data")]
    LoadFailure(String),

    /// The user declined the wallet prompt.
    #[error("Transaction rejected by user")]
    SubmissionRejected,

    /// Any other error while creating a proposal.
    #[error("Submission failed: {0}")]
    SubmissionFailure(String),

    /// Any error while adding a signature.
    #[error("Signing failed")]
    SigningFailure(String),

    /// Any error while decrypting, other than an already verified record.
    #[error("Decryption failed: {0}")]
    DecryptionFailure(String),

    /// The availability probe failed.
    #[error("Availability check failed")]
    AvailabilityFailure(String),
}

impl ActionError {
    /// Underlying detail for logs, where the notification text hides it.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ActionError::InitializationFailure(detail)
            | ActionError::LoadFailure(detail)
            | ActionError::SigningFailure(detail)
            | ActionError::AvailabilityFailure(detail) => Some(detail),
            _ => None,
        }
    }
}
