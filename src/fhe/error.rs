//! Error handling for the encryption service

use crate::ledger::error::LedgerError;
use crate::ledger::types::CiphertextHandle;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncryptionError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The relayer answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// `encrypt` or `public_decrypt` was called before `initialize` succeeded.
    #[error("Encryption service is not initialized")]
    NotInitialized,

    /// The relayer answered with something we cannot use.
    #[error("Malformed relayer response: {0}")]
    MalformedResponse(String),

    /// A requested handle is missing from the decryption result.
    #[error("No clear value returned for handle {0}")]
    MissingClearValue(CiphertextHandle),

    /// The on-chain submission of a decryption proof failed.
    #[error("{0}")]
    Submission(#[from] LedgerError),
}

impl EncryptionError {
    pub async fn from_response(response: reqwest::Response) -> EncryptionError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        EncryptionError::Http { status, message }
    }
}
