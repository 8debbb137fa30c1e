//! Error handling for the ledger module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The contract rejected a call before anything was mined.
    #[error("Execution reverted: {0}")]
    Execution(String),

    /// A mined transaction reverted.
    #[error("Transaction {hash} reverted: {reason}")]
    Reverted { hash: String, reason: String },

    /// The transaction was still pending after the last status poll.
    #[error("Transaction {hash} not confirmed after {polls} polls")]
    Unconfirmed { hash: String, polls: u32 },

    /// No record or transaction with the given identifier.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl LedgerError {
    pub async fn from_response(response: reqwest::Response) -> LedgerError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        LedgerError::Http { status, message }
    }
}
