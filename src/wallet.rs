//! Wallet session supplied by the wallet-connection collaborator.

use crate::keys::{is_valid_eth_address, short_address};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error(
        "Invalid wallet address: {0}. It should be a 42-character hex string starting with '0x'."
    )]
    InvalidAddress(String),
}

/// An active wallet connection. Its absence means "disconnected".
///
/// `connection` tells apart successive connections of the same address, so
/// work started under one connection can be recognised after it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSession {
    address: String,
    connection: u64,
}

impl WalletSession {
    pub fn connect(address: &str) -> Result<Self, WalletError> {
        if !is_valid_eth_address(address) {
            return Err(WalletError::InvalidAddress(address.to_string()));
        }
        Ok(Self {
            address: address.to_string(),
            connection: 0,
        })
    }

    pub fn with_connection(self, connection: u64) -> Self {
        Self { connection, ..self }
    }

    pub fn connection(&self) -> u64 {
        self.connection
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn short_address(&self) -> String {
        short_address(&self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_validates_the_address() {
        let session = WalletSession::connect("0xde709f2102306220921060314715629080e2fb77").unwrap();
        assert_eq!(session.address(), "0xde709f2102306220921060314715629080e2fb77");
        assert_eq!(
            WalletSession::connect("0x1234"),
            Err(WalletError::InvalidAddress("0x1234".to_string()))
        );
    }

    #[test]
    fn reconnecting_yields_a_distinct_session() {
        let first = WalletSession::connect("0xde709f2102306220921060314715629080e2fb77")
            .unwrap()
            .with_connection(1);
        let second = first.clone().with_connection(2);
        assert_eq!(first.address(), second.address());
        assert_ne!(first, second);
        assert_eq!(second.connection(), 2);
    }
}
