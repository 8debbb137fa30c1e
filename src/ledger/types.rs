//! Wire types exchanged with the ledger gateway.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Raw fields of one on-chain "business data" record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessData {
    pub name: String,
    pub description: String,
    pub creator: String,
    /// Creation time, seconds since epoch.
    pub timestamp: u64,
    pub public_value1: u64,
    pub public_value2: u64,
    pub is_verified: bool,
    pub decrypted_value: u64,
}

/// Opaque reference to an encrypted value held by the contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CiphertextHandle(pub String);

impl Display for CiphertextHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Arguments of a `createBusinessData` transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessData {
    pub id: String,
    pub name: String,
    /// Encrypted amount produced by the encryption service.
    pub encrypted_data: String,
    /// Input proof accompanying `encrypted_data`.
    pub proof: String,
    pub required_signatures: u32,
    pub initial_value: u32,
    pub description: String,
}

/// A submitted, not yet confirmed, transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTx {
    pub hash: String,
}

/// Confirmation of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub hash: String,
    pub block_number: u64,
}
