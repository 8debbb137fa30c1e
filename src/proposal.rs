//! Client-side projection of on-chain proposal records.

use crate::consts::cli_consts::{DEFAULT_REQUIRED_SIGNATURES, PROPOSAL_ID_PREFIX};
use crate::ledger::types::BusinessData;
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

/// A multi-signature proposal as displayed by the dashboard.
///
/// Rebuilt from the ledger on every load and never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: String,
    pub name: String,
    /// Currently the record identifier; the ciphertext is fetched on demand.
    pub encrypted_amount: String,
    pub public_value1: u64,
    pub public_value2: u64,
    pub description: String,
    pub creator: String,
    pub timestamp: u64,
    pub is_verified: bool,
    pub decrypted_value: u64,
    pub required_signatures: u64,
    pub current_signatures: u64,
    pub signers: Vec<String>,
}

impl Proposal {
    /// Projects a ledger record onto the dashboard model.
    pub fn from_record(id: &str, data: BusinessData) -> Self {
        let required_signatures = match data.public_value1 {
            0 => u64::from(DEFAULT_REQUIRED_SIGNATURES),
            n => n,
        };
        Self {
            id: id.to_string(),
            name: data.name,
            encrypted_amount: id.to_string(),
            public_value1: data.public_value1,
            public_value2: data.public_value2,
            description: data.description,
            signers: vec![data.creator.clone()],
            creator: data.creator,
            timestamp: data.timestamp,
            is_verified: data.is_verified,
            decrypted_value: data.decrypted_value,
            required_signatures,
            current_signatures: data.public_value2,
        }
    }

    /// Whether more signatures are needed to reach the threshold.
    pub fn is_waiting(&self) -> bool {
        self.current_signatures < self.required_signatures
    }

    pub fn created_at(&self) -> Option<DateTime<Local>> {
        let secs = i64::try_from(self.timestamp).ok()?;
        Local.timestamp_opt(secs, 0).single()
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_verified { "Verified" } else { "Pending" }
    }
}

/// Identifier for a proposal created at `timestamp_ms`.
pub fn new_proposal_id(timestamp_ms: i64) -> String {
    format!("{}{}", PROPOSAL_ID_PREFIX, timestamp_ms)
}
