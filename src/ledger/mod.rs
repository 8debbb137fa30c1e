//! Ledger collaborator
//!
//! The contract holding the authoritative proposal records. The dashboard
//! treats it as a remote service: reads are free, writes are bound to the
//! signing wallet and return a pending transaction that has to be confirmed.

use crate::ledger::error::LedgerError;
use crate::ledger::types::{
    BusinessData, CiphertextHandle, CreateBusinessData, PendingTx, Receipt,
};

pub(crate) mod client;
pub use client::GatewayClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::{automock, predicate::*};

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Ledger: Send + Sync {
    /// Address of the multi-signature contract.
    fn contract_address(&self) -> String;

    /// Every record identifier, in the contract's enumeration order.
    async fn get_all_business_ids(&self) -> Result<Vec<String>, LedgerError>;

    /// Fields of a single record.
    async fn get_business_data(&self, id: &str) -> Result<BusinessData, LedgerError>;

    /// Submits a new record on behalf of `signer`.
    async fn create_business_data(
        &self,
        signer: &str,
        request: CreateBusinessData,
    ) -> Result<PendingTx, LedgerError>;

    /// Generic key/value update on a record, used for signatures.
    async fn set_data(
        &self,
        signer: &str,
        id: &str,
        key: &str,
        value: u64,
    ) -> Result<PendingTx, LedgerError>;

    /// Ciphertext handle of the record's encrypted amount.
    async fn get_encrypted_value(&self, id: &str) -> Result<CiphertextHandle, LedgerError>;

    /// Submits clear values and their decryption proof for verification.
    async fn verify_decryption(
        &self,
        signer: &str,
        id: &str,
        abi_encoded_clear_values: &str,
        decryption_proof: &str,
    ) -> Result<PendingTx, LedgerError>;

    /// Contract-level availability flag.
    async fn is_available(&self) -> Result<bool, LedgerError>;

    /// Waits until a submitted transaction is mined.
    async fn confirm(&self, tx: &PendingTx) -> Result<Receipt, LedgerError>;
}
