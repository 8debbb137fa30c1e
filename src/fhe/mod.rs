//! Encryption service collaborator
//!
//! Wraps the FHE SDK: encrypting user inputs bound to a contract and caller,
//! and the public decryption flow whose proof is verified on-chain.

use crate::fhe::error::EncryptionError;
use crate::ledger::error::LedgerError;
use crate::ledger::types::CiphertextHandle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;

pub(crate) mod client;
pub use client::RelayerClient;
pub mod error;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// An encrypted input ready to be handed to the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedInput {
    pub encrypted_data: String,
    pub proof: String,
}

/// Clear values for a set of handles, with the proof the contract checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptionBundle {
    pub clear_values: BTreeMap<CiphertextHandle, u64>,
    pub abi_encoded_clear_values: String,
    pub decryption_proof: String,
}

/// Outcome of a verified decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptionResult {
    pub clear_values: BTreeMap<CiphertextHandle, u64>,
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait EncryptionService: Send + Sync {
    /// Loads key material. Idempotent once it has succeeded.
    async fn initialize(&self) -> Result<(), EncryptionError>;

    /// Encrypts `value` for use by `contract_address` on behalf of `caller_address`.
    async fn encrypt(
        &self,
        contract_address: &str,
        caller_address: &str,
        value: u64,
    ) -> Result<EncryptedInput, EncryptionError>;

    /// Requests the clear values of publicly decryptable handles.
    async fn public_decrypt(
        &self,
        handles: &[CiphertextHandle],
        contract_address: &str,
    ) -> Result<DecryptionBundle, EncryptionError>;
}

/// Decrypts `handles` and hands the clear values and proof to `submit`, which
/// is expected to write them to the contract. Resolves with the clear values
/// once the submission succeeded.
pub async fn verify_decryption<S, F, Fut>(
    service: &S,
    handles: &[CiphertextHandle],
    contract_address: &str,
    submit: F,
) -> Result<DecryptionResult, EncryptionError>
where
    S: EncryptionService + ?Sized,
    F: FnOnce(String, String) -> Fut,
    Fut: Future<Output = Result<(), LedgerError>>,
{
    let bundle = service.public_decrypt(handles, contract_address).await?;
    if let Some(missing) = handles
        .iter()
        .find(|handle| !bundle.clear_values.contains_key(*handle))
    {
        return Err(EncryptionError::MissingClearValue(missing.clone()));
    }

    submit(bundle.abi_encoded_clear_values, bundle.decryption_proof).await?;

    Ok(DecryptionResult {
        clear_values: bundle.clear_values,
    })
}

/// ABI encoding of unsigned clear values: one 32-byte big-endian word each.
pub fn abi_encode_clear_values(values: &[u64]) -> String {
    let words: String = values.iter().map(|value| format!("{:064x}", value)).collect();
    format!("0x{}", words)
}

/// Inverse of [`abi_encode_clear_values`]. Words wider than 64 bits are rejected.
pub fn abi_decode_clear_values(encoded: &str) -> Option<Vec<u64>> {
    let hex = encoded.strip_prefix("0x")?;
    if hex.len() % 64 != 0 {
        return None;
    }
    (0..hex.len() / 64)
        .map(|i| {
            let word = hex.get(i * 64..(i + 1) * 64)?;
            let (high, low) = word.split_at(48);
            if high.chars().any(|c| c != '0') {
                return None;
            }
            u64::from_str_radix(low, 16).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    fn bundle(handle: &CiphertextHandle, value: u64) -> DecryptionBundle {
        DecryptionBundle {
            clear_values: BTreeMap::from([(handle.clone(), value)]),
            abi_encoded_clear_values: abi_encode_clear_values(&[value]),
            decryption_proof: "0xproof".to_string(),
        }
    }

    #[tokio::test]
    async fn test_verify_decryption_submits_then_returns_values() {
        let handle = CiphertextHandle("0x01".to_string());
        let mut service = MockEncryptionService::new();
        let returned = bundle(&handle, 100);
        service
            .expect_public_decrypt()
            .times(1)
            .returning(move |_, _| Ok(returned.clone()));

        let submitted = Arc::new(AtomicBool::new(false));
        let flag = submitted.clone();
        let result = verify_decryption(&service, &[handle.clone()], CONTRACT, |clear, proof| {
            async move {
                assert_eq!(clear, abi_encode_clear_values(&[100]));
                assert_eq!(proof, "0xproof");
                flag.store(true, Ordering::SeqCst);
                Ok::<(), LedgerError>(())
            }
        })
        .await
        .unwrap();

        assert!(submitted.load(Ordering::SeqCst));
        assert_eq!(result.clear_values.get(&handle), Some(&100));
    }

    #[tokio::test]
    async fn test_verify_decryption_propagates_submission_error() {
        let handle = CiphertextHandle("0x01".to_string());
        let mut service = MockEncryptionService::new();
        let returned = bundle(&handle, 7);
        service
            .expect_public_decrypt()
            .returning(move |_, _| Ok(returned.clone()));

        let err = verify_decryption(&service, &[handle], CONTRACT, |_, _| async {
            Err::<(), _>(LedgerError::Execution("Data already verified".to_string()))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, EncryptionError::Submission(_)));
        assert!(err.to_string().contains("Data already verified"));
    }

    #[tokio::test]
    async fn test_verify_decryption_requires_every_handle() {
        let requested = CiphertextHandle("0x02".to_string());
        let mut service = MockEncryptionService::new();
        let returned = bundle(&CiphertextHandle("0x01".to_string()), 7);
        service
            .expect_public_decrypt()
            .returning(move |_, _| Ok(returned.clone()));

        let err = verify_decryption(&service, &[requested.clone()], CONTRACT, |_, _| async {
            Err::<(), _>(LedgerError::Execution("unexpected submission".to_string()))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, EncryptionError::MissingClearValue(h) if h == requested));
    }

    #[test]
    fn test_abi_encoding_pads_words() {
        let encoded = abi_encode_clear_values(&[100, 1]);
        assert_eq!(encoded.len(), 2 + 128);
        assert!(encoded.ends_with("0000000000000001"));
        assert_eq!(abi_decode_clear_values(&encoded), Some(vec![100, 1]));
        assert_eq!(abi_decode_clear_values("0x1234"), None);
        assert_eq!(abi_decode_clear_values(&format!("0x{}", "f".repeat(64))), None);
    }
}
