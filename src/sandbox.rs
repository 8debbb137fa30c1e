//! Sandbox collaborators
//!
//! An in-process ledger and encryption service sharing one vault, for use
//! without a gateway or relayer. Records keep their insertion order, every
//! write is mined immediately, and the contract rules the dashboard relies on
//! are reproduced: input proofs are bound to the caller, signing counts each
//! signer once, and a record can be verified only once.

use crate::consts::cli_consts::SIGNED_KEY;
use crate::fhe::error::EncryptionError;
use crate::fhe::{
    DecryptionBundle, EncryptedInput, EncryptionService, abi_decode_clear_values,
    abi_encode_clear_values,
};
use crate::ledger::Ledger;
use crate::ledger::error::LedgerError;
use crate::ledger::types::{
    BusinessData, CiphertextHandle, CreateBusinessData, PendingTx, Receipt,
};
use sha3::{Digest, Keccak256};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Contract address reported by the sandbox ledger.
pub const SANDBOX_CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

fn keccak_hex(parts: &[&[u8]]) -> String {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let hex: String = digest.iter().map(|byte| format!("{:02x}", byte)).collect();
    format!("0x{}", hex)
}

#[derive(Debug)]
struct EncryptedEntry {
    value: u64,
    caller: String,
    proof: String,
}

#[derive(Debug)]
struct Record {
    data: BusinessData,
    handle: CiphertextHandle,
    signers: BTreeSet<String>,
    extra: BTreeMap<String, u64>,
}

#[derive(Debug, Default)]
struct Vault {
    records: Vec<(String, Record)>,
    ciphertexts: HashMap<CiphertextHandle, EncryptedEntry>,
    receipts: HashMap<String, Receipt>,
    block_number: u64,
    nonce: u64,
}

impl Vault {
    fn record_mut(&mut self, id: &str) -> Result<&mut Record, LedgerError> {
        self.records
            .iter_mut()
            .find(|(record_id, _)| record_id == id)
            .map(|(_, record)| record)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    fn record(&self, id: &str) -> Result<&Record, LedgerError> {
        self.records
            .iter()
            .find(|(record_id, _)| record_id == id)
            .map(|(_, record)| record)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    /// Mines a transaction immediately and returns its pending handle.
    fn mine(&mut self, signer: &str) -> PendingTx {
        self.nonce += 1;
        self.block_number += 1;
        let hash = keccak_hex(&[signer.as_bytes(), &self.nonce.to_be_bytes()]);
        self.receipts.insert(
            hash.clone(),
            Receipt {
                hash: hash.clone(),
                block_number: self.block_number,
            },
        );
        PendingTx { hash }
    }
}

type SharedVault = Arc<Mutex<Vault>>;

fn lock(vault: &SharedVault) -> MutexGuard<'_, Vault> {
    vault.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Creates a ledger and an encryption service sharing the same vault.
pub fn sandbox() -> (SandboxLedger, SandboxEncryption) {
    let vault = SharedVault::default();
    (
        SandboxLedger {
            vault: vault.clone(),
        },
        SandboxEncryption {
            vault,
            initialized: AtomicBool::new(false),
        },
    )
}

#[derive(Debug, Clone)]
pub struct SandboxLedger {
    vault: SharedVault,
}

#[async_trait::async_trait]
impl Ledger for SandboxLedger {
    fn contract_address(&self) -> String {
        SANDBOX_CONTRACT_ADDRESS.to_string()
    }

    async fn get_all_business_ids(&self) -> Result<Vec<String>, LedgerError> {
        let vault = lock(&self.vault);
        Ok(vault.records.iter().map(|(id, _)| id.clone()).collect())
    }

    async fn get_business_data(&self, id: &str) -> Result<BusinessData, LedgerError> {
        let vault = lock(&self.vault);
        Ok(vault.record(id)?.data.clone())
    }

    async fn create_business_data(
        &self,
        signer: &str,
        request: CreateBusinessData,
    ) -> Result<PendingTx, LedgerError> {
        let mut vault = lock(&self.vault);
        if vault.record(&request.id).is_ok() {
            return Err(LedgerError::Execution(
                "Business data already exists".to_string(),
            ));
        }
        let handle = CiphertextHandle(request.encrypted_data.clone());
        let valid_input = vault
            .ciphertexts
            .get(&handle)
            .is_some_and(|entry| entry.caller == signer && entry.proof == request.proof);
        if !valid_input {
            return Err(LedgerError::Execution("Invalid input proof".to_string()));
        }

        let record = Record {
            data: BusinessData {
                name: request.name,
                description: request.description,
                creator: signer.to_string(),
                timestamp: chrono::Utc::now().timestamp().max(0) as u64,
                public_value1: u64::from(request.required_signatures),
                public_value2: u64::from(request.initial_value),
                is_verified: false,
                decrypted_value: 0,
            },
            handle,
            signers: BTreeSet::new(),
            extra: BTreeMap::new(),
        };
        vault.records.push((request.id, record));
        Ok(vault.mine(signer))
    }

    async fn set_data(
        &self,
        signer: &str,
        id: &str,
        key: &str,
        value: u64,
    ) -> Result<PendingTx, LedgerError> {
        let mut vault = lock(&self.vault);
        let record = vault.record_mut(id)?;
        if key == SIGNED_KEY {
            if !record.signers.insert(signer.to_ascii_lowercase()) {
                return Err(LedgerError::Execution("Signer already signed".to_string()));
            }
            record.data.public_value2 += 1;
        } else {
            record.extra.insert(key.to_string(), value);
        }
        Ok(vault.mine(signer))
    }

    async fn get_encrypted_value(&self, id: &str) -> Result<CiphertextHandle, LedgerError> {
        let vault = lock(&self.vault);
        Ok(vault.record(id)?.handle.clone())
    }

    async fn verify_decryption(
        &self,
        signer: &str,
        id: &str,
        abi_encoded_clear_values: &str,
        decryption_proof: &str,
    ) -> Result<PendingTx, LedgerError> {
        let mut vault = lock(&self.vault);
        let (handle, verified) = {
            let record = vault.record(id)?;
            (record.handle.clone(), record.data.is_verified)
        };
        if verified {
            return Err(LedgerError::Execution("Data already verified".to_string()));
        }
        if keccak_hex(&[abi_encoded_clear_values.as_bytes()]) != decryption_proof {
            return Err(LedgerError::Execution("Invalid decryption proof".to_string()));
        }
        let clear_value = abi_decode_clear_values(abi_encoded_clear_values)
            .and_then(|values| values.first().copied())
            .ok_or_else(|| LedgerError::Execution("Malformed clear values".to_string()))?;
        let expected = vault.ciphertexts.get(&handle).map(|entry| entry.value);
        if expected != Some(clear_value) {
            return Err(LedgerError::Execution("Clear value mismatch".to_string()));
        }

        let record = vault.record_mut(id)?;
        record.data.is_verified = true;
        record.data.decrypted_value = clear_value;
        Ok(vault.mine(signer))
    }

    async fn is_available(&self) -> Result<bool, LedgerError> {
        Ok(true)
    }

    async fn confirm(&self, tx: &PendingTx) -> Result<Receipt, LedgerError> {
        let vault = lock(&self.vault);
        vault
            .receipts
            .get(&tx.hash)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(tx.hash.clone()))
    }
}

#[derive(Debug)]
pub struct SandboxEncryption {
    vault: SharedVault,
    initialized: AtomicBool,
}

impl SandboxEncryption {
    fn ensure_initialized(&self) -> Result<(), EncryptionError> {
        if self.initialized.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(EncryptionError::NotInitialized)
        }
    }
}

#[async_trait::async_trait]
impl EncryptionService for SandboxEncryption {
    async fn initialize(&self) -> Result<(), EncryptionError> {
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn encrypt(
        &self,
        contract_address: &str,
        caller_address: &str,
        value: u64,
    ) -> Result<EncryptedInput, EncryptionError> {
        self.ensure_initialized()?;
        let salt: u64 = rand::random();
        let handle = keccak_hex(&[
            contract_address.as_bytes(),
            caller_address.as_bytes(),
            &value.to_be_bytes(),
            &salt.to_be_bytes(),
        ]);
        let proof = keccak_hex(&[handle.as_bytes(), caller_address.as_bytes()]);

        let mut vault = lock(&self.vault);
        vault.ciphertexts.insert(
            CiphertextHandle(handle.clone()),
            EncryptedEntry {
                value,
                caller: caller_address.to_string(),
                proof: proof.clone(),
            },
        );
        Ok(EncryptedInput {
            encrypted_data: handle,
            proof,
        })
    }

    async fn public_decrypt(
        &self,
        handles: &[CiphertextHandle],
        _contract_address: &str,
    ) -> Result<DecryptionBundle, EncryptionError> {
        self.ensure_initialized()?;
        let vault = lock(&self.vault);
        let mut clear_values = BTreeMap::new();
        let mut ordered = Vec::with_capacity(handles.len());
        for handle in handles {
            let entry = vault
                .ciphertexts
                .get(handle)
                .ok_or_else(|| EncryptionError::MissingClearValue(handle.clone()))?;
            clear_values.insert(handle.clone(), entry.value);
            ordered.push(entry.value);
        }
        let abi_encoded_clear_values = abi_encode_clear_values(&ordered);
        let decryption_proof = keccak_hex(&[abi_encoded_clear_values.as_bytes()]);
        Ok(DecryptionBundle {
            clear_values,
            abi_encoded_clear_values,
            decryption_proof,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fhe::verify_decryption;

    const ALICE: &str = "0xde709f2102306220921060314715629080e2fb77";
    const BOB: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";

    async fn create(ledger: &SandboxLedger, fhe: &SandboxEncryption, id: &str, amount: u64) {
        let input = fhe
            .encrypt(SANDBOX_CONTRACT_ADDRESS, ALICE, amount)
            .await
            .unwrap();
        let tx = ledger
            .create_business_data(
                ALICE,
                CreateBusinessData {
                    id: id.to_string(),
                    name: format!("Proposal {}", id),
                    encrypted_data: input.encrypted_data,
                    proof: input.proof,
                    required_signatures: 2,
                    initial_value: 0,
                    description: "sandbox".to_string(),
                },
            )
            .await
            .unwrap();
        ledger.confirm(&tx).await.unwrap();
    }

    #[tokio::test]
    async fn records_keep_insertion_order() {
        let (ledger, fhe) = sandbox();
        fhe.initialize().await.unwrap();
        create(&ledger, &fhe, "multisig-2", 5).await;
        create(&ledger, &fhe, "multisig-1", 6).await;

        assert_eq!(
            ledger.get_all_business_ids().await.unwrap(),
            vec!["multisig-2".to_string(), "multisig-1".to_string()]
        );
        let data = ledger.get_business_data("multisig-1").await.unwrap();
        assert_eq!(data.creator, ALICE);
        assert_eq!(data.public_value1, 2);
    }

    #[tokio::test]
    async fn encryption_requires_initialization() {
        let (_, fhe) = sandbox();
        let err = fhe
            .encrypt(SANDBOX_CONTRACT_ADDRESS, ALICE, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, EncryptionError::NotInitialized));
    }

    #[tokio::test]
    async fn input_proofs_are_bound_to_the_caller() {
        let (ledger, fhe) = sandbox();
        fhe.initialize().await.unwrap();
        let input = fhe
            .encrypt(SANDBOX_CONTRACT_ADDRESS, ALICE, 10)
            .await
            .unwrap();
        let err = ledger
            .create_business_data(
                BOB,
                CreateBusinessData {
                    id: "multisig-1".to_string(),
                    name: "stolen".to_string(),
                    encrypted_data: input.encrypted_data,
                    proof: input.proof,
                    required_signatures: 2,
                    initial_value: 0,
                    description: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid input proof"));
    }

    #[tokio::test]
    async fn each_signer_counts_once() {
        let (ledger, fhe) = sandbox();
        fhe.initialize().await.unwrap();
        create(&ledger, &fhe, "multisig-1", 5).await;

        ledger.set_data(BOB, "multisig-1", "signed", 1).await.unwrap();
        assert!(ledger.set_data(BOB, "multisig-1", "signed", 1).await.is_err());
        ledger
            .set_data(ALICE, "multisig-1", "signed", 1)
            .await
            .unwrap();

        let data = ledger.get_business_data("multisig-1").await.unwrap();
        assert_eq!(data.public_value2, 2);
    }

    #[tokio::test]
    async fn decryption_verifies_once() {
        let (ledger, fhe) = sandbox();
        fhe.initialize().await.unwrap();
        create(&ledger, &fhe, "multisig-1", 100).await;
        let handle = ledger.get_encrypted_value("multisig-1").await.unwrap();

        let submit = |clear: String, proof: String| {
            let ledger = ledger.clone();
            async move {
                let tx = ledger
                    .verify_decryption(ALICE, "multisig-1", &clear, &proof)
                    .await?;
                ledger.confirm(&tx).await.map(|_| ())
            }
        };
        let result = verify_decryption(
            &fhe,
            std::slice::from_ref(&handle),
            SANDBOX_CONTRACT_ADDRESS,
            submit,
        )
        .await
        .unwrap();
        assert_eq!(result.clear_values.get(&handle), Some(&100));

        let data = ledger.get_business_data("multisig-1").await.unwrap();
        assert!(data.is_verified);
        assert_eq!(data.decrypted_value, 100);

        let err = verify_decryption(
            &fhe,
            std::slice::from_ref(&handle),
            SANDBOX_CONTRACT_ADDRESS,
            submit,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Data already verified"));
    }

    #[tokio::test]
    async fn forged_decryption_proof_is_rejected() {
        let (ledger, fhe) = sandbox();
        fhe.initialize().await.unwrap();
        create(&ledger, &fhe, "multisig-1", 100).await;

        let err = ledger
            .verify_decryption(
                ALICE,
                "multisig-1",
                &abi_encode_clear_values(&[1]),
                "0xforged",
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid decryption proof"));
    }
}
