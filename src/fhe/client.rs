//! FHE Relayer Client
//!
//! Talks to an FHE relayer that holds the network key material, produces
//! input proofs for encrypted values and serves public decryptions.

use crate::consts::cli_consts::network::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use crate::fhe::error::EncryptionError;
use crate::fhe::{DecryptionBundle, EncryptedInput, EncryptionService};
use crate::ledger::types::CiphertextHandle;
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;

const USER_AGENT: &str = concat!("fhe-multisig/", env!("CARGO_PKG_VERSION"));

/// Identifiers of the key material the relayer encrypts against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyMaterial {
    public_key_id: String,
    crs_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InputProofRequest<'a> {
    contract_address: &'a str,
    user_address: &'a str,
    value: u64,
    public_key_id: &'a str,
    crs_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InputProofResponse {
    handles: Vec<String>,
    input_proof: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PublicDecryptRequest<'a> {
    contract_address: &'a str,
    handles: &'a [CiphertextHandle],
}

#[derive(Debug)]
pub struct RelayerClient {
    client: Client,
    base_url: String,
    keys: OnceCell<KeyMaterial>,
}

impl RelayerClient {
    pub fn new(base_url: &str) -> Result<Self, EncryptionError> {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            keys: OnceCell::new(),
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}/v1/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    async fn handle_response_status(response: Response) -> Result<Response, EncryptionError> {
        if !response.status().is_success() {
            return Err(EncryptionError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, EncryptionError> {
        let response = self
            .client
            .get(self.build_url(endpoint))
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        let response = Self::handle_response_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post_request<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, EncryptionError> {
        let response = self
            .client
            .post(self.build_url(endpoint))
            .header("User-Agent", USER_AGENT)
            .json(body)
            .send()
            .await?;
        let response = Self::handle_response_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    fn keys(&self) -> Result<&KeyMaterial, EncryptionError> {
        self.keys.get().ok_or(EncryptionError::NotInitialized)
    }
}

#[async_trait::async_trait]
impl EncryptionService for RelayerClient {
    async fn initialize(&self) -> Result<(), EncryptionError> {
        // OnceCell serializes concurrent callers and keeps the first success.
        self.keys
            .get_or_try_init(|| self.get_request::<KeyMaterial>("keyurl"))
            .await?;
        Ok(())
    }

    async fn encrypt(
        &self,
        contract_address: &str,
        caller_address: &str,
        value: u64,
    ) -> Result<EncryptedInput, EncryptionError> {
        let keys = self.keys()?;
        let request = InputProofRequest {
            contract_address,
            user_address: caller_address,
            value,
            public_key_id: &keys.public_key_id,
            crs_id: &keys.crs_id,
        };
        let response: InputProofResponse = self.post_request("input-proof", &request).await?;
        let encrypted_data = response.handles.into_iter().next().ok_or_else(|| {
            EncryptionError::MalformedResponse("input proof without handles".to_string())
        })?;
        Ok(EncryptedInput {
            encrypted_data,
            proof: response.input_proof,
        })
    }

    async fn public_decrypt(
        &self,
        handles: &[CiphertextHandle],
        contract_address: &str,
    ) -> Result<DecryptionBundle, EncryptionError> {
        self.keys()?;
        let request = PublicDecryptRequest {
            contract_address,
            handles,
        };
        self.post_request("public-decrypt", &request).await
    }
}
