//! Ledger Gateway Client
//!
//! JSON-over-HTTP client for a gateway exposing the multi-signature contract.
//! Writes are forwarded to the wallet bound to `from`; the gateway answers
//! with a transaction hash that is then polled until mined.

use crate::consts::cli_consts::network::{
    CONFIRMATION_MAX_POLLS, CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS,
    confirmation_poll_interval,
};
use crate::ledger::Ledger;
use crate::ledger::error::LedgerError;
use crate::ledger::types::{
    BusinessData, CiphertextHandle, CreateBusinessData, PendingTx, Receipt,
};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("fhe-multisig/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct BusinessIdsResponse {
    ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EncryptedValueResponse {
    handle: CiphertextHandle,
}

#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    available: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignedRequest<'a, T: Serialize> {
    from: &'a str,
    #[serde(flatten)]
    body: T,
}

#[derive(Debug, Serialize)]
struct SetDataBody<'a> {
    key: &'a str,
    value: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyDecryptionBody<'a> {
    abi_encoded_clear_values: &'a str,
    decryption_proof: &'a str,
}

/// Status of a submitted transaction as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum TransactionStatus {
    Pending,
    #[serde(rename_all = "camelCase")]
    Confirmed { block_number: u64 },
    Reverted { reason: String },
}

#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
    contract_address: String,
}

impl GatewayClient {
    pub fn new(base_url: &str, contract_address: &str) -> Result<Self, LedgerError> {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            contract_address: contract_address.to_string(),
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/contracts/{}/{}",
            self.base_url,
            self.contract_address,
            endpoint.trim_start_matches('/')
        )
    }

    fn record_endpoint(id: &str, suffix: &str) -> String {
        let encoded = urlencoding::encode(id);
        if suffix.is_empty() {
            format!("business/{}", encoded)
        } else {
            format!("business/{}/{}", encoded, suffix)
        }
    }

    async fn handle_response_status(response: Response) -> Result<Response, LedgerError> {
        if !response.status().is_success() {
            return Err(LedgerError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, LedgerError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
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
    ) -> Result<T, LedgerError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .json(body)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn transaction_status(&self, hash: &str) -> Result<TransactionStatus, LedgerError> {
        let url = format!("{}/transactions/{}", self.base_url, urlencoding::encode(hash));
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LedgerError::NotFound(hash.to_string()));
        }
        let response = Self::handle_response_status(response).await?;
        Ok(response.json::<TransactionStatus>().await?)
    }
}

#[async_trait::async_trait]
impl Ledger for GatewayClient {
    fn contract_address(&self) -> String {
        self.contract_address.clone()
    }

    async fn get_all_business_ids(&self) -> Result<Vec<String>, LedgerError> {
        let response: BusinessIdsResponse = self.get_request("business-ids").await?;
        Ok(response.ids)
    }

    async fn get_business_data(&self, id: &str) -> Result<BusinessData, LedgerError> {
        self.get_request(&Self::record_endpoint(id, "")).await
    }

    async fn create_business_data(
        &self,
        signer: &str,
        request: CreateBusinessData,
    ) -> Result<PendingTx, LedgerError> {
        let body = SignedRequest {
            from: signer,
            body: request,
        };
        self.post_request("business", &body).await
    }

    async fn set_data(
        &self,
        signer: &str,
        id: &str,
        key: &str,
        value: u64,
    ) -> Result<PendingTx, LedgerError> {
        let body = SignedRequest {
            from: signer,
            body: SetDataBody { key, value },
        };
        self.post_request(&Self::record_endpoint(id, "data"), &body)
            .await
    }

    async fn get_encrypted_value(&self, id: &str) -> Result<CiphertextHandle, LedgerError> {
        let response: EncryptedValueResponse = self
            .get_request(&Self::record_endpoint(id, "encrypted-value"))
            .await?;
        Ok(response.handle)
    }

    async fn verify_decryption(
        &self,
        signer: &str,
        id: &str,
        abi_encoded_clear_values: &str,
        decryption_proof: &str,
    ) -> Result<PendingTx, LedgerError> {
        let body = SignedRequest {
            from: signer,
            body: VerifyDecryptionBody {
                abi_encoded_clear_values,
                decryption_proof,
            },
        };
        self.post_request(&Self::record_endpoint(id, "verify-decryption"), &body)
            .await
    }

    async fn is_available(&self) -> Result<bool, LedgerError> {
        let response: AvailabilityResponse = self.get_request("available").await?;
        Ok(response.available)
    }

    async fn confirm(&self, tx: &PendingTx) -> Result<Receipt, LedgerError> {
        for _ in 0..CONFIRMATION_MAX_POLLS {
            match self.transaction_status(&tx.hash).await? {
                TransactionStatus::Confirmed { block_number } => {
                    return Ok(Receipt {
                        hash: tx.hash.clone(),
                        block_number,
                    });
                }
                TransactionStatus::Reverted { reason } => {
                    return Err(LedgerError::Reverted {
                        hash: tx.hash.clone(),
                        reason,
                    });
                }
                TransactionStatus::Pending => {
                    tokio::time::sleep(confirmation_poll_interval()).await;
                }
            }
        }
        Err(LedgerError::Unconfirmed {
            hash: tx.hash.clone(),
            polls: CONFIRMATION_MAX_POLLS,
        })
    }
}
