//! Dashboard controller
//!
//! Orchestrates the ledger and the encryption service on behalf of the user.
//! Every operation reports its progress as [`Action`]s; the controller holds
//! no view state of its own, so the same operations drive both the terminal
//! dashboard and the headless commands.

pub mod action;
pub mod error;
pub mod form;

use crate::consts::cli_consts::{INITIAL_PUBLIC_VALUE, SIGNED_KEY, SIGNED_VALUE};
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, Source};
use crate::fhe::{self, EncryptionService};
use crate::ledger::Ledger;
use crate::ledger::types::CreateBusinessData;
use crate::logging::LogLevel;
use crate::notification::Notification;
use crate::proposal::{Proposal, new_proposal_id};
use crate::wallet::{WalletError, WalletSession};
use action::Action;
use error::ActionError;
use form::CreateForm;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

/// Result of a decryption request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecryptOutcome {
    /// The amount was decrypted and the proof accepted by the contract.
    Decrypted(u64),
    /// The record was verified before this request. The stored value is
    /// known when the short-circuit read saw it.
    AlreadyVerified { stored_value: Option<u64> },
    Failed(ActionError),
}

#[derive(Clone)]
pub struct DashboardController {
    ledger: Arc<dyn Ledger>,
    fhe: Arc<dyn EncryptionService>,
    actions: mpsc::Sender<Action>,
    generations: Arc<AtomicU64>,
    connections: Arc<AtomicU64>,
    classifier: ErrorClassifier,
}

impl DashboardController {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        fhe: Arc<dyn EncryptionService>,
        actions: mpsc::Sender<Action>,
    ) -> Self {
        Self {
            ledger,
            fhe,
            actions,
            generations: Arc::new(AtomicU64::new(0)),
            connections: Arc::new(AtomicU64::new(0)),
            classifier: ErrorClassifier::new(),
        }
    }

    pub fn contract_address(&self) -> String {
        self.ledger.contract_address()
    }

    /// Issues the generation of a new refresh. Generations start at 1.
    pub fn next_generation(&self) -> u64 {
        self.generations.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Highest generation issued so far.
    pub fn current_generation(&self) -> u64 {
        self.generations.load(Ordering::SeqCst)
    }

    /// Opens a wallet session under a fresh connection id.
    pub fn connect_wallet(&self, address: &str) -> Result<WalletSession, WalletError> {
        let connection = self.connections.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(WalletSession::connect(address)?.with_connection(connection))
    }

    pub async fn dispatch(&self, action: Action) {
        let _ = self.actions.send(action).await;
    }

    async fn notify(&self, notification: Notification) {
        self.dispatch(Action::Notify(notification)).await;
    }

    async fn log_event(&self, event: Event) {
        self.dispatch(Action::Log(event)).await;
    }

    async fn report_failure(&self, source: Source, error: &ActionError) {
        let level = self.classifier.classify_action_error(error);
        let msg = match error.detail() {
            Some(detail) => format!("{}: {}", error, detail),
            None => error.to_string(),
        };
        self.log_event(Event::error(source, msg, level)).await;
        self.notify(Notification::error(error.to_string())).await;
    }

    /// Loads the encryption key material. The caller guards against
    /// concurrent runs with [`Action::FheInitStarted`].
    pub async fn initialize_fhe(&self, session: &WalletSession) -> Result<(), ActionError> {
        let connection = session.connection();
        self.log_event(Event::waiting(
            Source::Encryption,
            "Initializing FHE encryption...",
        ))
        .await;
        match self.fhe.initialize().await {
            Ok(()) => {
                self.log_event(Event::success(Source::Encryption, "FHE encryption ready"))
                    .await;
                self.dispatch(Action::FheInitFinished {
                    connection,
                    result: Ok(()),
                })
                .await;
                Ok(())
            }
            Err(e) => {
                let error = ActionError::InitializationFailure(e.to_string());
                self.log_event(Event::error(
                    Source::Encryption,
                    format!("{}: {}", error, e),
                    self.classifier.classify_encryption_error(&e),
                ))
                .await;
                self.notify(Notification::error(error.to_string())).await;
                self.dispatch(Action::FheInitFinished {
                    connection,
                    result: Err(e.to_string()),
                })
                .await;
                Err(error)
            }
        }
    }

    /// Rebuilds the proposal list from the ledger under `generation`.
    ///
    /// Does nothing without a wallet session. Records that fail to load are
    /// skipped; a failed enumeration reports `None` so the previous list is
    /// kept, and is returned as [`ActionError::LoadFailure`].
    pub async fn load_data(
        &self,
        session: Option<&WalletSession>,
        generation: u64,
    ) -> Result<(), ActionError> {
        let Some(session) = session else {
            return Ok(());
        };
        let connection = session.connection();

        let ids = match self.ledger.get_all_business_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                let error = ActionError::LoadFailure(e.to_string());
                self.report_failure(Source::Loader, &error).await;
                self.dispatch(Action::ProposalsLoaded {
                    connection,
                    generation,
                    proposals: None,
                })
                .await;
                return Err(error);
            }
        };

        let ledger = self.ledger.as_ref();
        let records = futures::future::join_all(ids.iter().map(|id| async move {
            (id.as_str(), ledger.get_business_data(id).await)
        }))
        .await;

        let mut proposals = Vec::with_capacity(records.len());
        for (id, record) in records {
            match record {
                Ok(data) => proposals.push(Proposal::from_record(id, data)),
                Err(e) => {
                    log::warn!("Failed to load proposal {}: {}", id, e);
                    self.log_event(Event::error(
                        Source::Loader,
                        format!("Failed to load proposal {}: {}", id, e),
                        self.classifier.classify_ledger_error(&e),
                    ))
                    .await;
                }
            }
        }

        log::debug!("Loaded {} of {} proposals", proposals.len(), ids.len());
        self.log_event(Event::refresh(
            Source::Loader,
            format!("Loaded {} proposals", proposals.len()),
        ))
        .await;
        self.dispatch(Action::ProposalsLoaded {
            connection,
            generation,
            proposals: Some(proposals),
        })
        .await;
        Ok(())
    }

    /// Starts a new refresh generation and loads under it. A failed load has
    /// already been reported, so it does not fail the operation that asked
    /// for the refresh.
    pub async fn refresh(&self, session: Option<&WalletSession>) {
        let Some(session) = session else {
            return;
        };
        let generation = self.next_generation();
        self.dispatch(Action::RefreshStarted {
            connection: session.connection(),
            generation,
        })
        .await;
        let _ = self.load_data(Some(session), generation).await;
    }

    /// Encrypts the form's amount and submits a new proposal.
    ///
    /// Resolves with the new proposal id once the creation is confirmed and
    /// the list has been refreshed.
    pub async fn create_multisig(
        &self,
        session: Option<&WalletSession>,
        form: &CreateForm,
    ) -> Result<String, ActionError> {
        let Some(session) = session else {
            let error = ActionError::NotConnected;
            self.report_failure(Source::Creator, &error).await;
            return Err(error);
        };

        self.dispatch(Action::CreationStarted).await;
        self.notify(Notification::pending(
            "Creating multi-signature with FHE encryption...",
        ))
        .await;

        match self.submit_creation(session, form).await {
            Ok(id) => {
                self.dispatch(Action::RecordHistory(format!(
                    "Created multi-signature: {}",
                    form.name
                )))
                .await;
                self.log_event(Event::success(
                    Source::Creator,
                    format!("Created {} ({})", form.name, id),
                ))
                .await;
                self.notify(Notification::success("Multi-signature created successfully!"))
                    .await;
                self.refresh(Some(session)).await;
                self.dispatch(Action::CreationFinished { succeeded: true })
                    .await;
                Ok(id)
            }
            Err(error) => {
                self.report_failure(Source::Creator, &error).await;
                self.dispatch(Action::CreationFinished { succeeded: false })
                    .await;
                Err(error)
            }
        }
    }

    async fn submit_creation(
        &self,
        session: &WalletSession,
        form: &CreateForm,
    ) -> Result<String, ActionError> {
        let contract = self.ledger.contract_address();
        let encrypted = self
            .fhe
            .encrypt(&contract, session.address(), form.amount_value())
            .await
            .map_err(|e| self.classifier.classify_submission(&e.to_string()))?;

        let id = new_proposal_id(chrono::Utc::now().timestamp_millis());
        let request = CreateBusinessData {
            id: id.clone(),
            name: form.name.clone(),
            encrypted_data: encrypted.encrypted_data,
            proof: encrypted.proof,
            required_signatures: form.required_signatures_value(),
            initial_value: INITIAL_PUBLIC_VALUE,
            description: form.description.clone(),
        };
        let tx = self
            .ledger
            .create_business_data(session.address(), request)
            .await
            .map_err(|e| self.classifier.classify_submission(&e.to_string()))?;

        self.notify(Notification::pending("Waiting for transaction confirmation..."))
            .await;
        let receipt = self
            .ledger
            .confirm(&tx)
            .await
            .map_err(|e| self.classifier.classify_submission(&e.to_string()))?;
        log::debug!("Creation of {} mined in block {}", id, receipt.block_number);
        Ok(id)
    }

    /// Adds the caller's signature to a proposal. Without a session this is
    /// a no-op.
    pub async fn sign_multisig(
        &self,
        session: Option<&WalletSession>,
        id: &str,
    ) -> Result<(), ActionError> {
        let Some(session) = session else {
            return Err(ActionError::NotConnected);
        };

        self.notify(Notification::pending("Adding signature...")).await;
        let signed = async {
            let tx = self
                .ledger
                .set_data(session.address(), id, SIGNED_KEY, SIGNED_VALUE)
                .await?;
            self.ledger.confirm(&tx).await
        }
        .await;

        match signed {
            Ok(_) => {
                self.dispatch(Action::RecordHistory(format!(
                    "Signed multi-signature: {}",
                    id
                )))
                .await;
                self.log_event(Event::success(Source::Signer, format!("Signed {}", id)))
                    .await;
                self.notify(Notification::success("Signature added successfully!"))
                    .await;
                self.refresh(Some(session)).await;
                Ok(())
            }
            Err(e) => {
                let error = ActionError::SigningFailure(e.to_string());
                self.report_failure(Source::Signer, &error).await;
                Err(error)
            }
        }
    }

    /// Decrypts a proposal's amount and has the contract verify the proof.
    pub async fn decrypt_data(&self, session: Option<&WalletSession>, id: &str) -> DecryptOutcome {
        let Some(session) = session else {
            let error = ActionError::NotConnected;
            self.report_failure(Source::Decryptor, &error).await;
            return DecryptOutcome::Failed(error);
        };

        let record = match self.ledger.get_business_data(id).await {
            Ok(record) => record,
            Err(e) => return self.decryption_failed(e.to_string()).await,
        };
        if record.is_verified {
            self.notify(Notification::success("Data already verified on-chain"))
                .await;
            return DecryptOutcome::AlreadyVerified {
                stored_value: Some(record.decrypted_value),
            };
        }

        let handle = match self.ledger.get_encrypted_value(id).await {
            Ok(handle) => handle,
            Err(e) => return self.decryption_failed(e.to_string()).await,
        };

        self.notify(Notification::pending("Verifying decryption on-chain..."))
            .await;
        let contract = self.ledger.contract_address();
        let ledger = self.ledger.clone();
        let signer = session.address().to_string();
        let record_id = id.to_string();
        let verified = fhe::verify_decryption(
            self.fhe.as_ref(),
            std::slice::from_ref(&handle),
            &contract,
            move |clear_values, proof| async move {
                let tx = ledger
                    .verify_decryption(&signer, &record_id, &clear_values, &proof)
                    .await?;
                ledger.confirm(&tx).await.map(|_| ())
            },
        )
        .await;

        match verified {
            Ok(result) => {
                let value = result.clear_values.get(&handle).copied().unwrap_or_default();
                self.refresh(Some(session)).await;
                self.dispatch(Action::RecordHistory(format!("Decrypted data for: {}", id)))
                    .await;
                self.log_event(Event::success(
                    Source::Decryptor,
                    format!("Decrypted {}: {}", id, value),
                ))
                .await;
                self.notify(Notification::success(
                    "Data decrypted and verified successfully!",
                ))
                .await;
                DecryptOutcome::Decrypted(value)
            }
            Err(e) if ErrorClassifier::is_already_verified(&e.to_string()) => {
                self.notify(Notification::success("Data is already verified on-chain"))
                    .await;
                self.refresh(Some(session)).await;
                DecryptOutcome::AlreadyVerified { stored_value: None }
            }
            Err(e) => self.decryption_failed(e.to_string()).await,
        }
    }

    async fn decryption_failed(&self, message: String) -> DecryptOutcome {
        let error = ActionError::DecryptionFailure(ErrorClassifier::message_or_unknown(&message));
        self.report_failure(Source::Decryptor, &error).await;
        DecryptOutcome::Failed(error)
    }

    /// Read-only probe of the contract.
    pub async fn check_availability(&self) -> Result<bool, ActionError> {
        match self.ledger.is_available().await {
            Ok(available) => {
                self.log_event(Event::new(
                    Source::Probe,
                    format!("Contract available: {}", available),
                    crate::events::EventType::Refresh,
                    LogLevel::Info,
                ))
                .await;
                self.notify(Notification::success(format!(
                    "Contract is available: {}",
                    available
                )))
                .await;
                Ok(available)
            }
            Err(e) => {
                let error = ActionError::AvailabilityFailure(e.to_string());
                self.report_failure(Source::Probe, &error).await;
                Err(error)
            }
        }
    }
}
