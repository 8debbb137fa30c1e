//! Session setup and initialization

use crate::config::Config;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::controller::DashboardController;
use crate::controller::action::Action;
use crate::environment::Environment;
use crate::fhe::error::EncryptionError;
use crate::fhe::{EncryptionService, RelayerClient};
use crate::ledger::error::LedgerError;
use crate::ledger::{GatewayClient, Ledger};
use crate::sandbox::sandbox;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("No contract address configured for {0}. Pass --contract or set it in the config file.")]
    MissingContract(Environment),

    #[error("No {endpoint} URL configured for {environment}")]
    MissingEndpoint {
        endpoint: &'static str,
        environment: Environment,
    },

    #[error("Invalid contract address: {0}")]
    InvalidContract(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Encryption(#[from] EncryptionError),
}

/// Session data for both TUI and headless modes
pub struct SessionData {
    pub controller: DashboardController,
    /// Receives the actions of every controller operation
    pub action_receiver: mpsc::Receiver<Action>,
    pub environment: Environment,
    /// Wallet from the configuration file, if one is connected
    pub wallet_address: Option<String>,
}

/// Endpoints the collaborators talk to, after overrides are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub gateway_url: String,
    pub relayer_url: String,
    pub contract_address: String,
}

impl Endpoints {
    /// Config values take precedence over environment defaults, and an
    /// explicit contract over the configured one.
    pub fn resolve(
        config: &Config,
        environment: Environment,
        contract_override: Option<&str>,
    ) -> Result<Self, SetupError> {
        let gateway_url = config
            .gateway_url
            .clone()
            .or_else(|| environment.gateway_url())
            .ok_or(SetupError::MissingEndpoint {
                endpoint: "gateway",
                environment,
            })?;
        let relayer_url = config
            .relayer_url
            .clone()
            .or_else(|| environment.relayer_url())
            .ok_or(SetupError::MissingEndpoint {
                endpoint: "relayer",
                environment,
            })?;
        let contract_address = contract_override
            .map(str::to_string)
            .or_else(|| config.contract_address.clone())
            .ok_or(SetupError::MissingContract(environment))?;
        if !crate::keys::is_valid_eth_address(&contract_address) {
            return Err(SetupError::InvalidContract(contract_address));
        }
        Ok(Self {
            gateway_url,
            relayer_url,
            contract_address,
        })
    }
}

/// Builds the ledger and encryption service for an environment.
pub fn build_collaborators(
    config: &Config,
    environment: Environment,
    contract_override: Option<&str>,
) -> Result<(Arc<dyn Ledger>, Arc<dyn EncryptionService>), SetupError> {
    if environment == Environment::Sandbox {
        let (ledger, fhe) = sandbox();
        return Ok((Arc::new(ledger), Arc::new(fhe)));
    }

    let endpoints = Endpoints::resolve(config, environment, contract_override)?;
    log::debug!(
        "Using gateway {} and relayer {} for contract {}",
        endpoints.gateway_url,
        endpoints.relayer_url,
        endpoints.contract_address
    );
    let ledger = GatewayClient::new(&endpoints.gateway_url, &endpoints.contract_address)?;
    let fhe = RelayerClient::new(&endpoints.relayer_url)?;
    Ok((Arc::new(ledger), Arc::new(fhe)))
}

/// Sets up a dashboard session
///
/// Builds the collaborators for the environment and a controller reporting
/// over a fresh action channel.
pub fn setup_session(
    config: &Config,
    environment: Environment,
    contract_override: Option<&str>,
) -> Result<SessionData, SetupError> {
    let (ledger, fhe) = build_collaborators(config, environment, contract_override)?;
    let (action_sender, action_receiver) = mpsc::channel::<Action>(EVENT_QUEUE_SIZE);
    let controller = DashboardController::new(ledger, fhe, action_sender);

    Ok(SessionData {
        controller,
        action_receiver,
        environment,
        wallet_address: config
            .has_wallet()
            .then(|| config.wallet_address.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::SANDBOX_CONTRACT_ADDRESS;

    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    #[test]
    fn environment_defaults_fill_missing_endpoints() {
        let config = Config {
            contract_address: Some(CONTRACT.to_string()),
            ..Config::default()
        };
        let endpoints = Endpoints::resolve(&config, Environment::Local, None).unwrap();
        assert_eq!(endpoints.gateway_url, "http://localhost:8787");
        assert_eq!(endpoints.relayer_url, "http://localhost:3001");
        assert_eq!(endpoints.contract_address, CONTRACT);
    }

    #[test]
    fn overrides_take_precedence() {
        let config = Config {
            gateway_url: Some("https://gateway.example".to_string()),
            contract_address: Some("0x0000000000000000000000000000000000000001".to_string()),
            ..Config::default()
        };
        let endpoints = Endpoints::resolve(&config, Environment::Sepolia, Some(CONTRACT)).unwrap();
        assert_eq!(endpoints.gateway_url, "https://gateway.example");
        assert_eq!(endpoints.relayer_url, "https://relayer.testnet.zama.cloud");
        assert_eq!(endpoints.contract_address, CONTRACT);
    }

    #[test]
    fn network_environments_require_a_contract() {
        let err = Endpoints::resolve(&Config::default(), Environment::Sepolia, None).unwrap_err();
        assert!(matches!(err, SetupError::MissingContract(Environment::Sepolia)));

        let err =
            Endpoints::resolve(&Config::default(), Environment::Local, Some("0x123")).unwrap_err();
        assert!(matches!(err, SetupError::InvalidContract(_)));
    }

    #[tokio::test]
    async fn sandbox_needs_no_configuration() {
        let session = setup_session(&Config::default(), Environment::Sandbox, None).unwrap();
        assert_eq!(session.controller.contract_address(), SANDBOX_CONTRACT_ADDRESS);
        assert_eq!(session.wallet_address, None);
    }
}
