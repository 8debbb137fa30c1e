mod cli_messages;
mod config;
mod consts;
mod controller;
mod environment;
mod error_classifier;
mod events;
mod fhe;
mod keys;
mod ledger;
mod logging;
mod notification;
mod proposal;
mod sandbox;
mod session;
mod ui;
mod wallet;

use crate::config::{Config, get_config_path};
use crate::controller::form::CreateForm;
use crate::environment::Environment;
use crate::session::{HeadlessCommand, run_headless_mode, run_tui_mode, setup_session};
use crate::wallet::WalletSession;
use clap::{Parser, Subcommand};
use std::error::Error;

/// Environment variable selecting the deployment when `--environment` is absent.
const ENVIRONMENT_VAR: &str = "FHE_MULTISIG_ENVIRONMENT";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Deployment to use: local, sepolia (alias testnet) or sandbox
    #[arg(long, global = true, value_name = "ENVIRONMENT")]
    environment: Option<String>,

    /// Address of the multi-signature contract, overriding the configuration
    #[arg(long, global = true, value_name = "CONTRACT_ADDRESS")]
    contract: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the dashboard
    Start {
        /// Paint the terminal background
        #[arg(long = "with-background", action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Connect a wallet and remember it in the configuration file
    Connect {
        /// Public Ethereum wallet address. 42-character hex string starting with '0x'
        #[arg(long, value_name = "WALLET_ADDRESS")]
        wallet_address: String,
    },
    /// Forget the connected wallet
    Disconnect,
    /// List multi-signature proposals
    List {
        /// Only show proposals whose name or description contains this text
        #[arg(long)]
        search: Option<String>,

        /// 1-based page of the filtered list
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Print the page and the statistics as JSON
        #[arg(long, action = clap::ArgAction::SetTrue)]
        json: bool,
    },
    /// Create a multi-signature proposal with an encrypted amount
    Create {
        #[arg(long)]
        name: String,

        /// Amount to encrypt
        #[arg(long)]
        amount: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "2")]
        required_signatures: String,
    },
    /// Add the connected wallet's signature to a proposal
    Sign {
        /// Proposal id, e.g. multisig-1700000000000
        id: String,
    },
    /// Decrypt a proposal's amount and verify it on-chain
    Decrypt {
        id: String,
    },
    /// Check whether the contract is reachable
    Status,
}

/// Resolves the environment: flag, then environment variable, then
/// configuration file, then the default.
fn resolve_environment(
    flag: Option<&str>,
    config: &Config,
) -> Result<Environment, Box<dyn Error>> {
    let from_var = std::env::var(ENVIRONMENT_VAR).ok().filter(|v| !v.is_empty());
    let name = flag
        .map(str::to_string)
        .or(from_var)
        .or_else(|| config.environment.clone());
    match name {
        Some(name) => name.parse::<Environment>().map_err(|_| {
            Box::<dyn Error>::from(format!(
                "Unknown environment: {}. Expected local, sepolia or sandbox.",
                name
            ))
        }),
        None => Ok(Environment::default()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config_path = get_config_path()?;
    let config = Config::load_or_default(&config_path)
        .map_err(|e| format!("Failed to load config: {}", e))?;

    match args.command {
        Command::Connect { wallet_address } => {
            let session = WalletSession::connect(&wallet_address).map_err(|e| e.to_string())?;
            let mut config = config;
            config.wallet_address = session.address().to_string();
            if let Some(environment) = args.environment {
                resolve_environment(Some(&environment), &config)?;
                config.environment = Some(environment);
            }
            if let Some(contract) = args.contract {
                config.contract_address = Some(contract);
            }
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Wallet connected", "{}", session.address());
            Ok(())
        }
        Command::Disconnect => {
            print_cmd_info!("Disconnecting wallet...", "");
            if !config.has_wallet() {
                return Ok(());
            }
            let config = Config {
                wallet_address: String::new(),
                ..config
            };
            // Nothing else worth keeping
            let result = if config == Config::default() {
                Config::clear(&config_path)
            } else {
                config.save(&config_path)
            };
            result.map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Wallet disconnected", "");
            Ok(())
        }
        Command::Start { with_background } => {
            let environment = resolve_environment(args.environment.as_deref(), &config)?;
            let session = setup_session(&config, environment, args.contract.as_deref())
                .map_err(|e| e.to_string())?;
            run_tui_mode(session, with_background).await
        }
        Command::List { search, page, json } => {
            let command = HeadlessCommand::List { search, page, json };
            run_headless(&config, args.environment, args.contract, command).await
        }
        Command::Create {
            name,
            amount,
            description,
            required_signatures,
        } => {
            let form = CreateForm {
                name,
                amount,
                description,
                required_signatures,
                ..CreateForm::default()
            };
            let command = HeadlessCommand::Create(form);
            run_headless(&config, args.environment, args.contract, command).await
        }
        Command::Sign { id } => {
            let command = HeadlessCommand::Sign { id };
            run_headless(&config, args.environment, args.contract, command).await
        }
        Command::Decrypt { id } => {
            let command = HeadlessCommand::Decrypt { id };
            run_headless(&config, args.environment, args.contract, command).await
        }
        Command::Status => {
            run_headless(&config, args.environment, args.contract, HeadlessCommand::Status).await
        }
    }
}

async fn run_headless(
    config: &Config,
    environment: Option<String>,
    contract: Option<String>,
    command: HeadlessCommand,
) -> Result<(), Box<dyn Error>> {
    let environment = resolve_environment(environment.as_deref(), config)?;
    let session =
        setup_session(config, environment, contract.as_deref()).map_err(|e| e.to_string())?;
    run_headless_mode(session, command).await
}
