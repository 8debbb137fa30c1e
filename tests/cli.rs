use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary config directory
fn temp_config_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".fhe-multisig").join("config.json")
}

const BINARY_NAME: &str = "fhe-multisig";
const WALLET: &str = "0xde709f2102306220921060314715629080e2fb77";

/// Command isolated from the caller's home directory and environment.
fn cli(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path())
        .env_remove("FHE_MULTISIG_ENVIRONMENT");
    cmd
}

fn connect(home: &tempfile::TempDir) {
    cli(home)
        .args(["connect", "--wallet-address", WALLET])
        .assert()
        .success();
}

#[test]
/// Help command should list the subcommands.
fn cli_help_displays_usage() {
    let tmp = temp_config_dir();
    cli(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Usage"))
        .stdout(contains("connect"))
        .stdout(contains("decrypt"));
}

#[test]
/// Connect should validate the address and store it.
fn connect_saves_wallet_to_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    assert!(!config_path.exists());

    cli(&tmp)
        .args(["connect", "--wallet-address", WALLET])
        .assert()
        .success()
        .stdout(contains("Wallet connected"));

    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains(WALLET));
}

#[test]
fn connect_rejects_invalid_address() {
    let tmp = temp_config_dir();
    cli(&tmp)
        .args(["connect", "--wallet-address", "0x123"])
        .assert()
        .failure()
        .stderr(contains("Invalid wallet address"));
    assert!(!config_file_path(&tmp).exists());
}

#[test]
/// Disconnect should forget the wallet but keep the other settings.
fn disconnect_clears_wallet() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(
        &config_path,
        format!(r#"{{"wallet_address": "{}", "environment": "sandbox"}}"#, WALLET),
    )
    .unwrap();

    cli(&tmp)
        .arg("disconnect")
        .assert()
        .success()
        .stdout(contains("Disconnecting wallet"));

    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(!saved.contains(WALLET));
    assert!(saved.contains("sandbox"));
}

#[test]
fn unknown_environment_is_rejected() {
    let tmp = temp_config_dir();
    cli(&tmp)
        .args(["--environment", "mainnet", "status"])
        .assert()
        .failure()
        .stderr(contains("Unknown environment"));
}

#[test]
fn sandbox_contract_is_available() {
    let tmp = temp_config_dir();
    cli(&tmp)
        .args(["--environment", "sandbox", "status"])
        .assert()
        .success()
        .stdout(contains("Contract is available: true"));
}

#[test]
fn list_requires_connected_wallet() {
    let tmp = temp_config_dir();
    cli(&tmp)
        .args(["--environment", "sandbox", "list"])
        .assert()
        .failure()
        .stderr(contains("No wallet connected"));
}

#[test]
fn sandbox_create_succeeds() {
    let tmp = temp_config_dir();
    connect(&tmp);
    cli(&tmp)
        .env("FHE_MULTISIG_ENVIRONMENT", "sandbox")
        .args(["create", "--name", "Team budget", "--amount", "250"])
        .assert()
        .success()
        .stdout(contains("Multi-signature created successfully!"));
}

#[test]
fn sandbox_list_prints_json() {
    let tmp = temp_config_dir();
    connect(&tmp);
    let output = cli(&tmp)
        .args(["--environment", "sandbox", "list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["proposals"], serde_json::json!([]));
    assert_eq!(json["stats"]["total"], 0);
    assert_eq!(json["page"], 1);
}

#[test]
/// Setup errors are reported with their message, not their debug form.
fn missing_contract_is_reported_readably() {
    let tmp = temp_config_dir();
    connect(&tmp);

    cli(&tmp)
        .args(["--environment", "local", "status"])
        .assert()
        .failure()
        .stderr(contains("No contract address configured for Local"))
        .stderr(contains("MissingContract").not());
}

#[test]
/// A ledger that cannot be reached fails the listing instead of printing an empty page.
fn list_fails_when_gateway_is_unreachable() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    let config = serde_json::json!({
        "wallet_address": WALLET,
        "environment": "local",
        "gateway_url": "http://127.0.0.1:9",
        "contract_address": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
    });
    fs::write(&config_path, config.to_string()).unwrap();

    cli(&tmp)
        .args(["list", "--json"])
        .assert()
        .failure()
        .stdout(contains("\"proposals\"").not())
        .stderr(contains("Failed to load data"));
}
