//! Application configuration.
//!
//! The configuration file holds the connected wallet and optional endpoint
//! overrides. It lives at `~/.fhe-multisig/config.json`.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Address of the wallet the dashboard acts for. Empty when disconnected.
    pub wallet_address: String,

    /// Environment name, see [`crate::environment::Environment`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Ledger gateway URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_url: Option<String>,

    /// FHE relayer URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relayer_url: Option<String>,

    /// Address of the multi-signature contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
}

impl Config {
    /// Create a Config for the given wallet address.
    pub fn new(wallet_address: String) -> Self {
        Config {
            wallet_address,
            ..Default::default()
        }
    }

    /// Whether a wallet address has been stored.
    pub fn has_wallet(&self) -> bool {
        !self.wallet_address.is_empty()
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration if the file exists, otherwise returns the default.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the configuration file, forgetting the connected wallet.
    ///
    /// A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Location of the configuration file under the user's home directory.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    Ok(home_path.join(".fhe-multisig").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::new("0xde709f2102306220921060314715629080e2fb77".to_string());
        config.environment = Some("sandbox".to_string());
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let config = Config::new("0xde709f2102306220921060314715629080e2fb77".to_string());
        let result = config.save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = Config::load_from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    // Optional fields may be absent from older files.
    fn test_load_accepts_minimal_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"wallet_address": ""}"#).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert!(!config.has_wallet());
        assert_eq!(config.contract_address, None);
    }

    #[test]
    // Clearing removes the file and tolerates a missing one.
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config::new("0xabc".to_string()).save(&path).unwrap();

        Config::clear(&path).unwrap();
        assert!(!path.exists());
        Config::clear(&path).unwrap();
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
    }
}
