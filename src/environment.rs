use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the different deployments the dashboard can talk to.
#[derive(Clone, Default, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Local development gateway and relayer.
    Local,
    /// Sepolia test network through the public FHE relayer.
    #[default]
    Sepolia,
    /// In-process ledger and encryption service, nothing leaves the machine.
    Sandbox,
}

impl Environment {
    /// Returns the ledger gateway URL associated with the environment.
    pub fn gateway_url(&self) -> Option<String> {
        match self {
            Environment::Local => Some("http://localhost:8787".to_string()),
            Environment::Sepolia => Some("http://localhost:8788".to_string()),
            Environment::Sandbox => None,
        }
    }

    /// Returns the FHE relayer URL associated with the environment.
    pub fn relayer_url(&self) -> Option<String> {
        match self {
            Environment::Local => Some("http://localhost:3001".to_string()),
            Environment::Sepolia => Some("https://relayer.testnet.zama.cloud".to_string()),
            Environment::Sandbox => None,
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "sepolia" | "testnet" => Ok(Environment::Sepolia),
            "sandbox" => Ok(Environment::Sandbox),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Sepolia => write!(f, "Sepolia"),
            Environment::Sandbox => write!(f, "Sandbox"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.gateway_url() {
            Some(url) => write!(f, "Environment::{}, Gateway: {}", self, url),
            None => write!(f, "Environment::{}, in-process", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_case_insensitively() {
        assert_eq!("LOCAL".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!("testnet".parse::<Environment>(), Ok(Environment::Sepolia));
        assert_eq!("Sandbox".parse::<Environment>(), Ok(Environment::Sandbox));
        assert!("mainnet".parse::<Environment>().is_err());
    }

    #[test]
    fn sandbox_has_no_remote_endpoints() {
        assert!(Environment::Sandbox.gateway_url().is_none());
        assert!(Environment::Sandbox.relayer_url().is_none());
        assert!(Environment::Sepolia.relayer_url().is_some());
    }
}
