use alloy::primitives::Address;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use crate::snapshot::SnapshotTarget;

/// Public Ethereum mainnet endpoint used when no config file is given.
pub const DEFAULT_RPC_URL: &str = "https://ethereum.publicnode.com";

/// Tether USD on Ethereum mainnet.
pub const USDT_ADDRESS: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";

/// Binance hot wallet, used as the sample balance holder.
pub const SAMPLE_HOLDER_ADDRESS: &str = "0x28C6c06298d514Db089934071355E5743bf21d60";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

// ============================================================
// RPC Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct RpcConfig {
    #[serde(default = "default_rpc_url")]
    pub url: String,
    /// Upper bound on a whole snapshot, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: default_rpc_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

// ============================================================
// Contract Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ContractConfig {
    #[serde(default = "default_contract_address")]
    pub address: String,
    #[serde(default = "default_sample_address")]
    pub sample_address: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: default_contract_address(),
            sample_address: default_sample_address(),
        }
    }
}

fn default_contract_address() -> String {
    USDT_ADDRESS.to_string()
}

fn default_sample_address() -> String {
    SAMPLE_HOLDER_ADDRESS.to_string()
}

// ============================================================
// API Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_api_port")]
    pub port: u16,
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_mount_path")]
    pub mount_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
            host: default_api_host(),
            mount_path: default_mount_path(),
        }
    }
}

fn default_api_port() -> u16 {
    3000
}

fn default_api_host() -> String {
    "0.0.0.0".to_string()
}

fn default_mount_path() -> String {
    "/api/blockchain-test".to_string()
}

impl Config {
    pub fn load(path: &str) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("Failed to read config file '{}': {}", path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| eyre::eyre!("Failed to parse config file '{}': {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to the built-in mainnet USDT defaults.
    pub fn load_or_default(path: Option<&str>) -> eyre::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> eyre::Result<()> {
        if self.rpc.url.trim().is_empty() {
            return Err(eyre::eyre!("RPC url must not be empty"));
        }
        if self.rpc.timeout_secs == 0 {
            return Err(eyre::eyre!("RPC timeout_secs must be greater than zero"));
        }
        for (field, address) in [
            ("contract.address", &self.contract.address),
            ("contract.sample_address", &self.contract.sample_address),
        ] {
            if !address.starts_with("0x") || address.len() != 42 {
                return Err(eyre::eyre!("Invalid address '{}' for {}", address, field));
            }
        }
        if !self.api.mount_path.starts_with('/') {
            return Err(eyre::eyre!(
                "API mount_path '{}' must start with '/'",
                self.api.mount_path
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.rpc.timeout_secs)
    }

    /// Resolve the configured strings into the typed target the fetcher reads.
    pub fn target(&self) -> eyre::Result<SnapshotTarget> {
        let contract = Address::from_str(&self.contract.address).map_err(|e| {
            eyre::eyre!("Invalid contract address '{}': {}", self.contract.address, e)
        })?;
        let sample_holder = Address::from_str(&self.contract.sample_address).map_err(|e| {
            eyre::eyre!(
                "Invalid sample address '{}': {}",
                self.contract.sample_address,
                e
            )
        })?;
        Ok(SnapshotTarget {
            rpc_url: self.rpc.url.clone(),
            contract,
            sample_holder,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[rpc]
url = "http://localhost:8545"
timeout_secs = 5

[contract]
address = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"

[api]
port = 8080
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.rpc.url, "http://localhost:8545");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(
            config.contract.address,
            "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"
        );
        assert_eq!(config.contract.sample_address, SAMPLE_HOLDER_ADDRESS); // default
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.api.host, "0.0.0.0"); // default
        assert_eq!(config.api.mount_path, "/api/blockchain-test"); // default
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_mainnet_usdt() {
        let config: Config = toml::from_str("").unwrap();
        let target = config.target().unwrap();
        assert_eq!(target.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(target.contract.to_checksum(None), USDT_ADDRESS);
        assert_eq!(target.sample_holder.to_checksum(None), SAMPLE_HOLDER_ADDRESS);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config.rpc.url, DEFAULT_RPC_URL);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load("/nonexistent/erc20-snapshot.toml").is_err());
    }

    #[test]
    fn test_validate_bad_address() {
        let mut config = Config::default();
        config.contract.sample_address = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.rpc.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_mount_path() {
        let mut config = Config::default();
        config.api.mount_path = "api/blockchain-test".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_target_rejects_non_hex() {
        let mut config = Config::default();
        config.contract.address = "0xZZC17F958D2ee523a2206206994597C13D831ec7".to_string();
        assert!(config.validate().is_ok());
        assert!(config.target().is_err());
    }
}
