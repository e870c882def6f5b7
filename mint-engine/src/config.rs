//! Configuration for the correlation engine

use crate::{Error, Result};
use bank_api::AccountDetails;
use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ledger connection
    pub chain: ChainConfig,

    /// Bank client credentials
    pub bank: BankConfig,

    /// Beneficiary account receiving the payments
    pub beneficiary: BeneficiaryConfig,

    /// Polling and timeout tuning
    pub tuning: TuningConfig,
}

/// Ledger connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Node RPC endpoint
    pub provider_url: String,

    /// Chain identifier
    pub chain_id: u64,

    /// Token contract address
    pub contract_address: String,

    /// Gas limit for contract calls
    pub max_gas: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            provider_url: "ws://127.0.0.1:8545".to_string(),
            chain_id: 1337,
            contract_address: String::new(),
            max_gas: 1_000_000,
        }
    }
}

/// Bank client credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BankConfig {
    /// OAuth client id
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Redirect URL registered with the bank
    pub redirect_url: String,
}

/// Beneficiary account details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeneficiaryConfig {
    /// Six-digit sort code
    pub sort_code: String,

    /// Account number
    pub account_number: String,

    /// Account holder name
    pub name: String,
}

impl BeneficiaryConfig {
    /// The beneficiary as bank-API account details
    pub fn account_details(&self) -> AccountDetails {
        AccountDetails {
            sort_code: self.sort_code.clone(),
            account_number: self.account_number.clone(),
            name: self.name.clone(),
        }
    }
}

/// Polling and timeout tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuningConfig {
    /// Seconds between settlement status poll cycles
    pub bank_poll_secs: u64,

    /// Seconds between chain event poll cycles
    pub chain_poll_secs: u64,

    /// Bank client request timeout in seconds
    pub bank_timeout_secs: u64,

    /// First block the chain event poll scans from
    pub starting_block: u64,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            bank_poll_secs: 30,
            chain_poll_secs: 15,
            bank_timeout_secs: 30,
            starting_block: 0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chain: ChainConfig::default(),
            bank: BankConfig::default(),
            beneficiary: BeneficiaryConfig::default(),
            tuning: TuningConfig::default(),
        }
    }
}

impl Config {
    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Load from a TOML file, then apply environment overrides
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Override selected values from environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("MINTBRIDGE_PROVIDER_URL") {
            self.chain.provider_url = url;
        }

        if let Ok(address) = std::env::var("MINTBRIDGE_CONTRACT_ADDRESS") {
            self.chain.contract_address = address;
        }

        if let Ok(block) = std::env::var("MINTBRIDGE_STARTING_BLOCK") {
            self.tuning.starting_block = block
                .parse()
                .map_err(|e| Error::Config(format!("MINTBRIDGE_STARTING_BLOCK: {}", e)))?;
        }

        Ok(())
    }
}
