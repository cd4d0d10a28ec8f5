//! Client configuration, loaded from JSON or `SUNPATH_*` environment
//! variables.

use std::{fmt, str::FromStr, time::Duration};

use serde::Deserialize;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Commitment level for reads and confirmation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl FromStr for Commitment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            other => Err(format!("unknown commitment level {other:?}")),
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        };
        f.write_str(level)
    }
}

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        match commitment {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the ledger node.
    pub rpc_url: String,

    /// Sunpath program to target.
    #[serde(deserialize_with = "pubkey_string::deserialize")]
    pub program_id: Pubkey,

    pub commitment: Commitment,

    /// Attempts per action when the blockhash fetch or submission fails at
    /// the transport level. Remote rejections are never retried.
    pub max_network_attempts: u32,

    /// Base delay between attempts, doubled after each failure.
    pub retry_backoff_ms: u64,

    pub confirm_timeout_secs: u64,

    pub confirm_poll_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            program_id: crate::SUNPATH_ID,
            commitment: Commitment::default(),
            max_network_attempts: 3,
            retry_backoff_ms: 500,
            confirm_timeout_secs: 30,
            confirm_poll_interval_ms: 500,
        }
    }
}

fn default_rpc_url() -> String {
    "http://localhost:8899".to_string()
}

impl ClientConfig {
    /// Defaults overridden by any `SUNPATH_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup("SUNPATH_RPC_URL") {
            config.rpc_url = url;
        }
        if let Some(value) = lookup("SUNPATH_PROGRAM_ID") {
            config.program_id = parse_var("SUNPATH_PROGRAM_ID", &value)?;
        }
        if let Some(value) = lookup("SUNPATH_COMMITMENT") {
            config.commitment = parse_var("SUNPATH_COMMITMENT", &value)?;
        }
        if let Some(value) = lookup("SUNPATH_MAX_NETWORK_ATTEMPTS") {
            config.max_network_attempts = parse_var("SUNPATH_MAX_NETWORK_ATTEMPTS", &value)?;
        }
        if let Some(value) = lookup("SUNPATH_RETRY_BACKOFF_MS") {
            config.retry_backoff_ms = parse_var("SUNPATH_RETRY_BACKOFF_MS", &value)?;
        }
        if let Some(value) = lookup("SUNPATH_CONFIRM_TIMEOUT_SECS") {
            config.confirm_timeout_secs = parse_var("SUNPATH_CONFIRM_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = lookup("SUNPATH_CONFIRM_POLL_INTERVAL_MS") {
            config.confirm_poll_interval_ms =
                parse_var("SUNPATH_CONFIRM_POLL_INTERVAL_MS", &value)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document; missing keys keep their defaults.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "rpc_url",
                value: self.rpc_url.clone(),
                reason: "must be an http(s) URL".to_string(),
            });
        }
        if self.max_network_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_network_attempts",
                value: "0".to_string(),
                reason: "at least one attempt is required".to_string(),
            });
        }
        if self.confirm_poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "confirm_poll_interval_ms",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }

    pub fn confirm_poll_interval(&self) -> Duration {
        Duration::from_millis(self.confirm_poll_interval_ms)
    }
}

fn parse_var<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Base58 string form for pubkeys in config documents.
mod pubkey_string {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer};
    use solana_sdk::pubkey::Pubkey;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(serde::de::Error::custom)
    }
}
