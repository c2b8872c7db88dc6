//! Process-wide configuration, loaded once at startup.

use crate::chain::Network;
use crate::{Error, Result};
use alloy_signer_local::PrivateKeySigner;
use std::env;
use std::str::FromStr;

/// Application configuration.
///
/// Loaded from the environment exactly once at process start and injected
/// into the components that need it; nothing reads the environment after
/// this. Both secrets are required so a missing key fails before any
/// network call is made.
#[derive(Clone)]
pub struct Config {
    /// Bearer token for the orderbook service.
    pub auth_key: String,
    /// Hex-encoded maker private key, with or without the `0x` prefix.
    pub private_key: String,
    /// Optional RPC endpoint overrides.
    pub sepolia_rpc_url: Option<String>,
    pub polygon_rpc_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            auth_key: env::var("AUTH_KEY").map_err(|_| Error::Config {
                message: "AUTH_KEY environment variable not set".to_string(),
            })?,
            private_key: env::var("PRIVATE_KEY").map_err(|_| Error::Config {
                message: "PRIVATE_KEY environment variable not set".to_string(),
            })?,
            sepolia_rpc_url: env::var("SEPOLIA_RPC_URL").ok(),
            polygon_rpc_url: env::var("POLYGON_RPC_URL").ok(),
        })
    }

    /// RPC endpoint override for a network, if configured.
    pub fn rpc_override(&self, network: Network) -> Option<&str> {
        match network {
            Network::Sepolia => self.sepolia_rpc_url.as_deref(),
            Network::Polygon => self.polygon_rpc_url.as_deref(),
        }
    }

    /// Build the maker wallet from the configured private key.
    pub fn wallet(&self) -> Result<PrivateKeySigner> {
        let key = self.private_key.trim().trim_start_matches("0x");
        PrivateKeySigner::from_str(key).map_err(|e| Error::Config {
            message: format!("Invalid PRIVATE_KEY: {}", e),
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("auth_key", &"[REDACTED]")
            .field("private_key", &"[REDACTED]")
            .field("sepolia_rpc_url", &self.sepolia_rpc_url)
            .field("polygon_rpc_url", &self.polygon_rpc_url)
            .finish()
    }
}
