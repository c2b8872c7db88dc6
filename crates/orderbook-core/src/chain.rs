//! Static per-network configuration.
//!
//! Token addresses, router address, RPC endpoints, and the demo trading
//! pair for each supported chain. The router (the Limit Order Protocol
//! settlement contract) is deployed at the same address on every network.

use alloy_primitives::{Address, U256};
use std::time::Duration;

/// Limit Order Protocol v4 router, identical on all networks. This is both
/// the EIP-712 verifying contract and the ERC-20 spender orders settle
/// through.
pub const ROUTER_ADDRESS: &str = "0x111111125421ca6dc452d289314280a0f8842a65";

/// Chains the toolkit can submit orders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Sepolia,
    Polygon,
}

/// An ERC-20 token with its declared decimals.
///
/// Decimals are carried explicitly so amount scaling is always validated
/// against the token's real precision instead of assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    pub symbol: &'static str,
    pub address: Address,
    pub decimals: u8,
    /// True for deposit()-style wrapped native tokens (WETH, WMATIC).
    pub wrapped_native: bool,
}

/// Per-chain static configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub network: Network,
    pub chain_id: u64,
    pub name: &'static str,
    pub rpc_url: String,
    pub explorer: &'static str,
    pub router: Address,
    /// Token the maker sells in the demo pair.
    pub maker_token: TokenInfo,
    /// Token the maker buys in the demo pair.
    pub taker_token: TokenInfo,
    /// Minimum native balance required for gas before anything is signed.
    pub min_native_balance: U256,
    /// How long submitted orders stay valid.
    pub expiration_offset: Duration,
    pub default_making_amount: &'static str,
    pub default_taking_amount: &'static str,
}

impl Network {
    /// CLI-facing name, also used when rendering remediation scripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Sepolia => "sepolia",
            Network::Polygon => "polygon",
        }
    }

    pub fn config(&self) -> NetworkConfig {
        let router: Address = ROUTER_ADDRESS.parse().expect("invalid router address");

        match self {
            Network::Sepolia => NetworkConfig {
                network: *self,
                chain_id: 11155111,
                name: "Sepolia Testnet",
                rpc_url: "https://sepolia.drpc.org".to_string(),
                explorer: "https://sepolia.etherscan.io",
                router,
                maker_token: TokenInfo {
                    symbol: "WETH",
                    address: "0xfff9976782d46cc05630d1f6ebab18b2324d6b14"
                        .parse()
                        .expect("invalid WETH address"),
                    decimals: 18,
                    wrapped_native: true,
                },
                taker_token: TokenInfo {
                    symbol: "USDC",
                    address: "0x1c7d4b196cb0c7b01d743fbc6116a902379c7238"
                        .parse()
                        .expect("invalid USDC address"),
                    decimals: 6,
                    wrapped_native: false,
                },
                // 0.001 ETH covers a couple of approval transactions.
                min_native_balance: U256::from(1_000_000_000_000_000u64),
                expiration_offset: Duration::from_secs(120),
                default_making_amount: "0.0001",
                default_taking_amount: "0.1",
            },
            Network::Polygon => NetworkConfig {
                network: *self,
                chain_id: 137,
                name: "Polygon",
                rpc_url: "https://polygon-rpc.com".to_string(),
                explorer: "https://polygonscan.com",
                router,
                maker_token: TokenInfo {
                    symbol: "WMATIC",
                    address: "0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270"
                        .parse()
                        .expect("invalid WMATIC address"),
                    decimals: 18,
                    wrapped_native: true,
                },
                taker_token: TokenInfo {
                    symbol: "USDC",
                    address: "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174"
                        .parse()
                        .expect("invalid USDC address"),
                    decimals: 6,
                    wrapped_native: false,
                },
                // 0.1 POL for gas fees.
                min_native_balance: U256::from(100_000_000_000_000_000u64),
                expiration_offset: Duration::from_secs(300),
                default_making_amount: "0.1",
                default_taking_amount: "0.05",
            },
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Networks probed by the `check-networks` command. Only the chain id is
/// needed to ask the orderbook service whether it serves the network.
pub const PROBE_NETWORKS: &[(&str, u64)] = &[
    ("Ethereum Mainnet", 1),
    ("Polygon", 137),
    ("BSC", 56),
    ("Arbitrum", 42161),
    ("Optimism", 10),
    ("Sepolia Testnet", 11155111),
    ("Goerli Testnet", 5),
];
