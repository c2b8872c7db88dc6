//! Remediation actions.
//!
//! When the workflow finds the maker wallet unprepared (no allowance, no
//! wrapped balance) it returns one of these values instead of touching the
//! filesystem itself. The calling layer decides how to present it; the CLI
//! renders it into a ready-to-run shell script.

use crate::amount::format_base_units;
use crate::chain::{Network, TokenInfo};
use alloy_primitives::{Address, U256};

/// A follow-up action that would make the order submittable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemediationAction {
    /// Grant the settlement contract an allowance on the maker token.
    Approve {
        network: Network,
        token: TokenInfo,
        spender: Address,
    },
    /// Wrap native currency to cover the order's making amount.
    Wrap {
        network: Network,
        token: TokenInfo,
        amount: U256,
    },
}

impl RemediationAction {
    /// File name for the rendered script, e.g. `approve-weth.sh`.
    pub fn script_name(&self) -> String {
        match self {
            RemediationAction::Approve { token, .. } => {
                format!("approve-{}.sh", token.symbol.to_lowercase())
            }
            RemediationAction::Wrap { token, .. } => {
                format!("wrap-{}.sh", token.symbol.to_lowercase())
            }
        }
    }

    /// One-line human description of what is missing.
    pub fn describe(&self) -> String {
        match self {
            RemediationAction::Approve {
                network,
                token,
                spender,
            } => format!(
                "{} needs an allowance for the router {} on {}",
                token.symbol,
                spender,
                network.config().name
            ),
            RemediationAction::Wrap {
                network,
                token,
                amount,
            } => format!(
                "Need {} more {} on {}, wrap native currency first",
                format_base_units(*amount, token.decimals),
                token.symbol,
                network.config().name
            ),
        }
    }

    /// Render a self-contained shell script performing the action.
    pub fn render_script(&self) -> String {
        match self {
            RemediationAction::Approve {
                network,
                token,
                spender,
            } => format!(
                "#!/bin/sh\n\
                 # Grant the router {} an unlimited {} allowance on {}.\n\
                 set -e\n\
                 exec cargo run -p order-cli -- approve --network {}\n",
                spender,
                token.symbol,
                network.config().name,
                network
            ),
            RemediationAction::Wrap {
                network,
                token,
                amount,
            } => {
                let human = format_base_units(*amount, token.decimals);
                format!(
                    "#!/bin/sh\n\
                     # Wrap {} native currency into {} on {}.\n\
                     set -e\n\
                     exec cargo run -p order-cli -- wrap --network {} --amount {}\n",
                    human,
                    token.symbol,
                    network.config().name,
                    network,
                    human
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approve_action() -> RemediationAction {
        let config = Network::Sepolia.config();
        RemediationAction::Approve {
            network: Network::Sepolia,
            token: config.maker_token,
            spender: config.router,
        }
    }

    #[test]
    fn test_approve_script_name() {
        assert_eq!(approve_action().script_name(), "approve-weth.sh");
    }

    #[test]
    fn test_approve_script_contents() {
        let script = approve_action().render_script();
        assert!(script.starts_with("#!/bin/sh"));
        assert!(script.contains("approve --network sepolia"));
        assert!(script.contains("WETH"));
    }

    #[test]
    fn test_wrap_script_carries_amount() {
        let config = Network::Polygon.config();
        let action = RemediationAction::Wrap {
            network: Network::Polygon,
            token: config.maker_token,
            amount: U256::from(500_000_000_000_000_000u64), // 0.5 WMATIC
        };

        assert_eq!(action.script_name(), "wrap-wmatic.sh");
        let script = action.render_script();
        assert!(script.contains("wrap --network polygon --amount 0.5"));
    }

    #[test]
    fn test_describe_names_token_and_network() {
        let text = approve_action().describe();
        assert!(text.contains("WETH"));
        assert!(text.contains("Sepolia"));
    }
}
