//! `submit`: the end-to-end order submission demo.

use orderbook_core::amount::format_base_units;
use orderbook_core::api::{EthRpcClient, OrderbookClient, ReqwestConnector};
use orderbook_core::chain::Network;
use orderbook_core::config::Config;
use orderbook_core::remediation::RemediationAction;
use orderbook_core::signing::OrderSigner;
use orderbook_core::workflow::{OrderWorkflow, RunOutcome, SubmitParams};
use rust_decimal::Decimal;
use std::path::PathBuf;

pub async fn run(
    config: &Config,
    network: Network,
    making_amount: Option<Decimal>,
    taking_amount: Option<Decimal>,
) -> anyhow::Result<()> {
    let mut net = network.config();
    if let Some(url) = config.rpc_override(network) {
        net.rpc_url = url.to_string();
    }

    println!("=== Limit Order Submission: {} ===\n", net.name);

    let wallet = config.wallet()?;
    let signer = OrderSigner::new(wallet, net.chain_id);
    println!("Maker wallet: {}", signer.address());

    let params = SubmitParams {
        making_amount: making_amount
            .unwrap_or_else(|| net.default_making_amount.parse().expect("default amount")),
        taking_amount: taking_amount
            .unwrap_or_else(|| net.default_taking_amount.parse().expect("default amount")),
    };
    println!(
        "Selling {} {} for {} {} (expires in {}s)\n",
        params.making_amount,
        net.maker_token.symbol,
        params.taking_amount,
        net.taker_token.symbol,
        net.expiration_offset.as_secs()
    );

    let rpc = EthRpcClient::new(net.rpc_url.clone());
    let orderbook = OrderbookClient::new(
        ReqwestConnector::new(),
        config.auth_key.clone(),
        net.chain_id,
    );
    let workflow = OrderWorkflow::new(&net, &rpc, &orderbook, &signer);

    match workflow.run(&params).await? {
        RunOutcome::Submitted {
            order_hash,
            acknowledgement,
        } => {
            println!("✓ Order is live on {}", net.name);
            println!("Order hash: {}", order_hash);
            if !acknowledgement.is_null() {
                println!(
                    "Service response: {}",
                    serde_json::to_string_pretty(&acknowledgement)?
                );
            }
        }
        RunOutcome::InsufficientGas { balance, required } => {
            println!(
                "✗ Not enough native currency for gas: have {}, need {}",
                format_base_units(balance, 18),
                format_base_units(required, 18)
            );
            println!("Fund the wallet and run again.");
        }
        RunOutcome::InsufficientBalance {
            token,
            balance,
            required,
        } => {
            println!(
                "✗ Not enough {}: have {}, need {}",
                token.symbol,
                format_base_units(balance, token.decimals),
                format_base_units(required, token.decimals)
            );
        }
        RunOutcome::Remediate(action) => {
            println!("✗ {}", action.describe());
            let path = write_remediation_script(&action)?;
            println!("✓ Wrote {}", path.display());
            println!("Run: sh {}", path.display());
        }
        RunOutcome::UnsupportedNetwork { chain_id } => {
            println!(
                "⚠ The orderbook service does not support chain id {}",
                chain_id
            );
            println!("Run the check-networks command to see supported chains.");
        }
    }

    Ok(())
}

/// Render the remediation action into a runnable script in the working
/// directory. This is the only place the workflow's follow-up actions touch
/// the filesystem.
fn write_remediation_script(action: &RemediationAction) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(action.script_name());
    std::fs::write(&path, action.render_script())?;
    Ok(path)
}
