//! `approve`: grant the router an allowance on the maker token.

use alloy_primitives::U256;
use orderbook_core::amount::{format_base_units, to_base_units};
use orderbook_core::api::{ChainReader, EthRpcClient};
use orderbook_core::chain::Network;
use orderbook_core::config::Config;
use rust_decimal::Decimal;

pub async fn run(config: &Config, network: Network, amount: Option<Decimal>) -> anyhow::Result<()> {
    let mut net = network.config();
    if let Some(url) = config.rpc_override(network) {
        net.rpc_url = url.to_string();
    }
    let token = net.maker_token;

    println!("=== Approve {} for the router on {} ===\n", token.symbol, net.name);

    let wallet = config.wallet()?;
    let rpc = EthRpcClient::new(net.rpc_url.clone());

    let current = rpc
        .erc20_allowance(token.address, wallet.address(), net.router)
        .await?;
    println!(
        "Current allowance: {} {}",
        format_base_units(current, token.decimals),
        token.symbol
    );

    let target = match amount {
        Some(human) => to_base_units(human, token.decimals)?,
        None => U256::MAX,
    };

    // An existing unlimited-style allowance is left alone; explicit amounts
    // only resend when the current allowance falls short.
    let already_approved = match amount {
        Some(_) => current >= target,
        None => !current.is_zero(),
    };
    if already_approved {
        println!("✓ Already approved");
        return Ok(());
    }

    println!("\nSending approval transaction...");
    let tx_hash = rpc
        .approve(&wallet, net.chain_id, token.address, net.router, target)
        .await?;
    println!("TX: {}", tx_hash);

    println!("Waiting for confirmation...");
    rpc.wait_for_receipt(&tx_hash).await?;

    println!("✓ Approved");
    println!("View: {}/tx/{}", net.explorer, tx_hash);
    Ok(())
}
