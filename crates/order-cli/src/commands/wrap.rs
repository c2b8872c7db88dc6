//! `wrap`: wrap native currency into the network's wrapped trading token.

use orderbook_core::amount::{format_base_units, to_base_units};
use orderbook_core::api::{ChainReader, EthRpcClient};
use orderbook_core::chain::Network;
use orderbook_core::config::Config;
use rust_decimal::Decimal;

pub async fn run(config: &Config, network: Network, amount: Decimal) -> anyhow::Result<()> {
    let mut net = network.config();
    if let Some(url) = config.rpc_override(network) {
        net.rpc_url = url.to_string();
    }
    let token = net.maker_token;

    anyhow::ensure!(
        token.wrapped_native,
        "{} is not a wrapped native token",
        token.symbol
    );

    println!("=== Wrap native currency into {} on {} ===\n", token.symbol, net.name);

    let wallet = config.wallet()?;
    let rpc = EthRpcClient::new(net.rpc_url.clone());

    let before = rpc.erc20_balance(token.address, wallet.address()).await?;
    println!(
        "Current {} balance: {}",
        token.symbol,
        format_base_units(before, token.decimals)
    );

    let value = to_base_units(amount, token.decimals)?;
    println!("\nWrapping {}...", amount);

    let tx_hash = rpc
        .wrap_native(&wallet, net.chain_id, token.address, value)
        .await?;
    println!("TX: {}", tx_hash);

    println!("Waiting for confirmation...");
    rpc.wait_for_receipt(&tx_hash).await?;
    println!("✓ Wrapped");

    let after = rpc.erc20_balance(token.address, wallet.address()).await?;
    println!(
        "New {} balance: {}",
        token.symbol,
        format_base_units(after, token.decimals)
    );
    Ok(())
}
