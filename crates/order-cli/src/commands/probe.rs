//! `probe-api`: inspect the orderbook API shape without placing a real
//! order.
//!
//! Reads a public endpoint, then submits a knowingly invalid order so the
//! service's rejection shape (and our classification of it) can be checked
//! against a live deployment.

use alloy_primitives::{Address, B256};
use orderbook_core::api::{OrderbookClient, ReqwestConnector};
use orderbook_core::chain::Network;
use orderbook_core::config::Config;
use orderbook_core::signing::{OrderPayload, SignedOrder};

pub async fn run(config: &Config, network: Network) -> anyhow::Result<()> {
    let net = network.config();
    let client = OrderbookClient::new(
        ReqwestConnector::new(),
        config.auth_key.clone(),
        net.chain_id,
    );

    println!("=== Orderbook API probe: {} ===\n", net.name);
    println!("Base path: /orderbook/v4.0/{}/", net.chain_id);

    println!("\n1. Fetching orders for the zero address...");
    match client.orders_by_maker(Address::ZERO).await {
        Ok(value) => match value.as_array() {
            Some(orders) => println!("   ✓ API reachable, {} orders", orders.len()),
            None => println!("   ✓ API reachable: {}", value),
        },
        Err(e) => println!("   ✗ {}", e),
    }

    println!("\n2. Submitting a knowingly invalid order...");
    match client.submit_order(&dummy_order()).await {
        Ok(ack) => println!("   ⚠ Unexpectedly accepted: {}", ack),
        Err(e) => {
            println!("   ✗ Rejected as expected: {}", e);
            if let Some(kind) = e.api_kind() {
                println!("   Classified as: {:?}", kind);
            }
        }
    }

    Ok(())
}

/// An order no service should accept: zero addresses, empty signature.
fn dummy_order() -> SignedOrder {
    let zero = Address::ZERO.to_string();
    SignedOrder {
        order: OrderPayload {
            salt: "1".to_string(),
            maker: zero.clone(),
            receiver: zero.clone(),
            maker_asset: zero.clone(),
            taker_asset: zero,
            making_amount: "1".to_string(),
            taking_amount: "1".to_string(),
            maker_traits: "0".to_string(),
        },
        signature: "0x".to_string(),
        extension: Some("0x".to_string()),
        order_hash: B256::ZERO,
    }
}
