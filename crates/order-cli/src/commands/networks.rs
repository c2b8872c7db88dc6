//! `check-networks`: probe which chains the orderbook service serves.

use orderbook_core::api::{OrderbookClient, ReqwestConnector};
use orderbook_core::chain::PROBE_NETWORKS;
use orderbook_core::config::Config;

pub async fn run(config: &Config) -> anyhow::Result<()> {
    println!("=== Orderbook network support ===\n");

    for (name, chain_id) in PROBE_NETWORKS {
        let client =
            OrderbookClient::new(ReqwestConnector::new(), config.auth_key.clone(), *chain_id);

        match client.supports_network().await {
            Ok(true) => println!("✓ {} ({}): supported", name, chain_id),
            Ok(false) => println!("✗ {} ({}): not supported", name, chain_id),
            Err(e) => println!("✗ {} ({}): {}", name, chain_id, e),
        }
    }

    println!("\nTestnets are often unsupported. For cheap end-to-end runs,");
    println!("use a low-gas mainnet such as Polygon with small amounts.");
    Ok(())
}
