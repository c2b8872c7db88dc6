//! Clients for the orderbook service and the Ethereum JSON-RPC endpoint.

pub mod connector;
pub mod orderbook;
pub mod rpc;

pub use connector::{HttpConnector, ReqwestConnector};
pub use orderbook::OrderbookClient;
pub use rpc::{ChainReader, EthRpcClient};
