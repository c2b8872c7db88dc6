//! Ethereum JSON-RPC client.
//!
//! Balance and allowance reads plus the two transactions the toolkit sends
//! on-chain: ERC-20 `approve` and wrapped-native `deposit`. Calldata is
//! built from 4-byte selectors directly; transactions are legacy-type,
//! signed locally and pushed through `eth_sendRawTransaction`.

use crate::{Error, Result};
use alloy_consensus::{SignableTransaction, TxLegacy};
use alloy_eips::eip2718::Encodable2718;
use alloy_network::TxSignerSync;
use alloy_primitives::{Address, Bytes, TxKind, U256};
use alloy_signer_local::PrivateKeySigner;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

/// ERC-20 `approve(address,uint256)` selector.
const APPROVE_SELECTOR: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];

/// ERC-20 `allowance(address,address)` selector.
const ALLOWANCE_SELECTOR: [u8; 4] = [0xdd, 0x62, 0xed, 0x3e];

/// ERC-20 `balanceOf(address)` selector.
const BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];

/// Wrapped-native `deposit()` selector.
const DEPOSIT_SELECTOR: [u8; 4] = [0xd0, 0xe3, 0x0d, 0xb0];

/// Gas limit for approve/deposit calls; both stay well under this.
const TX_GAS_LIMIT: u64 = 100_000;

/// Receipt polling: every 2 seconds for up to 2 minutes. The wait is
/// bounded so a stalled chain surfaces as an error instead of hanging the
/// process.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const RECEIPT_POLL_ATTEMPTS: u32 = 60;

/// Read access to chain state the submission workflow needs.
#[async_trait::async_trait]
pub trait ChainReader: Send + Sync {
    /// Native currency balance in wei.
    async fn native_balance(&self, address: Address) -> Result<U256>;

    /// ERC-20 balance in token base units.
    async fn erc20_balance(&self, token: Address, owner: Address) -> Result<U256>;

    /// ERC-20 allowance granted by `owner` to `spender`.
    async fn erc20_allowance(&self, token: Address, owner: Address, spender: Address)
        -> Result<U256>;
}

/// JSON-RPC client for one Ethereum-compatible endpoint.
pub struct EthRpcClient {
    rpc_url: String,
    http: reqwest::Client,
}

impl EthRpcClient {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            rpc_url: rpc_url.into(),
            http,
        }
    }

    async fn rpc_call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self.http.post(&self.rpc_url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(Error::Rpc {
                message: format!("RPC request failed: HTTP {}", response.status()),
            });
        }

        let envelope: JsonRpcResponse<T> = response.json().await?;

        if let Some(error) = envelope.error {
            return Err(Error::Rpc {
                message: format!("{} failed: {} (code {})", method, error.message, error.code),
            });
        }

        envelope.result.ok_or_else(|| Error::Rpc {
            message: format!("{} returned no result", method),
        })
    }

    /// `eth_call` against a contract, returning the raw hex word as U256.
    async fn call_u256(&self, to: Address, data: Vec<u8>) -> Result<U256> {
        let params = json!([
            { "to": to.to_string(), "data": format!("0x{}", hex::encode(&data)) },
            "latest"
        ]);
        let raw: String = self.rpc_call("eth_call", params).await?;
        parse_hex_u256(&raw)
    }

    pub async fn transaction_count(&self, address: Address) -> Result<u64> {
        let raw: String = self
            .rpc_call(
                "eth_getTransactionCount",
                json!([address.to_string(), "latest"]),
            )
            .await?;
        parse_hex_u64(&raw)
    }

    pub async fn gas_price(&self) -> Result<u128> {
        let raw: String = self.rpc_call("eth_gasPrice", json!([])).await?;
        parse_hex_u128(&raw)
    }

    /// Sign a legacy transaction and push it. Returns the transaction hash.
    pub async fn send_raw_transaction(
        &self,
        signer: &PrivateKeySigner,
        tx: TxLegacy,
    ) -> Result<String> {
        let mut tx = tx;
        let signature = signer
            .sign_transaction_sync(&mut tx)
            .map_err(|e| Error::Signing {
                message: e.to_string(),
            })?;

        let signed = tx.into_signed(signature);
        let raw_hex = format!("0x{}", hex::encode(signed.encoded_2718()));

        let tx_hash: String = self
            .rpc_call("eth_sendRawTransaction", json!([raw_hex]))
            .await?;

        debug!(tx_hash = %tx_hash, "Raw transaction sent");
        Ok(tx_hash)
    }

    /// Block until the transaction is mined, or error out after the polling
    /// deadline. Errors if the transaction reverted.
    pub async fn wait_for_receipt(&self, tx_hash: &str) -> Result<()> {
        for _ in 0..RECEIPT_POLL_ATTEMPTS {
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;

            let receipt: Option<serde_json::Value> = self
                .rpc_call("eth_getTransactionReceipt", json!([tx_hash]))
                .await
                .ok()
                .flatten();

            if let Some(receipt) = receipt {
                let status = receipt["status"].as_str().unwrap_or("0x0");
                if status == "0x1" {
                    return Ok(());
                }
                return Err(Error::Rpc {
                    message: format!("Transaction {} reverted", tx_hash),
                });
            }
        }

        Err(Error::Rpc {
            message: format!(
                "Transaction {} not mined after {}s",
                tx_hash,
                RECEIPT_POLL_INTERVAL.as_secs() * u64::from(RECEIPT_POLL_ATTEMPTS)
            ),
        })
    }

    /// Send an ERC-20 `approve(spender, amount)` transaction.
    pub async fn approve(
        &self,
        signer: &PrivateKeySigner,
        chain_id: u64,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<String> {
        let tx = self
            .build_legacy_tx(signer, chain_id, token, U256::ZERO, encode_approve(spender, amount))
            .await?;

        let tx_hash = self.send_raw_transaction(signer, tx).await?;
        info!(tx_hash = %tx_hash, token = %token, spender = %spender, "Approval transaction sent");
        Ok(tx_hash)
    }

    /// Wrap native currency by calling `deposit()` on the wrapped token
    /// with the amount as transaction value.
    pub async fn wrap_native(
        &self,
        signer: &PrivateKeySigner,
        chain_id: u64,
        token: Address,
        amount: U256,
    ) -> Result<String> {
        let tx = self
            .build_legacy_tx(signer, chain_id, token, amount, Bytes::from(DEPOSIT_SELECTOR.to_vec()))
            .await?;

        let tx_hash = self.send_raw_transaction(signer, tx).await?;
        info!(tx_hash = %tx_hash, token = %token, "Wrap transaction sent");
        Ok(tx_hash)
    }

    async fn build_legacy_tx(
        &self,
        signer: &PrivateKeySigner,
        chain_id: u64,
        to: Address,
        value: U256,
        input: Bytes,
    ) -> Result<TxLegacy> {
        let nonce = self.transaction_count(signer.address()).await?;
        let gas_price = self.gas_price().await?;
        // 1.2x gas price for faster inclusion
        let gas_price = gas_price + gas_price / 5;

        Ok(TxLegacy {
            chain_id: Some(chain_id),
            nonce,
            gas_price,
            gas_limit: TX_GAS_LIMIT,
            to: TxKind::Call(to),
            value,
            input,
        })
    }
}

#[async_trait::async_trait]
impl ChainReader for EthRpcClient {
    async fn native_balance(&self, address: Address) -> Result<U256> {
        let raw: String = self
            .rpc_call("eth_getBalance", json!([address.to_string(), "latest"]))
            .await?;
        parse_hex_u256(&raw)
    }

    async fn erc20_balance(&self, token: Address, owner: Address) -> Result<U256> {
        let mut data = BALANCE_OF_SELECTOR.to_vec();
        push_address(&mut data, owner);
        self.call_u256(token, data).await
    }

    async fn erc20_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256> {
        let mut data = ALLOWANCE_SELECTOR.to_vec();
        push_address(&mut data, owner);
        push_address(&mut data, spender);
        self.call_u256(token, data).await
    }
}

/// Build calldata for `approve(spender, amount)`.
fn encode_approve(spender: Address, amount: U256) -> Bytes {
    let mut data = Vec::with_capacity(68);
    data.extend_from_slice(&APPROVE_SELECTOR);
    push_address(&mut data, spender);
    data.extend_from_slice(&amount.to_be_bytes::<32>());
    Bytes::from(data)
}

/// Append an address left-padded to 32 bytes.
fn push_address(data: &mut Vec<u8>, address: Address) {
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(address.as_slice());
}

fn parse_hex_u256(raw: &str) -> Result<U256> {
    U256::from_str_radix(raw.trim_start_matches("0x"), 16).map_err(|e| Error::Rpc {
        message: format!("Invalid hex quantity {}: {}", raw, e),
    })
}

fn parse_hex_u64(raw: &str) -> Result<u64> {
    u64::from_str_radix(raw.trim_start_matches("0x"), 16).map_err(|e| Error::Rpc {
        message: format!("Invalid hex quantity {}: {}", raw, e),
    })
}

fn parse_hex_u128(raw: &str) -> Result<u128> {
    u128::from_str_radix(raw.trim_start_matches("0x"), 16).map_err(|e| Error::Rpc {
        message: format!("Invalid hex quantity {}: {}", raw, e),
    })
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(last: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        Address::from(bytes)
    }

    #[test]
    fn test_encode_approve() {
        let data = encode_approve(addr(0xaa), U256::MAX);

        assert_eq!(data.len(), 68);
        assert_eq!(&data[0..4], &APPROVE_SELECTOR);
        // address left-padded to 32 bytes
        assert_eq!(&data[4..16], &[0u8; 12]);
        assert_eq!(data[35], 0xaa);
        // max uint256 value
        assert!(data[36..68].iter().all(|b| *b == 0xff));
    }

    #[test]
    fn test_balance_of_calldata() {
        let mut data = BALANCE_OF_SELECTOR.to_vec();
        push_address(&mut data, addr(0x01));
        assert_eq!(data.len(), 36);
        assert_eq!(&data[0..4], &[0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(data[35], 0x01);
    }

    #[test]
    fn test_allowance_calldata() {
        let mut data = ALLOWANCE_SELECTOR.to_vec();
        push_address(&mut data, addr(0x01));
        push_address(&mut data, addr(0x02));
        assert_eq!(data.len(), 68);
        assert_eq!(data[35], 0x01);
        assert_eq!(data[67], 0x02);
    }

    #[test]
    fn test_parse_hex_quantities() {
        assert_eq!(parse_hex_u256("0x0").unwrap(), U256::ZERO);
        assert_eq!(parse_hex_u64("0x10").unwrap(), 16);
        assert_eq!(parse_hex_u128("0xde0b6b3a7640000").unwrap(), 1_000_000_000_000_000_000);
        assert!(parse_hex_u256("0xzz").is_err());
    }
}
