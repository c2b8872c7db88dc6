//! Limit order model and builder.

use crate::signing::traits::MakerTraits;
use crate::{Error, Result};
use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolValue;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A limit order ready for hashing and signing.
///
/// Matches the `Order` struct verified by the settlement contract. Amounts
/// are token base units; `receiver` set to the zero address means proceeds
/// go to the maker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitOrder {
    pub salt: U256,
    pub maker: Address,
    pub receiver: Address,
    pub maker_asset: Address,
    pub taker_asset: Address,
    pub making_amount: U256,
    pub taking_amount: U256,
    pub maker_traits: MakerTraits,
}

impl LimitOrder {
    pub fn builder() -> OrderBuilder {
        OrderBuilder::new()
    }

    /// Compute the EIP-712 struct hash for this order.
    pub fn struct_hash(&self) -> B256 {
        let order_type_hash = alloy_primitives::keccak256(
            b"Order(uint256 salt,address maker,address receiver,address makerAsset,address takerAsset,uint256 makingAmount,uint256 takingAmount,uint256 makerTraits)",
        );

        // EIP-712 encodeData: every field padded to 32 bytes, addresses
        // left-padded from 20.
        let maker_padded = B256::left_padding_from(self.maker.as_slice());
        let receiver_padded = B256::left_padding_from(self.receiver.as_slice());
        let maker_asset_padded = B256::left_padding_from(self.maker_asset.as_slice());
        let taker_asset_padded = B256::left_padding_from(self.taker_asset.as_slice());

        let encoded = (
            order_type_hash,
            self.salt,
            maker_padded,
            receiver_padded,
            maker_asset_padded,
            taker_asset_padded,
            self.making_amount,
            self.taking_amount,
            self.maker_traits.as_u256(),
        )
            .abi_encode_packed();

        alloy_primitives::keccak256(&encoded)
    }

    /// The wire representation submitted to the orderbook service.
    pub fn to_payload(&self) -> OrderPayload {
        OrderPayload {
            salt: self.salt.to_string(),
            maker: self.maker.to_string(),
            receiver: self.receiver.to_string(),
            maker_asset: self.maker_asset.to_string(),
            taker_asset: self.taker_asset.to_string(),
            making_amount: self.making_amount.to_string(),
            taking_amount: self.taking_amount.to_string(),
            maker_traits: self.maker_traits.to_string(),
        }
    }
}

/// JSON form of an order: integers as decimal strings, camelCase keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub salt: String,
    pub maker: String,
    pub receiver: String,
    pub maker_asset: String,
    pub taker_asset: String,
    pub making_amount: String,
    pub taking_amount: String,
    pub maker_traits: String,
}

/// A signed order ready for submission.
#[derive(Debug, Clone)]
pub struct SignedOrder {
    pub order: OrderPayload,
    /// 65-byte ECDSA signature as a 0x-prefixed hex string.
    pub signature: String,
    /// Optional extension calldata; omitted from the request when absent.
    pub extension: Option<String>,
    /// EIP-712 digest the signature covers.
    pub order_hash: B256,
}

/// Fluent builder for limit orders.
///
/// Each build samples a fresh 256-bit salt and a fresh 40-bit nonce, so two
/// otherwise identical orders are distinct on the wire.
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    maker: Option<Address>,
    receiver: Address,
    maker_asset: Option<Address>,
    taker_asset: Option<Address>,
    making_amount: Option<U256>,
    taking_amount: Option<U256>,
    expires_in: Duration,
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self {
            maker: None,
            receiver: Address::ZERO,
            maker_asset: None,
            taker_asset: None,
            making_amount: None,
            taking_amount: None,
            expires_in: Duration::from_secs(120),
        }
    }

    pub fn maker(mut self, maker: Address) -> Self {
        self.maker = Some(maker);
        self
    }

    /// Proceeds recipient. Defaults to the zero address, i.e. the maker.
    pub fn receiver(mut self, receiver: Address) -> Self {
        self.receiver = receiver;
        self
    }

    pub fn maker_asset(mut self, asset: Address) -> Self {
        self.maker_asset = Some(asset);
        self
    }

    pub fn taker_asset(mut self, asset: Address) -> Self {
        self.taker_asset = Some(asset);
        self
    }

    /// Amount sold, in maker-asset base units.
    pub fn making_amount(mut self, amount: U256) -> Self {
        self.making_amount = Some(amount);
        self
    }

    /// Amount bought, in taker-asset base units.
    pub fn taking_amount(mut self, amount: U256) -> Self {
        self.taking_amount = Some(amount);
        self
    }

    /// How long the order stays valid from now.
    pub fn expires_in(mut self, offset: Duration) -> Self {
        self.expires_in = offset;
        self
    }

    /// Build the order.
    ///
    /// Rejects missing fields, zero amounts, and identical asset pairs.
    pub fn build(self) -> Result<LimitOrder> {
        let maker = self.require(self.maker, "maker")?;
        let maker_asset = self.require(self.maker_asset, "maker_asset")?;
        let taker_asset = self.require(self.taker_asset, "taker_asset")?;
        let making_amount = self.require(self.making_amount, "making_amount")?;
        let taking_amount = self.require(self.taking_amount, "taking_amount")?;

        if making_amount.is_zero() || taking_amount.is_zero() {
            return Err(Error::Order {
                message: "Order amounts must be non-zero".to_string(),
            });
        }
        if maker_asset == taker_asset {
            return Err(Error::Order {
                message: format!("Maker and taker asset are both {}", maker_asset),
            });
        }

        let mut rng = rand::thread_rng();
        let mut salt_bytes = [0u8; 32];
        rng.fill(&mut salt_bytes);
        let nonce = rng.gen_range(0..(1u64 << 40));

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let expiration = now + self.expires_in.as_secs();

        Ok(LimitOrder {
            salt: U256::from_be_bytes(salt_bytes),
            maker,
            receiver: self.receiver,
            maker_asset,
            taker_asset,
            making_amount,
            taking_amount,
            maker_traits: MakerTraits::new()
                .with_expiration(expiration)
                .with_nonce(nonce),
        })
    }

    fn require<T>(&self, field: Option<T>, name: &str) -> Result<T> {
        field.ok_or_else(|| Error::Order {
            message: format!("Missing required order field: {}", name),
        })
    }
}

impl Default for OrderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_maker() -> Address {
        "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            .parse()
            .unwrap()
    }

    fn test_assets() -> (Address, Address) {
        (
            "0xfff9976782d46cc05630d1f6ebab18b2324d6b14"
                .parse()
                .unwrap(),
            "0x1c7d4b196cb0c7b01d743fbc6116a902379c7238"
                .parse()
                .unwrap(),
        )
    }

    fn test_order() -> LimitOrder {
        let (weth, usdc) = test_assets();
        LimitOrder::builder()
            .maker(test_maker())
            .maker_asset(weth)
            .taker_asset(usdc)
            .making_amount(U256::from(100_000_000_000_000u64))
            .taking_amount(U256::from(100_000u64))
            .expires_in(Duration::from_secs(120))
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_basic_order() {
        let order = test_order();
        assert_eq!(order.maker, test_maker());
        assert_eq!(order.receiver, Address::ZERO);
        assert_ne!(order.salt, U256::ZERO);
        assert!(order.maker_traits.expiration() > 0);
    }

    #[test]
    fn test_salt_and_nonce_unique_per_build() {
        let a = test_order();
        let b = test_order();
        assert_ne!(a.salt, b.salt);
        // 40 bits of nonce: a collision here is ~1e-12
        assert_ne!(a.maker_traits.nonce(), b.maker_traits.nonce());
    }

    #[test]
    fn test_nonce_fits_40_bits() {
        let order = test_order();
        assert!(order.maker_traits.nonce() < (1 << 40));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let (weth, usdc) = test_assets();
        let result = LimitOrder::builder()
            .maker(test_maker())
            .maker_asset(weth)
            .taker_asset(usdc)
            .making_amount(U256::ZERO)
            .taking_amount(U256::from(100_000u64))
            .build();
        assert!(matches!(result, Err(Error::Order { .. })));
    }

    #[test]
    fn test_identical_assets_rejected() {
        let (weth, _) = test_assets();
        let result = LimitOrder::builder()
            .maker(test_maker())
            .maker_asset(weth)
            .taker_asset(weth)
            .making_amount(U256::from(1u64))
            .taking_amount(U256::from(1u64))
            .build();
        assert!(matches!(result, Err(Error::Order { .. })));
    }

    #[test]
    fn test_missing_maker_rejected() {
        let (weth, usdc) = test_assets();
        let result = LimitOrder::builder()
            .maker_asset(weth)
            .taker_asset(usdc)
            .making_amount(U256::from(1u64))
            .taking_amount(U256::from(1u64))
            .build();
        assert!(matches!(result, Err(Error::Order { .. })));
    }

    #[test]
    fn test_struct_hash_depends_on_salt() {
        let mut a = test_order();
        let mut b = a.clone();
        a.salt = U256::from(1u64);
        b.salt = U256::from(2u64);
        assert_ne!(a.struct_hash(), b.struct_hash());
    }

    #[test]
    fn test_struct_hash_deterministic_for_fixed_fields() {
        let mut a = test_order();
        a.salt = U256::from(999u64);
        a.maker_traits = MakerTraits::new().with_expiration(1_700_000_000).with_nonce(7);
        let b = a.clone();
        assert_eq!(a.struct_hash(), b.struct_hash());
    }

    #[test]
    fn test_payload_serialization() {
        let mut order = test_order();
        order.salt = U256::from(42u64);
        let payload = order.to_payload();

        assert_eq!(payload.salt, "42");
        assert_eq!(payload.making_amount, "100000000000000");
        assert_eq!(payload.taking_amount, "100000");
        assert_eq!(
            payload.receiver,
            "0x0000000000000000000000000000000000000000"
        );

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("makerAsset"));
        assert!(json.contains("makingAmount"));
        assert!(json.contains("makerTraits"));
    }
}
