//! EIP-712 order signing.

use crate::signing::domain::Eip712Domain;
use crate::signing::order::{LimitOrder, SignedOrder};
use crate::{Error, Result};
use alloy_primitives::{Address, B256};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::SolValue;

/// Order signer bound to one wallet and one chain's protocol domain.
#[derive(Clone)]
pub struct OrderSigner {
    signer: PrivateKeySigner,
    domain: Eip712Domain,
}

impl OrderSigner {
    /// Create a signer for the Limit Order Protocol v4 domain on a chain.
    pub fn new(signer: PrivateKeySigner, chain_id: u64) -> Self {
        Self {
            signer,
            domain: Eip712Domain::limit_order_v4(chain_id),
        }
    }

    /// Create a signer with a custom domain.
    pub fn with_domain(signer: PrivateKeySigner, domain: Eip712Domain) -> Self {
        Self { signer, domain }
    }

    /// The maker address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The EIP-712 digest for an order under this signer's domain. This is
    /// also the order hash the orderbook service indexes by.
    pub fn order_hash(&self, order: &LimitOrder) -> B256 {
        compute_typed_data_hash(self.domain.separator(), order.struct_hash())
    }

    /// Sign an order, producing the submission-ready form.
    ///
    /// Underlying signer failures propagate unchanged in the message.
    pub async fn sign_order(&self, order: &LimitOrder) -> Result<SignedOrder> {
        let digest = self.order_hash(order);

        let signature = self
            .signer
            .sign_hash(&digest)
            .await
            .map_err(|e| Error::Signing {
                message: e.to_string(),
            })?;

        Ok(SignedOrder {
            order: order.to_payload(),
            signature: format!("0x{}", hex::encode(signature.as_bytes())),
            extension: None,
            order_hash: digest,
        })
    }
}

/// `keccak256("\x19\x01" ‖ domainSeparator ‖ structHash)`.
fn compute_typed_data_hash(domain_separator: B256, struct_hash: B256) -> B256 {
    let prefix = [0x19, 0x01];
    let data = (prefix, domain_separator, struct_hash).abi_encode_packed();
    alloy_primitives::keccak256(&data)
}

impl std::fmt::Debug for OrderSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderSigner")
            .field("address", &format!("{:?}", self.address()))
            .field("chain_id", &self.domain.chain_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use std::str::FromStr;
    use std::time::Duration;

    // Test private key (DO NOT USE IN PRODUCTION)
    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
    const SEPOLIA: u64 = 11155111;

    fn test_signer() -> OrderSigner {
        let wallet = PrivateKeySigner::from_str(TEST_PRIVATE_KEY).unwrap();
        OrderSigner::new(wallet, SEPOLIA)
    }

    fn test_order(signer: &OrderSigner) -> LimitOrder {
        LimitOrder::builder()
            .maker(signer.address())
            .maker_asset(
                "0xfff9976782d46cc05630d1f6ebab18b2324d6b14"
                    .parse()
                    .unwrap(),
            )
            .taker_asset(
                "0x1c7d4b196cb0c7b01d743fbc6116a902379c7238"
                    .parse()
                    .unwrap(),
            )
            .making_amount(U256::from(100_000_000_000_000u64))
            .taking_amount(U256::from(100_000u64))
            .expires_in(Duration::from_secs(120))
            .build()
            .unwrap()
    }

    #[test]
    fn test_signer_address() {
        let signer = test_signer();
        assert_eq!(
            signer.address().to_string().to_lowercase(),
            TEST_ADDRESS.to_lowercase()
        );
    }

    #[tokio::test]
    async fn test_sign_order_format() {
        let signer = test_signer();
        let order = test_order(&signer);
        let signed = signer.sign_order(&order).await.unwrap();

        // 0x + 130 hex chars (65 bytes)
        assert!(signed.signature.starts_with("0x"));
        assert_eq!(signed.signature.len(), 132);
        assert_eq!(signed.order_hash, signer.order_hash(&order));
        assert!(signed.extension.is_none());
    }

    #[tokio::test]
    async fn test_signature_recovers_maker() {
        let signer = test_signer();
        let order = test_order(&signer);
        let signed = signer.sign_order(&order).await.unwrap();

        let raw = hex::decode(signed.signature.trim_start_matches("0x")).unwrap();
        let signature = alloy_primitives::Signature::from_raw(&raw).unwrap();
        let recovered = signature
            .recover_address_from_prehash(&signed.order_hash)
            .unwrap();

        assert_eq!(recovered, signer.address());
    }

    #[tokio::test]
    async fn test_signature_deterministic_for_fixed_order() {
        let signer = test_signer();
        let mut order = test_order(&signer);
        order.salt = U256::from(999u64);

        let a = signer.sign_order(&order).await.unwrap();
        let b = signer.sign_order(&order).await.unwrap();
        assert_eq!(a.signature, b.signature);
    }

    #[tokio::test]
    async fn test_order_hash_differs_per_chain() {
        let wallet = PrivateKeySigner::from_str(TEST_PRIVATE_KEY).unwrap();
        let sepolia = OrderSigner::new(wallet.clone(), SEPOLIA);
        let polygon = OrderSigner::new(wallet, 137);

        let mut order = test_order(&sepolia);
        order.salt = U256::from(1u64);

        assert_ne!(sepolia.order_hash(&order), polygon.order_hash(&order));
    }

    #[test]
    fn test_debug_does_not_expose_key() {
        let signer = test_signer();
        let debug_str = format!("{:?}", signer);
        assert!(debug_str.contains("OrderSigner"));
        assert!(!debug_str.contains(TEST_PRIVATE_KEY));
    }
}
