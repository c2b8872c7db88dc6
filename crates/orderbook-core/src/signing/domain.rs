//! EIP-712 domain for the Limit Order Protocol v4.

use crate::chain::ROUTER_ADDRESS;
use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolValue;

/// EIP-712 domain separator for order signing.
///
/// The protocol registers the same domain name and version on every chain;
/// only the chain id varies. The verifying contract is the router.
#[derive(Debug, Clone)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: U256,
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Create the Limit Order Protocol v4 domain for a chain.
    pub fn limit_order_v4(chain_id: u64) -> Self {
        Self {
            name: "1inch Limit Order Protocol".to_string(),
            version: "4".to_string(),
            chain_id: U256::from(chain_id),
            verifying_contract: ROUTER_ADDRESS.parse().expect("invalid router address"),
        }
    }

    /// Create domain with custom parameters.
    pub fn custom(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id: U256::from(chain_id),
            verifying_contract,
        }
    }

    /// Compute the EIP-712 domain separator hash.
    pub fn separator(&self) -> B256 {
        let domain_type_hash = alloy_primitives::keccak256(
            b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)",
        );

        let name_hash = alloy_primitives::keccak256(self.name.as_bytes());
        let version_hash = alloy_primitives::keccak256(self.version.as_bytes());

        // EIP-712 encodeData pads the address to 32 bytes.
        let contract_padded = B256::left_padding_from(self.verifying_contract.as_slice());

        let encoded = (
            domain_type_hash,
            name_hash,
            version_hash,
            self.chain_id,
            contract_padded,
        )
            .abi_encode_packed();

        alloy_primitives::keccak256(&encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v4_domain() {
        let domain = Eip712Domain::limit_order_v4(137);
        assert_eq!(domain.name, "1inch Limit Order Protocol");
        assert_eq!(domain.version, "4");
        assert_eq!(domain.chain_id, U256::from(137u64));
        assert_eq!(
            domain.verifying_contract,
            ROUTER_ADDRESS.parse::<Address>().unwrap()
        );
    }

    #[test]
    fn test_separator_deterministic() {
        let a = Eip712Domain::limit_order_v4(11155111);
        let b = Eip712Domain::limit_order_v4(11155111);
        assert_eq!(a.separator(), b.separator());
    }

    #[test]
    fn test_separator_differs_per_chain() {
        let sepolia = Eip712Domain::limit_order_v4(11155111);
        let polygon = Eip712Domain::limit_order_v4(137);
        assert_ne!(sepolia.separator(), polygon.separator());
    }
}
