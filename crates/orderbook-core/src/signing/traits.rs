//! Packed maker traits bitfield.
//!
//! The protocol encodes order metadata into a single `uint256` the
//! settlement contract can decode cheaply. Layout (low bit = 0):
//!
//! ```text
//! bits   0..80   allowed sender (low 10 bytes; zero = anyone)
//! bits  80..120  expiration, unix seconds (40 bits; zero = never)
//! bits 120..160  nonce or epoch (40 bits)
//! bits 160..200  series (40 bits)
//! bits 247..256  behavior flags
//! ```
//!
//! Only expiration and nonce are set here; everything downstream treats the
//! packed value as an opaque integer.

use alloy_primitives::U256;

const EXPIRATION_OFFSET: usize = 80;
const NONCE_OFFSET: usize = 120;

/// Maker traits for a limit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MakerTraits(U256);

impl MakerTraits {
    /// 40-bit field mask.
    fn mask40() -> U256 {
        (U256::from(1u8) << 40) - U256::from(1u8)
    }

    /// Empty traits: no expiration, zero nonce, no flags.
    pub fn new() -> Self {
        Self(U256::ZERO)
    }

    /// Set the expiration timestamp (unix seconds, truncated to 40 bits).
    pub fn with_expiration(self, unix_secs: u64) -> Self {
        let field = U256::from(unix_secs) & Self::mask40();
        let cleared = self.0 & !(Self::mask40() << EXPIRATION_OFFSET);
        Self(cleared | (field << EXPIRATION_OFFSET))
    }

    /// Set the order nonce (truncated to 40 bits).
    pub fn with_nonce(self, nonce: u64) -> Self {
        let field = U256::from(nonce) & Self::mask40();
        let cleared = self.0 & !(Self::mask40() << NONCE_OFFSET);
        Self(cleared | (field << NONCE_OFFSET))
    }

    /// Expiration timestamp, unix seconds. Zero means no expiration.
    pub fn expiration(&self) -> u64 {
        ((self.0 >> EXPIRATION_OFFSET) & Self::mask40()).to::<u64>()
    }

    /// Order nonce.
    pub fn nonce(&self) -> u64 {
        ((self.0 >> NONCE_OFFSET) & Self::mask40()).to::<u64>()
    }

    /// The packed value as consumed by hashing and serialization.
    pub fn as_u256(&self) -> U256 {
        self.0
    }
}

// The wire format wants the packed field as a decimal string, same as the
// other uint256 order fields.
impl std::fmt::Display for MakerTraits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
