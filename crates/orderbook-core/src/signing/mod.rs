//! EIP-712 order signing for the Limit Order Protocol v4.
//!
//! # Architecture
//!
//! ```text
//! OrderBuilder ── builds ──► LimitOrder
//!                                │
//!                                ▼
//!                           OrderSigner ── signs ──► SignedOrder
//!                                                        │
//!                                                        ▼
//!                                                 OrderbookClient
//! ```
//!
//! # Example
//!
//! ```ignore
//! use orderbook_core::signing::{LimitOrder, OrderSigner};
//! use alloy_signer_local::PrivateKeySigner;
//!
//! let wallet = PrivateKeySigner::from_str("0x...")?;
//! let signer = OrderSigner::new(wallet, 11155111);
//!
//! let order = LimitOrder::builder()
//!     .maker(signer.address())
//!     .maker_asset(weth)
//!     .taker_asset(usdc)
//!     .making_amount(U256::from(100_000_000_000_000u64)) // 0.0001 WETH
//!     .taking_amount(U256::from(100_000u64))             // 0.1 USDC
//!     .expires_in(Duration::from_secs(120))
//!     .build()?;
//!
//! let signed = signer.sign_order(&order).await?;
//! ```

pub mod domain;
pub mod order;
pub mod signer;
pub mod traits;

pub use domain::Eip712Domain;
pub use order::{LimitOrder, OrderBuilder, OrderPayload, SignedOrder};
pub use signer::OrderSigner;
pub use traits::MakerTraits;
