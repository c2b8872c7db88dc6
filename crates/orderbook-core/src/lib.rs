//! Orderbook Core Library
//!
//! Limit order construction, EIP-712 signing, and submission clients for the
//! 1inch Limit Order Protocol v4 orderbook service, plus the ERC-20 RPC
//! plumbing (balances, allowances, approvals, wrapping) the submission
//! workflow depends on.

pub mod amount;
pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod remediation;
pub mod signing;
pub mod workflow;

pub use error::{ApiErrorKind, Error, Result};
