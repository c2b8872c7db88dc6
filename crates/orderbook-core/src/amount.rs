//! Human-readable amount scaling.
//!
//! Order amounts go over the wire in token base units. Scaling happens in
//! exactly one place, against the token's declared decimals, so a 6-decimal
//! stable token and an 18-decimal wrapped native token can never be mixed up
//! silently.

use crate::{Error, Result};
use alloy_primitives::U256;
use rust_decimal::Decimal;

/// Scale a human-readable amount to token base units.
///
/// Fails if the amount is negative or carries more fractional digits than
/// the token declares.
pub fn to_base_units(amount: Decimal, decimals: u8) -> Result<U256> {
    if amount.is_sign_negative() {
        return Err(Error::Order {
            message: format!("Amount {} is negative", amount),
        });
    }

    let factor = Decimal::from(10u64.pow(u32::from(decimals)));
    let scaled = amount.checked_mul(factor).ok_or_else(|| Error::Order {
        message: format!("Amount {} overflows at {} decimals", amount, decimals),
    })?;

    if scaled.fract() != Decimal::ZERO {
        return Err(Error::Order {
            message: format!(
                "Amount {} has more than {} decimal places",
                amount, decimals
            ),
        });
    }

    U256::from_str_radix(&scaled.trunc().to_string(), 10).map_err(|e| Error::Order {
        message: format!("Amount {} does not fit in a uint256: {}", amount, e),
    })
}

/// Render a base-unit value as a human-readable decimal string.
pub fn format_base_units(value: U256, decimals: u8) -> String {
    let raw = value.to_string();
    let decimals = usize::from(decimals);

    if decimals == 0 {
        return raw;
    }

    let padded = format!("{:0>width$}", raw, width = decimals + 1);
    let split = padded.len() - decimals;
    let (whole, frac) = padded.split_at(split);
    let frac = frac.trim_end_matches('0');

    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, frac)
    }
}
