//! Fixed-point integer to floating-point conversion.
//!
//! Amounts arrive as arbitrary-precision integers scaled by a power of ten
//! (USD at 10^-2, ETH at 10^-6, token balances at the token's own decimals).
//! The presentation layer wants plain numbers, rounded to the precision the
//! integer carried, without binary floating-point noise leaking into the
//! rounded digits.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use thiserror::Error;

/// Fixed-point precision of USD amounts.
pub const USD_PRECISION: i32 = 2;
/// Fixed-point precision of ETH amounts.
pub const ETH_PRECISION: i32 = 6;
/// Fractional digits kept when displaying token balances.
pub const BALANCE_DISPLAY_DIGITS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convert `value * 10^-precision` to an `f64` rounded to `precision` digits.
///
/// The integer and fractional parts are converted separately so the integer
/// part never goes through string parsing and the fractional part is rounded
/// from its exact decimal digits.
pub fn to_decimal(value: &BigInt, precision: i32) -> Result<f64, DecimalError> {
    if value.is_negative() {
        return Err(DecimalError::InvalidArgument(format!(
            "value must be non-negative, got {}",
            value
        )));
    }
    if precision < 0 {
        return Err(DecimalError::InvalidArgument(format!(
            "precision must be non-negative, got {}",
            precision
        )));
    }

    let digits = precision as usize;
    let scale = BigInt::from(10u32).pow(precision as u32);
    let int_part = value / &scale;
    let remainder = value - &int_part * &scale;

    let int_value = int_part.to_f64().ok_or_else(|| {
        DecimalError::InvalidArgument(format!("value {} is out of range", value))
    })?;
    if digits == 0 {
        return Ok(int_value);
    }

    let remainder = remainder.to_string();
    let zeros_before = digits.saturating_sub(remainder.len());
    let fraction: f64 = format!("0.{}{}", "0".repeat(zeros_before), remainder)
        .parse()
        .map_err(|_| DecimalError::InvalidArgument(format!("unparsable fraction of {}", value)))?;

    Ok(int_value + round_to(fraction, digits))
}

/// Round to `digits` fractional digits through the shortest exact decimal form.
pub fn round_to(value: f64, digits: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", digits, value).parse().unwrap_or(value)
}
