//! Decimal amount parsing into integer chain units.
//!
//! Amounts arrive as decimal text ("1.5", "0.000001"). They are converted
//! exactly, digit by digit, never through floating point.

use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy::primitives::U256;
use thiserror::Error;

/// Decimals of the native asset on both supported chains.
pub const NATIVE_DECIMALS: u8 = 18;
/// Decimals of a gwei-denominated gas price.
pub const GWEI_DECIMALS: u8 = 9;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount must not be negative")]
    Negative,
    #[error("'{input}' is not a valid decimal amount: {reason}")]
    Invalid { input: String, reason: String },
    #[error("amount {0} does not fit the target integer type")]
    Overflow(String),
}

/// Parse a decimal amount into `10^-decimals` units.
pub fn parse_decimal(input: &str, decimals: u8) -> Result<U256, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(AmountError::Negative);
    }

    match parse_units(trimmed, decimals) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => Err(AmountError::Negative),
        Err(e) => Err(AmountError::Invalid {
            input: trimmed.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Native-unit decimal (e.g. ether) to wei.
pub fn native_to_wei(amount: &str) -> Result<U256, AmountError> {
    parse_decimal(amount, NATIVE_DECIMALS)
}

/// Gwei decimal to wei, as the `u128` the transaction's gas price field uses.
pub fn gwei_to_wei(gwei: &str) -> Result<u128, AmountError> {
    let wei = parse_decimal(gwei, GWEI_DECIMALS)?;
    u128::try_from(wei).map_err(|_| AmountError::Overflow(gwei.trim().to_string()))
}
