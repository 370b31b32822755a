use alloy::primitives::{utils::parse_ether, U256};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount is not positive")]
    NonPositive,
    #[error("amount is not a valid decimal")]
    Invalid,
}

/// A user-entered amount converted to wei.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAmount {
    pub raw: String,
    pub value: U256,
}

/// Validate a user-entered decimal amount and convert it to wei.
///
/// Two passes: a decimal sanity check first, then the exact base-unit
/// conversion. A value can look positive in decimal yet read as zero wei, and
/// malformed strings that loose numeric parsing would accept must be rejected
/// before conversion.
pub fn parse_amount(raw: &str) -> Result<ParsedAmount, AmountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let decimal: f64 = trimmed.parse().unwrap_or(f64::NAN);
    if !decimal.is_finite() || decimal <= 0.0 {
        return Err(AmountError::NonPositive);
    }

    let value = match parse_ether(trimmed) {
        Ok(value) => value,
        // Fractional dust below one wei reads as zero, not as malformed input.
        Err(_) if decimal < 1e-18 => return Err(AmountError::NonPositive),
        Err(_) => return Err(AmountError::Invalid),
    };
    if value.is_zero() {
        return Err(AmountError::NonPositive);
    }

    Ok(ParsedAmount {
        raw: trimmed.to_owned(),
        value,
    })
}
