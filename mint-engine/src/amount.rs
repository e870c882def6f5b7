//! Exact conversion between ledger and bank amount representations
//!
//! The ledger counts smallest-unit tokens (18 decimal places); the bank
//! speaks decimal strings. Conversion is exact decimal arithmetic, never
//! floating point.

use crate::{Error, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Token decimal places on the ledger side
pub const DECIMAL_DIGITS: u32 = 18;

/// Maximum supported decimal places (the mantissa limit of [`Decimal`])
const MAX_DIGITS: u32 = 28;

/// Convert a smallest-unit amount to its decimal string (`10^18` → `"1"`)
pub fn to_decimal(wei: u128, digits: u32) -> Result<String> {
    if digits > MAX_DIGITS {
        return Err(Error::Amount(format!("{} decimal digits exceeds supported precision", digits)));
    }
    let wei = i128::try_from(wei)
        .map_err(|_| Error::Amount(format!("{} exceeds supported precision", wei)))?;
    let amount = Decimal::try_from_i128_with_scale(wei, digits)
        .map_err(|e| Error::Amount(e.to_string()))?;
    Ok(amount.normalize().to_string())
}

/// Convert a decimal string to a smallest-unit amount (`"1.2"` → `12 * 10^17`)
///
/// Rejects negative amounts and amounts with sub-unit precision beyond
/// `digits` places.
pub fn to_wei(amount: &str, digits: u32) -> Result<u128> {
    if digits > MAX_DIGITS {
        return Err(Error::Amount(format!("{} decimal digits exceeds supported precision", digits)));
    }
    let parsed = Decimal::from_str_exact(amount)
        .map_err(|e| Error::Amount(format!("'{}': {}", amount, e)))?;
    if parsed.is_sign_negative() {
        return Err(Error::Amount(format!("'{}': negative amount", amount)));
    }

    let multiplier = Decimal::from_i128_with_scale(10i128.pow(digits), 0);
    let scaled = parsed
        .checked_mul(multiplier)
        .ok_or_else(|| Error::Amount(format!("'{}' overflows at {} digits", amount, digits)))?;

    if !scaled.fract().is_zero() {
        return Err(Error::Amount(format!(
            "'{}' has more than {} decimal places",
            amount, digits
        )));
    }

    scaled
        .trunc()
        .to_u128()
        .ok_or_else(|| Error::Amount(format!("'{}' overflows at {} digits", amount, digits)))
}
