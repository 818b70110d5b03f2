//! Money helpers using rust_decimal for precision
//!
//! All ledger arithmetic is done in `Decimal`. `f64` exists only at the
//! request boundary, where values are checked finite before conversion.

use rust_decimal::prelude::*;

/// Rounding precision for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;
/// Rounding precision for quantities (weight-sold items carry up to 3dp)
pub const QUANTITY_PLACES: u32 = 3;

/// Maximum allowed unit price per line item
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line item
pub const MAX_QUANTITY: f64 = 9_999.0;

/// Round a monetary amount to 2 decimal places, half-up.
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a quantity to 3 decimal places, half-up.
#[inline]
pub fn round_qty(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(QUANTITY_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert f64 to Decimal for calculation
///
/// Input values are validated finite at the request boundary. If NaN/Infinity
/// somehow reaches here, logs an error and returns ZERO to avoid silent data
/// corruption in financial records.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for serialization, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with inputs bounded by MAX_PRICE * MAX_QUANTITY
        // is always within f64 representable range
        .expect("Decimal rounded to 2dp is always representable as f64")
}
