//! Small helpers shared by server and clients

use rust_decimal::prelude::*;

/// Monetary values are kept at 2 decimal places, half away from zero
const DECIMAL_PLACES: u32 = 2;

/// Largest single amount accepted on capture
///
/// Keeps every sum of stored amounts well inside `Decimal`'s range.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// Normalize an incoming amount to cents
///
/// `None` when the value is not finite or exceeds [`MAX_AMOUNT`].
pub fn round_money(value: f64) -> Option<f64> {
    if !value.is_finite() || value.abs() > MAX_AMOUNT {
        return None;
    }
    Decimal::from_f64(value).map(to_f64)
}

/// Convert f64 to Decimal for calculation (values already bounded by [`round_money`])
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Sum f64 amounts exactly and round the result
pub fn sum_money<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    to_f64(values.into_iter().map(to_decimal).sum())
}
