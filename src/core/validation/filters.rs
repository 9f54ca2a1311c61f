//! Reusable field filters
//!
//! These filters coerce raw form text before and after validation

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Filter: trim whitespace from a raw value
pub fn trim(value: Option<&str>) -> Option<&str> {
    value.map(str::trim)
}

/// Filter: coerce raw text to a decimal number
///
/// Follows numeric form-input semantics: surrounding whitespace is ignored
/// and a missing or blank value coerces to zero. Plain (`"12.50"`) and
/// scientific (`"1.5e2"`) notations are accepted. Returns `None` for text
/// that is not a number, including digit-group separators (`"1_000"`) that
/// `Decimal::from_str` would otherwise skip.
pub fn coerce_decimal(value: Option<&str>) -> Option<Decimal> {
    let text = trim(value).unwrap_or("");
    if text.is_empty() {
        return Some(Decimal::ZERO);
    }
    if text.contains('_') {
        return None;
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Filter: convert a dollar amount to whole cents
///
/// Rounds half away from zero at the cent boundary (`12.345` -> `1235`,
/// `12.344` -> `1234`). Returns `None` if the result does not fit in `i64`.
pub fn to_cents(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
