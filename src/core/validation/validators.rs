//! Reusable field validators
//!
//! Each validator is built with the message it reports and checks one raw
//! form value (`None` when the field was not submitted).

use super::filters::coerce_decimal;
use rust_decimal::Decimal;

/// A boxed validator as stored in a schema
pub type Rule = Box<dyn Fn(Option<&str>) -> Result<(), String> + Send + Sync>;

/// Validator: field is present and not blank
pub fn required(
    message: impl Into<String>,
) -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    let message = message.into();
    move |value: Option<&str>| match value {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(message.clone()),
    }
}

/// Validator: string must not exceed `max` characters
pub fn max_length(
    max: usize,
    message: impl Into<String>,
) -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    let message = message.into();
    move |value: Option<&str>| match value {
        Some(s) if s.chars().count() > max => Err(message.clone()),
        _ => Ok(()),
    }
}

/// Validator: value coerces to a number
pub fn number(
    message: impl Into<String>,
) -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    let message = message.into();
    move |value: Option<&str>| match coerce_decimal(value) {
        Some(_) => Ok(()),
        None => Err(message.clone()),
    }
}

/// Validator: number must be strictly greater than `min`
///
/// Values that are not numbers pass; `number()` reports those.
pub fn greater_than(
    min: Decimal,
    message: impl Into<String>,
) -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    let message = message.into();
    move |value: Option<&str>| match coerce_decimal(value) {
        Some(n) if n <= min => Err(message.clone()),
        _ => Ok(()),
    }
}

/// Validator: value must be exactly one of the allowed strings
pub fn one_of(
    allowed: Vec<String>,
    message: impl Into<String>,
) -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    let message = message.into();
    move |value: Option<&str>| match value {
        Some(s) if allowed.iter().any(|a| a == s) => Ok(()),
        _ => Err(message.clone()),
    }
}
