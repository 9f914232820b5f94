use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::core::{AppError, Result};

/// Decimal places kept for every stored or displayed currency amount
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds an amount to the currency scale.
///
/// Uses round-half-even (banker's rounding), so 0.125 becomes 0.12 and
/// 0.135 becomes 0.14.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Formats an amount with exactly two decimal places (`16` -> `"16.00"`)
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_currency(amount))
}

/// Formats a percentage without trailing zeros (`20.0` -> `"20"`, `12.50` -> `"12.5"`)
pub fn format_percent(rate: Decimal) -> String {
    rate.normalize().to_string()
}

/// Parses a user-supplied amount such as `"100"`, `"100.5"` or `" 99.99 "`.
///
/// Amounts finer than a cent are rejected so the stored value is exactly the
/// one every report prints. Trailing zeros do not count (`"1.500"` is fine).
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Amount is required"));
    }

    let amount = Decimal::from_str(trimmed)
        .map_err(|_| AppError::validation(format!("Invalid amount: {}", raw)))?;

    if amount.normalize().scale() > CURRENCY_SCALE {
        return Err(AppError::validation(format!(
            "Amount cannot have more than {} decimal places: {}",
            CURRENCY_SCALE, trimmed
        )));
    }

    Ok(amount)
}

/// Rejects negative amounts
pub fn ensure_non_negative(field: &str, amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(AppError::validation(format!(
            "{} must be non-negative, got: {}",
            field, amount
        )));
    }
    Ok(())
}
