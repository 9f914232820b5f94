use rust_decimal::Decimal;

use crate::core::error::AppError;
use crate::core::money::{ensure_non_negative, round_currency};
use crate::modules::vat::models::{VatBreakdown, VatPolicy};

/// Applies a VAT policy to a non-negative amount.
///
/// VAT is rounded to two decimal places with round-half-even; the net figure
/// is derived from the rounded VAT so `net + vat == amount` holds exactly in
/// the inclusive mode. Amounts too large for a `Decimal` product are a
/// validation error, never a panic.
pub fn compute_vat(amount: Decimal, policy: VatPolicy) -> Result<VatBreakdown, AppError> {
    ensure_non_negative("Amount", amount)?;

    match policy {
        VatPolicy::Flat { rate } => {
            validate_flat_rate(rate)?;
            let vat = round_currency(checked_product(amount, rate)?);
            Ok(VatBreakdown {
                amount,
                vat,
                net: amount,
            })
        }
        VatPolicy::Inclusive { percent } => {
            validate_percent(percent)?;
            // percent / 100 <= 1, so scaling it first keeps the product within amount
            let fraction = percent
                .checked_div(Decimal::ONE_HUNDRED)
                .ok_or_else(|| overflow(amount))?;
            let vat = round_currency(checked_product(amount, fraction)?);
            Ok(VatBreakdown {
                amount,
                vat,
                net: amount - vat,
            })
        }
    }
}

fn checked_product(amount: Decimal, factor: Decimal) -> Result<Decimal, AppError> {
    amount.checked_mul(factor).ok_or_else(|| overflow(amount))
}

fn overflow(amount: Decimal) -> AppError {
    AppError::validation(format!("VAT on {} is out of range", amount))
}

/// Flat rate must be a fraction: 0 <= rate <= 1
pub fn validate_flat_rate(rate: Decimal) -> Result<(), AppError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(AppError::validation(format!(
            "Flat VAT rate must be between 0 and 1, got: {}",
            rate
        )));
    }
    Ok(())
}

/// Percentage must satisfy 0 <= percent <= 100
pub fn validate_percent(percent: Decimal) -> Result<(), AppError> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(AppError::validation(format!(
            "VAT percentage must be between 0 and 100, got: {}",
            percent
        )));
    }
    Ok(())
}

/// Calculator holding the configured flat rate for the sales ledger
#[derive(Debug, Clone, Copy)]
pub struct VatCalculator {
    flat_rate: Decimal,
}

impl VatCalculator {
    pub fn new(flat_rate: Decimal) -> Result<Self, AppError> {
        validate_flat_rate(flat_rate)?;
        Ok(Self { flat_rate })
    }

    pub fn flat_rate(&self) -> Decimal {
        self.flat_rate
    }

    /// VAT on a recorded sale under the configured flat rate
    pub fn flat_vat(&self, amount: Decimal) -> Result<Decimal, AppError> {
        compute_vat(amount, VatPolicy::flat(self.flat_rate)).map(|b| b.vat)
    }

    /// Backs VAT out of a tax-inclusive total at a company's percentage
    pub fn inclusive(&self, amount: Decimal, percent: Decimal) -> Result<VatBreakdown, AppError> {
        compute_vat(amount, VatPolicy::inclusive(percent))
    }
}
