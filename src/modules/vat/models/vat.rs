use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::money::format_percent;

/// How VAT relates to a nominal amount.
///
/// The two strategies are deliberately separate: sales recorded through the
/// web form use a process-wide flat rate, receipts use the company's own
/// percentage and treat the total as tax-inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum VatPolicy {
    /// `vat = amount × rate`, rate a fraction in 0..=1. VAT sits on top of
    /// the amount and is never subtracted from it.
    Flat { rate: Decimal },

    /// `vat = amount × percent / 100`, percent in 0..=100. The amount already
    /// includes VAT, so `net = amount − vat`.
    Inclusive { percent: Decimal },
}

/// Result of applying a [`VatPolicy`] to an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatBreakdown {
    /// The nominal amount the policy was applied to
    pub amount: Decimal,
    /// VAT rounded to the currency scale
    pub vat: Decimal,
    /// Amount excluding VAT; equals `amount` under the flat policy
    pub net: Decimal,
}

impl VatPolicy {
    pub fn flat(rate: Decimal) -> Self {
        VatPolicy::Flat { rate }
    }

    pub fn inclusive(percent: Decimal) -> Self {
        VatPolicy::Inclusive { percent }
    }
}

impl fmt::Display for VatPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VatPolicy::Flat { rate } => {
                write!(f, "flat {}%", format_percent(*rate * Decimal::ONE_HUNDRED))
            }
            VatPolicy::Inclusive { percent } => {
                write!(f, "inclusive {}%", format_percent(*percent))
            }
        }
    }
}
