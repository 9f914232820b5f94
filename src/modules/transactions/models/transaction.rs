use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

use crate::core::money::ensure_non_negative;
use crate::core::{AppError, Result};

/// Date format accepted from the form and stored in the ledger
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MAX_DESCRIPTION_LEN: usize = 255;

/// A recorded sale. Immutable once stored; there is no delete path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    /// VAT derived from `amount` when the sale was recorded
    pub vat: Decimal,
}

/// A validated sale that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub vat: Decimal,
}

/// Raw fields posted by the add-transaction form
#[derive(Debug, Clone, Deserialize)]
pub struct AddTransactionForm {
    pub date: String,
    pub description: String,
    pub amount: String,
}

/// Row shape of the `transactions` table. Money columns are TEXT so the
/// decimal value survives the round trip exactly.
#[derive(Debug, FromRow)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub vat: String,
}

impl NewTransaction {
    /// Create a new transaction with validation
    ///
    /// # Arguments
    /// * `date` - Sale date
    /// * `description` - Non-empty, max 255 chars
    /// * `amount` - Must be non-negative
    /// * `vat` - Must be non-negative
    pub fn new(date: NaiveDate, description: String, amount: Decimal, vat: Decimal) -> Result<Self> {
        let description = description.trim().to_string();
        Self::validate_description(&description)?;
        ensure_non_negative("Amount", amount)?;
        ensure_non_negative("VAT", vat)?;

        Ok(Self {
            date,
            description,
            amount,
            vat,
        })
    }

    fn validate_description(description: &str) -> Result<()> {
        if description.is_empty() {
            return Err(AppError::validation("Description cannot be empty"));
        }

        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(AppError::validation(
                "Description cannot exceed 255 characters",
            ));
        }

        Ok(())
    }
}

impl AddTransactionForm {
    pub fn parse_date(&self) -> Result<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Parses a `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        AppError::validation(format!("Invalid date: {} (expected YYYY-MM-DD)", raw))
    })
}

impl TransactionRow {
    pub fn into_transaction(self) -> Result<Transaction> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|e| decode_error(self.id, "date", &e))?;
        let amount = Decimal::from_str(&self.amount).map_err(|e| decode_error(self.id, "amount", &e))?;
        let vat = Decimal::from_str(&self.vat).map_err(|e| decode_error(self.id, "vat", &e))?;

        Ok(Transaction {
            id: self.id,
            date,
            description: self.description,
            amount,
            vat,
        })
    }
}

fn decode_error(id: i64, column: &str, err: &dyn std::fmt::Display) -> AppError {
    AppError::Database(sqlx::Error::Decode(
        format!("Invalid transactions.{} for id {}: {}", column, id, err).into(),
    ))
}
