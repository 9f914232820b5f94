use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

use crate::core::money::ensure_non_negative;
use crate::core::{AppError, Result};
use crate::modules::vat::services::vat_calculator::validate_percent;

/// A shop whose receipts are printed. Read-only outside of setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    /// VAT percentage (0–100) included in the company's prices
    pub vat_rate: Decimal,
}

/// A line-item template belonging to one company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
}

/// Package to attach to a company
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPackage {
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
}

#[derive(Debug, FromRow)]
pub struct CompanyRow {
    pub id: i64,
    pub name: String,
    pub vat_rate: String,
}

#[derive(Debug, FromRow)]
pub struct PackageRow {
    pub name: String,
    pub price: String,
    pub quantity: i64,
}

impl Company {
    pub fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Company name cannot be empty"));
        }
        Ok(())
    }
}

impl NewPackage {
    pub fn new(name: impl Into<String>, price: Decimal, quantity: i64) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::validation("Package name cannot be empty"));
        }
        ensure_non_negative("Package price", price)?;
        if quantity < 0 {
            return Err(AppError::validation(format!(
                "Package quantity must be non-negative, got: {}",
                quantity
            )));
        }

        Ok(Self {
            name,
            price,
            quantity,
        })
    }
}

impl CompanyRow {
    pub fn into_company(self) -> Result<Company> {
        let vat_rate = Decimal::from_str(&self.vat_rate).map_err(|e| {
            AppError::Database(sqlx::Error::Decode(
                format!("Invalid companies.vat_rate for {}: {}", self.name, e).into(),
            ))
        })?;
        validate_percent(vat_rate)?;

        Ok(Company {
            id: self.id,
            name: self.name,
            vat_rate,
        })
    }
}

impl PackageRow {
    pub fn into_package(self) -> Result<Package> {
        let price = Decimal::from_str(&self.price).map_err(|e| {
            AppError::Database(sqlx::Error::Decode(
                format!("Invalid packages.price for {}: {}", self.name, e).into(),
            ))
        })?;

        Ok(Package {
            name: self.name,
            price,
            quantity: self.quantity,
        })
    }
}
