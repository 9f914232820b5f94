use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::ensure_non_negative;
use crate::core::{AppError, Result};
use crate::modules::companies::models::Package;

/// One sold item on a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    pub quantity: i64,
    /// Unit price
    pub price: Decimal,
}

impl ReceiptItem {
    pub fn new(name: impl Into<String>, quantity: i64, price: Decimal) -> Result<Self> {
        if quantity < 0 {
            return Err(AppError::validation(format!(
                "Quantity must be non-negative, got: {}",
                quantity
            )));
        }
        ensure_non_negative("Price", price)?;

        Ok(Self {
            name: name.into(),
            quantity,
            price,
        })
    }

    /// quantity × unit price
    ///
    /// # Errors
    /// `AppError::Validation` when the product does not fit in a `Decimal`.
    pub fn subtotal(&self) -> Result<Decimal> {
        Decimal::from(self.quantity)
            .checked_mul(self.price)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Subtotal of '{}' ({} x {}) is too large",
                    self.name, self.quantity, self.price
                ))
            })
    }
}

impl From<Package> for ReceiptItem {
    fn from(package: Package) -> Self {
        Self {
            name: package.name,
            quantity: package.quantity,
            price: package.price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Character emphasis for a line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub bold: bool,
    /// Double width and double height
    pub double_size: bool,
}

impl TextStyle {
    pub const NORMAL: TextStyle = TextStyle {
        bold: false,
        double_size: false,
    };

    pub const EMPHASIZED: TextStyle = TextStyle {
        bold: true,
        double_size: true,
    };
}

/// Part of the receipt a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Header,
    Items,
    Totals,
    Payment,
    Footer,
    /// Blank lines fed before the cut
    Feed,
}

/// A formatted line, independent of the printer's wire protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub text: String,
    pub align: Align,
    pub style: TextStyle,
    pub section: Section,
}

impl ReceiptLine {
    pub fn new(section: Section, align: Align, style: TextStyle, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align,
            style,
            section,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptTotals {
    /// Sum of item subtotals, VAT included
    pub total: Decimal,
    pub vat_rate: Decimal,
    pub vat: Decimal,
    /// `total - vat`
    pub net: Decimal,
}

/// Composed receipt: the ordered lines plus the figures they were built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub company_name: String,
    pub payment_method: String,
    pub lines: Vec<ReceiptLine>,
    pub totals: ReceiptTotals,
}

impl Receipt {
    pub fn lines_in(&self, section: Section) -> impl Iterator<Item = &ReceiptLine> {
        self.lines.iter().filter(move |line| line.section == section)
    }

    /// Plain-text rendering padded to `width` columns
    pub fn to_plain_text(&self, width: usize) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let text = line.text.as_str();
            let pad = width.saturating_sub(text.chars().count());
            let rendered = match line.align {
                Align::Left => text.to_string(),
                Align::Center => format!("{}{}", " ".repeat(pad / 2), text),
                Align::Right => format!("{}{}", " ".repeat(pad), text),
            };
            out.push_str(rendered.trim_end());
            out.push('\n');
        }
        out
    }
}
