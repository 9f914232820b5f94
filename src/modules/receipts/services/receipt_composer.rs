use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::core::money::{format_amount, format_percent};
use crate::core::{AppError, Result};
use crate::modules::receipts::models::{
    Align, Receipt, ReceiptItem, ReceiptLine, ReceiptTotals, Section, TextStyle,
};
use crate::modules::vat::{compute_vat, VatPolicy};

/// Characters per line on 58mm paper in the normal font
pub const RECEIPT_WIDTH: usize = 32;

/// Blank lines fed so the last printed line clears the cutter
pub const FEED_LINES: usize = 4;

pub const THANK_YOU: &str = "Thank you for shopping with us!";

pub const TEST_PRINT: &str = "Test Print";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Builds the line sequence of a receipt. Pure: no clock, no device.
#[derive(Debug, Clone, Copy)]
pub struct ReceiptComposer {
    width: usize,
}

impl Default for ReceiptComposer {
    fn default() -> Self {
        Self::new(RECEIPT_WIDTH)
    }
}

impl ReceiptComposer {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Compose a receipt whose prices include VAT at `vat_rate` percent.
    ///
    /// Line order: company name, timestamp, rule, two lines per item in
    /// input order, rule, total / VAT / net, rule, payment method, rule,
    /// thank-you footer, [`FEED_LINES`] blank lines. An empty item list still
    /// yields every section with zero totals.
    pub fn compose(
        &self,
        company_name: &str,
        items: &[ReceiptItem],
        payment_method: &str,
        vat_rate: Decimal,
        printed_at: NaiveDateTime,
    ) -> Result<Receipt> {
        let subtotals = items
            .iter()
            .map(ReceiptItem::subtotal)
            .collect::<Result<Vec<Decimal>>>()?;
        let total = subtotals
            .iter()
            .try_fold(Decimal::ZERO, |sum, subtotal| sum.checked_add(*subtotal))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Receipt total of {} items is too large",
                    items.len()
                ))
            })?;
        let breakdown = compute_vat(total, VatPolicy::inclusive(vat_rate))?;

        let mut lines = Vec::with_capacity(items.len() * 2 + 16);
        let rule = "=".repeat(self.width);

        lines.push(ReceiptLine::new(
            Section::Header,
            Align::Center,
            TextStyle::EMPHASIZED,
            company_name,
        ));
        lines.push(left(
            Section::Header,
            format!("Date: {}", printed_at.format(TIMESTAMP_FORMAT)),
        ));
        lines.push(left(Section::Header, rule.clone()));

        for (item, subtotal) in items.iter().zip(&subtotals) {
            lines.push(left(
                Section::Items,
                format!(
                    "{} x{} @ {}",
                    item.name,
                    item.quantity,
                    format_amount(item.price)
                ),
            ));
            lines.push(left(
                Section::Items,
                format!("  Subtotal: {}", format_amount(*subtotal)),
            ));
        }

        lines.push(left(Section::Totals, rule.clone()));
        lines.push(emphasized_right(format!("TOTAL: {}", format_amount(total))));
        lines.push(emphasized_right(format!(
            "VAT ({}%): -{}",
            format_percent(vat_rate),
            format_amount(breakdown.vat)
        )));
        lines.push(emphasized_right(format!(
            "NET (excl. VAT): {}",
            format_amount(breakdown.net)
        )));

        lines.push(left(Section::Payment, rule.clone()));
        lines.push(left(Section::Payment, format!("Paid with: {}", payment_method)));

        lines.push(left(Section::Footer, rule));
        lines.push(ReceiptLine::new(
            Section::Footer,
            Align::Center,
            TextStyle::NORMAL,
            THANK_YOU,
        ));

        lines.extend((0..FEED_LINES).map(|_| left(Section::Feed, String::new())));

        Ok(Receipt {
            company_name: company_name.to_string(),
            payment_method: payment_method.to_string(),
            lines,
            totals: ReceiptTotals {
                total,
                vat_rate,
                vat: breakdown.vat,
                net: breakdown.net,
            },
        })
    }
}

impl ReceiptComposer {
    /// A short page for checking that a printer is reachable: a large
    /// centered "Test Print", the printer description and time, then the feed.
    pub fn test_page(&self, printer: &str, printed_at: NaiveDateTime) -> Receipt {
        let mut lines = vec![
            ReceiptLine::new(
                Section::Header,
                Align::Center,
                TextStyle {
                    bold: false,
                    double_size: true,
                },
                TEST_PRINT,
            ),
            left(Section::Header, format!("Printer: {}", printer)),
            left(
                Section::Header,
                format!("Date: {}", printed_at.format(TIMESTAMP_FORMAT)),
            ),
        ];
        lines.extend((0..FEED_LINES).map(|_| left(Section::Feed, String::new())));

        Receipt {
            company_name: String::new(),
            payment_method: String::new(),
            lines,
            totals: ReceiptTotals {
                total: Decimal::ZERO,
                vat_rate: Decimal::ZERO,
                vat: Decimal::ZERO,
                net: Decimal::ZERO,
            },
        }
    }
}

fn left(section: Section, text: String) -> ReceiptLine {
    ReceiptLine::new(section, Align::Left, TextStyle::NORMAL, text)
}

fn emphasized_right(text: String) -> ReceiptLine {
    ReceiptLine::new(Section::Totals, Align::Right, TextStyle::EMPHASIZED, text)
}
