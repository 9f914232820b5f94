use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{error, info, warn};

use crate::core::{AppError, Result};
use crate::modules::companies::CompanyRepository;
use crate::modules::receipts::models::{Receipt, ReceiptItem, ReceiptTotals};
use crate::modules::receipts::services::printer::ReceiptSink;
use crate::modules::receipts::services::receipt_composer::ReceiptComposer;

/// What reached the printer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOutcome {
    pub lines_printed: usize,
    pub totals: ReceiptTotals,
}

/// Prints a receipt covering every package of one company
pub struct ReceiptJob {
    companies: Arc<dyn CompanyRepository>,
    composer: ReceiptComposer,
}

impl ReceiptJob {
    pub fn new(companies: Arc<dyn CompanyRepository>, composer: ReceiptComposer) -> Self {
        Self {
            companies,
            composer,
        }
    }

    /// Load the company and its packages and compose the receipt.
    ///
    /// # Errors
    /// `AppError::NotFound` when no company has this name.
    pub async fn prepare(
        &self,
        company_name: &str,
        payment_method: &str,
        printed_at: NaiveDateTime,
    ) -> Result<Receipt> {
        let company = self
            .companies
            .find_by_name(company_name)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Company '{}' not found in database", company_name))
            })?;

        let packages = self.companies.list_packages(company.id).await?;
        if packages.is_empty() {
            warn!(company = %company.name, "Company has no packages; printing an empty receipt");
        }

        let items: Vec<ReceiptItem> = packages.into_iter().map(ReceiptItem::from).collect();
        let receipt = self.composer.compose(
            &company.name,
            &items,
            payment_method,
            company.vat_rate,
            printed_at,
        )?;

        info!(
            company = %company.name,
            items = items.len(),
            total = %receipt.totals.total,
            vat = %receipt.totals.vat,
            "Receipt composed"
        );

        Ok(receipt)
    }

    /// Send a composed receipt to a sink. Blocks for the duration of the write.
    pub fn print(receipt: &Receipt, sink: &mut dyn ReceiptSink) -> Result<PrintOutcome> {
        match sink.print(receipt) {
            Ok(()) => Ok(PrintOutcome {
                lines_printed: receipt.lines.len(),
                totals: receipt.totals,
            }),
            Err(err) => {
                error!(
                    partial = err.is_partial(),
                    retryable = err.is_retryable(),
                    "Receipt printing failed: {}",
                    err
                );
                Err(err.into())
            }
        }
    }

    /// `prepare` followed by `print`
    pub async fn run(
        &self,
        company_name: &str,
        payment_method: &str,
        printed_at: NaiveDateTime,
        sink: &mut dyn ReceiptSink,
    ) -> Result<PrintOutcome> {
        let receipt = self.prepare(company_name, payment_method, printed_at).await?;
        Self::print(&receipt, sink)
    }
}
