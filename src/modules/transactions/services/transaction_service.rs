use std::sync::Arc;

use tracing::{debug, info};

use crate::core::money::parse_amount;
use crate::core::Result;
use crate::modules::transactions::models::{AddTransactionForm, NewTransaction, Transaction};
use crate::modules::transactions::repositories::TransactionRepository;
use crate::modules::vat::VatCalculator;

/// Records sales with flat-rate VAT and lists the ledger
pub struct TransactionService {
    repo: Arc<dyn TransactionRepository>,
    vat: VatCalculator,
}

impl TransactionService {
    pub fn new(repo: Arc<dyn TransactionRepository>, vat: VatCalculator) -> Self {
        Self { repo, vat }
    }

    pub fn vat_calculator(&self) -> &VatCalculator {
        &self.vat
    }

    /// Validate a submitted form, derive its VAT and store it
    pub async fn record_sale(&self, form: AddTransactionForm) -> Result<Transaction> {
        let date = form.parse_date()?;
        let amount = parse_amount(&form.amount)?;
        let vat = self.vat.flat_vat(amount)?;

        let new_transaction = NewTransaction::new(date, form.description, amount, vat)?;
        let stored = self.repo.insert(&new_transaction).await?;

        info!(
            transaction_id = stored.id,
            amount = %stored.amount,
            vat = %stored.vat,
            "Recorded sale"
        );

        Ok(stored)
    }

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let transactions = self.repo.list().await?;
        debug!("Loaded {} transactions", transactions.len());
        Ok(transactions)
    }
}
