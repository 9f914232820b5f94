use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::config::ExportConfig;
use crate::core::{AppError, Result};
use crate::modules::returns::services::{write_pdf, ReturnFormRenderer};
use crate::modules::transactions::TransactionService;

/// What a completed export produced
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub pages: usize,
    pub rows: usize,
    pub bytes: usize,
}

/// Builds the return form from the ledger and writes it to the export path
pub struct ReturnFormService {
    transactions: Arc<TransactionService>,
    renderer: ReturnFormRenderer,
    path: PathBuf,
}

impl ReturnFormService {
    pub fn new(transactions: Arc<TransactionService>, export: &ExportConfig) -> Self {
        Self {
            transactions,
            renderer: ReturnFormRenderer::new(export.title.clone()),
            path: export.path.clone(),
        }
    }

    /// Snapshot the ledger and overwrite the export file
    pub async fn export(&self, generated_on: NaiveDate) -> Result<ExportSummary> {
        let transactions = self.transactions.list_transactions().await?;
        let form = self.renderer.render(&transactions, generated_on);
        let pages = form.pages.len();
        let rows = form.row_count();

        let path = self.path.clone();
        let bytes = tokio::task::spawn_blocking(move || write_pdf(&form, &path))
            .await
            .map_err(|e| AppError::internal(format!("PDF export task failed: {}", e)))??;

        info!(
            path = %self.path.display(),
            pages,
            rows,
            bytes,
            "Wrote return form"
        );

        Ok(ExportSummary {
            path: self.path.clone(),
            pages,
            rows,
            bytes,
        })
    }
}
