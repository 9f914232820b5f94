//! One-shot receipt printing job.
//!
//! Reads the company, payment method and printer from the environment,
//! prints one receipt covering every package of the company, and exits
//! non-zero when anything along the way fails.

use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;

use vatpos::config::{AppConfig, ReceiptJobConfig};
use vatpos::core::telemetry::init_tracing;
use vatpos::core::{AppError, Result};
use vatpos::modules::companies::SqliteCompanyRepository;
use vatpos::modules::receipts::services::{open_printer, PrintOutcome};
use vatpos::modules::receipts::{ReceiptComposer, ReceiptJob};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing(&AppConfig::from_env().log_level);

    match run().await {
        Ok(outcome) => {
            tracing::info!(
                lines = outcome.lines_printed,
                total = %outcome.totals.total,
                vat = %outcome.totals.vat,
                net = %outcome.totals.net,
                "Receipt printed"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(retryable = err.is_retryable(), "Receipt job failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<PrintOutcome> {
    let config = ReceiptJobConfig::from_env()?;

    tracing::info!(
        company = %config.company_name,
        payment_method = %config.payment_method,
        printer = %config.printer.output,
        database = %config.database.receipts_url,
        "Starting receipt job"
    );

    let repo = SqliteCompanyRepository::new(config.database.receipts_pool().await?);
    repo.ensure_schema().await?;

    let job = ReceiptJob::new(Arc::new(repo), ReceiptComposer::default());
    let receipt = job
        .prepare(
            &config.company_name,
            &config.payment_method,
            Local::now().naive_local(),
        )
        .await?;

    let mut sink = open_printer(&config.printer)?;

    tokio::task::spawn_blocking(move || ReceiptJob::print(&receipt, sink.as_mut()))
        .await
        .map_err(|e| AppError::internal(format!("Printer task failed: {}", e)))?
}
