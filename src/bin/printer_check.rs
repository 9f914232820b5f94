//! Printer connectivity check.
//!
//! Opens the configured printer, prints a "Test Print" page and cuts.
//! Exits non-zero when the device cannot be opened or the write fails.

use std::process::ExitCode;

use chrono::Local;

use vatpos::config::{AppConfig, PrinterConfig};
use vatpos::core::telemetry::init_tracing;
use vatpos::core::Result;
use vatpos::modules::receipts::services::{open_printer, PrintOutcome};
use vatpos::modules::receipts::{ReceiptComposer, ReceiptJob};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing(&AppConfig::from_env().log_level);

    match run() {
        Ok(outcome) => {
            tracing::info!(lines = outcome.lines_printed, "Printer check passed");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(retryable = err.is_retryable(), "Printer check failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<PrintOutcome> {
    let config = PrinterConfig::from_env()?;
    tracing::info!(printer = %config.output, "Checking printer");

    let mut sink = open_printer(&config)?;
    let page = ReceiptComposer::default()
        .test_page(&config.output.to_string(), Local::now().naive_local());

    ReceiptJob::print(&page, sink.as_mut())
}
