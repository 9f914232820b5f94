//! Create both SQLite schemas, optionally seeding the demo store.
//!
//! `SEED_DEMO=true` adds "My Store" with two packages when it is missing.

use anyhow::Context;

use vatpos::config::{AppConfig, DatabaseConfig};
use vatpos::core::telemetry::init_tracing;
use vatpos::modules::companies::{seed_demo_company, SqliteCompanyRepository};
use vatpos::modules::transactions::SqliteTransactionRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(&AppConfig::from_env().log_level);

    let database = DatabaseConfig::from_env().context("Failed to load database configuration")?;
    database.validate()?;

    let transactions = SqliteTransactionRepository::new(
        database
            .transactions_pool()
            .await
            .with_context(|| format!("Failed to open {}", database.transactions_url))?,
    );
    transactions.ensure_schema().await?;
    tracing::info!(database = %database.transactions_url, "Transactions schema ready");

    let companies = SqliteCompanyRepository::new(
        database
            .receipts_pool()
            .await
            .with_context(|| format!("Failed to open {}", database.receipts_url))?,
    );
    companies.ensure_schema().await?;
    tracing::info!(database = %database.receipts_url, "Receipts schema ready");

    if seed_requested() {
        let company = seed_demo_company(&companies).await?;
        tracing::info!(company = %company.name, vat_rate = %company.vat_rate, "Demo data ready");
    }

    Ok(())
}

fn seed_requested() -> bool {
    std::env::var("SEED_DEMO")
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
