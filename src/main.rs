use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use vatpos::config::{Config, DatabasePools};
use vatpos::core::telemetry::init_tracing;
use vatpos::middleware::ErrorHandler;
use vatpos::modules::companies::SqliteCompanyRepository;
use vatpos::modules::receipts::{ReceiptComposer, ReceiptJob};
use vatpos::modules::returns::ReturnFormService;
use vatpos::modules::transactions::{SqliteTransactionRepository, TransactionService};
use vatpos::modules::vat::VatCalculator;
use vatpos::modules::{health, receipts, returns, transactions};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config.app.log_level);
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting vatpos");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Flat VAT rate: {}", config.vat.flat_rate);
    tracing::info!("Return form export path: {}", config.export.path.display());

    let pools = DatabasePools::connect(&config.database)
        .await
        .context("Failed to open databases")?;
    tracing::info!(
        "Database pools initialized ({} connections each)",
        config.database.max_connections
    );

    let transaction_repo = SqliteTransactionRepository::new(pools.transactions.clone());
    transaction_repo.ensure_schema().await?;
    let company_repo = SqliteCompanyRepository::new(pools.receipts.clone());
    company_repo.ensure_schema().await?;

    let vat = VatCalculator::new(config.vat.flat_rate)?;
    let transaction_service = Arc::new(TransactionService::new(Arc::new(transaction_repo), vat));
    let return_service = Arc::new(ReturnFormService::new(
        transaction_service.clone(),
        &config.export,
    ));
    let receipt_job = Arc::new(ReceiptJob::new(
        Arc::new(company_repo),
        ReceiptComposer::default(),
    ));

    let export = config.export.clone();
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(ErrorHandler)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(pools.clone()))
            .app_data(web::Data::new(export.clone()))
            .app_data(web::Data::new(transaction_service.clone()))
            .app_data(web::Data::new(return_service.clone()))
            .app_data(web::Data::new(receipt_job.clone()))
            .configure(health::configure)
            .configure(transactions::controllers::configure)
            .configure(returns::controllers::configure)
            .configure(receipts::controllers::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
