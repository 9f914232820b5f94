use std::sync::Arc;

use actix_web::{http::header, web, HttpResponse};
use askama::Template;
use rust_decimal::Decimal;

use crate::config::ExportConfig;
use crate::core::error::AppError;
use crate::core::money::{format_amount, format_percent};
use crate::modules::transactions::models::{AddTransactionForm, Transaction, DATE_FORMAT};
use crate::modules::transactions::services::TransactionService;

/// Ledger row formatted for display
#[derive(Debug, Clone)]
pub struct TransactionView {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub vat: String,
}

impl From<&Transaction> for TransactionView {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id,
            date: txn.date.format(DATE_FORMAT).to_string(),
            description: txn.description.clone(),
            amount: format_amount(txn.amount),
            vat: format_amount(txn.vat),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub flat_rate_percent: String,
    pub export_path: String,
    pub transactions: Vec<TransactionView>,
}

/// GET /
///
/// Add-transaction form plus the current ledger.
pub async fn index(
    service: web::Data<Arc<TransactionService>>,
    export: web::Data<ExportConfig>,
) -> Result<HttpResponse, AppError> {
    let transactions = service.list_transactions().await?;

    let page = IndexTemplate {
        title: export.title.clone(),
        flat_rate_percent: format_percent(
            service.vat_calculator().flat_rate() * Decimal::ONE_HUNDRED,
        ),
        export_path: export.path.display().to_string(),
        transactions: transactions.iter().map(TransactionView::from).collect(),
    };

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page.render()?))
}

/// POST /add_transaction
///
/// Records the sale and sends the browser back to the index page.
pub async fn add_transaction(
    service: web::Data<Arc<TransactionService>>,
    form: web::Form<AddTransactionForm>,
) -> Result<HttpResponse, AppError> {
    service.record_sale(form.into_inner()).await?;
    Ok(redirect_to_index())
}

/// 302 back to `/`
pub fn redirect_to_index() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

/// Configure transaction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/add_transaction", web::post().to(add_transaction));
}
