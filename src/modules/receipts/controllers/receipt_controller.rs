use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::receipts::services::{PlainTextPrinter, ReceiptJob, RECEIPT_WIDTH};

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub company: String,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

fn default_payment_method() -> String {
    "Cash".to_string()
}

/// GET /receipts/preview?company=..&payment_method=..
///
/// The receipt the printer job would produce, as plain text.
pub async fn preview_receipt(
    job: web::Data<Arc<ReceiptJob>>,
    query: web::Query<PreviewQuery>,
) -> Result<HttpResponse, AppError> {
    let now = chrono::Local::now().naive_local();
    let receipt = job.prepare(&query.company, &query.payment_method, now).await?;

    let mut sink = PlainTextPrinter::new(Vec::new(), RECEIPT_WIDTH);
    ReceiptJob::print(&receipt, &mut sink)?;

    let body = String::from_utf8(sink.into_inner())
        .map_err(|e| AppError::internal(format!("Receipt preview is not UTF-8: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body))
}

/// Configure receipt routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/receipts").route("/preview", web::get().to(preview_receipt)));
}
