use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::Local;

use crate::core::error::AppError;
use crate::modules::returns::services::ReturnFormService;
use crate::modules::transactions::controllers::redirect_to_index;

/// GET /generate_form
///
/// Writes the return form PDF to the configured path, then returns to the index.
pub async fn generate_form(
    service: web::Data<Arc<ReturnFormService>>,
) -> Result<HttpResponse, AppError> {
    service.export(Local::now().date_naive()).await?;
    Ok(redirect_to_index())
}

/// Configure return form routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/generate_form", web::get().to(generate_form));
}
