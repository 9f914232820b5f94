use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::config::DatabasePools;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Readiness probe response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub transactions_db: bool,
    pub receipts_db: bool,
}

/// GET /health - Liveness probe
/// Does not touch either database
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /ready - Readiness probe
/// 200 only when both SQLite files answer a query
pub async fn readiness_check(pools: web::Data<DatabasePools>) -> impl Responder {
    let checks = ReadinessChecks {
        transactions_db: ping(&pools.transactions, "transactions").await,
        receipts_db: ping(&pools.receipts, "receipts").await,
    };
    let ready = checks.transactions_db && checks.receipts_db;
    let response = ReadinessResponse { ready, checks };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

async fn ping(pool: &SqlitePool, name: &str) -> bool {
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(database = name, "Database readiness check failed: {}", e);
            false
        }
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
