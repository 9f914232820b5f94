use crate::core::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use super::env_parse;

/// The two SQLite files: the sales ledger and the receipt catalogue
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub transactions_url: String,
    pub receipts_url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            transactions_url: "sqlite://kra_returns.db".to_string(),
            receipts_url: "sqlite://receipt_system.db".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(DatabaseConfig {
            transactions_url: env::var("TRANSACTIONS_DATABASE_URL")
                .unwrap_or(defaults.transactions_url),
            receipts_url: env::var("RECEIPTS_DATABASE_URL").unwrap_or(defaults.receipts_url),
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS", "5")?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(AppError::configuration(
                "DATABASE_MAX_CONNECTIONS must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Pool for the transactions ledger
    pub async fn transactions_pool(&self) -> Result<SqlitePool> {
        create_pool(&self.transactions_url, self.max_connections).await
    }

    /// Pool for companies and packages
    pub async fn receipts_pool(&self) -> Result<SqlitePool> {
        create_pool(&self.receipts_url, self.max_connections).await
    }
}

/// Both pools, shared by the web server
#[derive(Debug, Clone)]
pub struct DatabasePools {
    pub transactions: SqlitePool,
    pub receipts: SqlitePool,
}

impl DatabasePools {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        Ok(Self {
            transactions: config.transactions_pool().await?,
            receipts: config.receipts_pool().await?,
        })
    }
}

/// Create a SQLite connection pool, creating the database file if missing
pub async fn create_pool(url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| AppError::configuration(format!("Invalid database URL {}: {}", url, e)))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600)) // 10 minutes
        .connect_with(options)
        .await
        .map_err(AppError::Database)
}
