use crate::core::{AppError, Result};
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub mod database;
pub mod printer;
pub mod server;

pub use database::{DatabaseConfig, DatabasePools};
pub use printer::{PrinterConfig, PrinterOutput, ReceiptJobConfig};
pub use server::ServerConfig;

/// Main application configuration for the web server
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub vat: VatConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// Flat VAT applied to transactions recorded through the web form
#[derive(Debug, Clone)]
pub struct VatConfig {
    /// Fraction of the amount, e.g. 0.16 for 16%
    pub flat_rate: Decimal,
}

/// Where the tax return PDF is written
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub path: PathBuf,
    pub title: String,
}

impl Default for VatConfig {
    fn default() -> Self {
        Self {
            flat_rate: Decimal::new(16, 2),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("kra_returns_form.pdf"),
            title: "KRA Returns Form".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig::from_env(),
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            vat: VatConfig {
                flat_rate: env_decimal("VAT_FLAT_RATE", "0.16")?,
            },
            export: ExportConfig {
                path: PathBuf::from(
                    env::var("EXPORT_PATH").unwrap_or_else(|_| "kra_returns_form.pdf".to_string()),
                ),
                title: env::var("EXPORT_TITLE").unwrap_or_else(|_| "KRA Returns Form".to_string()),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.vat.flat_rate < Decimal::ZERO || self.vat.flat_rate > Decimal::ONE {
            return Err(AppError::configuration(format!(
                "VAT_FLAT_RATE must be a fraction between 0 and 1, got {}",
                self.vat.flat_rate
            )));
        }

        if self.export.path.as_os_str().is_empty() {
            return Err(AppError::configuration("EXPORT_PATH cannot be empty"));
        }

        self.database.validate()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

pub(crate) fn env_decimal(key: &str, default: &str) -> Result<Decimal> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    Decimal::from_str(raw.trim())
        .map_err(|_| AppError::configuration(format!("Invalid {}: {}", key, raw)))
}

pub(crate) fn env_parse<T: FromStr>(key: &str, default: &str) -> Result<T> {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse()
        .map_err(|_| AppError::configuration(format!("Invalid {}", key)))
}
