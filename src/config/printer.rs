use crate::core::{AppError, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;

use super::{env_parse, DatabaseConfig};

/// Settings for the one-shot receipt printing job
#[derive(Debug, Clone)]
pub struct ReceiptJobConfig {
    pub company_name: String,
    pub payment_method: String,
    pub printer: PrinterConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub output: PrinterOutput,
}

/// Where receipt lines are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterOutput {
    /// ESC/POS thermal printer exposed by the kernel usblp driver
    Usb {
        device: PathBuf,
        vendor_id: u16,
        product_id: u16,
        interface: u8,
    },
    /// Plain text on standard output (dry run)
    Stdout,
}

impl ReceiptJobConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            company_name: env::var("RECEIPT_COMPANY").unwrap_or_else(|_| "My Store".to_string()),
            payment_method: env::var("RECEIPT_PAYMENT_METHOD")
                .unwrap_or_else(|_| "Credit Card".to_string()),
            printer: PrinterConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.company_name.trim().is_empty() {
            return Err(AppError::configuration("RECEIPT_COMPANY cannot be empty"));
        }
        if self.payment_method.trim().is_empty() {
            return Err(AppError::configuration("RECEIPT_PAYMENT_METHOD cannot be empty"));
        }
        self.database.validate()
    }
}

impl PrinterConfig {
    pub fn from_env() -> Result<Self> {
        let kind = env::var("PRINTER_OUTPUT").unwrap_or_else(|_| "usb".to_string());

        let output = match kind.trim().to_lowercase().as_str() {
            "usb" => PrinterOutput::Usb {
                device: PathBuf::from(
                    env::var("PRINTER_DEVICE").unwrap_or_else(|_| "/dev/usb/lp0".to_string()),
                ),
                vendor_id: parse_usb_id(
                    "PRINTER_USB_VENDOR_ID",
                    &env::var("PRINTER_USB_VENDOR_ID").unwrap_or_else(|_| "0x04b8".to_string()),
                )?,
                product_id: parse_usb_id(
                    "PRINTER_USB_PRODUCT_ID",
                    &env::var("PRINTER_USB_PRODUCT_ID").unwrap_or_else(|_| "0x0202".to_string()),
                )?,
                interface: env_parse("PRINTER_USB_INTERFACE", "0")?,
            },
            "stdout" => PrinterOutput::Stdout,
            other => {
                return Err(AppError::configuration(format!(
                    "Invalid PRINTER_OUTPUT: {} (expected usb or stdout)",
                    other
                )))
            }
        };

        Ok(Self { output })
    }
}

impl fmt::Display for PrinterOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrinterOutput::Usb {
                device,
                vendor_id,
                product_id,
                interface,
            } => write!(
                f,
                "usb {} ({:04x}:{:04x} interface {})",
                device.display(),
                vendor_id,
                product_id,
                interface
            ),
            PrinterOutput::Stdout => write!(f, "stdout"),
        }
    }
}

/// Parses a USB vendor/product id written as `0x04b8`, `04b8` or decimal `1208`
pub fn parse_usb_id(key: &str, raw: &str) -> Result<u16> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None if raw.chars().any(|c| c.is_ascii_alphabetic()) => u16::from_str_radix(raw, 16),
        None => raw.parse(),
    };

    parsed.map_err(|_| AppError::configuration(format!("Invalid {}: {}", key, raw)))
}
