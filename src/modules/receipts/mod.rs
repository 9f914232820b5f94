pub mod controllers;
pub mod models;
pub mod services;

pub use models::{Align, Receipt, ReceiptItem, ReceiptLine, ReceiptTotals, Section};
pub use services::{ReceiptComposer, ReceiptJob, ReceiptSink};
