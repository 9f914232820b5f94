//! Point-of-sale VAT bookkeeping
//!
//! A web form that records sales with flat-rate VAT into SQLite, a PDF
//! summary of the ledger for the tax return, and a receipt printing job
//! that itemises a company's packages with inclusive VAT.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::receipts;
pub use modules::returns;
pub use modules::transactions;
pub use modules::vat;
