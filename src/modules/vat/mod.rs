pub mod models;
pub mod services;

pub use models::{VatBreakdown, VatPolicy};
pub use services::{compute_vat, VatCalculator};
