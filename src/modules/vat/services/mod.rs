pub mod vat_calculator;

pub use vat_calculator::{compute_vat, VatCalculator};
