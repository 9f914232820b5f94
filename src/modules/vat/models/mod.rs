mod vat;

pub use vat::{VatBreakdown, VatPolicy};
