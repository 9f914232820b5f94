pub mod companies;
pub mod health;
pub mod receipts;
pub mod returns;
pub mod transactions;
pub mod vat;
