pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{AddTransactionForm, NewTransaction, Transaction};
pub use repositories::{SqliteTransactionRepository, TransactionRepository};
pub use services::TransactionService;
