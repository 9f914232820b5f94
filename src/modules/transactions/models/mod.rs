mod transaction;

pub use transaction::{
    parse_date, AddTransactionForm, NewTransaction, Transaction, TransactionRow, DATE_FORMAT,
};
