use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::core::{AppError, Result};
use crate::modules::transactions::models::{NewTransaction, Transaction, TransactionRow, DATE_FORMAT};

/// Persistence for the sales ledger
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Store a sale and return it with its generated id
    async fn insert(&self, transaction: &NewTransaction) -> Result<Transaction>;

    /// All sales in insertion order
    async fn list(&self) -> Result<Vec<Transaction>>;
}

/// SQLite-backed ledger.
///
/// Every call holds exactly one pooled connection for its duration; the
/// connection (or the database transaction wrapping a write) is released on
/// drop, whichever way the call exits.
pub struct SqliteTransactionRepository {
    pool: SqlitePool,
}

impl SqliteTransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `transactions` table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                amount TEXT NOT NULL,
                vat TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl TransactionRepository for SqliteTransactionRepository {
    async fn insert(&self, transaction: &NewTransaction) -> Result<Transaction> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO transactions (date, description, amount, vat)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(transaction.date.format(DATE_FORMAT).to_string())
        .bind(&transaction.description)
        .bind(transaction.amount.to_string())
        .bind(transaction.vat.to_string())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let id = result.last_insert_rowid();
        if id <= 0 {
            return Err(AppError::internal("SQLite did not report an inserted row id"));
        }

        Ok(Transaction {
            id,
            date: transaction.date,
            description: transaction.description.clone(),
            amount: transaction.amount,
            vat: transaction.vat,
        })
    }

    async fn list(&self) -> Result<Vec<Transaction>> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, date, description, amount, vat
            FROM transactions
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(TransactionRow::into_transaction)
        .collect()
    }
}
