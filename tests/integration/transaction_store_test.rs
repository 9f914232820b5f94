// Transactions ledger against a real SQLite database

mod database_setup;

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use database_setup::TestDatabase;
use vatpos::core::AppError;
use vatpos::modules::transactions::{
    AddTransactionForm, NewTransaction, TransactionRepository, TransactionService,
};
use vatpos::modules::vat::VatCalculator;

fn form(date: &str, description: &str, amount: &str) -> AddTransactionForm {
    AddTransactionForm {
        date: date.to_string(),
        description: description.to_string(),
        amount: amount.to_string(),
    }
}

fn service(db: &TestDatabase) -> TransactionService {
    TransactionService::new(db.transaction_repo(), VatCalculator::new(dec!(0.16)).unwrap())
}

#[tokio::test]
async fn test_record_sale_stores_flat_vat() {
    let db = TestDatabase::new().await;
    let service = service(&db);

    let stored = service
        .record_sale(form("2024-01-01", "Sale", "100.00"))
        .await
        .unwrap();
    assert_eq!(stored.vat, dec!(16.00));

    let all = service.list_transactions().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, stored.id);
    assert_eq!(all[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(all[0].description, "Sale");
    assert_eq!(all[0].amount, dec!(100.00));
    assert_eq!(all[0].vat, dec!(16.00));
}

#[tokio::test]
async fn test_list_preserves_insertion_order() {
    let db = TestDatabase::new().await;
    let service = service(&db);

    for (date, description) in [("2024-02-01", "Later"), ("2024-01-01", "Earlier")] {
        service
            .record_sale(form(date, description, "10"))
            .await
            .unwrap();
    }

    let descriptions: Vec<String> = service
        .list_transactions()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(descriptions, ["Later", "Earlier"]);
}

#[tokio::test]
async fn test_amounts_survive_storage_exactly() {
    let db = TestDatabase::new().await;
    let repo = db.transaction_repo();

    let new = NewTransaction::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        "Precise".to_string(),
        dec!(0.10),
        dec!(0.02),
    )
    .unwrap();
    repo.insert(&new).await.unwrap();

    let all = repo.list().await.unwrap();
    assert_eq!(all[0].amount, dec!(0.10));
    assert_eq!(all[0].vat, dec!(0.02));
}

#[tokio::test]
async fn test_invalid_forms_are_rejected_without_writing() {
    let db = TestDatabase::new().await;
    let service = service(&db);

    let bad = [
        form("2024-13-01", "Sale", "100"),
        form("2024-01-01", "Sale", "abc"),
        form("2024-01-01", "Sale", "-5"),
        form("2024-01-01", "   ", "5"),
        form("2024-01-01", "Sale", "100.005"),
    ];
    for input in bad {
        let err = service.record_sale(input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);
        assert!(!err.is_retryable());
    }

    assert!(service.list_transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_schema_setup_is_idempotent() {
    let db = TestDatabase::new().await;
    let repo = db.transaction_repo();
    repo.insert(
        &NewTransaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "Kept".to_string(),
            dec!(1),
            dec!(0.16),
        )
        .unwrap(),
    )
    .await
    .unwrap();

    repo.ensure_schema().await.unwrap();

    let repo: Arc<dyn TransactionRepository> = repo;
    assert_eq!(repo.list().await.unwrap().len(), 1);
}
