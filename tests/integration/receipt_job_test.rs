// Receipt job: company lookup, composition and printing to a sink

mod database_setup;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use database_setup::TestDatabase;
use vatpos::core::AppError;
use vatpos::modules::companies::{seed_demo_company, CompanyRepository, NewPackage};
use vatpos::modules::receipts::services::PlainTextPrinter;
use vatpos::modules::receipts::{ReceiptComposer, ReceiptJob};

fn printed_at() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn test_prints_my_store_receipt() {
    let db = TestDatabase::new().await;
    let companies = db.company_repo();
    seed_demo_company(companies.as_ref()).await.unwrap();

    let job = ReceiptJob::new(companies, ReceiptComposer::default());
    let mut sink = PlainTextPrinter::new(Vec::new(), 32);
    let outcome = job
        .run("My Store", "Credit Card", printed_at(), &mut sink)
        .await
        .unwrap();

    assert_eq!(outcome.totals.total, dec!(110.00));
    assert_eq!(outcome.totals.vat, dec!(22.00));
    assert_eq!(outcome.totals.net, dec!(88.00));

    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert!(text.contains("Package 1 x5 @ 10.00"));
    assert!(text.contains("Package 2 x3 @ 20.00"));
    assert!(text.contains("TOTAL: 110.00"));
    assert!(text.contains("VAT (20%): -22.00"));
    assert!(text.contains("Paid with: Credit Card"));
}

#[tokio::test]
async fn test_unknown_company_is_not_found() {
    let db = TestDatabase::new().await;
    let job = ReceiptJob::new(db.company_repo(), ReceiptComposer::default());

    let err = job
        .prepare("Nobody", "Cash", printed_at())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {:?}", err);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_company_without_packages_prints_zero_totals() {
    let db = TestDatabase::new().await;
    let companies = db.company_repo();
    companies.create_company("Bare", dec!(16)).await.unwrap();

    let job = ReceiptJob::new(companies, ReceiptComposer::default());
    let receipt = job.prepare("Bare", "Cash", printed_at()).await.unwrap();

    assert_eq!(receipt.totals.total, dec!(0));
    assert_eq!(receipt.totals.vat, dec!(0));
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = TestDatabase::new().await;
    let companies = db.company_repo();

    let first = seed_demo_company(companies.as_ref()).await.unwrap();
    let second = seed_demo_company(companies.as_ref()).await.unwrap();
    assert_eq!(first.id, second.id);

    let packages = companies.list_packages(first.id).await.unwrap();
    assert_eq!(packages.len(), 2);
}

#[tokio::test]
async fn test_store_rejects_bad_company_data() {
    let db = TestDatabase::new().await;
    let companies = db.company_repo();

    let company = companies.create_company("Dup", dec!(16)).await.unwrap();
    let err = companies.create_company("Dup", dec!(16)).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);

    let package = NewPackage::new("Widget", dec!(1.00), 1).unwrap();
    let err = companies
        .add_package(company.id + 100, &package)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {:?}", err);

    assert!(companies.create_company("Too much", dec!(120)).await.is_err());
}
