// HTTP surface: form submission, index page, return form export, receipt preview

mod database_setup;

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use rust_decimal_macros::dec;

use database_setup::TestDatabase;
use vatpos::config::{DatabasePools, ExportConfig};
use vatpos::middleware::ErrorHandler;
use vatpos::modules::companies::seed_demo_company;
use vatpos::modules::receipts::{ReceiptComposer, ReceiptJob};
use vatpos::modules::returns::ReturnFormService;
use vatpos::modules::transactions::{TransactionRepository, TransactionService};
use vatpos::modules::vat::VatCalculator;
use vatpos::modules::{health, receipts, returns, transactions};

struct TestState {
    db: TestDatabase,
    export: ExportConfig,
}

impl TestState {
    async fn new(export_name: &str) -> Self {
        Self {
            db: TestDatabase::new().await,
            export: ExportConfig {
                path: export_path(export_name),
                title: "KRA Returns Form".to_string(),
            },
        }
    }
}

fn export_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vatpos_{}_{}.pdf", name, std::process::id()))
}

/// Same wiring as the server binary, backed by in-memory databases
macro_rules! test_app {
    ($state:expr) => {{
        let state: &TestState = &$state;
        let transaction_service = Arc::new(TransactionService::new(
            state.db.transaction_repo(),
            VatCalculator::new(dec!(0.16)).unwrap(),
        ));
        let return_service = Arc::new(ReturnFormService::new(
            transaction_service.clone(),
            &state.export,
        ));
        let receipt_job = Arc::new(ReceiptJob::new(
            state.db.company_repo(),
            ReceiptComposer::default(),
        ));
        let pools = DatabasePools {
            transactions: state.db.transactions.clone(),
            receipts: state.db.receipts.clone(),
        };

        test::init_service(
            App::new()
                .wrap(ErrorHandler)
                .app_data(web::Data::new(pools))
                .app_data(web::Data::new(state.export.clone()))
                .app_data(web::Data::new(transaction_service))
                .app_data(web::Data::new(return_service))
                .app_data(web::Data::new(receipt_job))
                .configure(health::configure)
                .configure(transactions::controllers::configure)
                .configure(returns::controllers::configure)
                .configure(receipts::controllers::configure),
        )
        .await
    }};
}

fn sale_form(amount: &str) -> [(&'static str, String); 3] {
    [
        ("date", "2024-01-01".to_string()),
        ("description", "Sale".to_string()),
        ("amount", amount.to_string()),
    ]
}

#[actix_web::test]
async fn test_add_transaction_redirects_and_lists() {
    let state = TestState::new("add").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/add_transaction")
        .set_form(sale_form("100.00"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("2024-01-01"));
    assert!(html.contains("Sale"));
    assert!(html.contains("100.00"));
    assert!(html.contains("16.00"));
}

#[actix_web::test]
async fn test_malformed_amount_is_bad_request() {
    let state = TestState::new("bad_amount").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/add_transaction")
        .set_form(sale_form("twelve"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"].is_string());

    let rows = state.db.transaction_repo();
    assert!(rows.list().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_empty_index_renders() {
    let state = TestState::new("empty").await;
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("No transactions recorded yet."));
}

#[actix_web::test]
async fn test_generate_form_writes_pdf() {
    let state = TestState::new("generate").await;
    let _ = std::fs::remove_file(&state.export.path);
    let app = test_app!(state);

    for amount in ["100.00", "250.50"] {
        let req = test::TestRequest::post()
            .uri("/add_transaction")
            .set_form(sale_form(amount))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FOUND);
    }

    let req = test::TestRequest::get().uri("/generate_form").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let bytes = std::fs::read(&state.export.path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);

    let _ = std::fs::remove_file(&state.export.path);
}

#[actix_web::test]
async fn test_receipt_preview() {
    let state = TestState::new("preview").await;
    seed_demo_company(state.db.company_repo().as_ref())
        .await
        .unwrap();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/receipts/preview?company=My%20Store&payment_method=Credit%20Card")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(text.contains("TOTAL: 110.00"));
    assert!(text.contains("NET (excl. VAT): 88.00"));
    assert!(text.contains("Paid with: Credit Card"));

    let req = test::TestRequest::get()
        .uri("/receipts/preview?company=Nobody")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_readiness_checks_both_databases() {
    let state = TestState::new("ready").await;
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/ready").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
