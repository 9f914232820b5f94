// Receipt composition: section order, per-item lines and inclusive VAT totals

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use vatpos::core::AppError;
use vatpos::modules::receipts::services::EscPosPrinter;
use vatpos::modules::receipts::{ReceiptComposer, ReceiptItem, ReceiptSink, Section};

fn printed_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap()
}

fn sections(receipt: &vatpos::modules::receipts::Receipt) -> Vec<Section> {
    let mut seen: Vec<Section> = Vec::new();
    for line in &receipt.lines {
        if seen.last() != Some(&line.section) {
            seen.push(line.section);
        }
    }
    seen
}

#[test]
fn test_empty_receipt_has_header_zero_totals_and_footer() {
    let receipt = ReceiptComposer::default()
        .compose("Empty Shop", &[], "Cash", dec!(16), printed_at())
        .unwrap();

    assert_eq!(receipt.lines_in(Section::Items).count(), 0);
    assert_eq!(receipt.totals.total, dec!(0));
    assert_eq!(receipt.totals.vat, dec!(0));
    assert_eq!(receipt.totals.net, dec!(0));

    assert_eq!(receipt.lines[0].text, "Empty Shop");
    assert_eq!(receipt.lines[1].text, "Date: 2024-01-01 12:30:00");

    let text = receipt.to_plain_text(32);
    assert!(text.contains("TOTAL: 0.00"));
    assert!(text.contains("Paid with: Cash"));
    assert!(text.contains("Thank you for shopping with us!"));

    assert_eq!(
        sections(&receipt),
        [
            Section::Header,
            Section::Totals,
            Section::Payment,
            Section::Footer,
            Section::Feed
        ]
    );
}

#[test]
fn test_two_item_lines_per_item_in_input_order() {
    let items: Vec<ReceiptItem> = (1..=4)
        .map(|n| ReceiptItem::new(format!("Item {}", n), n, dec!(2.50)).unwrap())
        .collect();

    let receipt = ReceiptComposer::default()
        .compose("Shop", &items, "Cash", dec!(16), printed_at())
        .unwrap();

    let item_lines: Vec<&str> = receipt
        .lines_in(Section::Items)
        .map(|line| line.text.as_str())
        .collect();
    assert_eq!(item_lines.len(), 8);
    assert_eq!(item_lines[0], "Item 1 x1 @ 2.50");
    assert_eq!(item_lines[1], "  Subtotal: 2.50");
    assert_eq!(item_lines[6], "Item 4 x4 @ 2.50");
    assert_eq!(item_lines[7], "  Subtotal: 10.00");
}

#[test]
fn test_my_store_totals() {
    let items = [
        ReceiptItem::new("Package 1", 5, dec!(10.00)).unwrap(),
        ReceiptItem::new("Package 2", 3, dec!(20.00)).unwrap(),
    ];

    let receipt = ReceiptComposer::default()
        .compose("My Store", &items, "Credit Card", dec!(20.0), printed_at())
        .unwrap();

    assert_eq!(receipt.totals.total, dec!(110.00));
    assert_eq!(receipt.totals.vat, dec!(22.00));
    assert_eq!(receipt.totals.net, dec!(88.00));

    let totals: Vec<&str> = receipt
        .lines_in(Section::Totals)
        .map(|line| line.text.as_str())
        .filter(|text| !text.starts_with('='))
        .collect();
    assert_eq!(
        totals,
        ["TOTAL: 110.00", "VAT (20%): -22.00", "NET (excl. VAT): 88.00"]
    );
}

#[test]
fn test_negative_price_is_rejected() {
    assert!(ReceiptItem::new("Refund", 1, dec!(-1)).is_err());
}

#[test]
fn test_oversized_packages_fail_without_panicking() {
    let items = [ReceiptItem::new("Big", 1_000_000_000_000_000_000, dec!(100000000000)).unwrap()];
    let err = ReceiptComposer::default()
        .compose("My Store", &items, "Cash", dec!(16), printed_at())
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);

    let items = [
        ReceiptItem::new("First", 1, Decimal::MAX).unwrap(),
        ReceiptItem::new("Second", 1, Decimal::MAX).unwrap(),
    ];
    let err = ReceiptComposer::default()
        .compose("My Store", &items, "Cash", dec!(16), printed_at())
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);
}

#[test]
fn test_test_page_reaches_escpos_device() {
    let page = ReceiptComposer::default().test_page("memory", printed_at());

    let mut printer = EscPosPrinter::new(Vec::new(), "memory").unwrap();
    printer.print(&page).unwrap();
    let bytes = printer.into_inner();

    assert!(bytes.starts_with(&[0x1b, b'@']));
    assert!(bytes.windows(10).any(|w| w == b"Test Print"));
    assert!(bytes.ends_with(&[0x1d, b'V', 0]));
}
