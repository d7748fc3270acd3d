//! Scoped document numbering: contiguity within a scope, independent
//! counters per company, kind, and period.

mod common;

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use backflow_api::services::sequences;
use backflow_api::workflow::DocumentKind;
use common::{po_line, TestApp};

#[tokio::test]
async fn numbers_are_contiguous_within_a_scope() {
    let app = TestApp::new().await;
    let date = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();

    for expected in 1..=5 {
        let number = sequences::next_number(
            &*app.db,
            app.company_id,
            DocumentKind::PurchaseOrder,
            date,
        )
        .await
        .unwrap();
        assert_eq!(number, format!("PO202501-{expected:04}"));
    }
}

#[tokio::test]
async fn counters_restart_per_period() {
    let app = TestApp::new().await;
    let january = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
    let february = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();

    let first = sequences::next_number(&*app.db, app.company_id, DocumentKind::Invoice, january)
        .await
        .unwrap();
    let second = sequences::next_number(&*app.db, app.company_id, DocumentKind::Invoice, january)
        .await
        .unwrap();
    let new_period =
        sequences::next_number(&*app.db, app.company_id, DocumentKind::Invoice, february)
            .await
            .unwrap();

    assert_eq!(first, "INV202501-0001");
    assert_eq!(second, "INV202501-0002");
    assert_eq!(new_period, "INV202502-0001");

    // Back to January: its counter kept counting where it left off.
    let third = sequences::next_number(&*app.db, app.company_id, DocumentKind::Invoice, january)
        .await
        .unwrap();
    assert_eq!(third, "INV202501-0003");
}

#[tokio::test]
async fn counters_are_scoped_per_company_and_kind() {
    let app = TestApp::new().await;
    let date = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
    let other_company = Uuid::new_v4();

    let po = sequences::next_number(&*app.db, app.company_id, DocumentKind::PurchaseOrder, date)
        .await
        .unwrap();
    let je = sequences::next_number(&*app.db, app.company_id, DocumentKind::JournalEntry, date)
        .await
        .unwrap();
    let other =
        sequences::next_number(&*app.db, other_company, DocumentKind::PurchaseOrder, date)
            .await
            .unwrap();

    assert_eq!(po, "PO202503-0001");
    assert_eq!(je, "JE202503-0001");
    assert_eq!(other, "PO202503-0001");
}

#[tokio::test]
async fn created_documents_carry_scoped_numbers() {
    let app = TestApp::new().await;

    let first = app
        .services
        .purchase_orders
        .create(backflow_api::services::purchase_orders::CreatePurchaseOrder {
            company_id: app.company_id,
            supplier_id: Uuid::new_v4(),
            currency: "USD".into(),
            lines: vec![po_line("Widget", dec!(1), dec!(10), dec!(0), dec!(0))],
            notes: None,
        })
        .await
        .unwrap();
    let second = app
        .services
        .purchase_orders
        .create(backflow_api::services::purchase_orders::CreatePurchaseOrder {
            company_id: app.company_id,
            supplier_id: Uuid::new_v4(),
            currency: "USD".into(),
            lines: vec![po_line("Widget", dec!(1), dec!(10), dec!(0), dec!(0))],
            notes: None,
        })
        .await
        .unwrap();

    let period = sequences::period_key(first.order_date);
    assert_eq!(first.number, format!("PO{period}-0001"));
    assert_eq!(second.number, format!("PO{period}-0002"));
}
