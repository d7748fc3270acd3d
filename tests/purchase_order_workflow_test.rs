//! Purchase order lifecycle: creation with computed totals, line edits,
//! submission routing, completion, cancellation, and deletion rules.

mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use uuid::Uuid;

use backflow_api::errors::ServiceError;
use backflow_api::services::purchase_orders::CreatePurchaseOrder;
use backflow_api::workflow::{DocumentKind, DocumentState};
use common::{po_line, TestApp};

fn order_input(app: &TestApp, lines: Vec<backflow_api::services::purchase_orders::PurchaseOrderLineInput>) -> CreatePurchaseOrder {
    CreatePurchaseOrder {
        company_id: app.company_id,
        supplier_id: Uuid::new_v4(),
        currency: "USD".into(),
        lines,
        notes: None,
    }
}

#[tokio::test]
async fn create_computes_discount_before_tax() {
    let app = TestApp::new().await;

    // 10 x 35.00, 10% discount, then 10% tax on the discounted base.
    let order = app
        .services
        .purchase_orders
        .create(order_input(
            &app,
            vec![po_line("Steel plate", dec!(10), dec!(35), dec!(10), dec!(10))],
        ))
        .await
        .unwrap();

    assert_eq!(order.status, DocumentState::Draft);
    assert_eq!(order.subtotal, dec!(350));
    assert_eq!(order.discount_total, dec!(35.00));
    assert_eq!(order.tax_total, dec!(31.500));
    assert_eq!(order.total_amount, dec!(346.500));
}

#[tokio::test]
async fn create_rejects_invalid_percentages() {
    let app = TestApp::new().await;

    let result = app
        .services
        .purchase_orders
        .create(order_input(
            &app,
            vec![po_line("Bad line", dec!(1), dec!(10), dec!(120), dec!(0))],
        ))
        .await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));

    let result = app
        .services
        .purchase_orders
        .create(order_input(
            &app,
            vec![po_line("Bad line", dec!(-1), dec!(10), dec!(0), dec!(0))],
        ))
        .await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn replace_lines_recomputes_totals() {
    let app = TestApp::new().await;
    let order = app
        .services
        .purchase_orders
        .create(order_input(
            &app,
            vec![po_line("Widget", dec!(1), dec!(100), dec!(0), dec!(0))],
        ))
        .await
        .unwrap();
    let original_version = order.version;

    let updated = app
        .services
        .purchase_orders
        .replace_lines(
            order.id,
            vec![
                po_line("Widget", dec!(2), dec!(100), dec!(0), dec!(0)),
                po_line("Bolt pack", dec!(5), dec!(4), dec!(0), dec!(0)),
            ],
        )
        .await
        .unwrap();

    assert_eq!(updated.subtotal, dec!(220));
    assert_eq!(updated.total_amount, dec!(220));
    assert!(updated.version > original_version);

    let (_, lines) = app.services.purchase_orders.get(order.id).await.unwrap();
    assert_eq!(lines.len(), 2);
}

#[tokio::test]
async fn lines_are_frozen_after_submission() {
    let app = TestApp::new().await;
    let order = app
        .services
        .purchase_orders
        .create(order_input(
            &app,
            vec![po_line("Widget", dec!(1), dec!(100), dec!(0), dec!(0))],
        ))
        .await
        .unwrap();
    app.services.purchase_orders.submit(order.id).await.unwrap();

    let result = app
        .services
        .purchase_orders
        .replace_lines(
            order.id,
            vec![po_line("Widget", dec!(9), dec!(100), dec!(0), dec!(0))],
        )
        .await;
    assert_matches!(result, Err(ServiceError::InvalidOperation(_)));
}

#[tokio::test]
async fn submit_auto_approves_without_matching_workflow() {
    let app = TestApp::new().await;
    let order = app
        .services
        .purchase_orders
        .create(order_input(
            &app,
            vec![po_line("Widget", dec!(5), dec!(1000), dec!(0), dec!(0))],
        ))
        .await
        .unwrap();

    let outcome = app.services.purchase_orders.submit(order.id).await.unwrap();
    assert_eq!(outcome.state, DocumentState::Approved);
    assert!(outcome.request.is_none());

    let (reloaded, _) = app.services.purchase_orders.get(order.id).await.unwrap();
    assert_eq!(reloaded.status, DocumentState::Approved);
}

#[tokio::test]
async fn submit_routes_when_amount_reaches_threshold() {
    let app = TestApp::new().await;
    let approver = Uuid::new_v4();
    app.seed_workflow(
        DocumentKind::PurchaseOrder,
        dec!(10000),
        None,
        &[approver],
    )
    .await;

    // 25 x 1000 = 25000, inside the workflow band.
    let routed = app
        .services
        .purchase_orders
        .create(order_input(
            &app,
            vec![po_line("Server rack", dec!(25), dec!(1000), dec!(0), dec!(0))],
        ))
        .await
        .unwrap();
    let outcome = app.services.purchase_orders.submit(routed.id).await.unwrap();
    assert_eq!(outcome.state, DocumentState::PendingApproval);
    let request = outcome.request.expect("a request should have been opened");
    assert_eq!(request.approver_id, approver);
    assert_eq!(request.current_level, 1);

    // 5 x 1000 = 5000, below the band: straight to approved.
    let small = app
        .services
        .purchase_orders
        .create(order_input(
            &app,
            vec![po_line("Cabling", dec!(5), dec!(1000), dec!(0), dec!(0))],
        ))
        .await
        .unwrap();
    let outcome = app.services.purchase_orders.submit(small.id).await.unwrap();
    assert_eq!(outcome.state, DocumentState::Approved);
}

#[tokio::test]
async fn approved_order_can_be_completed() {
    let app = TestApp::new().await;
    let order = app
        .services
        .purchase_orders
        .create(order_input(
            &app,
            vec![po_line("Widget", dec!(1), dec!(50), dec!(0), dec!(0))],
        ))
        .await
        .unwrap();
    app.services.purchase_orders.submit(order.id).await.unwrap();

    let completed = app.services.purchase_orders.complete(order.id).await.unwrap();
    assert_eq!(completed.status, DocumentState::Completed);

    // Terminal: cancel must fail now.
    let result = app.services.purchase_orders.cancel(order.id).await;
    assert_matches!(result, Err(ServiceError::InvalidStateTransition { .. }));
}

#[tokio::test]
async fn draft_to_completed_is_not_a_legal_jump() {
    let app = TestApp::new().await;
    let order = app
        .services
        .purchase_orders
        .create(order_input(
            &app,
            vec![po_line("Widget", dec!(1), dec!(50), dec!(0), dec!(0))],
        ))
        .await
        .unwrap();

    let result = app.services.purchase_orders.complete(order.id).await;
    match result {
        Err(ServiceError::InvalidStateTransition { from, to }) => {
            assert_eq!(from, "draft");
            assert_eq!(to, "completed");
        }
        other => panic!("expected invalid transition, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_is_draft_only() {
    let app = TestApp::new().await;
    let order = app
        .services
        .purchase_orders
        .create(order_input(
            &app,
            vec![po_line("Widget", dec!(1), dec!(50), dec!(0), dec!(0))],
        ))
        .await
        .unwrap();

    let other = app
        .services
        .purchase_orders
        .create(order_input(
            &app,
            vec![po_line("Widget", dec!(1), dec!(50), dec!(0), dec!(0))],
        ))
        .await
        .unwrap();
    app.services.purchase_orders.submit(other.id).await.unwrap();
    let result = app.services.purchase_orders.delete(other.id).await;
    assert_matches!(result, Err(ServiceError::InvalidOperation(_)));

    app.services.purchase_orders.delete(order.id).await.unwrap();
    let result = app.services.purchase_orders.get(order.id).await;
    assert_matches!(result, Err(ServiceError::NotFound(_)));
}
