//! Approval routing: band selection, multi-level sign-off, rejection,
//! and the guards against double-routing and stale decisions.

mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use uuid::Uuid;

use backflow_api::entities::approval_request::{ApprovalPriority, ApprovalStatus};
use backflow_api::errors::ServiceError;
use backflow_api::services::approvals::{self, ApprovalOutcome};
use backflow_api::services::purchase_orders::CreatePurchaseOrder;
use backflow_api::workflow::{DocumentKind, DocumentRef, DocumentState};
use common::{po_line, TestApp};

async fn submitted_po(app: &TestApp, quantity: rust_decimal::Decimal) -> (Uuid, approvals::SubmitOutcome) {
    let order = app
        .services
        .purchase_orders
        .create(CreatePurchaseOrder {
            company_id: app.company_id,
            supplier_id: Uuid::new_v4(),
            currency: "USD".into(),
            lines: vec![po_line("Routed goods", quantity, dec!(1000), dec!(0), dec!(0))],
            notes: None,
        })
        .await
        .unwrap();
    let outcome = app.services.purchase_orders.submit(order.id).await.unwrap();
    (order.id, outcome)
}

#[tokio::test]
async fn multi_level_workflow_advances_then_approves() {
    let app = TestApp::new().await;
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    app.seed_workflow(DocumentKind::PurchaseOrder, dec!(10000), None, &[first, second])
        .await;

    let (po_id, outcome) = submitted_po(&app, dec!(20)).await;
    let request = outcome.request.unwrap();
    assert_eq!(request.approver_id, first);

    // First approver signs: request advances, document stays pending.
    let advanced = app
        .services
        .approvals
        .approve(request.id, first)
        .await
        .unwrap();
    let advanced = assert_matches!(advanced, ApprovalOutcome::Advanced(r) => r);
    assert_eq!(advanced.current_level, 2);
    assert_eq!(advanced.approver_id, second);
    let (order, _) = app.services.purchase_orders.get(po_id).await.unwrap();
    assert_eq!(order.status, DocumentState::PendingApproval);

    // Final approver signs: request and document are approved.
    let approved = app
        .services
        .approvals
        .approve(request.id, second)
        .await
        .unwrap();
    let approved = assert_matches!(approved, ApprovalOutcome::Approved(r) => r);
    assert_eq!(approved.status, ApprovalStatus::Approved);
    assert_eq!(approved.decided_by, Some(second));
    let (order, _) = app.services.purchase_orders.get(po_id).await.unwrap();
    assert_eq!(order.status, DocumentState::Approved);
}

#[tokio::test]
async fn rejection_is_immediate_at_any_level() {
    let app = TestApp::new().await;
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    app.seed_workflow(DocumentKind::PurchaseOrder, dec!(10000), None, &[first, second])
        .await;

    let (po_id, outcome) = submitted_po(&app, dec!(20)).await;
    let request = outcome.request.unwrap();

    let rejected = app
        .services
        .approvals
        .reject(request.id, first, "over budget".into())
        .await
        .unwrap();
    assert_eq!(rejected.status, ApprovalStatus::Rejected);
    assert_eq!(rejected.reason.as_deref(), Some("over budget"));

    let (order, _) = app.services.purchase_orders.get(po_id).await.unwrap();
    assert_eq!(order.status, DocumentState::Rejected);
}

#[tokio::test]
async fn decided_requests_refuse_further_decisions() {
    let app = TestApp::new().await;
    let approver = Uuid::new_v4();
    app.seed_workflow(DocumentKind::PurchaseOrder, dec!(10000), None, &[approver])
        .await;

    let (_, outcome) = submitted_po(&app, dec!(20)).await;
    let request = outcome.request.unwrap();

    app.services
        .approvals
        .approve(request.id, approver)
        .await
        .unwrap();

    let again = app.services.approvals.approve(request.id, approver).await;
    assert_matches!(again, Err(ServiceError::RequestNotPending(id)) if id == request.id);
    let reject = app
        .services
        .approvals
        .reject(request.id, approver, "too late".into())
        .await;
    assert_matches!(reject, Err(ServiceError::RequestNotPending(_)));
}

#[tokio::test]
async fn one_open_request_per_document() {
    let app = TestApp::new().await;
    let approver = Uuid::new_v4();
    app.seed_workflow(DocumentKind::PurchaseOrder, dec!(10000), None, &[approver])
        .await;

    let (po_id, outcome) = submitted_po(&app, dec!(20)).await;
    assert!(outcome.request.is_some());

    // Routing the same document again must refuse while a request is open.
    let result = approvals::route(
        &*app.db,
        app.company_id,
        DocumentRef::new(DocumentKind::PurchaseOrder, po_id),
        dec!(20000),
    )
    .await;
    assert_matches!(result, Err(ServiceError::ApprovalAlreadyInProgress(id)) if id == po_id);
}

#[tokio::test]
async fn narrowest_matching_band_wins() {
    let app = TestApp::new().await;
    let low_approver = Uuid::new_v4();
    let high_approver = Uuid::new_v4();
    app.seed_workflow(
        DocumentKind::PurchaseOrder,
        dec!(10000),
        Some(dec!(50000)),
        &[low_approver],
    )
    .await;
    app.seed_workflow(DocumentKind::PurchaseOrder, dec!(50000), None, &[high_approver])
        .await;

    // 20 x 1000 = 20000 lands in the low band.
    let (_, outcome) = submitted_po(&app, dec!(20)).await;
    assert_eq!(outcome.request.unwrap().approver_id, low_approver);

    // 60 x 1000 = 60000 lands in the high band, tagged high priority.
    let (_, outcome) = submitted_po(&app, dec!(60)).await;
    let request = outcome.request.unwrap();
    assert_eq!(request.approver_id, high_approver);
    assert_eq!(request.priority, ApprovalPriority::High);
}

#[tokio::test]
async fn priority_follows_amount_thresholds() {
    assert_eq!(ApprovalPriority::from_amount(dec!(5000)), ApprovalPriority::Low);
    assert_eq!(
        ApprovalPriority::from_amount(dec!(10000)),
        ApprovalPriority::Medium
    );
    assert_eq!(
        ApprovalPriority::from_amount(dec!(50000)),
        ApprovalPriority::High
    );
    assert_eq!(
        ApprovalPriority::from_amount(dec!(100000)),
        ApprovalPriority::Urgent
    );
}

#[tokio::test]
async fn pending_queue_lists_only_the_current_approver() {
    let app = TestApp::new().await;
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    app.seed_workflow(DocumentKind::PurchaseOrder, dec!(10000), None, &[first, second])
        .await;

    let (_, outcome) = submitted_po(&app, dec!(20)).await;
    let request = outcome.request.unwrap();

    assert_eq!(
        app.services
            .approvals
            .list_pending_for_approver(first)
            .await
            .unwrap()
            .len(),
        1
    );
    assert!(app
        .services
        .approvals
        .list_pending_for_approver(second)
        .await
        .unwrap()
        .is_empty());

    app.services.approvals.approve(request.id, first).await.unwrap();

    assert!(app
        .services
        .approvals
        .list_pending_for_approver(first)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        app.services
            .approvals
            .list_pending_for_approver(second)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn cancelling_a_pending_document_closes_its_request() {
    let app = TestApp::new().await;
    let approver = Uuid::new_v4();
    app.seed_workflow(DocumentKind::PurchaseOrder, dec!(10000), None, &[approver])
        .await;

    let (po_id, outcome) = submitted_po(&app, dec!(20)).await;
    let request = outcome.request.unwrap();

    app.services.purchase_orders.cancel(po_id).await.unwrap();

    let reloaded = app.services.approvals.get_request(request.id).await.unwrap();
    assert_eq!(reloaded.status, ApprovalStatus::Cancelled);
    let (order, _) = app.services.purchase_orders.get(po_id).await.unwrap();
    assert_eq!(order.status, DocumentState::Cancelled);
}
