//! Lifecycle coverage for the non-trading document kinds: leave
//! requests, payroll periods, and work orders.

mod common;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use backflow_api::errors::ServiceError;
use backflow_api::services::leave_requests::CreateLeaveRequest;
use backflow_api::services::payroll_periods::CreatePayrollPeriod;
use backflow_api::services::work_orders::CreateWorkOrder;
use backflow_api::workflow::{DocumentKind, DocumentState};
use common::TestApp;

#[tokio::test]
async fn leave_request_routes_on_day_count() {
    let app = TestApp::new().await;
    let manager = Uuid::new_v4();
    // Leave longer than a week needs a manager sign-off.
    app.seed_workflow(DocumentKind::LeaveRequest, dec!(8), None, &[manager])
        .await;
    let employee = Uuid::new_v4();

    let short = app
        .services
        .leave_requests
        .create(CreateLeaveRequest {
            company_id: app.company_id,
            employee_id: employee,
            leave_type: "vacation".into(),
            start_date: Utc::now(),
            end_date: Utc::now() + Duration::days(2),
            days: dec!(3),
            reason: None,
        })
        .await
        .unwrap();
    let outcome = app.services.leave_requests.submit(short.id).await.unwrap();
    assert_eq!(outcome.state, DocumentState::Approved);

    let long = app
        .services
        .leave_requests
        .create(CreateLeaveRequest {
            company_id: app.company_id,
            employee_id: employee,
            leave_type: "vacation".into(),
            start_date: Utc::now(),
            end_date: Utc::now() + Duration::days(13),
            days: dec!(10),
            reason: Some("sabbatical".into()),
        })
        .await
        .unwrap();
    let outcome = app.services.leave_requests.submit(long.id).await.unwrap();
    assert_eq!(outcome.state, DocumentState::PendingApproval);
    assert_eq!(outcome.request.unwrap().approver_id, manager);

    let listed = app
        .services
        .leave_requests
        .list_by_employee(employee)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn leave_request_rejects_inverted_ranges() {
    let app = TestApp::new().await;
    let result = app
        .services
        .leave_requests
        .create(CreateLeaveRequest {
            company_id: app.company_id,
            employee_id: Uuid::new_v4(),
            leave_type: "vacation".into(),
            start_date: Utc::now(),
            end_date: Utc::now() - Duration::days(1),
            days: dec!(1),
            reason: None,
        })
        .await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn payroll_payment_withdraws_net_from_the_bank_account() {
    let app = TestApp::new().await;
    let account = app.seed_bank_account("Payroll", dec!(100000)).await;

    let period = app
        .services
        .payroll_periods
        .create(CreatePayrollPeriod {
            company_id: app.company_id,
            period_month: "2025-02".into(),
            gross_total: dec!(52000),
            net_total: dec!(41000),
            bank_account_id: Some(account),
        })
        .await
        .unwrap();
    app.services.payroll_periods.submit(period.id).await.unwrap();

    let paid = app.services.payroll_periods.pay(period.id).await.unwrap();
    assert_eq!(paid.status, DocumentState::Paid);
    assert!(paid.paid_at.is_some());
    assert_eq!(
        app.services.accounts.get_bank_account(account).await.unwrap().balance,
        dec!(59000)
    );

    // Paid is terminal.
    let result = app.services.payroll_periods.cancel(period.id).await;
    assert_matches!(result, Err(ServiceError::InvalidStateTransition { .. }));
}

#[tokio::test]
async fn payroll_net_cannot_exceed_gross() {
    let app = TestApp::new().await;
    let result = app
        .services
        .payroll_periods
        .create(CreatePayrollPeriod {
            company_id: app.company_id,
            period_month: "2025-02".into(),
            gross_total: dec!(1000),
            net_total: dec!(1001),
            bank_account_id: None,
        })
        .await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn work_order_runs_start_to_completion() {
    let app = TestApp::new().await;
    let wo = app
        .services
        .work_orders
        .create(CreateWorkOrder {
            company_id: app.company_id,
            item_code: "ASM-100".into(),
            quantity_planned: dec!(50),
            due_date: None,
        })
        .await
        .unwrap();
    assert_eq!(wo.status, DocumentState::Draft);

    let outcome = app.services.work_orders.submit(wo.id).await.unwrap();
    assert_eq!(outcome.state, DocumentState::Approved);

    let started = app.services.work_orders.start(wo.id).await.unwrap();
    assert_eq!(started.status, DocumentState::InProgress);
    assert!(started.started_at.is_some());

    let completed = app
        .services
        .work_orders
        .complete(wo.id, dec!(48))
        .await
        .unwrap();
    assert_eq!(completed.status, DocumentState::Completed);
    assert_eq!(completed.quantity_produced, dec!(48));
    assert!(completed.completed_at.is_some());
}

#[tokio::test]
async fn work_order_cannot_start_from_draft() {
    let app = TestApp::new().await;
    let wo = app
        .services
        .work_orders
        .create(CreateWorkOrder {
            company_id: app.company_id,
            item_code: "ASM-100".into(),
            quantity_planned: dec!(10),
            due_date: None,
        })
        .await
        .unwrap();

    let result = app.services.work_orders.start(wo.id).await;
    assert_matches!(result, Err(ServiceError::InvalidStateTransition { .. }));
}

#[tokio::test]
async fn in_progress_work_orders_cannot_be_cancelled() {
    let app = TestApp::new().await;
    let wo = app
        .services
        .work_orders
        .create(CreateWorkOrder {
            company_id: app.company_id,
            item_code: "ASM-100".into(),
            quantity_planned: dec!(10),
            due_date: None,
        })
        .await
        .unwrap();
    app.services.work_orders.submit(wo.id).await.unwrap();
    app.services.work_orders.start(wo.id).await.unwrap();

    let result = app.services.work_orders.cancel(wo.id).await;
    assert_matches!(result, Err(ServiceError::InvalidStateTransition { .. }));
}
