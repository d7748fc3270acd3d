//! Backflow API Library
//!
//! Document workflow core for an ERP back office: scoped document
//! numbering, line-item totals, a shared document state machine,
//! amount-threshold approval routing, and signed-delta balance updates.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod services;
pub mod workflow;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: config::AppConfig,
        event_sender: events::EventSender,
    ) -> Self {
        let services = handlers::AppServices::new(db.clone(), event_sender.clone());
        Self {
            db,
            config,
            event_sender,
            services,
        }
    }
}

// Common response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn validation_errors(errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some("Validation failed".to_string()),
            errors: Some(errors),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// All v1 routes, nested under `/api/v1` by [`app_router`].
pub fn api_v1_routes() -> Router<AppState> {
    let purchase_orders = Router::new()
        .route("/purchase-orders", post(handlers::purchase_orders::create))
        .route("/purchase-orders", get(handlers::purchase_orders::list))
        .route("/purchase-orders/:id", get(handlers::purchase_orders::get))
        .route(
            "/purchase-orders/:id",
            delete(handlers::purchase_orders::delete),
        )
        .route(
            "/purchase-orders/:id/lines",
            put(handlers::purchase_orders::replace_lines),
        )
        .route(
            "/purchase-orders/:id/submit",
            post(handlers::purchase_orders::submit),
        )
        .route(
            "/purchase-orders/:id/complete",
            post(handlers::purchase_orders::complete),
        )
        .route(
            "/purchase-orders/:id/cancel",
            post(handlers::purchase_orders::cancel),
        );

    let journal_entries = Router::new()
        .route("/journal-entries", post(handlers::journal_entries::create))
        .route("/journal-entries/:id", get(handlers::journal_entries::get))
        .route(
            "/journal-entries/:id/submit",
            post(handlers::journal_entries::submit),
        )
        .route(
            "/journal-entries/:id/post",
            post(handlers::journal_entries::post),
        )
        .route(
            "/journal-entries/:id/cancel",
            post(handlers::journal_entries::cancel),
        );

    let invoices = Router::new()
        .route("/invoices", post(handlers::invoices::create))
        .route("/invoices/:id", get(handlers::invoices::get))
        .route("/invoices/:id/submit", post(handlers::invoices::submit))
        .route("/invoices/:id/post", post(handlers::invoices::post))
        .route("/invoices/:id/payment", put(handlers::invoices::set_payment))
        .route("/invoices/:id/cancel", post(handlers::invoices::cancel));

    let bank_transactions = Router::new()
        .route(
            "/bank-transactions",
            post(handlers::bank_transactions::create),
        )
        .route(
            "/bank-transactions/:id",
            get(handlers::bank_transactions::get),
        )
        .route(
            "/bank-transactions/:id/submit",
            post(handlers::bank_transactions::submit),
        )
        .route(
            "/bank-transactions/:id/post",
            post(handlers::bank_transactions::post),
        )
        .route(
            "/bank-transactions/:id/amount",
            put(handlers::bank_transactions::update_amount),
        )
        .route(
            "/bank-transactions/:id/cancel",
            post(handlers::bank_transactions::cancel),
        );

    let leave_requests = Router::new()
        .route("/leave-requests", post(handlers::leave_requests::create))
        .route("/leave-requests", get(handlers::leave_requests::list))
        .route("/leave-requests/:id", get(handlers::leave_requests::get))
        .route(
            "/leave-requests/:id/submit",
            post(handlers::leave_requests::submit),
        )
        .route(
            "/leave-requests/:id/cancel",
            post(handlers::leave_requests::cancel),
        );

    let payroll_periods = Router::new()
        .route("/payroll-periods", post(handlers::payroll_periods::create))
        .route("/payroll-periods/:id", get(handlers::payroll_periods::get))
        .route(
            "/payroll-periods/:id/submit",
            post(handlers::payroll_periods::submit),
        )
        .route(
            "/payroll-periods/:id/pay",
            post(handlers::payroll_periods::pay),
        )
        .route(
            "/payroll-periods/:id/cancel",
            post(handlers::payroll_periods::cancel),
        );

    let work_orders = Router::new()
        .route("/work-orders", post(handlers::work_orders::create))
        .route("/work-orders/:id", get(handlers::work_orders::get))
        .route("/work-orders/:id/submit", post(handlers::work_orders::submit))
        .route("/work-orders/:id/start", post(handlers::work_orders::start))
        .route(
            "/work-orders/:id/complete",
            post(handlers::work_orders::complete),
        )
        .route("/work-orders/:id/cancel", post(handlers::work_orders::cancel));

    let approvals = Router::new()
        .route(
            "/approval-workflows",
            post(handlers::approvals::create_workflow),
        )
        .route("/approval-requests", get(handlers::approvals::list_pending))
        .route(
            "/approval-requests/:id",
            get(handlers::approvals::get_request),
        )
        .route(
            "/approval-requests/:id/approve",
            post(handlers::approvals::approve),
        )
        .route(
            "/approval-requests/:id/reject",
            post(handlers::approvals::reject),
        );

    let accounts = Router::new()
        .route(
            "/ledger-accounts",
            post(handlers::accounts::create_ledger_account),
        )
        .route(
            "/ledger-accounts",
            get(handlers::accounts::list_ledger_accounts),
        )
        .route(
            "/ledger-accounts/:id",
            get(handlers::accounts::get_ledger_account),
        )
        .route(
            "/bank-accounts",
            post(handlers::accounts::create_bank_account),
        )
        .route(
            "/bank-accounts/:id",
            get(handlers::accounts::get_bank_account),
        );

    Router::new()
        .merge(purchase_orders)
        .merge(journal_entries)
        .merge(invoices)
        .merge(bank_transactions)
        .merge(leave_requests)
        .merge(payroll_periods)
        .merge(work_orders)
        .merge(approvals)
        .merge(accounts)
}

/// Full application router: versioned API plus health and status probes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/status", get(api_status))
        .nest("/api/v1", api_v1_routes())
        .with_state(state)
}

async fn health_check() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(json!({ "status": "healthy" })))
}

async fn api_status() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_wraps_data() {
        let resp = ApiResponse::success("ok");
        assert!(resp.success);
        assert_eq!(resp.data, Some("ok"));
        assert!(resp.message.is_none());
    }

    #[test]
    fn error_carries_message() {
        let resp = ApiResponse::<()>::error("oops".into());
        assert!(!resp.success);
        assert_eq!(resp.message.as_deref(), Some("oops"));
    }

    #[test]
    fn validation_errors_listed() {
        let resp = ApiResponse::<()>::validation_errors(vec!["missing".into()]);
        assert!(!resp.success);
        assert_eq!(resp.errors.as_ref().map(|e| e.len()), Some(1));
    }
}
