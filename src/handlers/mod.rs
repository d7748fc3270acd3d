pub mod accounts;
pub mod approvals;
pub mod bank_transactions;
pub mod invoices;
pub mod journal_entries;
pub mod leave_requests;
pub mod payroll_periods;
pub mod purchase_orders;
pub mod work_orders;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::entities::approval_request;
use crate::events::EventSender;
use crate::services;
use crate::workflow::DocumentState;

/// Shared service container handed to every handler through `AppState`.
#[derive(Clone)]
pub struct AppServices {
    pub purchase_orders: Arc<services::purchase_orders::PurchaseOrderService>,
    pub journal_entries: Arc<services::journal_entries::JournalEntryService>,
    pub invoices: Arc<services::invoices::InvoiceService>,
    pub bank_transactions: Arc<services::bank_transactions::BankTransactionService>,
    pub leave_requests: Arc<services::leave_requests::LeaveRequestService>,
    pub payroll_periods: Arc<services::payroll_periods::PayrollPeriodService>,
    pub work_orders: Arc<services::work_orders::WorkOrderService>,
    pub approvals: Arc<services::approvals::ApprovalService>,
    pub accounts: Arc<services::accounts::AccountService>,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self {
            purchase_orders: Arc::new(services::purchase_orders::PurchaseOrderService::new(
                db.clone(),
                event_sender.clone(),
            )),
            journal_entries: Arc::new(services::journal_entries::JournalEntryService::new(
                db.clone(),
                event_sender.clone(),
            )),
            invoices: Arc::new(services::invoices::InvoiceService::new(
                db.clone(),
                event_sender.clone(),
            )),
            bank_transactions: Arc::new(services::bank_transactions::BankTransactionService::new(
                db.clone(),
                event_sender.clone(),
            )),
            leave_requests: Arc::new(services::leave_requests::LeaveRequestService::new(
                db.clone(),
                event_sender.clone(),
            )),
            payroll_periods: Arc::new(services::payroll_periods::PayrollPeriodService::new(
                db.clone(),
                event_sender.clone(),
            )),
            work_orders: Arc::new(services::work_orders::WorkOrderService::new(
                db.clone(),
                event_sender.clone(),
            )),
            approvals: Arc::new(services::approvals::ApprovalService::new(
                db.clone(),
                event_sender,
            )),
            accounts: Arc::new(services::accounts::AccountService::new(db)),
        }
    }
}

/// Body returned by every submit endpoint: where the document landed and,
/// when a workflow matched, the request awaiting its first approver.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub status: DocumentState,
    pub approval_request: Option<approval_request::Model>,
}

impl From<services::approvals::SubmitOutcome> for SubmitResponse {
    fn from(outcome: services::approvals::SubmitOutcome) -> Self {
        Self {
            status: outcome.state,
            approval_request: outcome.request,
        }
    }
}
