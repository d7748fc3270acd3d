//! Status access for document headers, dispatched over [`DocumentRef`].
//!
//! The match arms below are the only places a document status column is
//! written. Adding a document kind fails to compile until every dispatch here
//! handles it.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QuerySelect, Set};

use crate::{
    entities::{
        bank_transaction, invoice, journal_entry, leave_request, payroll_period, purchase_order,
        work_order,
    },
    errors::ServiceError,
    workflow::{ensure_transition, DocumentKind, DocumentRef, DocumentState},
};

fn not_found(document: DocumentRef) -> ServiceError {
    ServiceError::NotFound(format!("Document {document} not found"))
}

/// Reads the current workflow state of the referenced document.
pub async fn current_state<C: ConnectionTrait>(
    conn: &C,
    document: DocumentRef,
) -> Result<DocumentState, ServiceError> {
    let state = match document.kind {
        DocumentKind::PurchaseOrder => {
            purchase_order::Entity::find_by_id(document.id)
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?
                .status
        }
        DocumentKind::JournalEntry => {
            journal_entry::Entity::find_by_id(document.id)
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?
                .status
        }
        DocumentKind::Invoice => {
            invoice::Entity::find_by_id(document.id)
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?
                .status
        }
        DocumentKind::BankTransaction => {
            bank_transaction::Entity::find_by_id(document.id)
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?
                .status
        }
        DocumentKind::LeaveRequest => {
            leave_request::Entity::find_by_id(document.id)
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?
                .status
        }
        DocumentKind::PayrollPeriod => {
            payroll_period::Entity::find_by_id(document.id)
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?
                .status
        }
        DocumentKind::WorkOrder => {
            work_order::Entity::find_by_id(document.id)
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?
                .status
        }
    };
    Ok(state)
}

/// Moves the referenced document to `to`, validating the transition against
/// the kind's state machine and stamping `status_changed_at` / `version`.
///
/// Runs on the caller's transaction so the status write commits atomically
/// with whatever side effects accompany the transition.
pub async fn transition<C: ConnectionTrait>(
    conn: &C,
    document: DocumentRef,
    to: DocumentState,
) -> Result<DocumentState, ServiceError> {
    let now = Utc::now();

    match document.kind {
        DocumentKind::PurchaseOrder => {
            let model = purchase_order::Entity::find_by_id(document.id)
                .lock_exclusive()
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?;
            ensure_transition(document.kind, model.status, to)?;
            let version = model.version;
            let mut active: purchase_order::ActiveModel = model.into();
            active.status = Set(to);
            active.status_changed_at = Set(now);
            active.updated_at = Set(Some(now));
            active.version = Set(version + 1);
            active.update(conn).await?;
        }
        DocumentKind::JournalEntry => {
            let model = journal_entry::Entity::find_by_id(document.id)
                .lock_exclusive()
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?;
            ensure_transition(document.kind, model.status, to)?;
            let version = model.version;
            let mut active: journal_entry::ActiveModel = model.into();
            active.status = Set(to);
            active.status_changed_at = Set(now);
            active.updated_at = Set(Some(now));
            active.version = Set(version + 1);
            if to == DocumentState::Posted {
                active.posted_at = Set(Some(now));
            }
            active.update(conn).await?;
        }
        DocumentKind::Invoice => {
            let model = invoice::Entity::find_by_id(document.id)
                .lock_exclusive()
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?;
            ensure_transition(document.kind, model.status, to)?;
            let version = model.version;
            let mut active: invoice::ActiveModel = model.into();
            active.status = Set(to);
            active.status_changed_at = Set(now);
            active.updated_at = Set(Some(now));
            active.version = Set(version + 1);
            active.update(conn).await?;
        }
        DocumentKind::BankTransaction => {
            let model = bank_transaction::Entity::find_by_id(document.id)
                .lock_exclusive()
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?;
            ensure_transition(document.kind, model.status, to)?;
            let version = model.version;
            let mut active: bank_transaction::ActiveModel = model.into();
            active.status = Set(to);
            active.status_changed_at = Set(now);
            active.updated_at = Set(Some(now));
            active.version = Set(version + 1);
            active.update(conn).await?;
        }
        DocumentKind::LeaveRequest => {
            let model = leave_request::Entity::find_by_id(document.id)
                .lock_exclusive()
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?;
            ensure_transition(document.kind, model.status, to)?;
            let version = model.version;
            let mut active: leave_request::ActiveModel = model.into();
            active.status = Set(to);
            active.status_changed_at = Set(now);
            active.updated_at = Set(Some(now));
            active.version = Set(version + 1);
            active.update(conn).await?;
        }
        DocumentKind::PayrollPeriod => {
            let model = payroll_period::Entity::find_by_id(document.id)
                .lock_exclusive()
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?;
            ensure_transition(document.kind, model.status, to)?;
            let version = model.version;
            let mut active: payroll_period::ActiveModel = model.into();
            active.status = Set(to);
            active.status_changed_at = Set(now);
            active.updated_at = Set(Some(now));
            active.version = Set(version + 1);
            if to == DocumentState::Paid {
                active.paid_at = Set(Some(now));
            }
            active.update(conn).await?;
        }
        DocumentKind::WorkOrder => {
            let model = work_order::Entity::find_by_id(document.id)
                .lock_exclusive()
                .one(conn)
                .await?
                .ok_or_else(|| not_found(document))?;
            ensure_transition(document.kind, model.status, to)?;
            let version = model.version;
            let mut active: work_order::ActiveModel = model.into();
            active.status = Set(to);
            active.status_changed_at = Set(now);
            active.updated_at = Set(Some(now));
            active.version = Set(version + 1);
            if to == DocumentState::InProgress {
                active.started_at = Set(Some(now));
            }
            if to == DocumentState::Completed {
                active.completed_at = Set(Some(now));
            }
            active.update(conn).await?;
        }
    }

    Ok(to)
}
