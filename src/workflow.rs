//! Shared document workflow: kinds, states, and the per-kind transition table.
//!
//! Every business document (purchase order, journal entry, invoice, bank
//! transaction, leave request, payroll period, work order) moves through the
//! same state template. The table below is the single authority on which
//! transitions exist; services never write a status without going through
//! [`ensure_transition`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// The document kinds the workflow core knows about.
///
/// Approval requests and sequence scopes reference documents through this
/// enum rather than an untyped (string, id) pair so that adding a kind forces
/// every dispatch site to handle it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    #[sea_orm(string_value = "purchase_order")]
    PurchaseOrder,
    #[sea_orm(string_value = "journal_entry")]
    JournalEntry,
    #[sea_orm(string_value = "invoice")]
    Invoice,
    #[sea_orm(string_value = "bank_transaction")]
    BankTransaction,
    #[sea_orm(string_value = "leave_request")]
    LeaveRequest,
    #[sea_orm(string_value = "payroll_period")]
    PayrollPeriod,
    #[sea_orm(string_value = "work_order")]
    WorkOrder,
}

impl DocumentKind {
    /// Document-number prefix for the kind's sequence scope.
    pub fn number_prefix(self) -> &'static str {
        match self {
            DocumentKind::PurchaseOrder => "PO",
            DocumentKind::JournalEntry => "JE",
            DocumentKind::Invoice => "INV",
            DocumentKind::BankTransaction => "BT",
            DocumentKind::LeaveRequest => "LV",
            DocumentKind::PayrollPeriod => "PRL",
            DocumentKind::WorkOrder => "WO",
        }
    }

    /// The state a document of this kind enters when it produces its
    /// balance or execution effects.
    pub fn effect_state(self) -> Option<DocumentState> {
        match self {
            DocumentKind::JournalEntry
            | DocumentKind::Invoice
            | DocumentKind::BankTransaction => Some(DocumentState::Posted),
            DocumentKind::PayrollPeriod => Some(DocumentState::Paid),
            DocumentKind::WorkOrder => Some(DocumentState::InProgress),
            DocumentKind::PurchaseOrder => Some(DocumentState::Completed),
            DocumentKind::LeaveRequest => None,
        }
    }
}

/// A typed reference to one document of a known kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub kind: DocumentKind,
    pub id: Uuid,
}

impl DocumentRef {
    pub fn new(kind: DocumentKind, id: Uuid) -> Self {
        Self { kind, id }
    }
}

impl std::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// Workflow states shared by all document kinds. Not every kind uses every
/// state; the transition table decides what is reachable.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentState {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "pending_approval")]
    PendingApproval,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "posted")]
    Posted,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl DocumentState {
    /// Line items and header fields may only change while the document is
    /// still a draft.
    pub fn is_editable(self) -> bool {
        self == DocumentState::Draft
    }

    /// Cancellation is only reachable before any ledger effect.
    pub fn is_cancellable(self) -> bool {
        matches!(
            self,
            DocumentState::Draft | DocumentState::Submitted | DocumentState::PendingApproval
        )
    }
}

/// Returns true when the state machine for `kind` allows `from -> to`.
pub fn transition_allowed(kind: DocumentKind, from: DocumentState, to: DocumentState) -> bool {
    use DocumentKind as K;
    use DocumentState as S;

    match (from, to) {
        // Common template
        (S::Draft, S::Submitted) => true,
        (S::Submitted, S::PendingApproval) => true,
        (S::Submitted, S::Approved) => true,
        (S::Submitted, S::Rejected) => true,
        (S::PendingApproval, S::Approved) => true,
        (S::PendingApproval, S::Rejected) => true,

        // Cancellation, only before effects
        (from, S::Cancelled) if from.is_cancellable() => true,

        // Approved -> effect state, per kind
        (S::Approved, S::Posted) => {
            matches!(kind, K::JournalEntry | K::Invoice | K::BankTransaction)
        }
        (S::Approved, S::Paid) => kind == K::PayrollPeriod,
        (S::Approved, S::InProgress) => kind == K::WorkOrder,
        (S::Approved, S::Completed) => kind == K::PurchaseOrder,

        // Post-effect life for the kinds that have one
        (S::Posted, S::Paid) => kind == K::Invoice,
        (S::InProgress, S::Completed) => kind == K::WorkOrder,

        _ => false,
    }
}

/// Validates a requested transition, returning the typed error the HTTP
/// layer surfaces on refusal. No mutation happens before this check.
pub fn ensure_transition(
    kind: DocumentKind,
    from: DocumentState,
    to: DocumentState,
) -> Result<(), ServiceError> {
    if transition_allowed(kind, from, to) {
        Ok(())
    } else {
        Err(ServiceError::InvalidStateTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn draft_cannot_jump_to_posted() {
        let err = ensure_transition(
            DocumentKind::JournalEntry,
            DocumentState::Draft,
            DocumentState::Posted,
        )
        .unwrap_err();
        assert_matches!(err, ServiceError::InvalidStateTransition { from, to } => {
            assert_eq!(from, "draft");
            assert_eq!(to, "posted");
        });
    }

    #[test]
    fn effect_states_require_approval_first() {
        for kind in [
            DocumentKind::JournalEntry,
            DocumentKind::Invoice,
            DocumentKind::BankTransaction,
        ] {
            assert!(transition_allowed(
                kind,
                DocumentState::Approved,
                DocumentState::Posted
            ));
            assert!(!transition_allowed(
                kind,
                DocumentState::Submitted,
                DocumentState::Posted
            ));
        }
    }

    #[test]
    fn cancel_only_before_effects() {
        assert!(transition_allowed(
            DocumentKind::PurchaseOrder,
            DocumentState::PendingApproval,
            DocumentState::Cancelled
        ));
        assert!(!transition_allowed(
            DocumentKind::JournalEntry,
            DocumentState::Posted,
            DocumentState::Cancelled
        ));
        assert!(!transition_allowed(
            DocumentKind::Invoice,
            DocumentState::Paid,
            DocumentState::Cancelled
        ));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        use strum::IntoEnumIterator;
        for kind in DocumentKind::iter() {
            for target in DocumentState::iter() {
                assert!(
                    !transition_allowed(kind, DocumentState::Rejected, target),
                    "rejected must be terminal for {kind}"
                );
                assert!(
                    !transition_allowed(kind, DocumentState::Cancelled, target),
                    "cancelled must be terminal for {kind}"
                );
                assert!(
                    !transition_allowed(kind, DocumentState::Completed, target),
                    "completed must be terminal for {kind}"
                );
                assert!(
                    !transition_allowed(kind, DocumentState::Paid, target),
                    "paid must be terminal for {kind}"
                );
            }
        }
    }

    #[test]
    fn invoice_posted_may_still_be_paid() {
        assert!(transition_allowed(
            DocumentKind::Invoice,
            DocumentState::Posted,
            DocumentState::Paid
        ));
        assert!(!transition_allowed(
            DocumentKind::JournalEntry,
            DocumentState::Posted,
            DocumentState::Paid
        ));
    }

    #[test]
    fn work_order_runs_through_in_progress() {
        assert!(transition_allowed(
            DocumentKind::WorkOrder,
            DocumentState::Approved,
            DocumentState::InProgress
        ));
        assert!(transition_allowed(
            DocumentKind::WorkOrder,
            DocumentState::InProgress,
            DocumentState::Completed
        ));
        assert!(!transition_allowed(
            DocumentKind::WorkOrder,
            DocumentState::Approved,
            DocumentState::Completed
        ));
    }

    #[test]
    fn kind_round_trips_through_strings() {
        use std::str::FromStr;
        for kind in [
            DocumentKind::PurchaseOrder,
            DocumentKind::LeaveRequest,
            DocumentKind::PayrollPeriod,
        ] {
            let s = kind.to_string();
            assert_eq!(DocumentKind::from_str(&s).unwrap(), kind);
        }
    }
}
