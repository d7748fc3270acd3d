//! In-process domain event bus.
//!
//! Services emit events after their transaction commits; a background task
//! consumes and logs them. The bus is the seam where outbound notification
//! or export consumers would attach.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::workflow::DocumentRef;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    DocumentCreated {
        document: DocumentRef,
        number: String,
    },
    DocumentSubmitted {
        document: DocumentRef,
    },
    DocumentApproved {
        document: DocumentRef,
    },
    DocumentRejected {
        document: DocumentRef,
        reason: Option<String>,
    },
    DocumentCancelled {
        document: DocumentRef,
    },
    ApprovalRequested {
        document: DocumentRef,
        request_id: Uuid,
        approver_id: Uuid,
        level: i32,
    },
    ApprovalAdvanced {
        request_id: Uuid,
        level: i32,
        approver_id: Uuid,
    },
    JournalEntryPosted {
        journal_entry_id: Uuid,
        total_debit: Decimal,
    },
    InvoicePosted {
        invoice_id: Uuid,
        balance_amount: Decimal,
    },
    InvoicePaymentRecorded {
        invoice_id: Uuid,
        paid_amount: Decimal,
        balance_amount: Decimal,
    },
    BankTransactionPosted {
        bank_transaction_id: Uuid,
        amount: Decimal,
        new_balance: Decimal,
    },
    PayrollPeriodPaid {
        payroll_period_id: Uuid,
        net_total: Decimal,
    },
    WorkOrderStarted {
        work_order_id: Uuid,
    },
    WorkOrderCompleted {
        work_order_id: Uuid,
        quantity_produced: Decimal,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Convenience constructor for tests and embedded use: returns the sender
    /// plus the receiving half for the caller to drain.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {e}"))
    }
}

/// Drains the event channel, logging each event. Spawned once at startup.
pub async fn run_event_logger(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        info!(?event, "domain event");
    }
}
