use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{invoice, invoice_line},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{approvals, documents, ledger, sequences, totals},
    workflow::{DocumentKind, DocumentRef, DocumentState},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInvoice {
    pub company_id: Uuid,
    pub customer_id: Uuid,
    #[validate(length(min = 3, max = 3, message = "Currency must be a 3-letter code"))]
    pub currency: String,
    pub due_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "At least one line is required"))]
    pub lines: Vec<InvoiceLineInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InvoiceLineInput {
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[serde(flatten)]
    pub amounts: totals::LineInput,
}

#[derive(Clone)]
pub struct InvoiceService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl InvoiceService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, input), fields(company_id = %input.company_id))]
    pub async fn create(&self, input: CreateInvoice) -> Result<invoice::Model, ServiceError> {
        input.validate()?;
        let amounts: Vec<_> = input.lines.iter().map(|l| l.amounts.clone()).collect();
        let (per_line, agg) = totals::compute(&amounts)?;

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let number =
            sequences::next_number(&txn, input.company_id, DocumentKind::Invoice, now).await?;

        let inv = invoice::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            number: Set(number.clone()),
            customer_id: Set(input.customer_id),
            status: Set(DocumentState::Draft),
            currency: Set(input.currency.clone()),
            subtotal: Set(agg.subtotal),
            discount_total: Set(agg.discount_total),
            tax_total: Set(agg.tax_total),
            total_amount: Set(agg.grand_total),
            paid_amount: Set(Decimal::ZERO),
            balance_amount: Set(Decimal::ZERO),
            due_date: Set(input.due_date),
            status_changed_at: Set(now),
            created_at: Set(now),
            updated_at: Set(None),
            version: Set(1),
        }
        .insert(&txn)
        .await?;

        for (line, line_totals) in input.lines.iter().zip(&per_line) {
            invoice_line::ActiveModel {
                id: Set(Uuid::new_v4()),
                invoice_id: Set(inv.id),
                description: Set(line.description.clone()),
                quantity: Set(line.amounts.quantity),
                unit_price: Set(line.amounts.unit_price),
                discount_pct: Set(line.amounts.discount_pct),
                tax_pct: Set(line.amounts.tax_pct),
                line_total: Set(line_totals.total),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentCreated {
                document: DocumentRef::new(DocumentKind::Invoice, inv.id),
                number,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(inv)
    }

    pub async fn get(
        &self,
        id: Uuid,
    ) -> Result<(invoice::Model, Vec<invoice_line::Model>), ServiceError> {
        let inv = invoice::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Invoice {id} not found")))?;
        let lines = inv
            .find_related(invoice_line::Entity)
            .order_by_asc(invoice_line::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok((inv, lines))
    }

    /// Submits the invoice for approval routing on its total.
    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn submit(&self, id: Uuid) -> Result<approvals::SubmitOutcome, ServiceError> {
        let txn = self.db.begin().await?;

        let inv = invoice::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Invoice {id} not found")))?;

        let document = DocumentRef::new(DocumentKind::Invoice, id);
        let outcome =
            approvals::submit_document(&txn, inv.company_id, document, inv.total_amount).await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentSubmitted { document })
            .await
            .map_err(ServiceError::EventError)?;
        Ok(outcome)
    }

    /// Posts an approved invoice, opening its outstanding balance.
    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn post(&self, id: Uuid) -> Result<invoice::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let document = DocumentRef::new(DocumentKind::Invoice, id);
        documents::transition(&txn, document, DocumentState::Posted).await?;

        let inv = invoice::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Invoice {id} not found")))?;

        let total = inv.total_amount;
        let mut active: invoice::ActiveModel = inv.into();
        active.paid_amount = Set(Decimal::ZERO);
        active.balance_amount = Set(total);
        active.updated_at = Set(Some(Utc::now()));
        active.update(&txn).await?;

        txn.commit().await?;

        self.event_sender
            .send(Event::InvoicePosted {
                invoice_id: id,
                balance_amount: total,
            })
            .await
            .map_err(ServiceError::EventError)?;

        let (inv, _) = self.get(id).await?;
        info!(invoice_number = %inv.number, balance = %inv.balance_amount, "invoice posted");
        Ok(inv)
    }

    /// Sets the cumulative paid amount on a posted invoice.
    ///
    /// The old paid amount is reversed and the new one applied; the balance
    /// is never patched with the difference of the two. A fully paid invoice
    /// transitions to `paid`.
    #[instrument(skip(self), fields(invoice_id = %id, new_paid = %new_paid_amount))]
    pub async fn set_payment(
        &self,
        id: Uuid,
        new_paid_amount: Decimal,
    ) -> Result<invoice::Model, ServiceError> {
        if new_paid_amount < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "paid_amount must not be negative".into(),
            ));
        }

        let txn = self.db.begin().await?;

        let inv = invoice::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Invoice {id} not found")))?;

        if inv.status != DocumentState::Posted {
            return Err(ServiceError::InvalidOperation(format!(
                "Payments can only be recorded on a posted invoice (invoice {} is '{}')",
                inv.number, inv.status
            )));
        }
        if new_paid_amount > inv.total_amount {
            return Err(ServiceError::ValidationError(format!(
                "paid_amount {} exceeds invoice total {}",
                new_paid_amount, inv.total_amount
            )));
        }

        let old_paid = inv.paid_amount;
        let total = inv.total_amount;

        let mut active: invoice::ActiveModel = inv.into();
        active.paid_amount = Set(new_paid_amount);
        active.updated_at = Set(Some(Utc::now()));
        active.update(&txn).await?;

        // A payment reduces the outstanding balance, so the applied delta is
        // negative; editing reverses the old payment before applying the new.
        ledger::reverse(&txn, ledger::BalanceTarget::InvoiceBalance(id), -old_paid).await?;
        let balance = ledger::apply(
            &txn,
            ledger::BalanceTarget::InvoiceBalance(id),
            -new_paid_amount,
        )
        .await?;

        let document = DocumentRef::new(DocumentKind::Invoice, id);
        if balance.is_zero() && new_paid_amount == total {
            documents::transition(&txn, document, DocumentState::Paid).await?;
        }

        txn.commit().await?;

        self.event_sender
            .send(Event::InvoicePaymentRecorded {
                invoice_id: id,
                paid_amount: new_paid_amount,
                balance_amount: balance,
            })
            .await
            .map_err(ServiceError::EventError)?;

        let (inv, _) = self.get(id).await?;
        Ok(inv)
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn cancel(&self, id: Uuid) -> Result<invoice::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let document = DocumentRef::new(DocumentKind::Invoice, id);
        documents::transition(&txn, document, DocumentState::Cancelled).await?;
        approvals::cancel_open_request(&txn, document).await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentCancelled { document })
            .await
            .map_err(ServiceError::EventError)?;

        let (inv, _) = self.get(id).await?;
        Ok(inv)
    }
}
