use std::sync::Arc;

use chrono::Utc;
use lazy_static::lazy_static;
use prometheus::IntCounter;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, TransactionTrait, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{purchase_order, purchase_order_line},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{approvals, documents, sequences, totals},
    workflow::{DocumentKind, DocumentRef, DocumentState},
};

lazy_static! {
    static ref PO_CREATIONS: IntCounter = IntCounter::new(
        "purchase_order_creations_total",
        "Total number of purchase orders created"
    )
    .expect("metric can be created");
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePurchaseOrder {
    pub company_id: Uuid,
    pub supplier_id: Uuid,
    #[validate(length(min = 3, max = 3, message = "Currency must be a 3-letter code"))]
    pub currency: String,
    #[validate(length(min = 1, message = "At least one line is required"))]
    pub lines: Vec<PurchaseOrderLineInput>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PurchaseOrderLineInput {
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[serde(flatten)]
    pub amounts: totals::LineInput,
}

#[derive(Clone)]
pub struct PurchaseOrderService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl PurchaseOrderService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Creates a draft purchase order with its lines and computed totals.
    #[instrument(skip(self, input), fields(company_id = %input.company_id))]
    pub async fn create(
        &self,
        input: CreatePurchaseOrder,
    ) -> Result<purchase_order::Model, ServiceError> {
        input.validate()?;
        let amounts: Vec<_> = input.lines.iter().map(|l| l.amounts.clone()).collect();
        let (per_line, agg) = totals::compute(&amounts)?;

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let number =
            sequences::next_number(&txn, input.company_id, DocumentKind::PurchaseOrder, now)
                .await?;

        let order = purchase_order::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            number: Set(number.clone()),
            supplier_id: Set(input.supplier_id),
            status: Set(DocumentState::Draft),
            currency: Set(input.currency.clone()),
            subtotal: Set(agg.subtotal),
            discount_total: Set(agg.discount_total),
            tax_total: Set(agg.tax_total),
            total_amount: Set(agg.grand_total),
            order_date: Set(now),
            notes: Set(input.notes.clone()),
            status_changed_at: Set(now),
            created_at: Set(now),
            updated_at: Set(None),
            version: Set(1),
        }
        .insert(&txn)
        .await?;

        insert_lines(&txn, order.id, &input.lines, &per_line).await?;
        txn.commit().await?;

        PO_CREATIONS.inc();
        self.event_sender
            .send(Event::DocumentCreated {
                document: DocumentRef::new(DocumentKind::PurchaseOrder, order.id),
                number,
            })
            .await
            .map_err(ServiceError::EventError)?;

        info!(po_number = %order.number, total = %order.total_amount, "purchase order created");
        Ok(order)
    }

    pub async fn get(
        &self,
        id: Uuid,
    ) -> Result<(purchase_order::Model, Vec<purchase_order_line::Model>), ServiceError> {
        let order = purchase_order::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {id} not found")))?;
        let lines = order
            .find_related(purchase_order_line::Entity)
            .order_by_asc(purchase_order_line::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok((order, lines))
    }

    pub async fn list_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<purchase_order::Model>, ServiceError> {
        let orders = purchase_order::Entity::find()
            .filter(purchase_order::Column::CompanyId.eq(company_id))
            .order_by_desc(purchase_order::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(orders)
    }

    /// Replaces the full line set of a draft order and recomputes totals.
    /// Lines are never diffed; header totals are never patched incrementally.
    #[instrument(skip(self, lines), fields(po_id = %id))]
    pub async fn replace_lines(
        &self,
        id: Uuid,
        lines: Vec<PurchaseOrderLineInput>,
    ) -> Result<purchase_order::Model, ServiceError> {
        if lines.is_empty() {
            return Err(ServiceError::ValidationError(
                "At least one line is required".into(),
            ));
        }
        let amounts: Vec<_> = lines.iter().map(|l| l.amounts.clone()).collect();
        let (per_line, agg) = totals::compute(&amounts)?;

        let txn = self.db.begin().await?;

        let order = purchase_order::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {id} not found")))?;

        if !order.status.is_editable() {
            return Err(ServiceError::InvalidOperation(format!(
                "Purchase order {} is not editable in state '{}'",
                order.number, order.status
            )));
        }

        purchase_order_line::Entity::delete_many()
            .filter(purchase_order_line::Column::PurchaseOrderId.eq(id))
            .exec(&txn)
            .await?;
        insert_lines(&txn, id, &lines, &per_line).await?;

        let version = order.version;
        let mut active: purchase_order::ActiveModel = order.into();
        active.subtotal = Set(agg.subtotal);
        active.discount_total = Set(agg.discount_total);
        active.tax_total = Set(agg.tax_total);
        active.total_amount = Set(agg.grand_total);
        active.updated_at = Set(Some(Utc::now()));
        active.version = Set(version + 1);
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Submits the draft for approval routing on its total amount.
    #[instrument(skip(self), fields(po_id = %id))]
    pub async fn submit(&self, id: Uuid) -> Result<approvals::SubmitOutcome, ServiceError> {
        let txn = self.db.begin().await?;

        let order = purchase_order::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {id} not found")))?;

        let document = DocumentRef::new(DocumentKind::PurchaseOrder, id);
        let outcome =
            approvals::submit_document(&txn, order.company_id, document, order.total_amount)
                .await?;
        txn.commit().await?;

        self.notify_submission(document, &outcome).await?;
        Ok(outcome)
    }

    /// Marks an approved order received, completing it.
    #[instrument(skip(self), fields(po_id = %id))]
    pub async fn complete(&self, id: Uuid) -> Result<purchase_order::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let document = DocumentRef::new(DocumentKind::PurchaseOrder, id);
        documents::transition(&txn, document, DocumentState::Completed).await?;
        txn.commit().await?;

        let (order, _) = self.get(id).await?;
        info!(po_number = %order.number, "purchase order completed");
        Ok(order)
    }

    #[instrument(skip(self), fields(po_id = %id))]
    pub async fn cancel(&self, id: Uuid) -> Result<purchase_order::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let document = DocumentRef::new(DocumentKind::PurchaseOrder, id);
        documents::transition(&txn, document, DocumentState::Cancelled).await?;
        approvals::cancel_open_request(&txn, document).await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentCancelled { document })
            .await
            .map_err(ServiceError::EventError)?;

        let (order, _) = self.get(id).await?;
        Ok(order)
    }

    /// Deletes a draft order and its lines. Anything past draft is refused;
    /// posted documents must be reversed, not erased.
    #[instrument(skip(self), fields(po_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        let order = purchase_order::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {id} not found")))?;

        if order.status != DocumentState::Draft {
            return Err(ServiceError::InvalidOperation(format!(
                "Purchase order {} cannot be deleted in state '{}'",
                order.number, order.status
            )));
        }

        purchase_order_line::Entity::delete_many()
            .filter(purchase_order_line::Column::PurchaseOrderId.eq(id))
            .exec(&txn)
            .await?;
        purchase_order::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn notify_submission(
        &self,
        document: DocumentRef,
        outcome: &approvals::SubmitOutcome,
    ) -> Result<(), ServiceError> {
        self.event_sender
            .send(Event::DocumentSubmitted { document })
            .await
            .map_err(ServiceError::EventError)?;

        match &outcome.request {
            Some(request) => self
                .event_sender
                .send(Event::ApprovalRequested {
                    document,
                    request_id: request.id,
                    approver_id: request.approver_id,
                    level: request.current_level,
                })
                .await
                .map_err(ServiceError::EventError),
            None => self
                .event_sender
                .send(Event::DocumentApproved { document })
                .await
                .map_err(ServiceError::EventError),
        }
    }
}

async fn insert_lines(
    txn: &DatabaseTransaction,
    order_id: Uuid,
    lines: &[PurchaseOrderLineInput],
    per_line: &[totals::LineTotals],
) -> Result<(), ServiceError> {
    for (line, line_totals) in lines.iter().zip(per_line) {
        purchase_order_line::ActiveModel {
            id: Set(Uuid::new_v4()),
            purchase_order_id: Set(order_id),
            description: Set(line.description.clone()),
            quantity: Set(line.amounts.quantity),
            unit_price: Set(line.amounts.unit_price),
            discount_pct: Set(line.amounts.discount_pct),
            tax_pct: Set(line.amounts.tax_pct),
            line_total: Set(line_totals.total),
            created_at: Set(Utc::now()),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}
