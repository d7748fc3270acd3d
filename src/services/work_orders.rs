use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QuerySelect, TransactionTrait, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::work_order,
    errors::ServiceError,
    events::{Event, EventSender},
    services::{approvals, documents, sequences},
    workflow::{DocumentKind, DocumentRef, DocumentState},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateWorkOrder {
    pub company_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub item_code: String,
    pub quantity_planned: Decimal,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct WorkOrderService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl WorkOrderService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, input), fields(company_id = %input.company_id))]
    pub async fn create(&self, input: CreateWorkOrder) -> Result<work_order::Model, ServiceError> {
        input.validate()?;
        if input.quantity_planned <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "quantity_planned must be positive".into(),
            ));
        }

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let number =
            sequences::next_number(&txn, input.company_id, DocumentKind::WorkOrder, now).await?;

        let order = work_order::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            number: Set(number.clone()),
            status: Set(DocumentState::Draft),
            item_code: Set(input.item_code.clone()),
            quantity_planned: Set(input.quantity_planned),
            quantity_produced: Set(Decimal::ZERO),
            due_date: Set(input.due_date),
            started_at: Set(None),
            completed_at: Set(None),
            status_changed_at: Set(now),
            created_at: Set(now),
            updated_at: Set(None),
            version: Set(1),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentCreated {
                document: DocumentRef::new(DocumentKind::WorkOrder, order.id),
                number,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(order)
    }

    pub async fn get(&self, id: Uuid) -> Result<work_order::Model, ServiceError> {
        work_order::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Work order {id} not found")))
    }

    /// Submits the work order for approval routing on the planned quantity.
    /// With no workflows configured for this kind the router auto-approves.
    #[instrument(skip(self), fields(wo_id = %id))]
    pub async fn submit(&self, id: Uuid) -> Result<approvals::SubmitOutcome, ServiceError> {
        let txn = self.db.begin().await?;

        let order = work_order::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Work order {id} not found")))?;

        let document = DocumentRef::new(DocumentKind::WorkOrder, id);
        let outcome =
            approvals::submit_document(&txn, order.company_id, document, order.quantity_planned)
                .await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentSubmitted { document })
            .await
            .map_err(ServiceError::EventError)?;
        Ok(outcome)
    }

    #[instrument(skip(self), fields(wo_id = %id))]
    pub async fn start(&self, id: Uuid) -> Result<work_order::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let document = DocumentRef::new(DocumentKind::WorkOrder, id);
        documents::transition(&txn, document, DocumentState::InProgress).await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::WorkOrderStarted { work_order_id: id })
            .await
            .map_err(ServiceError::EventError)?;

        self.get(id).await
    }

    #[instrument(skip(self), fields(wo_id = %id, produced = %quantity_produced))]
    pub async fn complete(
        &self,
        id: Uuid,
        quantity_produced: Decimal,
    ) -> Result<work_order::Model, ServiceError> {
        if quantity_produced < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "quantity_produced must not be negative".into(),
            ));
        }

        let txn = self.db.begin().await?;
        let document = DocumentRef::new(DocumentKind::WorkOrder, id);
        documents::transition(&txn, document, DocumentState::Completed).await?;

        let order = work_order::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Work order {id} not found")))?;
        let mut active: work_order::ActiveModel = order.into();
        active.quantity_produced = Set(quantity_produced);
        active.updated_at = Set(Some(Utc::now()));
        active.update(&txn).await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::WorkOrderCompleted {
                work_order_id: id,
                quantity_produced,
            })
            .await
            .map_err(ServiceError::EventError)?;

        let order = self.get(id).await?;
        info!(wo_number = %order.number, "work order completed");
        Ok(order)
    }

    #[instrument(skip(self), fields(wo_id = %id))]
    pub async fn cancel(&self, id: Uuid) -> Result<work_order::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let document = DocumentRef::new(DocumentKind::WorkOrder, id);
        documents::transition(&txn, document, DocumentState::Cancelled).await?;
        approvals::cancel_open_request(&txn, document).await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentCancelled { document })
            .await
            .map_err(ServiceError::EventError)?;

        self.get(id).await
    }
}
