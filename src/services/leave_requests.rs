use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::leave_request,
    errors::ServiceError,
    events::{Event, EventSender},
    services::{approvals, documents, sequences},
    workflow::{DocumentKind, DocumentRef, DocumentState},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLeaveRequest {
    pub company_id: Uuid,
    pub employee_id: Uuid,
    #[validate(length(min = 1, max = 50))]
    pub leave_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub days: Decimal,
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
}

#[derive(Clone)]
pub struct LeaveRequestService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl LeaveRequestService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, input), fields(company_id = %input.company_id))]
    pub async fn create(
        &self,
        input: CreateLeaveRequest,
    ) -> Result<leave_request::Model, ServiceError> {
        input.validate()?;
        if input.end_date < input.start_date {
            return Err(ServiceError::ValidationError(
                "end_date must not precede start_date".into(),
            ));
        }
        if input.days <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "days must be positive".into(),
            ));
        }

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let number = sequences::next_number(
            &txn,
            input.company_id,
            DocumentKind::LeaveRequest,
            input.start_date,
        )
        .await?;

        let request = leave_request::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            number: Set(number.clone()),
            employee_id: Set(input.employee_id),
            status: Set(DocumentState::Draft),
            leave_type: Set(input.leave_type.clone()),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            days: Set(input.days),
            reason: Set(input.reason.clone()),
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
                document: DocumentRef::new(DocumentKind::LeaveRequest, request.id),
                number,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(request)
    }

    pub async fn get(&self, id: Uuid) -> Result<leave_request::Model, ServiceError> {
        leave_request::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Leave request {id} not found")))
    }

    pub async fn list_by_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<leave_request::Model>, ServiceError> {
        let requests = leave_request::Entity::find()
            .filter(leave_request::Column::EmployeeId.eq(employee_id))
            .order_by_desc(leave_request::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(requests)
    }

    /// Submits for approval routing on the requested day count. Leave never
    /// touches balances, so `approved` is its terminal state.
    #[instrument(skip(self), fields(lv_id = %id))]
    pub async fn submit(&self, id: Uuid) -> Result<approvals::SubmitOutcome, ServiceError> {
        let txn = self.db.begin().await?;

        let request = leave_request::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Leave request {id} not found")))?;

        let document = DocumentRef::new(DocumentKind::LeaveRequest, id);
        let outcome =
            approvals::submit_document(&txn, request.company_id, document, request.days).await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentSubmitted { document })
            .await
            .map_err(ServiceError::EventError)?;
        Ok(outcome)
    }

    #[instrument(skip(self), fields(lv_id = %id))]
    pub async fn cancel(&self, id: Uuid) -> Result<leave_request::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let document = DocumentRef::new(DocumentKind::LeaveRequest, id);
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
