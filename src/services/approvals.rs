//! Approval routing: workflow selection by amount threshold, multi-level
//! advancement, and write-back of the final verdict onto the document.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    entities::approval_request::{ApprovalPriority, ApprovalStatus},
    entities::{approval_level, approval_request, approval_workflow},
    errors::ServiceError,
    events::{Event, EventSender},
    services::documents,
    workflow::{DocumentRef, DocumentState},
};

/// Result of routing a submitted document.
#[derive(Debug, Clone)]
pub enum RoutingOutcome {
    /// No active workflow covers the amount; the document goes straight to
    /// `approved` with no request row.
    AutoApproved,
    /// A workflow matched; the document waits at its first level.
    Routed(approval_request::Model),
}

/// Selects the applicable workflow and opens an approval request, if any.
///
/// Runs on the caller's transaction: the request row, the document status and
/// the submit side effects commit together.
pub async fn route<C: ConnectionTrait>(
    conn: &C,
    company_id: Uuid,
    document: DocumentRef,
    amount: Decimal,
) -> Result<RoutingOutcome, ServiceError> {
    let open_request = approval_request::Entity::find()
        .filter(approval_request::Column::DocumentKind.eq(document.kind))
        .filter(approval_request::Column::DocumentId.eq(document.id))
        .filter(approval_request::Column::Status.eq(ApprovalStatus::Pending))
        .one(conn)
        .await?;
    if open_request.is_some() {
        return Err(ServiceError::ApprovalAlreadyInProgress(document.id));
    }

    let workflows = approval_workflow::Entity::find()
        .filter(approval_workflow::Column::CompanyId.eq(company_id))
        .filter(approval_workflow::Column::DocumentKind.eq(document.kind))
        .filter(approval_workflow::Column::Active.eq(true))
        .order_by_asc(approval_workflow::Column::MinAmount)
        .all(conn)
        .await?;

    let Some(workflow) = workflows.into_iter().find(|w| w.covers(amount)) else {
        return Ok(RoutingOutcome::AutoApproved);
    };

    let first_level = approval_level::Entity::find()
        .filter(approval_level::Column::WorkflowId.eq(workflow.id))
        .order_by_asc(approval_level::Column::LevelNumber)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::InvalidOperation(format!(
                "Approval workflow '{}' has no levels configured",
                workflow.name
            ))
        })?;

    let request = approval_request::ActiveModel {
        id: Set(Uuid::new_v4()),
        company_id: Set(company_id),
        document_kind: Set(document.kind),
        document_id: Set(document.id),
        workflow_id: Set(workflow.id),
        current_level: Set(first_level.level_number),
        status: Set(ApprovalStatus::Pending),
        approver_id: Set(first_level.approver_id),
        amount: Set(amount),
        priority: Set(ApprovalPriority::from_amount(amount)),
        reason: Set(None),
        decided_by: Set(None),
        decided_at: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    }
    .insert(conn)
    .await?;

    Ok(RoutingOutcome::Routed(request))
}

/// Where a submitted document landed after routing.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub state: DocumentState,
    pub request: Option<approval_request::Model>,
}

/// Shared submit path: moves the document out of `draft`, routes it, and
/// applies the routing verdict (`approved` on auto-approval,
/// `pending_approval` when a workflow matched). One transaction, owned by
/// the caller.
pub async fn submit_document<C: ConnectionTrait>(
    conn: &C,
    company_id: Uuid,
    document: DocumentRef,
    amount: Decimal,
) -> Result<SubmitOutcome, ServiceError> {
    documents::transition(conn, document, DocumentState::Submitted).await?;

    match route(conn, company_id, document, amount).await? {
        RoutingOutcome::AutoApproved => {
            documents::transition(conn, document, DocumentState::Approved).await?;
            Ok(SubmitOutcome {
                state: DocumentState::Approved,
                request: None,
            })
        }
        RoutingOutcome::Routed(request) => {
            documents::transition(conn, document, DocumentState::PendingApproval).await?;
            Ok(SubmitOutcome {
                state: DocumentState::PendingApproval,
                request: Some(request),
            })
        }
    }
}

/// Closes the open request of a document being cancelled, if one exists.
/// Runs on the caller's transaction.
pub async fn cancel_open_request<C: ConnectionTrait>(
    conn: &C,
    document: DocumentRef,
) -> Result<(), ServiceError> {
    let open_request = approval_request::Entity::find()
        .filter(approval_request::Column::DocumentKind.eq(document.kind))
        .filter(approval_request::Column::DocumentId.eq(document.id))
        .filter(approval_request::Column::Status.eq(ApprovalStatus::Pending))
        .lock_exclusive()
        .one(conn)
        .await?;

    if let Some(request) = open_request {
        let mut active: approval_request::ActiveModel = request.into();
        active.status = Set(ApprovalStatus::Cancelled);
        active.decided_at = Set(Some(Utc::now()));
        active.updated_at = Set(Some(Utc::now()));
        active.update(conn).await?;
    }
    Ok(())
}

/// Verdict handed back by [`ApprovalService::approve`].
#[derive(Debug, Clone)]
pub enum ApprovalOutcome {
    /// More levels remain; the request stays pending at the next level.
    Advanced(approval_request::Model),
    /// The last level signed off; request and document are approved.
    Approved(approval_request::Model),
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, validator::Validate)]
pub struct CreateApprovalWorkflow {
    pub company_id: Uuid,
    pub document_kind: crate::workflow::DocumentKind,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub min_amount: Decimal,
    pub max_amount: Option<Decimal>,
    #[validate(length(min = 1, message = "At least one approval level is required"))]
    pub levels: Vec<ApprovalLevelInput>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ApprovalLevelInput {
    pub level_number: i32,
    pub approver_id: Uuid,
}

#[derive(Clone)]
pub struct ApprovalService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl ApprovalService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Creates an active workflow definition with its ordered levels.
    #[instrument(skip(self, input), fields(company_id = %input.company_id, kind = %input.document_kind))]
    pub async fn create_workflow(
        &self,
        input: CreateApprovalWorkflow,
    ) -> Result<approval_workflow::Model, ServiceError> {
        use validator::Validate;
        input.validate()?;

        if let Some(max) = input.max_amount {
            if max <= input.min_amount {
                return Err(ServiceError::ValidationError(
                    "max_amount must be greater than min_amount".into(),
                ));
            }
        }
        let mut level_numbers: Vec<i32> =
            input.levels.iter().map(|l| l.level_number).collect();
        level_numbers.sort_unstable();
        level_numbers.dedup();
        if level_numbers.len() != input.levels.len() {
            return Err(ServiceError::ValidationError(
                "level numbers must be unique".into(),
            ));
        }

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let workflow = approval_workflow::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            document_kind: Set(input.document_kind),
            name: Set(input.name.clone()),
            min_amount: Set(input.min_amount),
            max_amount: Set(input.max_amount),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(None),
        }
        .insert(&txn)
        .await?;

        for level in &input.levels {
            approval_level::ActiveModel {
                id: Set(Uuid::new_v4()),
                workflow_id: Set(workflow.id),
                level_number: Set(level.level_number),
                approver_id: Set(level.approver_id),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }
        txn.commit().await?;

        Ok(workflow)
    }

    pub async fn get_request(
        &self,
        request_id: Uuid,
    ) -> Result<approval_request::Model, ServiceError> {
        approval_request::Entity::find_by_id(request_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Approval request {request_id} not found"))
            })
    }

    pub async fn list_pending_for_approver(
        &self,
        approver_id: Uuid,
    ) -> Result<Vec<approval_request::Model>, ServiceError> {
        let requests = approval_request::Entity::find()
            .filter(approval_request::Column::ApproverId.eq(approver_id))
            .filter(approval_request::Column::Status.eq(ApprovalStatus::Pending))
            .order_by_asc(approval_request::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(requests)
    }

    /// Records one approver's sign-off. Advances the request to the next
    /// level, or approves request and document when the last level signs.
    #[instrument(skip(self), fields(request_id = %request_id, approver = %approver_id))]
    pub async fn approve(
        &self,
        request_id: Uuid,
        approver_id: Uuid,
    ) -> Result<ApprovalOutcome, ServiceError> {
        let txn = self.db.begin().await?;

        let request = approval_request::Entity::find_by_id(request_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Approval request {request_id} not found"))
            })?;

        if request.status != ApprovalStatus::Pending {
            return Err(ServiceError::RequestNotPending(request_id));
        }

        let document = DocumentRef::new(request.document_kind, request.document_id);

        let next_level = approval_level::Entity::find()
            .filter(approval_level::Column::WorkflowId.eq(request.workflow_id))
            .filter(approval_level::Column::LevelNumber.gt(request.current_level))
            .order_by_asc(approval_level::Column::LevelNumber)
            .one(&txn)
            .await?;

        let outcome = match next_level {
            Some(level) => {
                let mut active: approval_request::ActiveModel = request.into();
                active.current_level = Set(level.level_number);
                active.approver_id = Set(level.approver_id);
                active.updated_at = Set(Some(Utc::now()));
                let updated = active.update(&txn).await?;
                txn.commit().await?;

                self.event_sender
                    .send(Event::ApprovalAdvanced {
                        request_id,
                        level: level.level_number,
                        approver_id: level.approver_id,
                    })
                    .await
                    .map_err(ServiceError::EventError)?;

                info!(level = level.level_number, "approval advanced to next level");
                ApprovalOutcome::Advanced(updated)
            }
            None => {
                let mut active: approval_request::ActiveModel = request.into();
                active.status = Set(ApprovalStatus::Approved);
                active.decided_by = Set(Some(approver_id));
                active.decided_at = Set(Some(Utc::now()));
                active.updated_at = Set(Some(Utc::now()));
                let updated = active.update(&txn).await?;

                documents::transition(&txn, document, DocumentState::Approved).await?;
                txn.commit().await?;

                self.event_sender
                    .send(Event::DocumentApproved { document })
                    .await
                    .map_err(ServiceError::EventError)?;

                info!(%document, "document approved at final level");
                ApprovalOutcome::Approved(updated)
            }
        };

        Ok(outcome)
    }

    /// Rejects the request and the document immediately, regardless of level.
    #[instrument(skip(self, reason), fields(request_id = %request_id, approver = %approver_id))]
    pub async fn reject(
        &self,
        request_id: Uuid,
        approver_id: Uuid,
        reason: String,
    ) -> Result<approval_request::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let request = approval_request::Entity::find_by_id(request_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Approval request {request_id} not found"))
            })?;

        if request.status != ApprovalStatus::Pending {
            return Err(ServiceError::RequestNotPending(request_id));
        }

        let document = DocumentRef::new(request.document_kind, request.document_id);

        let mut active: approval_request::ActiveModel = request.into();
        active.status = Set(ApprovalStatus::Rejected);
        active.reason = Set(Some(reason.clone()));
        active.decided_by = Set(Some(approver_id));
        active.decided_at = Set(Some(Utc::now()));
        active.updated_at = Set(Some(Utc::now()));
        let updated = active.update(&txn).await?;

        documents::transition(&txn, document, DocumentState::Rejected).await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentRejected {
                document,
                reason: Some(reason),
            })
            .await
            .map_err(ServiceError::EventError)?;

        info!(%document, "document rejected");
        Ok(updated)
    }
}
