use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{approval_request, approval_workflow};
use crate::errors::ServiceError;
use crate::services::approvals::{ApprovalOutcome, CreateApprovalWorkflow};
use crate::{ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub struct ApproverQuery {
    pub approver_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub approver_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RejectionRequest {
    pub approver_id: Uuid,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub outcome: &'static str,
    pub request: approval_request::Model,
}

impl From<ApprovalOutcome> for DecisionResponse {
    fn from(outcome: ApprovalOutcome) -> Self {
        match outcome {
            ApprovalOutcome::Advanced(request) => Self {
                outcome: "advanced",
                request,
            },
            ApprovalOutcome::Approved(request) => Self {
                outcome: "approved",
                request,
            },
        }
    }
}

pub async fn create_workflow(
    State(state): State<AppState>,
    Json(request): Json<CreateApprovalWorkflow>,
) -> Result<(StatusCode, Json<ApiResponse<approval_workflow::Model>>), ServiceError> {
    let workflow = state.services.approvals.create_workflow(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(workflow))))
}

pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<approval_request::Model>>, ServiceError> {
    let request = state.services.approvals.get_request(id).await?;
    Ok(Json(ApiResponse::success(request)))
}

pub async fn list_pending(
    State(state): State<AppState>,
    Query(query): Query<ApproverQuery>,
) -> Result<Json<ApiResponse<Vec<approval_request::Model>>>, ServiceError> {
    let requests = state
        .services
        .approvals
        .list_pending_for_approver(query.approver_id)
        .await?;
    Ok(Json(ApiResponse::success(requests)))
}

pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<ApiResponse<DecisionResponse>>, ServiceError> {
    let outcome = state
        .services
        .approvals
        .approve(id, request.approver_id)
        .await?;
    Ok(Json(ApiResponse::success(outcome.into())))
}

pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RejectionRequest>,
) -> Result<Json<ApiResponse<approval_request::Model>>, ServiceError> {
    let rejected = state
        .services
        .approvals
        .reject(id, request.approver_id, request.reason)
        .await?;
    Ok(Json(ApiResponse::success(rejected)))
}
