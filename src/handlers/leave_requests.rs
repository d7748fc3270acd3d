use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::leave_request;
use crate::errors::ServiceError;
use crate::services::leave_requests::CreateLeaveRequest;
use crate::{ApiResponse, AppState};

use super::SubmitResponse;

#[derive(Debug, Deserialize)]
pub struct EmployeeQuery {
    pub employee_id: Uuid,
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateLeaveRequest>,
) -> Result<(StatusCode, Json<ApiResponse<leave_request::Model>>), ServiceError> {
    let lv = state.services.leave_requests.create(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(lv))))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<leave_request::Model>>, ServiceError> {
    let lv = state.services.leave_requests.get(id).await?;
    Ok(Json(ApiResponse::success(lv)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EmployeeQuery>,
) -> Result<Json<ApiResponse<Vec<leave_request::Model>>>, ServiceError> {
    let requests = state
        .services
        .leave_requests
        .list_by_employee(query.employee_id)
        .await?;
    Ok(Json(ApiResponse::success(requests)))
}

pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SubmitResponse>>, ServiceError> {
    let outcome = state.services.leave_requests.submit(id).await?;
    Ok(Json(ApiResponse::success(outcome.into())))
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<leave_request::Model>>, ServiceError> {
    let lv = state.services.leave_requests.cancel(id).await?;
    Ok(Json(ApiResponse::success(lv)))
}
