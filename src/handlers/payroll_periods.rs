use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::entities::payroll_period;
use crate::errors::ServiceError;
use crate::services::payroll_periods::CreatePayrollPeriod;
use crate::{ApiResponse, AppState};

use super::SubmitResponse;

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreatePayrollPeriod>,
) -> Result<(StatusCode, Json<ApiResponse<payroll_period::Model>>), ServiceError> {
    let period = state.services.payroll_periods.create(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(period))))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<payroll_period::Model>>, ServiceError> {
    let period = state.services.payroll_periods.get(id).await?;
    Ok(Json(ApiResponse::success(period)))
}

pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SubmitResponse>>, ServiceError> {
    let outcome = state.services.payroll_periods.submit(id).await?;
    Ok(Json(ApiResponse::success(outcome.into())))
}

pub async fn pay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<payroll_period::Model>>, ServiceError> {
    let period = state.services.payroll_periods.pay(id).await?;
    Ok(Json(ApiResponse::success(period)))
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<payroll_period::Model>>, ServiceError> {
    let period = state.services.payroll_periods.cancel(id).await?;
    Ok(Json(ApiResponse::success(period)))
}
