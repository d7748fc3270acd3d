use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::work_order;
use crate::errors::ServiceError;
use crate::services::work_orders::CreateWorkOrder;
use crate::{ApiResponse, AppState};

use super::SubmitResponse;

#[derive(Debug, Deserialize)]
pub struct CompleteWorkOrderRequest {
    pub quantity_produced: Decimal,
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateWorkOrder>,
) -> Result<(StatusCode, Json<ApiResponse<work_order::Model>>), ServiceError> {
    let wo = state.services.work_orders.create(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(wo))))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<work_order::Model>>, ServiceError> {
    let wo = state.services.work_orders.get(id).await?;
    Ok(Json(ApiResponse::success(wo)))
}

pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SubmitResponse>>, ServiceError> {
    let outcome = state.services.work_orders.submit(id).await?;
    Ok(Json(ApiResponse::success(outcome.into())))
}

pub async fn start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<work_order::Model>>, ServiceError> {
    let wo = state.services.work_orders.start(id).await?;
    Ok(Json(ApiResponse::success(wo)))
}

pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteWorkOrderRequest>,
) -> Result<Json<ApiResponse<work_order::Model>>, ServiceError> {
    let wo = state
        .services
        .work_orders
        .complete(id, request.quantity_produced)
        .await?;
    Ok(Json(ApiResponse::success(wo)))
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<work_order::Model>>, ServiceError> {
    let wo = state.services.work_orders.cancel(id).await?;
    Ok(Json(ApiResponse::success(wo)))
}
