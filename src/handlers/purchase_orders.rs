use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{purchase_order, purchase_order_line};
use crate::errors::ServiceError;
use crate::services::purchase_orders::{CreatePurchaseOrder, PurchaseOrderLineInput};
use crate::{ApiResponse, AppState};

use super::SubmitResponse;

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    pub company_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceLinesRequest {
    pub lines: Vec<PurchaseOrderLineInput>,
}

#[derive(Debug, serde::Serialize)]
pub struct PurchaseOrderResponse {
    #[serde(flatten)]
    pub order: purchase_order::Model,
    pub lines: Vec<purchase_order_line::Model>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreatePurchaseOrder>,
) -> Result<(StatusCode, Json<ApiResponse<purchase_order::Model>>), ServiceError> {
    let order = state.services.purchase_orders.create(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(order))))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PurchaseOrderResponse>>, ServiceError> {
    let (order, lines) = state.services.purchase_orders.get(id).await?;
    Ok(Json(ApiResponse::success(PurchaseOrderResponse {
        order,
        lines,
    })))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<ApiResponse<Vec<purchase_order::Model>>>, ServiceError> {
    let orders = state
        .services
        .purchase_orders
        .list_by_company(query.company_id)
        .await?;
    Ok(Json(ApiResponse::success(orders)))
}

pub async fn replace_lines(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReplaceLinesRequest>,
) -> Result<Json<ApiResponse<purchase_order::Model>>, ServiceError> {
    let order = state
        .services
        .purchase_orders
        .replace_lines(id, request.lines)
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SubmitResponse>>, ServiceError> {
    let outcome = state.services.purchase_orders.submit(id).await?;
    Ok(Json(ApiResponse::success(outcome.into())))
}

pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<purchase_order::Model>>, ServiceError> {
    let order = state.services.purchase_orders.complete(id).await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<purchase_order::Model>>, ServiceError> {
    let order = state.services.purchase_orders.cancel(id).await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    state.services.purchase_orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
