use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::bank_transaction;
use crate::errors::ServiceError;
use crate::services::bank_transactions::CreateBankTransaction;
use crate::{ApiResponse, AppState};

use super::SubmitResponse;

#[derive(Debug, Deserialize)]
pub struct UpdateAmountRequest {
    pub amount: Decimal,
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateBankTransaction>,
) -> Result<(StatusCode, Json<ApiResponse<bank_transaction::Model>>), ServiceError> {
    let bt = state.services.bank_transactions.create(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(bt))))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<bank_transaction::Model>>, ServiceError> {
    let bt = state.services.bank_transactions.get(id).await?;
    Ok(Json(ApiResponse::success(bt)))
}

pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SubmitResponse>>, ServiceError> {
    let outcome = state.services.bank_transactions.submit(id).await?;
    Ok(Json(ApiResponse::success(outcome.into())))
}

pub async fn post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<bank_transaction::Model>>, ServiceError> {
    let bt = state.services.bank_transactions.post(id).await?;
    Ok(Json(ApiResponse::success(bt)))
}

pub async fn update_amount(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAmountRequest>,
) -> Result<Json<ApiResponse<bank_transaction::Model>>, ServiceError> {
    let bt = state
        .services
        .bank_transactions
        .update_amount(id, request.amount)
        .await?;
    Ok(Json(ApiResponse::success(bt)))
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<bank_transaction::Model>>, ServiceError> {
    let bt = state.services.bank_transactions.cancel(id).await?;
    Ok(Json(ApiResponse::success(bt)))
}
