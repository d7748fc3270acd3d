use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{bank_account, ledger_account};
use crate::errors::ServiceError;
use crate::services::accounts::{CreateBankAccount, CreateLedgerAccount};
use crate::{ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    pub company_id: Uuid,
}

pub async fn create_ledger_account(
    State(state): State<AppState>,
    Json(request): Json<CreateLedgerAccount>,
) -> Result<(StatusCode, Json<ApiResponse<ledger_account::Model>>), ServiceError> {
    let account = state.services.accounts.create_ledger_account(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(account))))
}

pub async fn get_ledger_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ledger_account::Model>>, ServiceError> {
    let account = state.services.accounts.get_ledger_account(id).await?;
    Ok(Json(ApiResponse::success(account)))
}

pub async fn list_ledger_accounts(
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<ApiResponse<Vec<ledger_account::Model>>>, ServiceError> {
    let accounts = state
        .services
        .accounts
        .list_ledger_accounts(query.company_id)
        .await?;
    Ok(Json(ApiResponse::success(accounts)))
}

pub async fn create_bank_account(
    State(state): State<AppState>,
    Json(request): Json<CreateBankAccount>,
) -> Result<(StatusCode, Json<ApiResponse<bank_account::Model>>), ServiceError> {
    let account = state.services.accounts.create_bank_account(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(account))))
}

pub async fn get_bank_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<bank_account::Model>>, ServiceError> {
    let account = state.services.accounts.get_bank_account(id).await?;
    Ok(Json(ApiResponse::success(account)))
}
