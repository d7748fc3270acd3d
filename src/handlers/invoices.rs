use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{invoice, invoice_line};
use crate::errors::ServiceError;
use crate::services::invoices::CreateInvoice;
use crate::{ApiResponse, AppState};

use super::SubmitResponse;

#[derive(Debug, Deserialize)]
pub struct SetPaymentRequest {
    pub paid_amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    #[serde(flatten)]
    pub invoice: invoice::Model,
    pub lines: Vec<invoice_line::Model>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateInvoice>,
) -> Result<(StatusCode, Json<ApiResponse<invoice::Model>>), ServiceError> {
    let inv = state.services.invoices.create(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(inv))))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InvoiceResponse>>, ServiceError> {
    let (inv, lines) = state.services.invoices.get(id).await?;
    Ok(Json(ApiResponse::success(InvoiceResponse {
        invoice: inv,
        lines,
    })))
}

pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SubmitResponse>>, ServiceError> {
    let outcome = state.services.invoices.submit(id).await?;
    Ok(Json(ApiResponse::success(outcome.into())))
}

pub async fn post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<invoice::Model>>, ServiceError> {
    let inv = state.services.invoices.post(id).await?;
    Ok(Json(ApiResponse::success(inv)))
}

/// Sets the cumulative paid amount on a posted invoice. Paying in full
/// moves the invoice to `paid`.
pub async fn set_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetPaymentRequest>,
) -> Result<Json<ApiResponse<invoice::Model>>, ServiceError> {
    let inv = state
        .services
        .invoices
        .set_payment(id, request.paid_amount)
        .await?;
    Ok(Json(ApiResponse::success(inv)))
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<invoice::Model>>, ServiceError> {
    let inv = state.services.invoices.cancel(id).await?;
    Ok(Json(ApiResponse::success(inv)))
}
