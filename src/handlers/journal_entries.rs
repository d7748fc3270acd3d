use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{journal_entry, journal_entry_line};
use crate::errors::ServiceError;
use crate::services::journal_entries::CreateJournalEntry;
use crate::{ApiResponse, AppState};

use super::SubmitResponse;

#[derive(Debug, Serialize)]
pub struct JournalEntryResponse {
    #[serde(flatten)]
    pub entry: journal_entry::Model,
    pub lines: Vec<journal_entry_line::Model>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateJournalEntry>,
) -> Result<(StatusCode, Json<ApiResponse<journal_entry::Model>>), ServiceError> {
    let entry = state.services.journal_entries.create(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(entry))))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<JournalEntryResponse>>, ServiceError> {
    let (entry, lines) = state.services.journal_entries.get(id).await?;
    Ok(Json(ApiResponse::success(JournalEntryResponse {
        entry,
        lines,
    })))
}

pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SubmitResponse>>, ServiceError> {
    let outcome = state.services.journal_entries.submit(id).await?;
    Ok(Json(ApiResponse::success(outcome.into())))
}

pub async fn post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<journal_entry::Model>>, ServiceError> {
    let entry = state.services.journal_entries.post(id).await?;
    Ok(Json(ApiResponse::success(entry)))
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<journal_entry::Model>>, ServiceError> {
    let entry = state.services.journal_entries.cancel(id).await?;
    Ok(Json(ApiResponse::success(entry)))
}
