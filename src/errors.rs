use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured error body returned by every handler.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Conflict")
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// Additional detail (validation field errors, state names)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(
        #[from]
        #[serde(skip)]
        DbErr,
    ),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid state transition from '{from}' to '{to}'")]
    InvalidStateTransition { from: String, to: String },

    #[error("Unbalanced entry: debits {debits} do not equal credits {credits}")]
    UnbalancedEntry { debits: Decimal, credits: Decimal },

    #[error("Approval already in progress for document {0}")]
    ApprovalAlreadyInProgress(Uuid),

    #[error("Approval request {0} is not pending")]
    RequestNotPending(Uuid),

    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Event error: {0}")]
    EventError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Other error: {0}")]
    Other(
        #[from]
        #[serde(skip)]
        anyhow::Error,
    ),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl From<sea_orm::TransactionError<ServiceError>> for ServiceError {
    fn from(err: sea_orm::TransactionError<ServiceError>) -> Self {
        match err {
            sea_orm::TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
            sea_orm::TransactionError::Transaction(service_err) => service_err,
        }
    }
}

impl ServiceError {
    /// Single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidStateTransition { .. } | Self::InvalidOperation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::UnbalancedEntry { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ApprovalAlreadyInProgress(_)
            | Self::RequestNotPending(_)
            | Self::ConcurrencyConflict(_) => StatusCode::CONFLICT,
            Self::DatabaseError(_)
            | Self::EventError(_)
            | Self::InternalError(_)
            | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message suitable for HTTP responses. Internal errors return generic
    /// messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::EventError(_) | Self::InternalError(_) | Self::Other(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }

    fn response_details(&self) -> Option<String> {
        match self {
            Self::InvalidStateTransition { from, to } => {
                Some(format!("current_state={from} requested_state={to}"))
            }
            Self::UnbalancedEntry { debits, credits } => {
                Some(format!("debits={debits} credits={credits}"))
            }
            Self::ConcurrencyConflict(_) => Some("safe to retry".to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = ErrorResponse {
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            message: self.response_message(),
            details: self.response_details(),
            timestamp: Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn state_transition_maps_to_unprocessable() {
        let err = ServiceError::InvalidStateTransition {
            from: "draft".into(),
            to: "posted".into(),
        };
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.to_string().contains("draft"));
        assert!(err.to_string().contains("posted"));
    }

    #[test]
    fn unbalanced_entry_names_both_sides() {
        let err = ServiceError::UnbalancedEntry {
            debits: dec!(100.00),
            credits: dec!(90.00),
        };
        assert!(err.to_string().contains("100.00"));
        assert!(err.to_string().contains("90.00"));
    }

    #[test]
    fn conflict_family_maps_to_409() {
        let id = Uuid::new_v4();
        assert_eq!(
            ServiceError::ApprovalAlreadyInProgress(id).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::RequestNotPending(id).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::ConcurrencyConflict("stale counter".into()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn database_errors_do_not_leak() {
        let err = ServiceError::DatabaseError(DbErr::Custom("secret dsn".into()));
        assert_eq!(err.response_message(), "Database error");
    }
}
