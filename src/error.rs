//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    #[error("Transfer not found: {0}")]
    TransferNotFound(i64),

    #[error("Entry not found: {0}")]
    EntryNotFound(i64),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Store errors: mostly 5xx, a few are the caller's fault
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::UserNotFound(_) => (StatusCode::NOT_FOUND, "user_not_found"),
            AppError::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found"),
            AppError::TransferNotFound(_) => (StatusCode::NOT_FOUND, "transfer_not_found"),
            AppError::EntryNotFound(_) => (StatusCode::NOT_FOUND, "entry_not_found"),
            AppError::AlreadyExists(_) => (StatusCode::CONFLICT, "already_exists"),

            AppError::Domain(domain_err) => match domain_err {
                DomainError::InvalidAmount(_) => (StatusCode::BAD_REQUEST, "invalid_amount"),
                DomainError::UnsupportedCurrency(_) => {
                    (StatusCode::BAD_REQUEST, "unsupported_currency")
                }
                DomainError::SameAccountTransfer => {
                    (StatusCode::BAD_REQUEST, "same_account_transfer")
                }
                DomainError::CurrencyMismatch { .. } => {
                    (StatusCode::BAD_REQUEST, "currency_mismatch")
                }
                DomainError::InvalidPage(_) => (StatusCode::BAD_REQUEST, "invalid_page"),
            },

            AppError::Store(store_err) => match store_err {
                StoreError::InsufficientFunds { .. } => {
                    (StatusCode::BAD_REQUEST, "insufficient_funds")
                }
                StoreError::InvalidAmount(_) => (StatusCode::BAD_REQUEST, "invalid_amount"),
                StoreError::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found"),
                e if e.is_retryable() => (StatusCode::CONFLICT, "transaction_conflict"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            },

        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let details = match &self {
            AppError::Domain(e) => Some(e.to_string()),
            AppError::Store(e) if status.is_client_error() => Some(e.to_string()),
            _ => None,
        };

        // Server-side failures are logged in full and hidden from the client
        let error = if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
