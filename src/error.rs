//! Application error type shared by every layer.
//!
//! Each variant carries a human-readable message and a JSON `details` payload.
//! Converting an [`AppError`] into an HTTP response produces:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short link not found", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors raised while shortening, storing or resolving links.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed request payload or empty required field.
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    /// A mapping with the same token already exists.
    #[error("{message}")]
    DuplicateKey { message: String, details: Value },

    /// No mapping exists for the requested token.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// I/O, connection or schema failure in the backing store.
    #[error("{message}")]
    Storage { message: String, details: Value },

    /// The operating system entropy source failed.
    #[error("{message}")]
    Entropy { message: String, details: Value },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_key(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateKey {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }

    pub fn entropy(message: impl Into<String>, details: Value) -> Self {
        Self::Entropy {
            message: message.into(),
            details,
        }
    }

    /// HTTP status associated with this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::DuplicateKey { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Storage { .. } | AppError::Entropy { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code used in the JSON error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput { .. } => "invalid_input",
            AppError::DuplicateKey { .. } => "duplicate_key",
            AppError::NotFound { .. } => "not_found",
            AppError::Storage { .. } => "storage_error",
            AppError::Entropy { .. } => "entropy_failure",
        }
    }

    /// Returns true for errors caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Consumes the error and produces its serializable form.
    pub fn to_error_info(self) -> ErrorInfo {
        let code = self.code();
        let (message, details) = match self {
            AppError::InvalidInput { message, details }
            | AppError::DuplicateKey { message, details }
            | AppError::NotFound { message, details }
            | AppError::Storage { message, details }
            | AppError::Entropy { message, details } => (message, details),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_client_error() {
            tracing::debug!(code = self.code(), "{}", self);
        } else {
            tracing::error!(code = self.code(), "{}", self);
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation(&e) {
            return AppError::duplicate_key("Token already exists", json!({}));
        }

        match e {
            sqlx::Error::RowNotFound => AppError::not_found("Short link not found", json!({})),
            other => AppError::storage("Database error", json!({ "reason": other.to_string() })),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::invalid_input("Invalid request", json!({ "reason": e.to_string() }))
    }
}

/// SQLite extended result codes for PRIMARY KEY and UNIQUE constraint failures.
const SQLITE_CONSTRAINT_CODES: &[&str] = &["1555", "2067"];

/// Returns true if the error is a primary-key or unique constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation()
        || db_err
            .code()
            .is_some_and(|code| SQLITE_CONSTRAINT_CODES.contains(&&*code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid_input("bad", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::duplicate_key("dup", json!({})).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::not_found("missing", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::storage("db", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::entropy("rng", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::invalid_input("", json!({})).code(), "invalid_input");
        assert_eq!(AppError::duplicate_key("", json!({})).code(), "duplicate_key");
        assert_eq!(AppError::not_found("", json!({})).code(), "not_found");
        assert_eq!(AppError::storage("", json!({})).code(), "storage_error");
        assert_eq!(AppError::entropy("", json!({})).code(), "entropy_failure");
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::not_found("Short link not found", json!({ "token": "abc" }));
        assert_eq!(err.to_string(), "Short link not found");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(AppError::invalid_input("", json!({})).is_client_error());
        assert!(AppError::not_found("", json!({})).is_client_error());
        assert!(!AppError::storage("", json!({})).is_client_error());
        assert!(!AppError::entropy("", json!({})).is_client_error());
    }

    #[test]
    fn test_to_error_info_keeps_details() {
        let info = AppError::invalid_input("Invalid request", json!({ "field": "long_url" }))
            .to_error_info();

        assert_eq!(info.code, "invalid_input");
        assert_eq!(info.message, "Invalid request");
        assert_eq!(info.details["field"], "long_url");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn test_pool_closed_maps_to_storage() {
        let err: AppError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, AppError::Storage { .. }));
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::not_found("missing", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
