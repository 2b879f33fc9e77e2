//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps [`StoreError`] kinds to HTTP status codes and returns JSON error
//! bodies with a machine-readable code and a message. Internal error
//! details are logged, never returned.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use snipstore_storage::{ErrorKind, StoreError};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Snippet does not exist locally or on the playground (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed snippet id or unreadable request body (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Snippet body over the size ceiling (413).
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Map a body extraction failure, keeping the size-limit case distinct.
    pub fn from_body_rejection(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(rejection.body_text())
        } else {
            Self::BadRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err.kind() {
            ErrorKind::InvalidIdentifier => Self::BadRequest(err.to_string()),
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::TooLarge => Self::PayloadTooLarge(err.to_string()),
            ErrorKind::StorageFailure | ErrorKind::RemoteFailure => {
                Self::Internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipstore_core::{IdError, SnippetId};
    use snipstore_storage::{RemoteError, StorageError};
    use std::time::Duration;

    fn id() -> SnippetId {
        SnippetId::parse("D9L6MbPfE4").unwrap()
    }

    #[test]
    fn not_found_status_code() {
        let err = AppError::NotFound("missing snippet".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }

    #[test]
    fn bad_request_status_code() {
        let err = AppError::BadRequest("bad id".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "BAD_REQUEST");
    }

    #[test]
    fn payload_too_large_status_code() {
        let err = AppError::PayloadTooLarge("2 MiB".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(code, "PAYLOAD_TOO_LARGE");
    }

    #[test]
    fn internal_status_code() {
        let err = AppError::Internal("disk failed".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
    }

    #[test]
    fn store_errors_map_by_kind() {
        assert!(matches!(
            AppError::from(StoreError::InvalidId(IdError::Length { actual: 3 })),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::NotFound(id())),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::TooLarge { size: 2, limit: 1 }),
            AppError::PayloadTooLarge(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Storage(StorageError::Backend("x".into()))),
            AppError::Internal(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Remote {
                id: id(),
                source: RemoteError::Other("x".into()),
            }),
            AppError::Internal(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::RemoteTimeout {
                id: id(),
                deadline: Duration::from_secs(1),
            }),
            AppError::Internal(_)
        ));
    }

    #[test]
    fn invalid_id_message_reaches_client() {
        let err = AppError::from(StoreError::InvalidId(IdError::UnexpectedChar('?')));
        assert_eq!(
            err.to_string(),
            "bad request: invalid snippet id: id contains unexpected character '?'"
        );
    }

    #[test]
    fn internal_error_hides_details() {
        let err = AppError::Internal("secret path /srv/snippets".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
