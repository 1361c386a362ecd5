//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Ritmo API                          │
//! │                                                                         │
//! │  Client                      Rust Backend                               │
//! │  ──────                      ────────────                               │
//! │                                                                         │
//! │  POST /offers                                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler                                                         │  │
//! │  │  Result<Json<T>, ApiError>                                       │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad body? ─────── JsonRejection ─────────────────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Domain error? ─── CoreError::Amount ────────── ApiError ──────►│  │
//! │  │         │                                          ▲             │  │
//! │  │         ▼                                          │             │  │
//! │  │  Store error? ──── StoreError::NotFound ───────────┘             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──── 404 {"code":"NOT_FOUND","message":"error: company not found: x"} │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ritmo_core::CoreError;
use ritmo_store::StoreError;
use serde::Serialize;

/// API error returned from HTTP handlers.
///
/// ## Serialization
/// This is what the client receives when a request fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "error: offer not found: 2f1c..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message, always prefixed with `error: `
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Malformed path or body (400)
    BadRequest,

    /// Input validation failed (400)
    ValidationError,

    /// Unknown or non-settable offer status (400)
    InvalidStatus,

    /// The company already has an offer (409)
    Conflict,

    /// An amount string could not be parsed (500)
    AmountFormat,

    /// The storage document could not be read or written (500)
    StorageError,
}

impl ErrorCode {
    /// HTTP status code sent with this error.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::BadRequest | ErrorCode::ValidationError | ErrorCode::InvalidStatus => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::AmountFormat | ErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl std::fmt::Display) -> Self {
        ApiError {
            code,
            message: format!("error: {}", message),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// HTTP status code sent with this error.
    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(entity, &id),
            StoreError::Conflict(message) => ApiError::new(ErrorCode::Conflict, message),
            StoreError::Core(e) => ApiError::from(e),
            e @ (StoreError::StorageUnavailable { .. }
            | StoreError::Decode { .. }
            | StoreError::Encode(_)) => {
                // Log the actual error but return a generic message
                tracing::error!(error = %e, "Storage operation failed");
                ApiError::new(ErrorCode::StorageError, "storage operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidStatus(_) => ApiError::new(ErrorCode::InvalidStatus, err),
            CoreError::Amount { .. } => ApiError::new(ErrorCode::AmountFormat, err),
            CoreError::Validation(e) => ApiError::new(ErrorCode::ValidationError, e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use ritmo_core::{MoneyError, ValidationError};

    #[test]
    fn test_store_error_mapping() {
        let err = ApiError::from(StoreError::not_found("company", "c1"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "error: company not found: c1");

        let err = ApiError::from(StoreError::Conflict("company c1 already has an offer: o1".into()));
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err = ApiError::from(StoreError::Encode(
            serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        ));
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "error: storage operation failed");
    }

    #[test]
    fn test_core_error_mapping() {
        let err = ApiError::from(CoreError::InvalidStatus("STATUS_PENDING".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "error: invalid status type: STATUS_PENDING");

        let err = ApiError::from(CoreError::amount("advance", MoneyError::Empty));
        assert_eq!(err.code, ErrorCode::AmountFormat);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.starts_with("error: bad advance format"));

        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "name".into(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_body() {
        let body = serde_json::to_value(ApiError::not_found("offer", "o1")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"code": "NOT_FOUND", "message": "error: offer not found: o1"})
        );
    }
}
