//! Service error types with HTTP status code mapping.
//!
//! [`ServiceError`] is the central error type. Each variant maps to an HTTP
//! status code, a numeric code, and a stable `kind` string so clients can
//! tell failures apart without parsing the message.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1005,
///     "kind": "duplicate_date",
///     "message": "a holiday already exists on 2025-01-01"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code, kind and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see the ranges on [`ServiceError`]).
    pub code: u32,
    /// Machine-readable error kind, e.g. `"year_out_of_range"`.
    #[schema(value_type = String)]
    pub kind: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 2000–2999 | Not Found  | 404 Not Found             |
/// | 3000–3999 | Storage    | 500 Internal Server Error |
/// | 4003      | Access     | 403 Forbidden             |
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Date text is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date format: {0:?}, expected YYYY-MM-DD")]
    InvalidFormat(String),

    /// Year lies outside the accepted window.
    #[error("year {year} must be between {min} and {max}")]
    YearOutOfRange {
        /// Rejected year.
        year: i32,
        /// Lowest accepted year.
        min: i32,
        /// Highest accepted year at the time of the check.
        max: i32,
    },

    /// Date falls before the configured minimum year.
    #[error("date {date} is before the minimum year {min_year}")]
    DateTooEarly {
        /// Rejected date in `YYYY-MM-DD` form.
        date: String,
        /// Configured minimum year.
        min_year: i32,
    },

    /// Date does not belong to the year it was filed under.
    #[error("date {date} does not belong to year {year}")]
    YearMismatch {
        /// Year the caller asked for.
        year: i32,
        /// Date supplied by the caller.
        date: String,
    },

    /// The ledger already holds a holiday on this date.
    #[error("a holiday already exists on {0}")]
    DuplicateDate(String),

    /// Request parameters could not be accepted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No ledger exists for the year.
    #[error("no holiday data for year {0}")]
    YearNotFound(i32),

    /// The year's ledger has no holiday on this date.
    #[error("no holiday found on {0}")]
    DateNotFound(String),

    /// Supplied credential does not match the shared secret.
    #[error("access denied: invalid API key")]
    AccessDenied,

    /// The backing document could not be read or parsed.
    #[error("failed to read holiday storage: {0}")]
    StorageRead(String),

    /// The backing document could not be written.
    #[error("failed to write holiday storage: {0}")]
    StorageWrite(String),
}

impl ServiceError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidFormat(_) => 1001,
            Self::YearOutOfRange { .. } => 1002,
            Self::DateTooEarly { .. } => 1003,
            Self::YearMismatch { .. } => 1004,
            Self::DuplicateDate(_) => 1005,
            Self::InvalidRequest(_) => 1006,
            Self::YearNotFound(_) => 2001,
            Self::DateNotFound(_) => 2002,
            Self::StorageRead(_) => 3001,
            Self::StorageWrite(_) => 3002,
            Self::AccessDenied => 4003,
        }
    }

    /// Returns the machine-readable kind for this variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidFormat(_) => "invalid_format",
            Self::YearOutOfRange { .. } => "year_out_of_range",
            Self::DateTooEarly { .. } => "date_too_early",
            Self::YearMismatch { .. } => "year_mismatch",
            Self::DuplicateDate(_) => "duplicate_date",
            Self::InvalidRequest(_) => "invalid_request",
            Self::YearNotFound(_) => "year_not_found",
            Self::DateNotFound(_) => "date_not_found",
            Self::AccessDenied => "access_denied",
            Self::StorageRead(_) => "storage_read",
            Self::StorageWrite(_) => "storage_write",
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidFormat(_)
            | Self::YearOutOfRange { .. }
            | Self::DateTooEarly { .. }
            | Self::YearMismatch { .. }
            | Self::DuplicateDate(_)
            | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::YearNotFound(_) | Self::DateNotFound(_) => StatusCode::NOT_FOUND,
            Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::StorageRead(_) | Self::StorageWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, kind = self.kind(), "request rejected");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                kind: self.kind(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
