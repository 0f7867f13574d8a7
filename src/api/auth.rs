//! `X-API-Key` middleware guarding the mutating routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::app_state::AppState;
use crate::domain::access;
use crate::error::ServiceError;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects the request with 403 unless `X-API-Key` matches the configured
/// secret.
///
/// # Errors
///
/// Returns [`ServiceError::AccessDenied`] on a missing, non-ASCII or wrong
/// key.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let supplied = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if let Err(err) = access::authorize(supplied, &state.config.api_key) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            key_present = supplied.is_some(),
            "rejected request with invalid API key"
        );
        return Err(err);
    }
    Ok(next.run(request).await)
}
