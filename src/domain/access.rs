//! Shared-secret authorization for mutating operations.

use crate::error::ServiceError;

/// Allows the call iff `supplied` equals `secret` exactly.
///
/// A missing credential is denied. This is a static shared secret, not a
/// credential-issuance system: no hashing and no rate limiting.
///
/// # Errors
///
/// Returns [`ServiceError::AccessDenied`] on a missing or wrong credential.
pub fn authorize(supplied: Option<&str>, secret: &str) -> Result<(), ServiceError> {
    match supplied {
        Some(key) if key == secret => Ok(()),
        _ => Err(ServiceError::AccessDenied),
    }
}
