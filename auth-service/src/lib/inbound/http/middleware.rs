use std::sync::Arc;

use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use thiserror::Error;

use super::handlers::ApiError;
use super::identity::set_identity;

/// Why the `Authorization` header could not yield a bearer token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthHeaderError {
    #[error("missing authorization header")]
    Missing,

    #[error("invalid authorization format, expected: Bearer <token>")]
    InvalidFormat,
}

/// Middleware that validates bearer tokens and records the caller's identity
/// in the request before handing it on.
///
/// Every rejection is a 401. Verification failures all share one message;
/// the precise reason is only logged.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(req.headers()).map_err(|e| {
        tracing::debug!(error = %e, "Authorization header rejected");
        ApiError::Unauthorized(e.to_string())
    })?;

    let identity = authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        ApiError::invalid_token()
    })?;

    set_identity(req.extensions_mut(), identity);

    Ok(next.run(req).await)
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The value is split on single spaces and must yield exactly two parts, the
/// first being `Bearer` (case-sensitive).
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthHeaderError> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthHeaderError::Missing)?;
    if value.is_empty() {
        return Err(AuthHeaderError::Missing);
    }

    let value = value
        .to_str()
        .map_err(|_| AuthHeaderError::InvalidFormat)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AuthHeaderError::InvalidFormat),
    }
}
