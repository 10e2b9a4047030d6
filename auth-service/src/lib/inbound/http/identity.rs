//! Request-scoped carrier for the identity resolved by the authentication
//! middleware.
//!
//! The identity lives in the request's own `Extensions` under a private key
//! type, so nothing outside this module can forge or overwrite it and a
//! request without a resolved identity reads back `None`.

use auth::Identity;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Extensions;

use super::handlers::ApiError;

#[derive(Debug, Clone)]
struct ResolvedIdentity(Identity);

/// Attach `identity` to the request. Replaces any earlier value.
pub fn set_identity(extensions: &mut Extensions, identity: Identity) {
    extensions.insert(ResolvedIdentity(identity));
}

/// Identity resolved for this request, if authentication ran and succeeded.
pub fn current_identity(extensions: &Extensions) -> Option<&Identity> {
    extensions
        .get::<ResolvedIdentity>()
        .map(|resolved| &resolved.0)
}

/// Extractor for handlers behind the authentication middleware.
///
/// Rejects with 401 when no identity was resolved. Use
/// `Option<AuthenticatedUser>` to inspect the carrier without rejecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub identity: Identity,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_identity(&parts.extensions)
            .cloned()
            .map(|identity| AuthenticatedUser { identity })
            .ok_or_else(|| ApiError::Unauthorized("unauthorized".to_string()))
    }
}
