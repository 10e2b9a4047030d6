use serde::Deserialize;
use serde::Serialize;

use crate::identity::Identity;

/// Identity token claims.
///
/// Serialized as `{"user_id": <string>, "iat": <unix seconds>, "exp": <unix seconds>}`.
/// Fields are optional on the way in so that a missing claim can be reported
/// precisely instead of as a generic decoding failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Claims {
    /// Subject of the token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims for `identity` issued at `issued_at` and valid for `ttl_seconds`.
    ///
    /// Returns `None` if the expiration instant does not fit in an `i64`.
    pub fn for_identity(identity: &Identity, issued_at: i64, ttl_seconds: i64) -> Option<Self> {
        Some(Self {
            user_id: Some(identity.as_str().to_string()),
            iat: Some(issued_at),
            exp: Some(issued_at.checked_add(ttl_seconds)?),
        })
    }

    /// Set subject.
    pub fn with_user_id(mut self, user_id: impl ToString) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is expired at and after its `exp` instant. Claims without an
    /// `exp` are always considered expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| current_timestamp >= exp)
    }
}
