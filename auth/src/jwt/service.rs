use std::sync::Arc;

use super::claims::Claims;
use super::errors::TokenError;
use super::handler::JwtHandler;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::identity::Identity;

/// Issues, verifies and refreshes time-bound identity tokens.
///
/// Holds only immutable configuration, so one instance can be shared across
/// any number of concurrent requests.
pub struct TokenService {
    handler: JwtHandler,
    ttl_seconds: i64,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a token service using wall-clock time.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret
    /// * `ttl_seconds` - Lifetime of every issued token
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        Self::with_clock(secret, ttl_seconds, Arc::new(SystemClock))
    }

    /// Create a token service reading time from `clock`.
    pub fn with_clock(secret: &[u8], ttl_seconds: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            ttl_seconds,
            clock,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a token for `identity`, valid from now for the configured TTL.
    ///
    /// # Errors
    /// * `SigningFailed` - Expiration is out of range, or token encoding failed
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        let now = self.clock.now();
        let claims = Claims::for_identity(identity, now, self.ttl_seconds).ok_or_else(|| {
            TokenError::SigningFailed(format!(
                "expiration out of range: issued at {} with ttl {}",
                now, self.ttl_seconds
            ))
        })?;
        self.handler.encode(&claims)
    }

    /// Verify a token and recover the identity it was issued to.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be decoded or has no `exp` claim
    /// * `UnsupportedAlgorithm` - Token is not HS256
    /// * `BadSignature` - Token was not signed with this secret
    /// * `Expired` - Current time is at or after `exp`
    /// * `MissingSubject` - Token carries no `user_id`
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let claims: Claims = self.handler.decode(token)?;

        if claims.exp.is_none() {
            return Err(TokenError::Malformed);
        }
        if claims.is_expired(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        claims
            .user_id
            .and_then(|user_id| Identity::new(user_id).ok())
            .ok_or(TokenError::MissingSubject)
    }

    /// Re-issue a token from a currently valid one.
    ///
    /// There is no grace period: an expired token cannot be refreshed.
    pub fn refresh(&self, token: &str) -> Result<String, TokenError> {
        let identity = self.verify(token)?;
        self.issue(&identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";
    const TTL: i64 = 900;
    const T0: i64 = 1_700_000_000;

    fn service_at(now: i64) -> (TokenService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(now));
        let service = TokenService::with_clock(SECRET, TTL, clock.clone());
        (service, clock)
    }

    fn identity(value: &str) -> Identity {
        Identity::new(value).unwrap()
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let (service, _) = service_at(T0);

        for user in ["user123", "6f1c2a7e-0d7b-4c1e-9a55-2b8f0e4d9c31", "ünïcødé"] {
            let token = service.issue(&identity(user)).unwrap();
            assert_eq!(service.verify(&token).unwrap(), identity(user));
        }
    }

    #[test]
    fn test_issued_claims() {
        let (service, _) = service_at(T0);
        let token = service.issue(&identity("user123")).unwrap();

        let claims: Claims = JwtHandler::new(SECRET).decode(&token).unwrap();
        assert_eq!(claims.user_id.as_deref(), Some("user123"));
        assert_eq!(claims.iat, Some(T0));
        assert_eq!(claims.exp, Some(T0 + TTL));
    }

    #[test]
    fn test_expiry_boundary() {
        let (service, clock) = service_at(T0);
        let token = service.issue(&identity("user123")).unwrap();

        clock.set(T0 + TTL - 1);
        assert!(service.verify(&token).is_ok());

        clock.set(T0 + TTL);
        assert_eq!(service.verify(&token), Err(TokenError::Expired));

        clock.set(T0 + TTL + 3600);
        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let (service, _) = service_at(T0);
        let other = TokenService::with_clock(
            b"another_secret_at_least_32_bytes!!",
            TTL,
            Arc::new(ManualClock::new(T0)),
        );

        let token = other.issue(&identity("user123")).unwrap();
        assert_eq!(service.verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_missing_subject() {
        let (service, _) = service_at(T0);
        let handler = JwtHandler::new(SECRET);

        let no_subject = handler
            .encode(&Claims::new().with_issued_at(T0).with_expiration(T0 + TTL))
            .unwrap();
        assert_eq!(service.verify(&no_subject), Err(TokenError::MissingSubject));

        let empty_subject = handler
            .encode(
                &Claims::new()
                    .with_user_id("")
                    .with_issued_at(T0)
                    .with_expiration(T0 + TTL),
            )
            .unwrap();
        assert_eq!(
            service.verify(&empty_subject),
            Err(TokenError::MissingSubject)
        );
    }

    #[test]
    fn test_missing_expiry_is_malformed() {
        let (service, _) = service_at(T0);
        let token = JwtHandler::new(SECRET)
            .encode(&Claims::new().with_user_id("user123").with_issued_at(T0))
            .unwrap();

        assert_eq!(service.verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_refresh_issues_new_token_for_same_identity() {
        let (service, clock) = service_at(T0);
        let token = service.issue(&identity("user123")).unwrap();

        clock.advance(600);
        let refreshed = service.refresh(&token).unwrap();
        assert_ne!(refreshed, token);

        let claims: Claims = JwtHandler::new(SECRET).decode(&refreshed).unwrap();
        assert_eq!(claims.iat, Some(T0 + 600));
        assert_eq!(claims.exp, Some(T0 + 600 + TTL));

        // Still valid after the original would have expired
        clock.set(T0 + TTL + 10);
        assert_eq!(service.verify(&refreshed).unwrap(), identity("user123"));
        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_refresh_rejects_expired_token() {
        let (service, clock) = service_at(T0);
        let token = service.issue(&identity("user123")).unwrap();

        clock.set(T0 + TTL);
        assert_eq!(service.refresh(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_refresh_rejects_tampered_token() {
        let (service, _) = service_at(T0);
        let token = service.issue(&identity("user123")).unwrap();

        let mut tampered = token.clone();
        tampered.push('x');
        assert!(service.refresh(&tampered).is_err());

        assert_eq!(service.refresh("not-a-token"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_huge_ttl_fails_to_sign() {
        let service =
            TokenService::with_clock(SECRET, i64::MAX, Arc::new(ManualClock::new(T0)));

        assert!(matches!(
            service.issue(&identity("user123")),
            Err(TokenError::SigningFailed(_))
        ));
    }

    #[test]
    fn test_system_clock_constructor() {
        let service = TokenService::new(SECRET, 60);
        assert_eq!(service.ttl_seconds(), 60);

        let token = service.issue(&identity("user123")).unwrap();
        assert_eq!(service.verify(&token).unwrap(), identity("user123"));
    }
}
