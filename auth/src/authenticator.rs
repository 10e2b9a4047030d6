use crate::identity::Identity;
use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token handling.
///
/// Services hold one of these behind an `Arc` and never touch the hasher or the
/// token service directly.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator with default hashing cost and wall-clock time.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `ttl_seconds` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], ttl_seconds: i64) -> Self {
        Self::from_parts(PasswordHasher::new(), TokenService::new(jwt_secret, ttl_seconds))
    }

    /// Assemble an authenticator from explicitly configured parts.
    pub fn from_parts(password_hasher: PasswordHasher, token_service: TokenService) -> Self {
        Self {
            password_hasher,
            token_service,
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Spend the cost of a password check for a principal that does not exist,
    /// then reject.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        self.password_hasher.verify_decoy(password);
        AuthenticationError::InvalidCredentials
    }

    /// Verify credentials and issue a token for `identity`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match, or there is no stored hash
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &Identity,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if stored_hash.is_empty() {
            return Err(self.reject_unknown(password));
        }
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(identity)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// For flows where the principal was established by other means, such as
    /// right after registration.
    pub fn issue_token(&self, identity: &Identity) -> Result<String, TokenError> {
        self.token_service.issue(identity)
    }

    /// Validate a token and return the identity it carries.
    pub fn validate_token(&self, token: &str) -> Result<Identity, TokenError> {
        self.token_service.verify(token)
    }

    /// Exchange a currently valid token for a fresh one.
    pub fn refresh_token(&self, token: &str) -> Result<String, TokenError> {
        self.token_service.refresh(token)
    }
}
