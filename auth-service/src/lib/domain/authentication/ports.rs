use async_trait::async_trait;

use crate::authentication::models::AuthSession;
use crate::authentication::models::LoginCommand;
use crate::authentication::models::RegisterCommand;
use crate::user::errors::UserError;

/// Port for the credential flows: register, login and token refresh.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create an account and sign the new user in.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - An active user already has this email
    /// * `Password` - Hashing failed
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError>;

    /// Verify credentials and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown or deleted email, missing credential or wrong password
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError>;

    /// Exchange a currently valid token for a fresh one.
    ///
    /// # Errors
    /// * `Token` - The presented token is invalid or expired
    async fn refresh(&self, token: &str) -> Result<String, UserError>;
}
