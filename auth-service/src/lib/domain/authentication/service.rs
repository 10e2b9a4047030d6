use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::authentication::models::AuthSession;
use crate::authentication::models::LoginCommand;
use crate::authentication::models::RegisterCommand;
use crate::authentication::ports::AuthServicePort;
use crate::user::errors::UserError;
use crate::user::models::User;
use crate::user::ports::UserRepository;

/// Domain service implementing the register, login and refresh flows.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token engine
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())?;

        let user = User::register(
            command.email,
            password_hash,
            command.firstname,
            command.lastname,
        );

        // The store enforces uniqueness too, covering concurrent registrations.
        let user = self.repository.insert(user).await?;
        let token = self.authenticator.issue_token(&user.identity()?)?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthSession { token, user })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError> {
        let user = match self.repository.find_by_email(&command.email).await? {
            Some(user) if !user.is_deleted() => user,
            _ => {
                tracing::debug!("Login rejected: no active account for email");
                self.authenticator.reject_unknown(command.password.expose());
                return Err(UserError::InvalidCredentials);
            }
        };

        let result = self
            .authenticator
            .authenticate(
                command.password.expose(),
                &user.password_hash,
                &user.identity()?,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
                    UserError::InvalidCredentials
                }
                AuthenticationError::Token(err) => UserError::Token(err),
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthSession {
            token: result.access_token,
            user,
        })
    }

    async fn refresh(&self, token: &str) -> Result<String, UserError> {
        let refreshed = self.authenticator.refresh_token(token)?;
        tracing::debug!("Token refreshed");

        Ok(refreshed)
    }
}
