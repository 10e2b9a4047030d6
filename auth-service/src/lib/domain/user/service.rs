use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account management.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Hashes replacement passwords
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            if new_email != user.email {
                if let Some(owner) = self.repository.find_by_email(&new_email).await? {
                    if owner.id != user.id {
                        return Err(UserError::EmailAlreadyExists(new_email.to_string()));
                    }
                }
                user.email = new_email;
            }
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.authenticator.hash_password(new_password.expose())?;
        }

        if let Some(firstname) = command.firstname {
            user.firstname = Some(firstname);
        }

        if let Some(lastname) = command.lastname {
            user.lastname = Some(lastname);
        }

        user.updated_at = Utc::now();

        let updated_user = self.repository.update_by_id(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete_by_id(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
