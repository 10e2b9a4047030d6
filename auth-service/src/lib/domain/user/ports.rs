use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for account management operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve an active user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or was deleted
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Update existing user with optional fields.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `command` - Command with optional email, password and name fields
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `Password` - Hashing the new password failed
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Soft-delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
///
/// Soft-deleted users are invisible to every lookup and never block an email
/// from being registered again.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - An active user already has this email
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, user: User) -> Result<User, UserError>;

    /// Retrieve active user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found or deleted)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve active user by exact email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found or deleted)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Overwrite the mutable fields of the active user with `user.id`.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email belongs to another active user
    /// * `DatabaseError` - Database operation failed
    async fn update_by_id(&self, user: User) -> Result<User, UserError>;

    /// Mark user as deleted.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or is already deleted
    /// * `DatabaseError` - Database operation failed
    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserError>;
}
