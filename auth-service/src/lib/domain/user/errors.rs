use auth::IdentityError;
use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password is required")]
    Empty,

    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Error for PersonName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must not be blank")]
    Blank,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Credential engine errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl UserError {
    /// Whether the error means the addressed user does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UserError::NotFound(_))
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}

impl From<sqlx::Error> for UserError {
    fn from(err: sqlx::Error) -> Self {
        UserError::DatabaseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        assert!(UserError::NotFound("42".to_string()).is_not_found());
        assert!(!UserError::InvalidCredentials.is_not_found());
        assert!(!UserError::DatabaseError("connection reset".to_string()).is_not_found());
    }

    #[test]
    fn test_value_object_errors_convert() {
        let err: UserError = PasswordPolicyError::TooShort { min: 8, actual: 3 }.into();
        assert!(matches!(err, UserError::InvalidPassword(_)));
        assert_eq!(
            err.to_string(),
            "Invalid password: Password too short: minimum 8 characters, got 3"
        );
    }
}
