use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    InvalidInput,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
