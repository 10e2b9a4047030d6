use thiserror::Error;

/// Error type for token operations.
///
/// The verification kinds are distinct so callers can log them; they should
/// not be reported individually to the party that presented the token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is malformed")]
    Malformed,

    #[error("Token uses an unsupported signing algorithm")]
    UnsupportedAlgorithm,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token has no subject")]
    MissingSubject,
}
