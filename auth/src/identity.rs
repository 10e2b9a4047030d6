use std::fmt;

use thiserror::Error;

/// Error for Identity construction failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Identity must not be empty")]
    Empty,
}

/// Opaque identifier of one authenticated principal.
///
/// Never empty. Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Create an identity from its textual form.
    ///
    /// # Errors
    /// * `Empty` - The identifier is an empty string
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq<str> for Identity {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identity {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_identity() {
        let identity = Identity::new("user123").unwrap();
        assert_eq!(identity.as_str(), "user123");
        assert_eq!(identity.to_string(), "user123");
    }

    #[test]
    fn test_empty_identity_rejected() {
        assert_eq!(Identity::new(""), Err(IdentityError::Empty));
    }

    #[test]
    fn test_comparison_is_exact() {
        let identity = Identity::new("User123").unwrap();
        assert!(identity == "User123");
        assert!(identity != "user123");
        assert!(identity != "User123 ");
    }
}
