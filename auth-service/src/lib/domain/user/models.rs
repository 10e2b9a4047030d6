use std::fmt;
use std::str::FromStr;

use auth::Identity;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered account together with its stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    /// PHC-formatted password hash. Empty when the account has no local credential.
    pub password_hash: String,
    pub firstname: Option<PersonName>,
    pub lastname: Option<PersonName>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Build a fresh account with a random identifier.
    pub fn register(
        email: EmailAddress,
        password_hash: String,
        firstname: Option<PersonName>,
        lastname: Option<PersonName>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            password_hash,
            firstname,
            lastname,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// The identity tokens for this user carry.
    ///
    /// # Errors
    /// * `Identity` - Identifier renders to an empty string
    pub fn identity(&self) -> Result<Identity, UserError> {
        Ok(Identity::new(self.id.to_string())?)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Comparison is exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password held only between the request boundary and hashing.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 8;

    /// Accept a new password, enforcing the minimum length.
    ///
    /// # Errors
    /// * `Empty` - Password is empty
    /// * `TooShort` - Fewer than 8 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::candidate(password)?;
        let actual = password.0.chars().count();
        if actual < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual,
            });
        }
        Ok(password)
    }

    /// Accept a password offered for verification. Only emptiness is checked;
    /// length rules apply to new passwords, not to login attempts.
    ///
    /// # Errors
    /// * `Empty` - Password is empty
    pub fn candidate(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// First or last name of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `Blank` - Name is empty or whitespace only
    /// * `TooLong` - More than 255 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        if name.trim().is_empty() {
            return Err(NameError::Blank);
        }

        let actual = name.chars().count();
        if actual > Self::MAX_LENGTH {
            return Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual,
            });
        }

        Ok(Self(name))
    }

    /// Optional form used by registration, where a blank name means "not given".
    pub fn optional(name: Option<String>) -> Result<Option<Self>, NameError> {
        match name {
            Some(name) if !name.trim().is_empty() => Self::new(name).map(Some),
            _ => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to update an existing user with optional validated fields.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
    pub firstname: Option<PersonName>,
    pub lastname: Option<PersonName>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("user@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("a@x.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("".to_string()).is_err());
    }

    #[test]
    fn test_email_comparison_is_case_sensitive() {
        let lower = EmailAddress::new("user@example.com".to_string()).unwrap();
        let upper = EmailAddress::new("User@example.com".to_string()).unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_password_policy() {
        assert_eq!(
            Password::new(String::new()).unwrap_err(),
            PasswordPolicyError::Empty
        );
        assert_eq!(
            Password::new("short".to_string()).unwrap_err(),
            PasswordPolicyError::TooShort { min: 8, actual: 5 }
        );
        assert!(Password::new("longenough".to_string()).is_ok());
        assert!(Password::new("12345678".to_string()).is_ok());
    }

    #[test]
    fn test_candidate_password_skips_length_rule() {
        assert!(Password::candidate("short".to_string()).is_ok());
        assert_eq!(
            Password::candidate(String::new()).unwrap_err(),
            PasswordPolicyError::Empty
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("hunter2hunter2".to_string()).unwrap();
        let rendered = format!("{:?}", password);
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_person_name_validation() {
        assert!(PersonName::new("Ada".to_string()).is_ok());
        assert_eq!(PersonName::new("  ".to_string()), Err(NameError::Blank));
        assert!(PersonName::new("a".repeat(255)).is_ok());
        assert_eq!(
            PersonName::new("a".repeat(256)),
            Err(NameError::TooLong {
                max: 255,
                actual: 256
            })
        );
    }

    #[test]
    fn test_optional_person_name() {
        assert_eq!(PersonName::optional(None), Ok(None));
        assert_eq!(PersonName::optional(Some(String::new())), Ok(None));
        assert_eq!(
            PersonName::optional(Some("Ada".to_string()))
                .unwrap()
                .map(|n| n.to_string()),
            Some("Ada".to_string())
        );
        assert!(PersonName::optional(Some("a".repeat(300))).is_err());
    }

    #[test]
    fn test_user_id_parsing() {
        let id = UserId::new();
        assert_eq!(UserId::from_string(&id.to_string()), Ok(id));
        assert!(UserId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_registered_user_identity() {
        let user = User::register(
            EmailAddress::new("user@example.com".to_string()).unwrap(),
            "$argon2id$hash".to_string(),
            None,
            None,
        );

        assert_eq!(user.identity().unwrap().as_str(), user.id.to_string());
        assert_eq!(user.created_at, user.updated_at);
        assert!(!user.is_deleted());
    }
}
