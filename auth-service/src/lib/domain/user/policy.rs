//! Ownership policy for account-mutating operations.
//!
//! A caller may only modify the account its own token was issued for. The
//! check is a pure comparison between the resolved identity and the target
//! identifier; it never consults storage.

use auth::Identity;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("unauthorized")]
    Unauthenticated,

    #[error("you can only modify your own account")]
    Forbidden,
}

/// Allow the operation only when `current` is present and equals `target`.
///
/// # Errors
/// * `Unauthenticated` - No identity was resolved for the request
/// * `Forbidden` - The identity differs from the target (exact comparison)
pub fn authorize(current: Option<&Identity>, target: &str) -> Result<(), PolicyError> {
    let current = current.ok_or(PolicyError::Unauthenticated)?;

    if current.as_str() != target {
        tracing::warn!(
            user_id = %current,
            target_user_id = %target,
            "Ownership check failed"
        );
        return Err(PolicyError::Forbidden);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_allowed() {
        let alice = Identity::new("alice").unwrap();
        assert_eq!(authorize(Some(&alice), "alice"), Ok(()));
    }

    #[test]
    fn test_other_identity_is_forbidden() {
        let alice = Identity::new("alice").unwrap();
        assert_eq!(authorize(Some(&alice), "bob"), Err(PolicyError::Forbidden));
    }

    #[test]
    fn test_missing_identity_is_unauthenticated() {
        assert_eq!(authorize(None, "alice"), Err(PolicyError::Unauthenticated));
    }

    #[test]
    fn test_comparison_is_exact() {
        let id = Identity::new("6F1C2A7E-0D7B-4C1E-9A55-2B8F0E4D9C31").unwrap();
        assert_eq!(
            authorize(Some(&id), "6f1c2a7e-0d7b-4c1e-9a55-2b8f0e4d9c31"),
            Err(PolicyError::Forbidden)
        );
        assert_eq!(
            authorize(Some(&id), "6F1C2A7E-0D7B-4C1E-9A55-2B8F0E4D9C31 "),
            Err(PolicyError::Forbidden)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(PolicyError::Unauthenticated.to_string(), "unauthorized");
        assert_eq!(
            PolicyError::Forbidden.to_string(),
            "you can only modify your own account"
        );
    }
}
