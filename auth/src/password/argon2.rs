use std::sync::Arc;
use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Argon2id cost parameters.
///
/// Raising any of them raises the cost of every hash, including an attacker's
/// brute-force attempts. Stored hashes embed the parameters they were created
/// with, so changing them only affects new hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Argon2Params {
    fn to_argon2(self) -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordError::HashingFailed(format!("Invalid argon2 params: {}", e)))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 19456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Password hashing implementation.
///
/// Salted, adaptive-cost one-way hashing (Argon2id). Plaintext secrets are only
/// borrowed for the duration of a call and never retained.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    params: Argon2Params,
    decoy: Arc<OnceLock<String>>,
}

const DECOY_PASSWORD: &str = "decoy-password-never-stored";

impl PasswordHasher {
    /// Create a new password hasher with default cost parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a password hasher with explicit cost parameters.
    pub fn with_params(params: Argon2Params) -> Self {
        Self {
            params,
            decoy: Arc::default(),
        }
    }

    /// Cost parameters used for new hashes.
    pub fn params(&self) -> Argon2Params {
        self.params
    }

    /// Hash a plaintext password securely.
    ///
    /// Every call generates a fresh random salt, so hashing the same password
    /// twice yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::InvalidInput);
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = self.params.to_argon2()?;

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Hash a password for a record that may have no local credential.
    ///
    /// An empty password is a no-op that yields an empty hash, which
    /// [`verify`](Self::verify) never accepts.
    pub fn hash_optional(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Ok(String::new());
        }
        self.hash(password)
    }

    /// Verify a password against a stored hash.
    ///
    /// Verification uses the parameters embedded in the stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext candidate
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True only if the hash is present, well formed and matches
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if hash.is_empty() {
            return false;
        }

        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Run a full verification against a decoy hash built with this hasher's
    /// parameters, then reject.
    ///
    /// For callers with no stored hash to check, so that a missing credential
    /// costs as much as a wrong one. The decoy is hashed on first use.
    pub fn verify_decoy(&self, password: &str) -> bool {
        let decoy = self
            .decoy
            .get_or_init(|| self.hash(DECOY_PASSWORD).unwrap_or_default());
        let _ = self.verify(password, decoy);
        false
    }

    #[cfg(test)]
    pub(crate) fn decoy_hash(&self) -> Option<&str> {
        self.decoy.get().map(String::as_str)
    }
}
