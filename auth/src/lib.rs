//! Authentication utilities library
//!
//! Credential and token engine shared by services:
//! - Password hashing (Argon2id, salted, tunable cost)
//! - Identity tokens (HS256 JWT) with issue / verify / refresh
//! - Authentication coordination
//!
//! Nothing in this crate performs I/O or keeps mutable state beyond an optional
//! test clock, so every type can be shared freely between threads.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Identity Tokens
//! ```
//! use auth::{Identity, TokenService};
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", 900);
//! let alice = Identity::new("alice").unwrap();
//!
//! let token = tokens.issue(&alice).unwrap();
//! assert_eq!(tokens.verify(&token).unwrap(), alice);
//!
//! let refreshed = tokens.refresh(&token).unwrap();
//! assert_eq!(tokens.verify(&refreshed).unwrap(), alice);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Identity};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 900);
//! let user = Identity::new("user123").unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, &user).unwrap();
//!
//! // Validate token
//! assert_eq!(auth.validate_token(&result.access_token).unwrap(), user);
//! ```

pub mod authenticator;
pub mod clock;
pub mod identity;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use identity::Identity;
pub use identity::IdentityError;
pub use jwt::Claims;
pub use jwt::JwtHandler;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::Argon2Params;
pub use password::PasswordError;
pub use password::PasswordHasher;
