use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// JWT codec pinned to a single symmetric algorithm (HS256).
///
/// Generic over the claims type. Expiry is not checked here; that is the
/// token service's job, against its own clock.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

/// Only the part of a JOSE header needed to reject foreign algorithms.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Encode claims into a signed JWT.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Decode a JWT and verify its algorithm and signature.
    ///
    /// The header's `alg` is inspected before any signature work so that a
    /// token announcing `none` or any algorithm other than the configured one
    /// is refused outright.
    ///
    /// # Errors
    /// * `Malformed` - Token is not three base64url segments with a JSON header and payload
    /// * `UnsupportedAlgorithm` - Header names a different algorithm
    /// * `BadSignature` - Signature does not match the secret
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        self.check_algorithm(token)?;

        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::UnsupportedAlgorithm
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }

    fn check_algorithm(&self, token: &str) -> Result<(), TokenError> {
        let mut segments = token.split('.');
        let (Some(header), Some(_), Some(_), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed);
        };

        let header = URL_SAFE_NO_PAD
            .decode(header)
            .map_err(|_| TokenError::Malformed)?;
        let header: RawHeader =
            serde_json::from_slice(&header).map_err(|_| TokenError::Malformed)?;

        match Algorithm::from_str(&header.alg) {
            Ok(algorithm) if algorithm == self.algorithm => Ok(()),
            _ => Err(TokenError::UnsupportedAlgorithm),
        }
    }
}
