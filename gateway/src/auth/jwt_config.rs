//! Key material for verifying bearer tokens.
//!
//! # Pre-conditions
//! - HS256 secrets are non-empty.
//! - RS256 public keys are PEM-encoded RSA public keys.
//!
//! # Post-conditions
//! - A `JwtConfig` built through `new_hs256`/`new_rs256` holds usable key material.
//!
//! # Invariants
//! - `JwtConfig` is immutable once created.
//! - Secrets are never written by `Display` or `Debug`.

use std::fmt;

use jsonwebtoken::DecodingKey;

/// Error returned when JWT configuration is invalid.
#[derive(Debug)]
pub enum JwtConfigError {
    /// The HS256 secret is empty.
    EmptySecret,
    /// The RS256 public key is not a valid PEM-encoded RSA public key.
    InvalidRs256PublicKey(String),
}

impl fmt::Display for JwtConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySecret => write!(f, "HS256 secret must not be empty"),
            Self::InvalidRs256PublicKey(reason) => {
                write!(f, "invalid RS256 public key: {reason}")
            }
        }
    }
}

impl std::error::Error for JwtConfigError {}

/// JWT verification configuration.
///
/// Supports both symmetric (HS256) and asymmetric (RS256) algorithms.
#[derive(Clone)]
pub enum JwtConfig {
    /// HMAC-SHA256 with a secret shared with the token issuer.
    Hs256 {
        /// The shared secret used for HMAC-SHA256.
        secret: Vec<u8>,
    },
    /// RSA-SHA256; the gateway only holds the issuer's public key.
    Rs256 {
        /// PEM-encoded RSA public key.
        public_key: String,
        /// `public_key` parsed once, reused for every verification.
        key: DecodingKey,
    },
}

impl JwtConfig {
    /// Create a new HS256 JWT configuration.
    ///
    /// # Errors
    /// Returns `JwtConfigError::EmptySecret` if the secret is empty.
    pub fn new_hs256(secret: Vec<u8>) -> Result<Self, JwtConfigError> {
        if secret.is_empty() {
            return Err(JwtConfigError::EmptySecret);
        }
        Ok(Self::Hs256 { secret })
    }

    /// Create a new RS256 JWT configuration.
    ///
    /// The key is parsed here, once; a bad key fails at startup rather than
    /// on the first request.
    ///
    /// # Errors
    /// Returns `JwtConfigError::InvalidRs256PublicKey` if the key is not a valid RS256 PEM key.
    pub fn new_rs256(public_key: String) -> Result<Self, JwtConfigError> {
        let key = DecodingKey::from_rsa_pem(public_key.as_bytes())
            .map_err(|e| JwtConfigError::InvalidRs256PublicKey(e.to_string()))?;

        Ok(Self::Rs256 { public_key, key })
    }

    /// Name of the signing algorithm, as it appears in a token header.
    #[must_use]
    pub const fn algorithm_name(&self) -> &'static str {
        match self {
            Self::Hs256 { .. } => "HS256",
            Self::Rs256 { .. } => "RS256",
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hs256 { secret } => f
                .debug_struct("Hs256")
                .field("secret", &format_args!("<{} bytes>", secret.len()))
                .finish(),
            Self::Rs256 { .. } => f
                .debug_struct("Rs256")
                .field("public_key", &"<pem>")
                .finish(),
        }
    }
}

impl fmt::Display for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.algorithm_name())
    }
}
