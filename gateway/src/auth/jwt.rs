//! JWT verification module.
//!
//! Verifies bearer tokens signed with HS256 or RS256 and extracts the
//! subject they were issued to.
//!
//! # Pre-conditions
//! - For HS256: The secret must be non-empty.
//! - For RS256: The public key must be a valid PEM-encoded RSA public key.
//!
//! # Post-conditions
//! - On success, returns the user ID extracted from the 'sub' claim.
//! - On failure, returns a descriptive error indicating what went wrong.
//!
//! # Invariants
//! - Verification is stateless and does not modify any external state.
//! - Tokens without an `exp` claim are rejected.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use super::JwtConfig;

/// The claims the gateway reads from a token. Other claims are ignored.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

/// Error returned when JWT verification fails.
#[derive(Debug)]
pub enum JwtError {
    /// The JWT signature is invalid.
    InvalidSignature,
    /// The JWT has expired.
    TokenExpired,
    /// The JWT is malformed or cannot be parsed.
    MalformedToken,
    /// The 'sub' claim is missing from the JWT or empty.
    MissingSubClaim,
    /// A required claim other than 'sub' is missing.
    MissingClaim(String),
    /// The decoding key could not be created from the provided configuration.
    InvalidKey(String),
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSignature => write!(f, "invalid JWT signature"),
            Self::TokenExpired => write!(f, "JWT has expired"),
            Self::MalformedToken => write!(f, "malformed JWT"),
            Self::MissingSubClaim => write!(f, "missing 'sub' claim in JWT"),
            Self::MissingClaim(claim) => write!(f, "missing '{claim}' claim in JWT"),
            Self::InvalidKey(reason) => write!(f, "invalid key: {reason}"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Verifies a JWT and extracts the user ID from the 'sub' claim.
///
/// # Errors
/// Returns `JwtError` if verification fails for any reason.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<String, JwtError> {
    let secret_key;
    let (key, algorithm) = match config {
        JwtConfig::Hs256 { secret } => {
            if secret.is_empty() {
                return Err(JwtError::InvalidKey("secret must be non-empty".to_string()));
            }
            secret_key = DecodingKey::from_secret(secret);
            (&secret_key, Algorithm::HS256)
        }
        JwtConfig::Rs256 { key, .. } => (key, Algorithm::RS256),
    };

    let mut validation = Validation::new(algorithm);
    validation.set_required_spec_claims(&["exp", "sub"]);

    let token_data = decode::<Claims>(token, key, &validation).map_err(map_jwt_error)?;

    let user_id = token_data.claims.sub;
    if user_id.is_empty() {
        return Err(JwtError::MissingSubClaim);
    }

    Ok(user_id)
}

/// Maps jsonwebtoken errors to our JwtError type.
fn map_jwt_error(error: jsonwebtoken::errors::Error) -> JwtError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        ErrorKind::MissingRequiredClaim(claim) if claim == "sub" => JwtError::MissingSubClaim,
        ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
        _ => JwtError::MalformedToken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        RS256_PUBLIC_KEY, TEST_SECRET, expired_hs256_token, hs256_token, hs256_token_without_exp,
        rs256_token,
    };

    fn hs256_config() -> JwtConfig {
        JwtConfig::Hs256 {
            secret: TEST_SECRET.to_vec(),
        }
    }

    #[test]
    fn test_verify_hs256_valid_token() {
        let token = hs256_token("user-123", TEST_SECRET);
        let result = verify_token(&token, &hs256_config());
        assert_eq!(result.expect("verified token"), "user-123");
    }

    #[test]
    fn test_verify_hs256_invalid_signature() {
        let token = hs256_token("user-123", b"wrong-secret-key-that-is-different");
        let result = verify_token(&token, &hs256_config());
        assert!(matches!(result, Err(JwtError::InvalidSignature)));
    }

    #[test]
    fn test_verify_expired_token() {
        let token = expired_hs256_token("user-123", TEST_SECRET);
        let result = verify_token(&token, &hs256_config());
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_verify_token_without_exp() {
        let token = hs256_token_without_exp("user-123", TEST_SECRET);
        let result = verify_token(&token, &hs256_config());
        match result {
            Err(JwtError::MissingClaim(claim)) => assert_eq!(claim, "exp"),
            other => panic!("expected missing exp claim, got {other:?}"),
        }
    }

    #[test]
    fn test_verify_malformed_token() {
        let result = verify_token("not-a-valid-jwt", &hs256_config());
        assert!(matches!(result, Err(JwtError::MalformedToken)));
    }

    #[test]
    fn test_verify_empty_token() {
        let result = verify_token("", &hs256_config());
        assert!(matches!(result, Err(JwtError::MalformedToken)));
    }

    #[test]
    fn test_verify_hs256_empty_sub_claim() {
        let token = hs256_token("", TEST_SECRET);
        let result = verify_token(&token, &hs256_config());
        assert!(matches!(result, Err(JwtError::MissingSubClaim)));
    }

    #[test]
    fn test_verify_hs256_empty_secret() {
        let config = JwtConfig::Hs256 { secret: vec![] };
        let result = verify_token("some.jwt.token", &config);
        match result {
            Err(JwtError::InvalidKey(message)) => {
                assert_eq!(message, "secret must be non-empty");
            }
            _ => panic!("expected InvalidKey error"),
        }
    }

    #[test]
    fn test_verify_rs256_valid_token() {
        let config = JwtConfig::new_rs256(RS256_PUBLIC_KEY.to_string()).expect("valid key");
        let token = rs256_token("alice");
        assert_eq!(verify_token(&token, &config).expect("verified"), "alice");
    }

    #[test]
    fn test_hs256_token_rejected_by_rs256_config() {
        let config = JwtConfig::new_rs256(RS256_PUBLIC_KEY.to_string()).expect("valid key");
        let token = hs256_token("alice", TEST_SECRET);
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_rs256_uses_parsed_key() {
        let key = DecodingKey::from_rsa_pem(RS256_PUBLIC_KEY.as_bytes()).expect("valid key");
        let config = JwtConfig::Rs256 {
            public_key: "not-a-valid-pem-key".to_string(),
            key,
        };
        let token = rs256_token("bob");
        assert_eq!(verify_token(&token, &config).expect("verified token"), "bob");
    }

    #[test]
    fn test_jwt_error_display() {
        assert_eq!(
            JwtError::InvalidSignature.to_string(),
            "invalid JWT signature"
        );
        assert_eq!(JwtError::TokenExpired.to_string(), "JWT has expired");
        assert_eq!(JwtError::MalformedToken.to_string(), "malformed JWT");
        assert_eq!(
            JwtError::MissingSubClaim.to_string(),
            "missing 'sub' claim in JWT"
        );
        assert_eq!(
            JwtError::MissingClaim("exp".to_string()).to_string(),
            "missing 'exp' claim in JWT"
        );
        assert_eq!(
            JwtError::InvalidKey("bad key".to_string()).to_string(),
            "invalid key: bad key"
        );
    }
}
