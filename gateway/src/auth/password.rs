//! Password hashing.
//!
//! Passwords are hashed with Argon2id into PHC strings
//! (`$argon2id$v=19$...`), which embed the salt and parameters, so
//! verification needs nothing but the stored string.

use std::fmt;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier as _};
use rand::Rng;

const SALT_LEN: usize = 16;

/// Error returned when hashing or verifying a password fails.
#[derive(Debug)]
pub enum PasswordError {
    /// The password is empty.
    EmptyPassword,
    /// The stored hash is not a valid PHC string.
    InvalidHash(String),
    /// The hashing backend failed.
    Hashing(String),
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::InvalidHash(reason) => write!(f, "invalid password hash: {reason}"),
            Self::Hashing(reason) => write!(f, "password hashing failed: {reason}"),
        }
    }
}

impl std::error::Error for PasswordError {}

/// Hashes and verifies user passwords.
#[derive(Default)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyPassword);
        }

        let mut salt_bytes = [0u8; SALT_LEN];
        rand::rng().fill(&mut salt_bytes);
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hashing(e.to_string()))?;

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hashing(e.to_string()))
    }

    /// Check `password` against a stored hash.
    ///
    /// A wrong password is `Ok(false)`; only an unparsable hash is an error.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let parsed =
            PasswordHash::new(stored_hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

impl fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("algorithm", &"argon2id")
            .finish()
    }
}
