//! Authentication module.
//!
//! Verifies bearer tokens ahead of the access decision and hashes user
//! passwords.
//!
//! # Pre-conditions
//! - The gateway is configured with valid JWT key material.
//!
//! # Post-conditions
//! - Authentication configuration is immutable once loaded.
//!
//! # Invariants
//! - A request either carries a verified `Identity` or is anonymous; there
//!   is no third state.

pub mod identity;
pub mod jwt;
pub mod jwt_config;
pub mod password;

pub use identity::{Identity, authenticate, bearer_token};
pub use jwt::{JwtError, verify_token};
pub use jwt_config::{JwtConfig, JwtConfigError};
pub use password::{CredentialHasher, PasswordError};
