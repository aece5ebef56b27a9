//! Token fixtures shared by unit and end-to-end tests.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;

/// HS256 secret used throughout the tests.
pub const TEST_SECRET: &[u8] = b"test-secret-key-that-is-long-enough";

/// RSA-2048 key pair generated for tests only.
pub const RS256_PUBLIC_KEY: &str = include_str!("keys/rs256_public.pem");
const RS256_PRIVATE_KEY: &str = include_str!("keys/rs256_private.pem");

#[derive(Serialize)]
struct TestClaims<'a> {
    sub: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    exp: Option<u64>,
}

#[allow(clippy::expect_used)]
fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_secs()
}

#[allow(clippy::expect_used)]
fn sign(header: &Header, claims: &TestClaims<'_>, key: &EncodingKey) -> String {
    encode(header, claims, key).expect("failed to create test token")
}

/// A token for `sub` valid for the next hour.
#[must_use]
pub fn hs256_token(sub: &str, secret: &[u8]) -> String {
    let claims = TestClaims {
        sub,
        exp: Some(now() + 3600),
    };
    sign(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

/// A token for `sub` that expired an hour ago.
#[must_use]
pub fn expired_hs256_token(sub: &str, secret: &[u8]) -> String {
    let claims = TestClaims {
        sub,
        exp: Some(now() - 3600),
    };
    sign(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

/// A token for `sub` without an `exp` claim.
#[must_use]
pub fn hs256_token_without_exp(sub: &str, secret: &[u8]) -> String {
    let claims = TestClaims { sub, exp: None };
    sign(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

/// An RS256 token for `sub` signed with the test private key.
#[must_use]
#[allow(clippy::expect_used)]
pub fn rs256_token(sub: &str) -> String {
    let claims = TestClaims {
        sub,
        exp: Some(now() + 3600),
    };
    let key = EncodingKey::from_rsa_pem(RS256_PRIVATE_KEY.as_bytes()).expect("valid test key");
    sign(&Header::new(Algorithm::RS256), &claims, &key)
}
