//! Resolving the caller's identity from request headers.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use super::JwtConfig;
use super::jwt::verify_token;

/// The subject of a verified bearer token.
///
/// Inserted into request extensions by the access gate for handlers that
/// need to know who is calling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(pub String);

impl Identity {
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.0
    }
}

/// The credential of an `Authorization: Bearer <token>` header, if present.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the identity of a request.
///
/// A missing header and a token that fails verification are both treated as
/// "no identity"; the failure reason is only logged.
#[must_use]
pub fn authenticate(headers: &HeaderMap, config: &JwtConfig) -> Option<Identity> {
    let token = bearer_token(headers)?;
    match verify_token(token, config) {
        Ok(subject) => Some(Identity(subject)),
        Err(e) => {
            tracing::debug!("bearer token rejected: {e}");
            None
        }
    }
}
