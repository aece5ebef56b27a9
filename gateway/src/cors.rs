//! Cross-origin resource sharing policy.
//!
//! The policy is applied to every response, independently of the access
//! decision, so browsers can read denials as well as successes.

use std::fmt;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Error returned when the CORS policy cannot be turned into a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsError {
    /// An allowed origin is not a valid header value.
    InvalidOrigin(String),
    /// An allowed method is not a valid HTTP method.
    InvalidMethod(String),
    /// No origin is listed.
    NoOrigins,
}

impl fmt::Display for CorsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrigin(origin) => write!(f, "invalid allowed origin: '{origin}'"),
            Self::InvalidMethod(method) => write!(f, "invalid allowed method: '{method}'"),
            Self::NoOrigins => write!(f, "at least one allowed origin is required"),
        }
    }
}

impl std::error::Error for CorsError {}

/// Which cross-origin requests browsers may make.
///
/// Any request header is accepted. Because credentials are allowed, the
/// requested headers are mirrored back rather than answered with `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allow_credentials: bool,
    pub max_age: Duration,
}

impl CorsPolicy {
    pub const DEFAULT_ORIGINS: [&'static str; 3] = [
        "http://localhost:5000",
        "http://localhost:5220",
        "http://localhost:3000",
    ];
    pub const DEFAULT_METHODS: [&'static str; 6] =
        ["GET", "POST", "PUT", "DELETE", "OPTIONS", "PATCH"];
    pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(3600);

    /// Build the tower-http layer enforcing this policy.
    ///
    /// Origins must be listed explicitly; `*` is rejected.
    pub fn into_layer(self) -> Result<CorsLayer, CorsError> {
        if self.allowed_origins.is_empty() {
            return Err(CorsError::NoOrigins);
        }

        let origins = self
            .allowed_origins
            .iter()
            .map(|origin| {
                // tower-http panics on a `*` entry in an origin list.
                if origin == "*" {
                    return Err(CorsError::InvalidOrigin(origin.clone()));
                }
                HeaderValue::from_str(origin).map_err(|_| CorsError::InvalidOrigin(origin.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let methods = self
            .allowed_methods
            .iter()
            .map(|method| {
                Method::from_bytes(method.as_bytes())
                    .map_err(|_| CorsError::InvalidMethod(method.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(AllowMethods::list(methods))
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(self.allow_credentials)
            .max_age(self.max_age))
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allowed_origins: Self::DEFAULT_ORIGINS.iter().map(ToString::to_string).collect(),
            allowed_methods: Self::DEFAULT_METHODS.iter().map(ToString::to_string).collect(),
            allow_credentials: true,
            max_age: Self::DEFAULT_MAX_AGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = CorsPolicy::default();
        assert_eq!(policy.allowed_origins.len(), 3);
        assert!(policy
            .allowed_origins
            .contains(&"http://localhost:3000".to_string()));
        assert_eq!(policy.allowed_methods.len(), 6);
        assert!(policy.allow_credentials);
        assert_eq!(policy.max_age, Duration::from_secs(3600));
    }

    #[test]
    fn test_default_policy_builds_layer() {
        assert!(CorsPolicy::default().into_layer().is_ok());
    }

    #[test]
    fn test_invalid_origin_rejected() {
        let policy = CorsPolicy {
            allowed_origins: vec!["http://bad\norigin".to_string()],
            ..CorsPolicy::default()
        };
        assert_eq!(
            policy.into_layer().err(),
            Some(CorsError::InvalidOrigin("http://bad\norigin".to_string()))
        );
    }

    #[test]
    fn test_wildcard_origin_rejected() {
        let policy = CorsPolicy {
            allowed_origins: vec!["http://localhost:3000".to_string(), "*".to_string()],
            ..CorsPolicy::default()
        };
        assert_eq!(
            policy.into_layer().err(),
            Some(CorsError::InvalidOrigin("*".to_string()))
        );
    }

    #[test]
    fn test_invalid_method_rejected() {
        let policy = CorsPolicy {
            allowed_methods: vec!["GE T".to_string()],
            ..CorsPolicy::default()
        };
        assert_eq!(
            policy.into_layer().err(),
            Some(CorsError::InvalidMethod("GE T".to_string()))
        );
    }

    #[test]
    fn test_no_origins_rejected() {
        let policy = CorsPolicy {
            allowed_origins: Vec::new(),
            ..CorsPolicy::default()
        };
        assert_eq!(policy.into_layer().err(), Some(CorsError::NoOrigins));
    }
}
