//! Gateway configuration module.
//!
//! This module provides configuration loading for the gateway from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `GATEWAY_LISTEN_PORT`: Port to listen on (default: `8080`)
//! - `GATEWAY_JWT_SECRET`: HS256 secret shared with the token issuer
//! - `GATEWAY_JWT_PUBLIC_KEY`: PEM-encoded RS256 public key of the token issuer
//! - `GATEWAY_RULES_FILE`: Rules file to load instead of the built-in gallery rules
//! - `GATEWAY_CORS_ALLOWED_ORIGINS`: Comma-separated allowed origins
//!   (default: `http://localhost:5000,http://localhost:5220,http://localhost:3000`)
//! - `GATEWAY_CORS_MAX_AGE_SECS`: Preflight cache lifetime in seconds (default: `3600`)
//!
//! # Invariants
//!
//! - Exactly one of `GATEWAY_JWT_SECRET` and `GATEWAY_JWT_PUBLIC_KEY` is used.
//! - `listen_port` is always a valid port number (1-65535)

use std::path::PathBuf;
use std::time::Duration;

use crate::auth::JwtConfig;
use crate::cors::CorsPolicy;

const LISTEN_PORT: &str = "GATEWAY_LISTEN_PORT";
const JWT_SECRET: &str = "GATEWAY_JWT_SECRET";
const JWT_PUBLIC_KEY: &str = "GATEWAY_JWT_PUBLIC_KEY";
const RULES_FILE: &str = "GATEWAY_RULES_FILE";
const CORS_ALLOWED_ORIGINS: &str = "GATEWAY_CORS_ALLOWED_ORIGINS";
const CORS_MAX_AGE_SECS: &str = "GATEWAY_CORS_MAX_AGE_SECS";

/// Gateway configuration.
///
/// # Post-conditions
///
/// - `listen_port` is always in the valid range (1-65535)
/// - `jwt_config` holds validated key material
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on for HTTP connections.
    pub listen_port: u16,
    /// Key material for verifying bearer tokens.
    pub jwt_config: JwtConfig,
    /// Rules file replacing the built-in gallery rules, if set.
    pub rules_file: Option<PathBuf>,
    /// Cross-origin policy applied to every response.
    pub cors: CorsPolicy,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is missing.
    MissingEnvVar(String),
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => {
                write!(f, "missing required environment variable: {name}")
            }
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Default port for the gateway.
    pub const DEFAULT_PORT: u16 = 8080;

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - neither or both of the JWT variables are set, or the key material is invalid
    /// - `GATEWAY_LISTEN_PORT` or `GATEWAY_CORS_MAX_AGE_SECS` is set but not a number
    /// - `GATEWAY_CORS_ALLOWED_ORIGINS` is set but lists no origin
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_port = Self::load_listen_port(&lookup)?;
        let jwt_config = Self::load_jwt_config(&lookup)?;
        let rules_file = lookup(RULES_FILE)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let cors = Self::load_cors_policy(&lookup)?;

        Ok(Self {
            listen_port,
            jwt_config,
            rules_file,
            cors,
        })
    }

    /// Load the listen port.
    ///
    /// Returns the default if not set.
    fn load_listen_port(lookup: &impl Fn(&str) -> Option<String>) -> Result<u16, ConfigError> {
        match lookup(LISTEN_PORT) {
            Some(value) => match value.parse::<u16>() {
                Ok(port) if port != 0 => Ok(port),
                _ => Err(ConfigError::InvalidValue {
                    name: LISTEN_PORT.to_string(),
                    message: format!("'{value}' is not a valid port number (must be 1-65535)"),
                }),
            },
            None => Ok(Self::DEFAULT_PORT),
        }
    }

    /// Load the token verification key.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly one of the secret and the public key is set
    /// and its value is valid key material.
    fn load_jwt_config(
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<JwtConfig, ConfigError> {
        let secret = lookup(JWT_SECRET);
        let public_key = lookup(JWT_PUBLIC_KEY);

        match (secret, public_key) {
            (Some(_), Some(_)) => Err(ConfigError::InvalidValue {
                name: JWT_PUBLIC_KEY.to_string(),
                message: format!("must not be set together with {JWT_SECRET}"),
            }),
            (Some(secret), None) => {
                JwtConfig::new_hs256(secret.into_bytes()).map_err(|e| ConfigError::InvalidValue {
                    name: JWT_SECRET.to_string(),
                    message: e.to_string(),
                })
            }
            (None, Some(public_key)) => {
                JwtConfig::new_rs256(public_key).map_err(|e| ConfigError::InvalidValue {
                    name: JWT_PUBLIC_KEY.to_string(),
                    message: e.to_string(),
                })
            }
            (None, None) => Err(ConfigError::MissingEnvVar(JWT_SECRET.to_string())),
        }
    }

    /// Load the cross-origin policy, starting from the defaults.
    fn load_cors_policy(
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<CorsPolicy, ConfigError> {
        let mut policy = CorsPolicy::default();

        if let Some(value) = lookup(CORS_ALLOWED_ORIGINS) {
            let origins: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(ToString::to_string)
                .collect();
            if origins.is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: CORS_ALLOWED_ORIGINS.to_string(),
                    message: "must list at least one origin".to_string(),
                });
            }
            policy.allowed_origins = origins;
        }

        if let Some(value) = lookup(CORS_MAX_AGE_SECS) {
            let seconds = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                name: CORS_MAX_AGE_SECS.to_string(),
                message: format!("'{value}' is not a number of seconds"),
            })?;
            policy.max_age = Duration::from_secs(seconds);
        }

        Ok(policy)
    }
}
