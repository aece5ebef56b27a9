//! Shared state and HTTP routing.

use std::sync::Arc;

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::access::RuleTable;
use crate::auth::{CredentialHasher, Identity, JwtConfig};
use crate::gate::access_gate;

/// State shared by every request. Read-only after startup.
#[derive(Clone)]
#[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected for shared state
pub struct AppState {
    /// The rule table every request is decided against.
    pub rules: Arc<RuleTable>,
    /// Key material for verifying bearer tokens.
    pub jwt_config: Arc<JwtConfig>,
    /// The gateway's password hasher, available to handlers through the state.
    pub passwords: Arc<CredentialHasher>,
}

impl AppState {
    #[must_use]
    pub fn new(rules: RuleTable, jwt_config: JwtConfig) -> Self {
        Self {
            rules: Arc::new(rules),
            jwt_config: Arc::new(jwt_config),
            passwords: Arc::new(CredentialHasher::new()),
        }
    }
}

/// Build the gateway router.
///
/// Layers, innermost first: access gate, CORS, request tracing. CORS sits
/// outside the gate so that preflight requests are answered without a token
/// and denials still carry CORS headers.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/auth/me", get(me))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), access_gate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The subject of the caller's token.
async fn me(Extension(identity): Extension<Identity>) -> String {
    identity.0
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
