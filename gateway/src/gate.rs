//! The access gate: token verification followed by the access decision.
//!
//! # Pre-conditions
//! - The gate runs after routing-independent layers (CORS, tracing) and
//!   before any handler.
//!
//! # Post-conditions
//! - A denied request never reaches a handler and is answered with
//!   `401 Unauthorized`.
//! - An allowed request with a verified token carries its `Identity` in the
//!   request extensions.
//!
//! # Invariants
//! - A token that fails verification is treated exactly like a missing token.

use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::access::{AuthState, Decision, RequestDescriptor};
use crate::auth::authenticate;
use crate::server::AppState;

/// Axum middleware deciding every request against the rule table.
pub async fn access_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = authenticate(request.headers(), &state.jwt_config);
    let auth = AuthState {
        is_authenticated: identity.is_some(),
    };

    let decision = {
        let descriptor =
            RequestDescriptor::new(request.method().as_str(), request.uri().path());
        let decision = state.rules.evaluate(&descriptor, auth);
        tracing::debug!(
            "{} {} authenticated={} -> {:?}",
            descriptor.method,
            descriptor.path,
            auth.is_authenticated,
            decision
        );
        decision
    };

    match decision {
        Decision::Allow => {
            if let Some(identity) = identity {
                request.extensions_mut().insert(identity);
            }
            next.run(request).await
        }
        Decision::Deny => unauthorized(),
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"))],
    )
        .into_response()
}
