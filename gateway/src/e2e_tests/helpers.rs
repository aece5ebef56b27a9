//! Common helpers for end-to-end tests.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use tower::ServiceExt;

use crate::access::{RuleTable, gallery_rules};
use crate::auth::JwtConfig;
use crate::cors::CorsPolicy;
use crate::server::{AppState, router};
use crate::testing::{TEST_SECRET, hs256_token};

/// An origin allowed by the default CORS policy.
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// What came back from the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A gateway router with its own runtime.
pub struct TestGateway {
    pub router: Router,
    pub runtime: tokio::runtime::Runtime,
}

impl TestGateway {
    /// A gateway with the gallery rules, the test secret and the default CORS policy.
    #[must_use]
    pub fn new() -> Self {
        #[allow(clippy::expect_used)]
        let rules = gallery_rules().expect("gallery rules are valid");
        Self::with_rules(rules)
    }

    /// A gateway deciding requests against `rules`.
    #[must_use]
    pub fn with_rules(rules: RuleTable) -> Self {
        #[allow(clippy::expect_used)]
        let jwt_config = JwtConfig::new_hs256(TEST_SECRET.to_vec()).expect("valid secret");
        #[allow(clippy::expect_used)]
        let cors = CorsPolicy::default()
            .into_layer()
            .expect("default CORS policy is valid");

        #[allow(clippy::expect_used)]
        let runtime = tokio::runtime::Runtime::new().expect("Failed to create runtime");

        Self {
            router: router(AppState::new(rules, jwt_config), cors),
            runtime,
        }
    }

    /// Send a request and collect the response.
    pub fn send(&self, request: Request<Body>) -> TestResponse {
        let router = self.router.clone();
        self.runtime.block_on(send_to(router, request))
    }

    pub fn send_anonymous(&self, method: Method, path: &str) -> TestResponse {
        self.send(request(method, path, None))
    }

    /// Send a request carrying a valid token for `subject`.
    pub fn send_as(&self, subject: &str, method: Method, path: &str) -> TestResponse {
        let token = hs256_token(subject, TEST_SECRET);
        self.send(request(method, path, Some(&token)))
    }
}

/// Drive `router` with a single request.
#[allow(clippy::expect_used)]
pub async fn send_to(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}

/// Build a request, with an `Authorization: Bearer` header when `token` is given.
#[must_use]
#[allow(clippy::expect_used)]
pub fn request(method: Method, path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("valid request")
}
