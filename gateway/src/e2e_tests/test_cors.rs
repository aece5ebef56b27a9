//! The CORS policy applies to every response, whatever the access decision.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};

use crate::e2e_tests::helpers::*;

#[allow(clippy::expect_used)]
fn preflight(path: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri(path)
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
        .body(Body::empty())
        .expect("valid request")
}

#[allow(clippy::expect_used)]
fn with_origin(method: Method, path: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .expect("valid request")
}

#[test]
fn test_preflight_answered_without_token() {
    let test = TestGateway::new();

    let resp = test.send(preflight("/interactions/like/7", ALLOWED_ORIGIN));
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header("access-control-allow-origin"), Some(ALLOWED_ORIGIN));
    assert_eq!(resp.header("access-control-allow-credentials"), Some("true"));
    assert_eq!(resp.header("access-control-max-age"), Some("3600"));
    assert_eq!(
        resp.header("access-control-allow-headers"),
        Some("authorization,content-type")
    );
    assert!(
        resp.header("access-control-allow-methods")
            .is_some_and(|methods| methods.contains("POST") && methods.contains("PATCH"))
    );
}

#[test]
fn test_denied_response_carries_cors_headers() {
    let test = TestGateway::new();

    let resp = test.send(with_origin(Method::GET, "/auth/me", ALLOWED_ORIGIN));
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.header("access-control-allow-origin"), Some(ALLOWED_ORIGIN));
    assert_eq!(resp.header("access-control-allow-credentials"), Some("true"));
}

#[test]
fn test_allowed_response_carries_cors_headers() {
    let test = TestGateway::new();

    let resp = test.send(with_origin(Method::GET, "/arts/public", "http://localhost:5220"));
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(
        resp.header("access-control-allow-origin"),
        Some("http://localhost:5220")
    );
}

#[test]
fn test_unknown_origin_not_allowed() {
    let test = TestGateway::new();

    let resp = test.send(with_origin(Method::GET, "/arts/public", "https://evil.example"));
    assert_eq!(resp.header("access-control-allow-origin"), None);

    let resp = test.send(preflight("/arts/public", "https://evil.example"));
    assert_eq!(resp.header("access-control-allow-origin"), None);
}
