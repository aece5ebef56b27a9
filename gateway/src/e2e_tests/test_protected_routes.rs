//! Protected routes require a valid bearer token.

use axum::http::{Method, StatusCode};

use crate::e2e_tests::helpers::*;
use crate::testing::{TEST_SECRET, expired_hs256_token, hs256_token};

#[test]
fn test_anonymous_request_denied() {
    let test = TestGateway::new();

    for (method, path) in [
        (Method::GET, "/auth/me"),
        (Method::POST, "/auth/logout"),
        (Method::POST, "/arts/create"),
        (Method::PUT, "/arts/42"),
        (Method::DELETE, "/arts/42"),
        (Method::POST, "/interactions/like/7"),
        (Method::DELETE, "/interactions/comment/3"),
        (Method::GET, "/arts/42/comments"),
        (Method::GET, "/api/admin/views/top"),
    ] {
        let resp = test.send_anonymous(method.clone(), path);
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED, "{method} {path}");
        assert_eq!(resp.header("www-authenticate"), Some("Bearer"));
    }
}

#[test]
fn test_method_mismatch_falls_to_catch_all() {
    let test = TestGateway::new();

    let resp = test.send_anonymous(Method::POST, "/arts/public");
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    let resp = test.send_as("alice", Method::POST, "/arts/public");
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[test]
fn test_valid_token_passes() {
    let test = TestGateway::new();

    for (method, path) in [
        (Method::POST, "/arts/create"),
        (Method::DELETE, "/arts/42"),
        (Method::POST, "/interactions/like/7"),
        (Method::GET, "/arts/42/comments"),
    ] {
        let resp = test.send_as("alice", method.clone(), path);
        assert_eq!(resp.status, StatusCode::NOT_FOUND, "{method} {path}");
    }
}

#[test]
fn test_expired_token_denied() {
    let test = TestGateway::new();
    let token = expired_hs256_token("alice", TEST_SECRET);

    let resp = test.send(request(Method::POST, "/interactions/like/7", Some(&token)));
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[test]
fn test_forged_token_denied() {
    let test = TestGateway::new();
    let token = hs256_token("alice", b"not-the-gateway-secret-at-all");

    let resp = test.send(request(Method::POST, "/interactions/like/7", Some(&token)));
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[test]
fn test_denied_response_has_empty_body() {
    let test = TestGateway::new();
    let resp = test.send_anonymous(Method::GET, "/auth/me");
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert!(resp.body.is_empty());
}
