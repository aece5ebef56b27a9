//! Handlers behind the gate see the caller's identity.

use axum::http::{Method, StatusCode};

use crate::e2e_tests::helpers::*;

#[test]
fn test_me_returns_subject() {
    let test = TestGateway::new();

    let resp = test.send_as("alice", Method::GET, "/auth/me");
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "alice");

    let resp = test.send_as("bob", Method::GET, "/auth/me");
    assert_eq!(resp.body, "bob");
}

#[test]
fn test_me_without_token_never_reaches_handler() {
    let test = TestGateway::new();

    let resp = test.send_anonymous(Method::GET, "/auth/me");
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_ne!(resp.body, "alice");
}
