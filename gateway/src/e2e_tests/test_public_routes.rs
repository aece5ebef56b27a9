//! Public routes pass the gate without a token.
//!
//! Application handlers are not mounted, so a request that passes the gate
//! ends at the 404 fallback.

use axum::http::{Method, StatusCode};

use crate::e2e_tests::helpers::*;

#[test]
fn test_auth_endpoints_are_public() {
    let test = TestGateway::new();

    for path in [
        "/auth/register",
        "/auth/login",
        "/auth/verify",
        "/auth/resend-verification",
    ] {
        let resp = test.send_anonymous(Method::POST, path);
        assert_eq!(resp.status, StatusCode::NOT_FOUND, "POST {path}");
    }
}

#[test]
fn test_public_art_reads() {
    let test = TestGateway::new();

    for path in ["/arts/public", "/arts/42", "/categories"] {
        let resp = test.send_anonymous(Method::GET, path);
        assert_eq!(resp.status, StatusCode::NOT_FOUND, "GET {path}");
    }
}

#[test]
fn test_docs_and_error_page_are_public() {
    let test = TestGateway::new();

    for path in ["/swagger-ui/index.html", "/v3/api-docs", "/error"] {
        let resp = test.send_anonymous(Method::GET, path);
        assert_eq!(resp.status, StatusCode::NOT_FOUND, "GET {path}");
    }
}

#[test]
fn test_query_string_is_not_part_of_the_path() {
    let test = TestGateway::new();
    let resp = test.send_anonymous(Method::GET, "/arts/public?page=2&size=20");
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[test]
fn test_public_route_ignores_bad_token() {
    let test = TestGateway::new();
    let resp = test.send(request(Method::GET, "/arts/public", Some("garbage")));
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
