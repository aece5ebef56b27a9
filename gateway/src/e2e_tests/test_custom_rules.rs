//! A gateway running a rule table loaded from a rules file.

use axum::http::{Method, StatusCode};

use crate::access::parse_rules;
use crate::e2e_tests::helpers::*;

const RULES: &str = "\
GET  /arts/public      public
GET  /arts/{id}        public
POST /interactions/**  authenticated
*    /**               authenticated
";

fn gateway() -> TestGateway {
    #[allow(clippy::expect_used)]
    let rules = parse_rules(RULES).expect("valid rules");
    TestGateway::with_rules(rules)
}

#[test]
fn test_exact_public_path() {
    let test = gateway();
    let resp = test.send_anonymous(Method::GET, "/arts/public");
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[test]
fn test_method_mismatch_denied() {
    let test = gateway();
    let resp = test.send_anonymous(Method::POST, "/arts/public");
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[test]
fn test_placeholder_path() {
    let test = gateway();

    let resp = test.send_anonymous(Method::GET, "/arts/42");
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = test.send_anonymous(Method::GET, "/arts/42/comments");
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[test]
fn test_trailing_wildcard_with_token() {
    let test = gateway();
    let resp = test.send_as("carol", Method::POST, "/interactions/like/7");
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[test]
fn test_catch_all_denies_anonymous() {
    let test = gateway();
    let resp = test.send_anonymous(Method::GET, "/anything");
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}
