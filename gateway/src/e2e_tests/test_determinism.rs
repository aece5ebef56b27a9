//! Test that the same sequence of requests produces identical results.

use axum::http::{Method, StatusCode};

use crate::e2e_tests::helpers::*;

fn run_sequence() -> Vec<StatusCode> {
    let test = TestGateway::new();
    let mut statuses = Vec::new();

    statuses.push(test.send_anonymous(Method::GET, "/arts/public").status);
    statuses.push(test.send_anonymous(Method::POST, "/interactions/like/1").status);
    statuses.push(test.send_as("dave", Method::POST, "/interactions/like/1").status);
    statuses.push(test.send_as("dave", Method::GET, "/auth/me").status);
    statuses.push(test.send_anonymous(Method::GET, "/auth/me").status);
    statuses.push(test.send_anonymous(Method::GET, "/arts/my-artworks").status);
    statuses.push(test.send_anonymous(Method::PATCH, "/arts/my-artworks").status);

    statuses
}

#[test]
fn test_deterministic_sequence() {
    let run1 = run_sequence();
    let run2 = run_sequence();

    assert_eq!(run1, run2);
    assert_eq!(
        run1,
        vec![
            StatusCode::NOT_FOUND,
            StatusCode::UNAUTHORIZED,
            StatusCode::NOT_FOUND,
            StatusCode::OK,
            StatusCode::UNAUTHORIZED,
            StatusCode::NOT_FOUND,
            StatusCode::UNAUTHORIZED,
        ]
    );
}
