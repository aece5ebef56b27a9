//! Many requests decided in parallel against the same shared rule table.

use axum::http::{Method, StatusCode};
use futures::future::join_all;

use crate::e2e_tests::helpers::*;
use crate::testing::{TEST_SECRET, hs256_token};

#[test]
fn test_parallel_requests_get_independent_decisions() {
    let test = TestGateway::new();
    let token = hs256_token("erin", TEST_SECRET);

    let cases: Vec<(Method, String, bool, StatusCode)> = (0..200)
        .map(|i| match i % 4 {
            0 => (Method::GET, format!("/arts/{i}"), false, StatusCode::NOT_FOUND),
            1 => (
                Method::POST,
                format!("/interactions/like/{i}"),
                false,
                StatusCode::UNAUTHORIZED,
            ),
            2 => (
                Method::POST,
                format!("/interactions/like/{i}"),
                true,
                StatusCode::NOT_FOUND,
            ),
            _ => (Method::GET, "/auth/me".to_string(), true, StatusCode::OK),
        })
        .collect();

    let responses = test.runtime.block_on(async {
        let tasks = cases.iter().map(|(method, path, with_token, _)| {
            let router = test.router.clone();
            let token = with_token.then_some(token.as_str());
            let request = request(method.clone(), path, token);
            tokio::spawn(send_to(router, request))
        });
        join_all(tasks).await
    });

    for ((method, path, _, expected), response) in cases.iter().zip(responses) {
        #[allow(clippy::expect_used)]
        let response = response.expect("request task panicked");
        assert_eq!(response.status, *expected, "{method} {path}");
    }
}
