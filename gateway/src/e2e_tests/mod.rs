//! End-to-end tests at the HTTP request/response level.
//!
//! Each test file covers a specific scenario, driving the full router
//! (tracing, CORS, access gate, handlers) with in-memory requests.

#![cfg(test)]

mod helpers;

mod test_concurrent_requests;
mod test_cors;
mod test_custom_rules;
mod test_determinism;
mod test_identity;
mod test_protected_routes;
mod test_public_routes;
