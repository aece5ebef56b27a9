// Life of a request:
// 1. CORS: preflight requests are answered here; other responses get CORS headers
// 2. Bearer token (if any) is verified into an identity
// 3. The method + path is decided against the rule table, first match wins
// 4. Denied: 401 without reaching a handler
//    Allowed: the handler runs, with the identity in the request extensions
//
// System components:
//  - Rule table (built once at startup, shared read-only)
//  - Token verifier
//  - Access gate middleware

pub mod access;
pub mod auth;
pub mod config;
pub mod cors;
mod e2e_tests;
pub mod gate;
pub mod server;
#[cfg(test)]
mod testing;
