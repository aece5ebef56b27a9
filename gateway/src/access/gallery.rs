//! The built-in rule table for the gallery API.

use axum::http::Method;

use super::rule::MethodPattern;
use super::table::{RuleTable, RuleTableError};

/// Build the gallery's rule table.
///
/// Public routes come first, then the routes that need a token, then the
/// catch-all. `GET /arts/{id}` precedes `/arts/my-artworks`, so a `GET` of
/// `/arts/my-artworks` is decided by the public rule.
pub fn gallery_rules() -> Result<RuleTable, RuleTableError> {
    RuleTable::builder()
        // Authentication endpoints
        .permit_all(
            MethodPattern::Any,
            [
                "/auth/register",
                "/auth/login",
                "/auth/verify",
                "/auth/resend-verification",
            ],
        )
        // Public art endpoints
        .permit_all(Method::GET, ["/arts/public", "/arts/{id}", "/categories"])
        // API docs
        .permit_all(MethodPattern::Any, ["/swagger-ui/**", "/v3/api-docs/**"])
        .permit_all(MethodPattern::Any, ["/error"])
        .authenticated(
            MethodPattern::Any,
            ["/auth/me", "/auth/logout", "/arts/my-artworks"],
        )
        .authenticated(Method::POST, ["/arts/**"])
        .authenticated(Method::PUT, ["/arts/**"])
        .authenticated(Method::DELETE, ["/arts/**"])
        .authenticated(MethodPattern::Any, ["/interactions/**"])
        .any_request_authenticated()
        .build()
}
