//! First-match access evaluation.
//!
//! # Pre-conditions
//! - The request path is rooted at `/`.
//!
//! # Post-conditions
//! - Exactly one `Decision` is produced per call.
//!
//! # Invariants
//! - Evaluation is pure: the same inputs always produce the same decision.
//! - A request that matches no rule is denied.

use super::rule::{Requirement, Rule};

/// The parts of an incoming request that access rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestDescriptor<'a> {
    pub method: &'a str,
    pub path: &'a str,
}

impl<'a> RequestDescriptor<'a> {
    #[must_use]
    pub const fn new(method: &'a str, path: &'a str) -> Self {
        Self { method, path }
    }
}

/// Whether the current request carries a verified identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthState {
    pub is_authenticated: bool,
}

impl AuthState {
    pub const ANONYMOUS: Self = Self {
        is_authenticated: false,
    };
    pub const AUTHENTICATED: Self = Self {
        is_authenticated: true,
    };
}

/// Outcome of evaluating a request against a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decide a request against an ordered list of rules.
///
/// The first rule whose method and path both match decides: `Public`
/// allows, `Authenticated` allows only when `auth` is authenticated.
/// When nothing matches the request is denied.
#[must_use]
pub fn evaluate(request: &RequestDescriptor<'_>, auth: AuthState, rules: &[Rule]) -> Decision {
    rules
        .iter()
        .find(|rule| rule.matches(request.method, request.path))
        .map_or(Decision::Deny, |rule| apply(rule.requirement, auth))
}

/// Index of the rule that decides `request`, if any.
#[must_use]
pub fn matching_rule(request: &RequestDescriptor<'_>, rules: &[Rule]) -> Option<usize> {
    rules
        .iter()
        .position(|rule| rule.matches(request.method, request.path))
}

const fn apply(requirement: Requirement, auth: AuthState) -> Decision {
    match requirement {
        Requirement::Public => Decision::Allow,
        Requirement::Authenticated if auth.is_authenticated => Decision::Allow,
        Requirement::Authenticated => Decision::Deny,
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Method;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::access::pattern::PathPattern;
    use crate::access::rule::MethodPattern;

    fn rule(method: MethodPattern, path: &str, requirement: Requirement) -> Rule {
        Rule::new(
            method,
            PathPattern::parse(path).expect("valid pattern"),
            requirement,
        )
    }

    fn get() -> MethodPattern {
        MethodPattern::Exact(Method::GET)
    }

    #[test]
    fn test_public_exact_path_allows_anonymous() {
        let rules = [
            rule(get(), "/arts/public", Requirement::Public),
            Rule::catch_all(),
        ];
        let request = RequestDescriptor::new("GET", "/arts/public");
        assert_eq!(
            evaluate(&request, AuthState::ANONYMOUS, &rules),
            Decision::Allow
        );
    }

    #[test]
    fn test_method_mismatch_falls_through_to_catch_all() {
        let rules = [
            rule(get(), "/arts/public", Requirement::Public),
            Rule::catch_all(),
        ];
        let request = RequestDescriptor::new("POST", "/arts/public");
        assert_eq!(
            evaluate(&request, AuthState::ANONYMOUS, &rules),
            Decision::Deny
        );
        assert_eq!(matching_rule(&request, &rules), Some(1));
    }

    #[test]
    fn test_placeholder_allows_single_segment() {
        let rules = [
            rule(get(), "/arts/{id}", Requirement::Public),
            Rule::catch_all(),
        ];
        let request = RequestDescriptor::new("GET", "/arts/42");
        assert_eq!(
            evaluate(&request, AuthState::ANONYMOUS, &rules),
            Decision::Allow
        );
    }

    #[test]
    fn test_placeholder_does_not_cover_nested_paths() {
        let rules = [
            rule(get(), "/arts/{id}", Requirement::Public),
            Rule::catch_all(),
        ];
        let request = RequestDescriptor::new("GET", "/arts/42/comments");
        assert_eq!(
            evaluate(&request, AuthState::ANONYMOUS, &rules),
            Decision::Deny
        );
        assert_eq!(
            evaluate(&request, AuthState::AUTHENTICATED, &rules),
            Decision::Allow
        );
    }

    #[test]
    fn test_trailing_wildcard_allows_authenticated() {
        let rules = [rule(
            MethodPattern::Exact(Method::POST),
            "/interactions/**",
            Requirement::Authenticated,
        )];
        let request = RequestDescriptor::new("POST", "/interactions/like/7");
        assert_eq!(
            evaluate(&request, AuthState::AUTHENTICATED, &rules),
            Decision::Allow
        );
    }

    #[test]
    fn test_catch_all_denies_anonymous() {
        let rules = [Rule::catch_all()];
        let request = RequestDescriptor::new("GET", "/anything");
        assert_eq!(
            evaluate(&request, AuthState::ANONYMOUS, &rules),
            Decision::Deny
        );
    }

    #[test]
    fn test_no_match_fails_closed() {
        let rules = [rule(get(), "/categories", Requirement::Public)];
        let request = RequestDescriptor::new("GET", "/other");
        assert_eq!(
            evaluate(&request, AuthState::AUTHENTICATED, &rules),
            Decision::Deny
        );
        assert_eq!(evaluate(&request, AuthState::AUTHENTICATED, &[]), Decision::Deny);
    }

    #[test]
    fn test_lowercase_request_method_matches() {
        let rules = [rule(get(), "/categories", Requirement::Public)];
        let request = RequestDescriptor::new("get", "/categories");
        assert_eq!(
            evaluate(&request, AuthState::ANONYMOUS, &rules),
            Decision::Allow
        );
    }

    const METHODS: [&str; 6] = ["GET", "POST", "PUT", "DELETE", "PATCH", "options"];
    const SEGMENTS: [&str; 8] = [
        "arts",
        "public",
        "42",
        "interactions",
        "like",
        "auth",
        "me",
        "",
    ];

    fn random_request(rng: &mut StdRng) -> (String, String) {
        let method = METHODS[rng.random_range(0..METHODS.len())].to_string();
        let depth = rng.random_range(0..5);
        let mut path = String::new();
        for _ in 0..depth {
            path.push('/');
            path.push_str(SEGMENTS[rng.random_range(0..SEGMENTS.len())]);
        }
        if path.is_empty() {
            path.push('/');
        }
        (method, path)
    }

    fn sample_rules() -> Vec<Rule> {
        vec![
            rule(MethodPattern::Any, "/auth/login", Requirement::Public),
            rule(get(), "/arts/public", Requirement::Public),
            rule(get(), "/arts/{id}", Requirement::Public),
            rule(
                MethodPattern::Exact(Method::POST),
                "/arts/**",
                Requirement::Authenticated,
            ),
            rule(MethodPattern::Any, "/interactions/**", Requirement::Authenticated),
            rule(MethodPattern::Any, "/public/**", Requirement::Public),
            Rule::catch_all(),
        ]
    }

    #[test]
    fn test_generated_requests_always_decided_by_some_rule() {
        let rules = sample_rules();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let (method, path) = random_request(&mut rng);
            let request = RequestDescriptor::new(&method, &path);
            assert!(
                matching_rule(&request, &rules).is_some(),
                "no rule matched {method} {path}"
            );
        }
    }

    #[test]
    fn test_generated_requests_are_idempotent() {
        let rules = sample_rules();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2_000 {
            let (method, path) = random_request(&mut rng);
            let auth = AuthState {
                is_authenticated: rng.random_bool(0.5),
            };
            let request = RequestDescriptor::new(&method, &path);
            assert_eq!(
                evaluate(&request, auth, &rules),
                evaluate(&request, auth, &rules),
                "decision changed for {method} {path}"
            );
        }
    }

    #[test]
    fn test_generated_requests_decided_by_first_matching_rule_alone() {
        let rules = sample_rules();
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..2_000 {
            let (method, path) = random_request(&mut rng);
            let auth = AuthState {
                is_authenticated: rng.random_bool(0.5),
            };
            let request = RequestDescriptor::new(&method, &path);
            let Some(first) = matching_rule(&request, &rules) else {
                panic!("no rule matched {method} {path}");
            };
            assert_eq!(
                evaluate(&request, auth, &rules),
                evaluate(&request, auth, std::slice::from_ref(&rules[first])),
                "first-match mismatch for {method} {path}"
            );
        }
    }
}
