//! Access rules: a method pattern, a path pattern and a requirement.

use std::fmt;

use axum::http::Method;

use super::pattern::PathPattern;

/// Which request methods a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodPattern {
    /// Any request method.
    Any,
    /// A single method, compared case-insensitively.
    Exact(Method),
}

impl MethodPattern {
    #[must_use]
    pub fn matches(&self, method: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => expected.as_str().eq_ignore_ascii_case(method),
        }
    }

    /// Whether every method matched by `other` is also matched by `self`.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Any, _) => true,
            (Self::Exact(_), Self::Any) => false,
            (Self::Exact(ours), Self::Exact(theirs)) => {
                ours.as_str().eq_ignore_ascii_case(theirs.as_str())
            }
        }
    }
}

impl fmt::Display for MethodPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "*"),
            Self::Exact(method) => write!(f, "{method}"),
        }
    }
}

impl From<Method> for MethodPattern {
    fn from(method: Method) -> Self {
        Self::Exact(method)
    }
}

/// What a request must carry to be let through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// No identity needed.
    Public,
    /// A verified identity is needed.
    Authenticated,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// One entry of a rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub method: MethodPattern,
    pub path: PathPattern,
    pub requirement: Requirement,
}

impl Rule {
    #[must_use]
    pub const fn new(method: MethodPattern, path: PathPattern, requirement: Requirement) -> Self {
        Self {
            method,
            path,
            requirement,
        }
    }

    /// The final rule of every table: any method, any path, authenticated.
    #[must_use]
    pub fn catch_all() -> Self {
        Self::new(
            MethodPattern::Any,
            PathPattern::any(),
            Requirement::Authenticated,
        )
    }

    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.method == MethodPattern::Any
            && self.path.is_any()
            && self.requirement == Requirement::Authenticated
    }

    #[must_use]
    pub fn matches(&self, method: &str, path: &str) -> bool {
        self.method.matches(method) && self.path.matches(path)
    }

    /// Whether this rule matches every request that `later` could match.
    #[must_use]
    pub fn shadows(&self, later: &Self) -> bool {
        self.method.covers(&later.method) && self.path.covers(&later.path)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.path, self.requirement)
    }
}
