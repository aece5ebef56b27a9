//! Validated, ordered rule tables.
//!
//! # Pre-conditions
//! - Rules are supplied in priority order, most specific first.
//!
//! # Post-conditions
//! - A `RuleTable` is never empty and always ends with the catch-all rule.
//! - No rule in a `RuleTable` is fully shadowed by an earlier one.
//!
//! # Invariants
//! - A `RuleTable` is immutable once built.

use std::fmt;

use super::evaluator::{AuthState, Decision, RequestDescriptor, evaluate, matching_rule};
use super::pattern::{PathPattern, PatternError};
use super::rule::{MethodPattern, Requirement, Rule};

/// Error returned when a rule table fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleTableError {
    /// The table has no rules.
    Empty,
    /// The pattern of the rule at `index` could not be parsed.
    InvalidPattern {
        index: usize,
        pattern: String,
        source: PatternError,
    },
    /// The final rule is not `* /** authenticated`.
    MissingCatchAll,
    /// The rule at `index` can never be reached because the rule at
    /// `shadowed_by` matches everything it matches.
    UnreachableRule {
        index: usize,
        rule: String,
        shadowed_by: usize,
    },
}

impl fmt::Display for RuleTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "rule table must not be empty"),
            Self::InvalidPattern {
                index,
                pattern,
                source,
            } => write!(f, "rule {index}: invalid pattern '{pattern}': {source}"),
            Self::MissingCatchAll => write!(
                f,
                "rule table must end with the catch-all rule '* /** authenticated'"
            ),
            Self::UnreachableRule {
                index,
                rule,
                shadowed_by,
            } => write!(
                f,
                "rule {index} ('{rule}') is unreachable: shadowed by rule {shadowed_by}"
            ),
        }
    }
}

impl std::error::Error for RuleTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Empty | Self::MissingCatchAll | Self::UnreachableRule { .. } => None,
        }
    }
}

/// An ordered, validated list of access rules.
///
/// Built once at startup and shared read-only between request tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Validate `rules` and freeze them into a table.
    ///
    /// Rule indexes in errors are zero-based positions in `rules`.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleTableError> {
        let Some(last) = rules.last() else {
            return Err(RuleTableError::Empty);
        };
        if !last.is_catch_all() {
            return Err(RuleTableError::MissingCatchAll);
        }

        for (index, rule) in rules.iter().enumerate() {
            let shadowed_by = rules[..index]
                .iter()
                .position(|earlier| earlier.shadows(rule));
            if let Some(shadowed_by) = shadowed_by {
                return Err(RuleTableError::UnreachableRule {
                    index,
                    rule: rule.to_string(),
                    shadowed_by,
                });
            }
        }

        Ok(Self { rules })
    }

    #[must_use]
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::default()
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn evaluate(&self, request: &RequestDescriptor<'_>, auth: AuthState) -> Decision {
        evaluate(request, auth, &self.rules)
    }

    /// The rule that decides `request`.
    #[must_use]
    pub fn decisive_rule(&self, request: &RequestDescriptor<'_>) -> Option<&Rule> {
        matching_rule(request, &self.rules).map(|index| &self.rules[index])
    }
}

/// Fluent construction of a `RuleTable`, in declaration order.
///
/// Patterns are kept as written and parsed when `build` is called, so a bad
/// pattern is reported together with its position.
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    entries: Vec<(MethodPattern, String, Requirement)>,
}

impl RuleTableBuilder {
    #[must_use]
    pub fn rule(
        mut self,
        method: impl Into<MethodPattern>,
        pattern: impl Into<String>,
        requirement: Requirement,
    ) -> Self {
        self.entries.push((method.into(), pattern.into(), requirement));
        self
    }

    /// Add one rule per pattern, all sharing `method` and `requirement`.
    #[must_use]
    pub fn rules<I, S>(
        mut self,
        method: impl Into<MethodPattern>,
        patterns: I,
        requirement: Requirement,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let method = method.into();
        for pattern in patterns {
            self.entries.push((method.clone(), pattern.into(), requirement));
        }
        self
    }

    #[must_use]
    pub fn permit_all<I, S>(self, method: impl Into<MethodPattern>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules(method, patterns, Requirement::Public)
    }

    #[must_use]
    pub fn authenticated<I, S>(self, method: impl Into<MethodPattern>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules(method, patterns, Requirement::Authenticated)
    }

    /// Append the catch-all rule.
    #[must_use]
    pub fn any_request_authenticated(self) -> Self {
        self.rule(MethodPattern::Any, "/**", Requirement::Authenticated)
    }

    pub fn build(self) -> Result<RuleTable, RuleTableError> {
        let mut rules = Vec::with_capacity(self.entries.len());
        for (index, (method, pattern, requirement)) in self.entries.into_iter().enumerate() {
            let path = PathPattern::parse(&pattern).map_err(|source| {
                RuleTableError::InvalidPattern {
                    index,
                    pattern,
                    source,
                }
            })?;
            rules.push(Rule::new(method, path, requirement));
        }
        RuleTable::new(rules)
    }
}
