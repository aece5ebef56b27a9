//! Rule tables loaded from a plain-text rules file.
//!
//! One rule per line, in priority order:
//!
//! ```text
//! # method  pattern           requirement
//! GET       /arts/{id}        public
//! *         /interactions/**  authenticated
//! *         /**               authenticated
//! ```
//!
//! The method is an HTTP method token, or `*`/`ANY` for any method. The
//! requirement is `public` (alias `permit`) or `authenticated` (alias
//! `auth`). Blank lines and lines starting with `#` are ignored.

use std::fmt;
use std::path::Path;

use axum::http::Method;

use super::pattern::PathPattern;
use super::rule::{MethodPattern, Requirement, Rule};
use super::table::{RuleTable, RuleTableError};

/// Error returned when loading a rules file fails.
#[derive(Debug)]
pub enum RuleParseError {
    /// The file could not be read.
    Io(std::io::Error),
    /// A line is malformed, or the rule it declares is invalid or unreachable.
    Syntax {
        /// 1-based line number.
        line: usize,
        reason: String,
    },
    /// The parsed rules do not form a valid table.
    Table(RuleTableError),
}

impl fmt::Display for RuleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read rules file: {e}"),
            Self::Syntax { line, reason } => write!(f, "line {line}: {reason}"),
            Self::Table(e) => write!(f, "invalid rule table: {e}"),
        }
    }
}

impl std::error::Error for RuleParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Table(e) => Some(e),
            Self::Syntax { .. } => None,
        }
    }
}

impl From<std::io::Error> for RuleParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<RuleTableError> for RuleParseError {
    fn from(e: RuleTableError) -> Self {
        Self::Table(e)
    }
}

/// Read and validate the rules file at `path`.
pub fn load_rules_file(path: &Path) -> Result<RuleTable, RuleParseError> {
    let source = std::fs::read_to_string(path)?;
    parse_rules(&source)
}

/// Parse rules from the text of a rules file.
///
/// Errors tied to a single rule report the 1-based line it was written on.
pub fn parse_rules(source: &str) -> Result<RuleTable, RuleParseError> {
    let mut rules = Vec::new();
    let mut lines = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_number = index + 1;
        let syntax = |reason: String| RuleParseError::Syntax {
            line: line_number,
            reason,
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [method, pattern, requirement] = fields.as_slice() else {
            return Err(syntax(format!(
                "expected 'METHOD PATTERN REQUIREMENT', found {} field(s)",
                fields.len()
            )));
        };

        let method = parse_method(method).map_err(syntax)?;
        let path = PathPattern::parse(pattern)
            .map_err(|e| syntax(format!("invalid pattern '{pattern}': {e}")))?;
        let requirement = parse_requirement(requirement).map_err(syntax)?;
        rules.push(Rule::new(method, path, requirement));
        lines.push(line_number);
    }

    RuleTable::new(rules).map_err(|e| match e {
        RuleTableError::UnreachableRule {
            index,
            rule,
            shadowed_by,
        } => RuleParseError::Syntax {
            line: lines[index],
            reason: format!(
                "rule '{rule}' is unreachable: shadowed by the rule on line {}",
                lines[shadowed_by]
            ),
        },
        other => RuleParseError::Table(other),
    })
}

fn parse_method(token: &str) -> Result<MethodPattern, String> {
    if token == "*" || token.eq_ignore_ascii_case("any") {
        return Ok(MethodPattern::Any);
    }
    Method::from_bytes(token.to_ascii_uppercase().as_bytes())
        .map(MethodPattern::Exact)
        .map_err(|_| format!("invalid method '{token}'"))
}

fn parse_requirement(token: &str) -> Result<Requirement, String> {
    match token.to_ascii_lowercase().as_str() {
        "public" | "permit" => Ok(Requirement::Public),
        "authenticated" | "auth" => Ok(Requirement::Authenticated),
        _ => Err(format!(
            "invalid requirement '{token}' (expected 'public' or 'authenticated')"
        )),
    }
}
