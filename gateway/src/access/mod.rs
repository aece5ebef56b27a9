//! Route access control.
//!
//! Requests are decided against an ordered table of rules: the first rule
//! whose method and path match the request decides whether it may proceed.
//!
//! # Pre-conditions
//! - Rule tables are constructed once at startup.
//!
//! # Post-conditions
//! - Every request receives exactly one `Decision`.
//!
//! # Invariants
//! - A loaded `RuleTable` always ends with the catch-all rule.
//! - Evaluation never mutates the table and holds no per-request state.

pub mod evaluator;
pub mod gallery;
pub mod pattern;
pub mod rule;
pub mod rules_file;
pub mod table;

pub use evaluator::{AuthState, Decision, RequestDescriptor, evaluate};
pub use gallery::gallery_rules;
pub use pattern::{PathPattern, PatternError, Segment};
pub use rule::{MethodPattern, Requirement, Rule};
pub use rules_file::{RuleParseError, load_rules_file, parse_rules};
pub use table::{RuleTable, RuleTableBuilder, RuleTableError};
