//! Validation rules.
//!
//! A [`Rule`] is a predicate over a field value and the [`RecordContext`] it
//! is edited in. Rules are plain data: they compare, print, and serialize, so
//! two derivations from the same schema can be checked for equality and the
//! CLI can show what a field enforces.
//!
//! The free functions in this module are the rule builders used by the
//! derivers and the static catalogs. [`RuleSet`] groups rules under their
//! failure messages.

pub mod date;
pub mod primitives;
pub mod rule_set;
pub mod siblings;

use std::fmt;

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::context::RecordContext;

pub use date::{DateComparison, DateFormat, DateOperator};
pub use rule_set::RuleSet;

// ---------------------------------------------------------------------------
// CompiledPattern
// ---------------------------------------------------------------------------

/// A compiled regular expression compared and printed by its source text.
#[derive(Clone)]
pub struct CompiledPattern(Regex);

impl CompiledPattern {
    /// Compiles `source`.
    ///
    /// # Errors
    ///
    /// Returns the compiler error when `source` is not a valid expression.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompiledPattern").field(&self.as_str()).finish()
    }
}

impl Serialize for CompiledPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// A validation predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Required,
    MinValue(f64),
    MaxValue(f64),
    MinLength(usize),
    MaxLength(usize),
    Pattern(CompiledPattern),
    Integer,
    Numeric,
    AlphaNum,
    IpAddress,
    Hex,
    Fqdn,
    Port,
    CompareDate(DateComparison),
    DateFormat(DateFormat),
    /// Every listed value appears in `field` of some other entry.
    RequireAllSiblingFields { field: String, values: Vec<String> },
    /// At least one listed value appears in `field` of some other entry.
    RequireAnySiblingFields { field: String, values: Vec<String> },
    /// No listed value appears in `field` of any other entry.
    RestrictAllSiblingFields { field: String, values: Vec<String> },
    /// At most `limit` other entries share this entry's `field` value.
    LimitSiblingFields { field: String, limit: usize },
    /// The candidate set of existing identifiers has loaded.
    HasSources,
    /// The value is already taken by an existing identifier.
    SourceExists,
    /// Constant outcome fixed when the rule was built.
    Conditional(bool),
    And(Vec<Rule>),
    Not(Box<Rule>),
}

impl Rule {
    /// Evaluates the rule against `value` edited within `ctx`.
    #[must_use]
    pub fn check(&self, value: &Value, ctx: &RecordContext) -> bool {
        match self {
            Self::Required => primitives::required(value),
            Self::MinValue(min) => primitives::min_value(value, *min),
            Self::MaxValue(max) => primitives::max_value(value, *max),
            Self::MinLength(min) => primitives::min_length(value, *min),
            Self::MaxLength(max) => primitives::max_length(value, *max),
            Self::Pattern(pattern) => {
                !primitives::is_present(value)
                    || primitives::text_of(value).is_some_and(|text| pattern.is_match(&text))
            }
            Self::Integer => primitives::integer(value),
            Self::Numeric => primitives::numeric(value),
            Self::AlphaNum => primitives::alpha_num(value),
            Self::IpAddress => primitives::ip_address(value),
            Self::Hex => primitives::hex(value),
            Self::Fqdn => primitives::fqdn(value),
            Self::Port => primitives::port(value),
            Self::CompareDate(comparison) => comparison.check(value),
            Self::DateFormat(format) => date::is_date_format(value, format),
            Self::RequireAllSiblingFields { field, values } => {
                siblings::require_all(ctx, field, values)
            }
            Self::RequireAnySiblingFields { field, values } => {
                siblings::require_any(ctx, field, values)
            }
            Self::RestrictAllSiblingFields { field, values } => {
                siblings::restrict_all(ctx, field, values)
            }
            Self::LimitSiblingFields { field, limit } => {
                siblings::limit(ctx, field, *limit, value)
            }
            Self::HasSources => siblings::has_sources(ctx),
            Self::SourceExists => siblings::source_exists(ctx, value),
            Self::Conditional(outcome) => *outcome,
            Self::And(rules) => rules.iter().all(|rule| rule.check(value, ctx)),
            Self::Not(rule) => !rule.check(value, ctx),
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

#[must_use]
pub fn required() -> Rule {
    Rule::Required
}

#[must_use]
pub fn min_value(min: f64) -> Rule {
    Rule::MinValue(min)
}

#[must_use]
pub fn max_value(max: f64) -> Rule {
    Rule::MaxValue(max)
}

#[must_use]
pub fn min_length(min: usize) -> Rule {
    Rule::MinLength(min)
}

#[must_use]
pub fn max_length(max: usize) -> Rule {
    Rule::MaxLength(max)
}

/// Regular-expression match.
///
/// # Errors
///
/// Returns the compiler error when `source` is not a valid expression.
pub fn is_pattern(source: &str) -> Result<Rule, regex::Error> {
    CompiledPattern::new(source).map(Rule::Pattern)
}

#[must_use]
pub fn integer() -> Rule {
    Rule::Integer
}

#[must_use]
pub fn numeric() -> Rule {
    Rule::Numeric
}

#[must_use]
pub fn alpha_num() -> Rule {
    Rule::AlphaNum
}

#[must_use]
pub fn ip_address() -> Rule {
    Rule::IpAddress
}

#[must_use]
pub fn is_hex() -> Rule {
    Rule::Hex
}

#[must_use]
pub fn is_fqdn() -> Rule {
    Rule::Fqdn
}

#[must_use]
pub fn is_port() -> Rule {
    Rule::Port
}

/// Date comparison against `reference`; empty and all-zero values yield
/// `allow_zero`.
#[must_use]
pub fn compare_date(
    operator: DateOperator,
    reference: chrono::NaiveDateTime,
    format: DateFormat,
    allow_zero: bool,
) -> Rule {
    Rule::CompareDate(DateComparison {
        operator,
        reference,
        format,
        allow_zero,
    })
}

#[must_use]
pub fn is_date_format(format: DateFormat) -> Rule {
    Rule::DateFormat(format)
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[must_use]
pub fn require_all_sibling_fields(field: &str, values: &[&str]) -> Rule {
    Rule::RequireAllSiblingFields {
        field: field.to_string(),
        values: owned(values),
    }
}

#[must_use]
pub fn require_any_sibling_fields(field: &str, values: &[&str]) -> Rule {
    Rule::RequireAnySiblingFields {
        field: field.to_string(),
        values: owned(values),
    }
}

#[must_use]
pub fn restrict_all_sibling_fields(field: &str, values: &[&str]) -> Rule {
    Rule::RestrictAllSiblingFields {
        field: field.to_string(),
        values: owned(values),
    }
}

#[must_use]
pub fn limit_sibling_fields(field: &str, limit: usize) -> Rule {
    Rule::LimitSiblingFields {
        field: field.to_string(),
        limit,
    }
}

#[must_use]
pub fn has_sources() -> Rule {
    Rule::HasSources
}

#[must_use]
pub fn source_exists() -> Rule {
    Rule::SourceExists
}

#[must_use]
pub fn conditional(outcome: bool) -> Rule {
    Rule::Conditional(outcome)
}

#[must_use]
pub fn and(rules: Vec<Rule>) -> Rule {
    Rule::And(rules)
}

#[must_use]
pub fn not(rule: Rule) -> Rule {
    Rule::Not(Box::new(rule))
}
