//! Textual date checks.
//!
//! Dates travel as strings laid out by a moment-style format such as
//! `YYYY-MM-DD HH:mm:ss`. [`DateFormat`] translates that layout into a
//! `chrono` format string. The all-zero rendering of the layout
//! (`0000-00-00 00:00:00`) is the database's "no date" marker and is handled
//! separately from parse failures.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::primitives::is_present;

/// Moment-style tokens and their `chrono` equivalents, longest first.
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("mm", "%M"),
    ("ss", "%S"),
];

// ---------------------------------------------------------------------------
// DateFormat
// ---------------------------------------------------------------------------

/// A textual date layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DateFormat {
    layout: String,
    strftime: String,
    has_time: bool,
}

impl DateFormat {
    /// Creates a format from a moment-style layout.
    #[must_use]
    pub fn new(layout: impl Into<String>) -> Self {
        let layout = layout.into();
        let mut strftime = String::with_capacity(layout.len());
        let mut has_time = false;
        let mut rest = layout.as_str();
        'scan: while !rest.is_empty() {
            for (token, directive) in TOKENS {
                if let Some(tail) = rest.strip_prefix(token) {
                    strftime.push_str(directive);
                    has_time |= matches!(*token, "HH" | "mm" | "ss");
                    rest = tail;
                    continue 'scan;
                }
            }
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                if c == '%' {
                    strftime.push_str("%%");
                } else {
                    strftime.push(c);
                }
            }
            rest = chars.as_str();
        }
        Self {
            layout,
            strftime,
            has_time,
        }
    }

    /// The moment-style layout this format was created from.
    #[must_use]
    pub fn layout(&self) -> &str {
        &self.layout
    }

    /// The layout rendered with every letter replaced by `0`.
    #[must_use]
    pub fn zero_value(&self) -> String {
        self.layout
            .chars()
            .map(|c| if c.is_ascii_alphabetic() { '0' } else { c })
            .collect()
    }

    /// Parses `text` laid out by this format. Date-only layouts yield midnight.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        if self.has_time {
            NaiveDateTime::parse_from_str(text, &self.strftime).ok()
        } else {
            NaiveDate::parse_from_str(text, &self.strftime)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        }
    }

    /// Renders `instant` with this format.
    #[must_use]
    pub fn format(&self, instant: &NaiveDateTime) -> String {
        instant.format(&self.strftime).to_string()
    }

    /// Drops the precision this format cannot express.
    #[must_use]
    pub fn truncate(&self, instant: &NaiveDateTime) -> NaiveDateTime {
        self.parse(&self.format(instant)).unwrap_or(*instant)
    }
}

impl From<String> for DateFormat {
    fn from(layout: String) -> Self {
        Self::new(layout)
    }
}

impl From<DateFormat> for String {
    fn from(format: DateFormat) -> Self {
        format.layout
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.layout)
    }
}

// ---------------------------------------------------------------------------
// DateOperator
// ---------------------------------------------------------------------------

/// Comparison applied between a value and its reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOperator {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Ne,
}

impl DateOperator {
    /// Parses symbolic (`>=`) or mnemonic (`gte`) spellings.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            ">" | "gt" => Some(Self::Gt),
            ">=" | "gte" => Some(Self::Gte),
            "<" | "lt" => Some(Self::Lt),
            "<=" | "lte" => Some(Self::Lte),
            "=" | "==" | "===" | "eq" => Some(Self::Eq),
            "!=" | "!==" | "<>" | "ne" => Some(Self::Ne),
            _ => None,
        }
    }

    #[must_use]
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Gt => ordering == Ordering::Greater,
            Self::Gte => ordering != Ordering::Less,
            Self::Lt => ordering == Ordering::Less,
            Self::Lte => ordering != Ordering::Greater,
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
        }
    }
}

// ---------------------------------------------------------------------------
// DateComparison
// ---------------------------------------------------------------------------

/// Compares a textual date against a fixed reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateComparison {
    pub operator: DateOperator,
    /// Instant captured when the rule was built.
    pub reference: NaiveDateTime,
    pub format: DateFormat,
    /// Outcome for empty or all-zero values.
    pub allow_zero: bool,
}

impl DateComparison {
    /// Evaluates the comparison. Both sides are truncated to the precision of
    /// the format first, so "now" compares equal to the current second.
    #[must_use]
    pub fn check(&self, value: &Value) -> bool {
        let text = match value {
            Value::String(text) => text.as_str(),
            other if !is_present(other) => return self.allow_zero,
            _ => return false,
        };
        if text.is_empty() || text == self.format.zero_value() {
            return self.allow_zero;
        }
        let Some(date) = self.format.parse(text) else {
            return false;
        };
        let reference = self.format.truncate(&self.reference);
        self.operator.holds(date.cmp(&reference))
    }
}

/// Whether a value is a date laid out by `format`. Empty and all-zero values
/// pass.
#[must_use]
pub fn is_date_format(value: &Value, format: &DateFormat) -> bool {
    match value {
        Value::String(text) => {
            text.is_empty() || *text == format.zero_value() || format.parse(text).is_some()
        }
        other => !is_present(other),
    }
}
