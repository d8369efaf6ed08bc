//! Static catalogs of actions, authentication conditions, shared view fields,
//! and shared list columns.
//!
//! Catalog entries are authored directly rather than derived from schema
//! metadata. The English tables are built once per process on first access
//! and never mutated afterwards; [`actions::build`] and
//! [`conditions::build`] produce localized copies.

pub mod actions;
pub mod conditions;
pub mod database;
pub mod fields;
pub mod lists;
pub mod view_fields;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::context::RecordContext;
use crate::validators::RuleSet;

pub use fields::{AuthConditionType, FieldType};

// ---------------------------------------------------------------------------
// CatalogEntry
// ---------------------------------------------------------------------------

/// One selectable action or condition.
///
/// `validators` maps a sub-field of the edited entry (`type`, `operator`,
/// `value`) to the rules applied to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry<K> {
    /// Value stored in the entry's selector field.
    pub value: String,
    pub text: String,
    pub types: Vec<K>,
    /// Relative date shortcuts offered by date pickers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub moments: Vec<String>,
    pub validators: BTreeMap<String, RuleSet>,
}

impl<K> CatalogEntry<K> {
    #[must_use]
    pub fn new(value: impl Into<String>, text: impl Into<String>, types: Vec<K>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            types,
            moments: Vec::new(),
            validators: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_moments(mut self, moments: &[&str]) -> Self {
        self.moments = moments.iter().map(ToString::to_string).collect();
        self
    }

    /// Attaches the rules of sub-field `field`.
    #[must_use]
    pub fn with_validators(mut self, field: impl Into<String>, rules: RuleSet) -> Self {
        self.validators.insert(field.into(), rules);
        self
    }

    /// Failures of the entry at `ctx.index`, as `(sub-field, message)` pairs.
    #[must_use]
    pub fn failures<'a>(&'a self, ctx: &RecordContext) -> Vec<(&'a str, &'a str)> {
        let entry = ctx.current().unwrap_or(&Value::Null);
        self.validators
            .iter()
            .flat_map(|(field, rules)| {
                let value = entry.get(field).unwrap_or(&Value::Null);
                rules
                    .failures(value, ctx)
                    .into_iter()
                    .map(move |message| (field.as_str(), message))
            })
            .collect()
    }
}

/// Catalog keyed by entry name.
pub type EntryTable<K> = BTreeMap<String, CatalogEntry<K>>;

/// First entry of `table` whose stored value is `value`.
#[must_use]
pub fn find_by_value<'a, K>(table: &'a EntryTable<K>, value: &str) -> Option<&'a CatalogEntry<K>> {
    table.values().find(|entry| entry.value == value)
}

// ---------------------------------------------------------------------------
// Entry list validation
// ---------------------------------------------------------------------------

/// A failed rule of one entry in a multi-entry list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
    pub index: usize,
    pub field: String,
    pub message: String,
}

/// Validates every entry of `entries` against the catalog entry named by its
/// `selector` field (`type` for actions, `attribute` for conditions).
///
/// Entries whose selector matches nothing in `table` are skipped.
#[must_use]
pub fn validate_entries<K>(
    table: &EntryTable<K>,
    selector: &str,
    entries: &[Value],
) -> Vec<EntryFailure> {
    let mut failures = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(catalog_entry) = entry
            .get(selector)
            .and_then(Value::as_str)
            .and_then(|value| find_by_value(table, value))
        else {
            continue;
        };
        let ctx = RecordContext::for_entry(entries.to_vec(), index);
        for (field, message) in catalog_entry.failures(&ctx) {
            failures.push(EntryFailure {
                index,
                field: field.to_string(),
                message: message.to_string(),
            });
        }
    }
    failures
}
