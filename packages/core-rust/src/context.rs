use std::collections::BTreeSet;

use serde_json::Value;

/// Record being edited, as seen by cross-field rules.
///
/// Built by the form session on every edit and passed to each rule
/// evaluation. Field-level rules ignore it; sibling rules read `siblings` and
/// `index`; uniqueness rules read the creation flags and `existing`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordContext {
    /// All entries of the multi-entry list (actions, conditions) in order,
    /// including the one being validated.
    pub siblings: Vec<Value>,
    /// Position of the entry being validated within `siblings`.
    pub index: Option<usize>,
    /// The form creates a new object.
    pub is_new: bool,
    /// The form creates a copy of an existing object.
    pub is_clone: bool,
    /// Identifiers already taken. `None` until the candidate set has loaded.
    pub existing: Option<BTreeSet<String>>,
}

impl RecordContext {
    /// Context for validating entry `index` of `siblings`.
    #[must_use]
    pub fn for_entry(siblings: Vec<Value>, index: usize) -> Self {
        Self {
            siblings,
            index: Some(index),
            ..Self::default()
        }
    }

    /// Context for a creation flow checked against `existing` identifiers.
    #[must_use]
    pub fn creating<I, S>(existing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_new: true,
            existing: Some(existing.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Whether uniqueness checks apply (new or cloned object).
    #[must_use]
    pub fn is_creating(&self) -> bool {
        self.is_new || self.is_clone
    }

    /// Entries other than the one being validated.
    pub fn others(&self) -> impl Iterator<Item = &Value> {
        let index = self.index;
        self.siblings
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != index)
            .map(|(_, entry)| entry)
    }

    /// The entry being validated, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Value> {
        self.siblings.get(self.index?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn others_skips_current_entry() {
        let ctx = RecordContext::for_entry(
            vec![json!({"type": "a"}), json!({"type": "b"}), json!({"type": "c"})],
            1,
        );
        let others: Vec<_> = ctx.others().collect();
        assert_eq!(others, vec![&json!({"type": "a"}), &json!({"type": "c"})]);
        assert_eq!(ctx.current(), Some(&json!({"type": "b"})));
    }

    #[test]
    fn others_without_index_yields_everything() {
        let ctx = RecordContext {
            siblings: vec![json!(1), json!(2)],
            ..RecordContext::default()
        };
        assert_eq!(ctx.others().count(), 2);
        assert!(ctx.current().is_none());
    }

    #[test]
    fn creating_sets_flags_and_candidates() {
        let ctx = RecordContext::creating(["file", "ldap"]);
        assert!(ctx.is_creating());
        assert!(ctx.existing.unwrap().contains("ldap"));
        assert!(!RecordContext::default().is_creating());
    }
}
