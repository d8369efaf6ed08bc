use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::Rule;
use crate::context::RecordContext;

/// Rules of one field keyed by their localized failure message.
///
/// Entries keep insertion order. Inserting a message that is already present
/// replaces its rule in place (last write wins), so two constraints that
/// localize to the same text collapse into one entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    entries: Vec<(String, Rule)>,
}

impl RuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule under `message`, replacing any rule already stored there.
    pub fn insert(&mut self, message: impl Into<String>, rule: Rule) {
        let message = message.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == message) {
            Some((_, slot)) => *slot = rule,
            None => self.entries.push((message, rule)),
        }
    }

    /// Adds a rule, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, message: impl Into<String>, rule: Rule) -> Self {
        self.insert(message, rule);
        self
    }

    /// Inserts every entry of `other` in order.
    pub fn merge(&mut self, other: RuleSet) {
        for (message, rule) in other.entries {
            self.insert(message, rule);
        }
    }

    #[must_use]
    pub fn get(&self, message: &str) -> Option<&Rule> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == message)
            .map(|(_, rule)| rule)
    }

    #[must_use]
    pub fn contains(&self, message: &str) -> bool {
        self.get(message).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(message, _)| message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.entries.iter().map(|(message, rule)| (message.as_str(), rule))
    }

    /// Messages of every rule `value` fails, in insertion order.
    #[must_use]
    pub fn failures(&self, value: &Value, ctx: &RecordContext) -> Vec<&str> {
        self.iter()
            .filter(|(_, rule)| !rule.check(value, ctx))
            .map(|(message, _)| message)
            .collect()
    }

    /// Whether `value` passes every rule.
    #[must_use]
    pub fn is_valid(&self, value: &Value, ctx: &RecordContext) -> bool {
        self.entries.iter().all(|(_, rule)| rule.check(value, ctx))
    }
}

impl FromIterator<(String, Rule)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (String, Rule)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (message, rule) in iter {
            set.insert(message, rule);
        }
        set
    }
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (message, rule) in &self.entries {
            map.serialize_entry(message, rule)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{max_length, min_length, required};
    use serde_json::json;

    #[test]
    fn collision_keeps_position_and_last_rule() {
        let mut set = RuleSet::new()
            .with("Value required.", required())
            .with("Too long.", max_length(10));
        set.insert("Value required.", min_length(1));

        assert_eq!(set.len(), 2);
        assert_eq!(set.messages().collect::<Vec<_>>(), vec!["Value required.", "Too long."]);
        assert_eq!(set.get("Value required."), Some(&min_length(1)));
    }

    #[test]
    fn merge_applies_last_write_wins() {
        let mut base = RuleSet::new().with("Invalid.", max_length(10));
        base.merge(RuleSet::new().with("Invalid.", max_length(5)).with("Required.", required()));
        assert_eq!(base.get("Invalid."), Some(&max_length(5)));
        assert!(base.contains("Required."));
    }

    #[test]
    fn failures_lists_each_failed_message() {
        let set = RuleSet::new()
            .with("Value required.", required())
            .with("Maximum 3 characters.", max_length(3));
        let ctx = RecordContext::default();

        assert_eq!(set.failures(&json!("abcd"), &ctx), vec!["Maximum 3 characters."]);
        assert_eq!(set.failures(&json!(""), &ctx), vec!["Value required."]);
        assert!(set.is_valid(&json!("abc"), &ctx));
    }

    #[test]
    fn empty_set_accepts_anything() {
        assert!(RuleSet::new().is_valid(&json!(null), &RecordContext::default()));
    }

    #[test]
    fn serializes_as_ordered_map() {
        let set = RuleSet::new()
            .with("Value required.", required())
            .with("Maximum 3 characters.", max_length(3));
        let text = serde_json::to_string(&set).unwrap();
        assert_eq!(
            text,
            r#"{"Value required.":"required","Maximum 3 characters.":{"max_length":3}}"#
        );
    }
}
