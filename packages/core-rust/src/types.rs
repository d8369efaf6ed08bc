use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A `{text, value}` pair offered by select-style renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Label shown to the user.
    pub text: String,
    /// Value stored in the record when this option is picked.
    pub value: Value,
}

impl SelectOption {
    /// Creates an option whose label and value are the same string.
    #[must_use]
    pub fn same(label: impl Into<String>) -> Self {
        let text = label.into();
        Self {
            value: Value::String(text.clone()),
            text,
        }
    }
}

impl From<SelectOption> for Value {
    fn from(option: SelectOption) -> Self {
        serde_json::json!({ "text": option.text, "value": option.value })
    }
}

/// Named client-side route with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Route name registered with the UI router.
    pub name: String,
    /// Path parameters, e.g. `{"id": "1100001"}`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub params: BTreeMap<String, String>,
}

impl Route {
    /// Creates a route without parameters.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    /// Adds a path parameter, returning `self` for chaining.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Checked/unchecked values written by toggle renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleValues {
    /// Value written when the toggle is on.
    pub checked: String,
    /// Value written when the toggle is off.
    pub unchecked: String,
}

impl ToggleValues {
    /// The `enabled`/`disabled` pair used by most configuration toggles.
    #[must_use]
    pub fn enabled_disabled() -> Self {
        Self {
            checked: "enabled".to_string(),
            unchecked: "disabled".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_option_same_uses_label_as_value() {
        let option = SelectOption::same("en_US");
        assert_eq!(option.text, "en_US");
        assert_eq!(option.value, json!("en_US"));
    }

    #[test]
    fn route_serializes_params_only_when_present() {
        let bare = serde_json::to_value(Route::named("security_events")).unwrap();
        assert_eq!(bare, json!({ "name": "security_events" }));

        let with = serde_json::to_value(Route::named("security_event").with_param("id", "3"))
            .unwrap();
        assert_eq!(with, json!({ "name": "security_event", "params": { "id": "3" } }));
    }
}
