use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{FieldType, SchemaMap};
use crate::types::{SelectOption, ToggleValues};

/// `type` hint for text-like inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Number,
    Password,
}

/// Renderer attribute hints for one field.
///
/// Every hint is optional; unset hints leave the renderer's own default in
/// place. Serializes with the camelCase names the renderers expect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub input_type: Option<InputType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub step: Option<u32>,
    /// Multi-value picker.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub multiple: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub clear_on_select: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub close_on_select: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub options: Option<Vec<Value>>,
    /// Text or number shown in an empty input.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub placeholder: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub disabled: Option<bool>,
    /// Values written by a toggle.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub values: Option<ToggleValues>,
    /// Store only the option value, not the whole option object.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub collapse_object: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub track_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

impl Attributes {
    /// Numeric input with step 1.
    #[must_use]
    pub fn number() -> Self {
        Self {
            input_type: Some(InputType::Number),
            step: Some(1),
            ..Self::default()
        }
    }

    /// Toggle writing `enabled`/`disabled`.
    #[must_use]
    pub fn toggle() -> Self {
        Self {
            values: Some(ToggleValues::enabled_disabled()),
            ..Self::default()
        }
    }

    /// Multi-value chosen picker over `{value, text}` options.
    #[must_use]
    pub fn chosen(placeholder: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            collapse_object: Some(true),
            placeholder: Some(Value::String(placeholder.into())),
            track_by: Some("value".to_string()),
            label: Some("text".to_string()),
            multiple: Some(true),
            clear_on_select: Some(false),
            close_on_select: Some(false),
            options: Some(options.into_iter().map(Value::from).collect()),
            ..Self::default()
        }
    }

    /// Whether no hint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fills every hint unset in `self` from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            input_type: self.input_type.or(fallback.input_type),
            step: self.step.or(fallback.step),
            multiple: self.multiple.or(fallback.multiple),
            clear_on_select: self.clear_on_select.or(fallback.clear_on_select),
            close_on_select: self.close_on_select.or(fallback.close_on_select),
            options: self.options.or(fallback.options),
            placeholder: self.placeholder.or(fallback.placeholder),
            disabled: self.disabled.or(fallback.disabled),
            values: self.values.or(fallback.values),
            collapse_object: self.collapse_object.or(fallback.collapse_object),
            track_by: self.track_by.or(fallback.track_by),
            label: self.label.or(fallback.label),
        }
    }
}

/// Derives renderer hints for `key` from its descriptor.
///
/// An unresolvable key yields empty attributes.
#[must_use]
pub fn attributes_from_meta(meta: &SchemaMap, key: &str) -> Attributes {
    let Some(descriptor) = meta.resolve(key) else {
        return Attributes::default();
    };
    let mut attrs = match descriptor.field_type.as_ref() {
        Some(FieldType::Array) => Attributes {
            multiple: Some(true),
            clear_on_select: Some(false),
            close_on_select: Some(false),
            options: descriptor.item_allowed().map(<[Value]>::to_vec),
            ..Attributes::default()
        },
        Some(FieldType::Integer) => Attributes {
            options: descriptor.allowed.clone(),
            ..Attributes::number()
        },
        Some(FieldType::String | FieldType::Unknown(_)) | None => Attributes {
            options: descriptor.allowed.clone(),
            ..Attributes::default()
        },
    };
    attrs.placeholder = descriptor.placeholder_hint().cloned();
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta() -> SchemaMap {
        SchemaMap::from_value(json!({
            "categories": {
                "type": "array",
                "item": { "allowed": [{ "text": "Phones", "value": "1" }] },
                "placeholder": "Choose categories"
            },
            "priority": { "type": "integer", "allowed": [1, 2, 3] },
            "mode": { "type": "string", "allowed": ["enabled", "disabled"] },
            "flag": { "type": "boolean", "allowed": [true, false] },
            "upstream": {
                "properties": {
                    "port": { "type": "integer", "placeholder": "443" }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn array_becomes_multi_select() {
        let attrs = attributes_from_meta(&meta(), "categories");
        assert_eq!(attrs.multiple, Some(true));
        assert_eq!(attrs.clear_on_select, Some(false));
        assert_eq!(attrs.close_on_select, Some(false));
        assert_eq!(attrs.options, Some(vec![json!({ "text": "Phones", "value": "1" })]));
        assert_eq!(attrs.placeholder, Some(json!("Choose categories")));
    }

    #[test]
    fn integer_becomes_number_input() {
        let attrs = attributes_from_meta(&meta(), "priority");
        assert_eq!(attrs.input_type, Some(InputType::Number));
        assert_eq!(attrs.step, Some(1));
        assert_eq!(attrs.options, Some(vec![json!(1), json!(2), json!(3)]));
    }

    #[test]
    fn string_and_unknown_types_expose_allowed() {
        let attrs = attributes_from_meta(&meta(), "mode");
        assert_eq!(attrs.options, Some(vec![json!("enabled"), json!("disabled")]));
        assert!(attrs.input_type.is_none());

        let attrs = attributes_from_meta(&meta(), "flag");
        assert_eq!(attrs.options, Some(vec![json!(true), json!(false)]));
    }

    #[test]
    fn dotted_key_resolves_nested_descriptor() {
        let attrs = attributes_from_meta(&meta(), "upstream.port");
        assert_eq!(attrs, Attributes {
            placeholder: Some(json!("443")),
            ..Attributes::number()
        });
    }

    #[test]
    fn numeric_placeholder_passes_through() {
        let meta = SchemaMap::from_value(json!({
            "port": { "type": "integer", "placeholder": 443 }
        }))
        .unwrap();
        let attrs = attributes_from_meta(&meta, "port");
        assert_eq!(attrs.placeholder, Some(json!(443)));
        assert_eq!(
            serde_json::to_value(&attrs).unwrap(),
            json!({ "type": "number", "step": 1, "placeholder": 443 })
        );
    }

    #[test]
    fn empty_placeholder_is_dropped() {
        let meta = SchemaMap::from_value(json!({
            "host": { "placeholder": "" },
            "flag": { "placeholder": false }
        }))
        .unwrap();
        assert!(attributes_from_meta(&meta, "host").is_empty());
        assert!(attributes_from_meta(&meta, "flag").is_empty());
    }

    #[test]
    fn unresolved_key_yields_nothing() {
        assert!(attributes_from_meta(&meta(), "collector.port").is_empty());
        assert!(attributes_from_meta(&meta(), "missing").is_empty());
        assert!(attributes_from_meta(&SchemaMap::new(), "priority").is_empty());
    }

    #[test]
    fn serializes_camel_case_hints() {
        let value = serde_json::to_value(attributes_from_meta(&meta(), "categories")).unwrap();
        assert_eq!(value["clearOnSelect"], json!(false));
        assert_eq!(value["closeOnSelect"], json!(false));
        assert!(value.get("type").is_none());

        let value = serde_json::to_value(Attributes::number()).unwrap();
        assert_eq!(value, json!({ "type": "number", "step": 1 }));
    }

    #[test]
    fn or_prefers_own_hints() {
        let declared = Attributes {
            disabled: Some(true),
            step: Some(5),
            ..Attributes::default()
        };
        let merged = declared.or(Attributes::number());
        assert_eq!(merged.step, Some(5));
        assert_eq!(merged.input_type, Some(InputType::Number));
        assert_eq!(merged.disabled, Some(true));
    }
}
