//! Schema mapping ("meta") and field descriptor types.
//!
//! A [`SchemaMap`] maps field keys to [`FieldDescriptor`]s. Descriptors can
//! nest a further mapping under `properties`, which is how dotted keys such as
//! `upstream.port` are addressed. The mapping is deserialized from the JSON
//! document the configuration API returns alongside each object.
//!
//! # Unknown properties
//!
//! Properties the engine does not recognize are retained in
//! [`FieldDescriptor::extra`] instead of being dropped. The validator deriver
//! rejects descriptors that carry any, so a constraint nobody enforces can
//! never slip through silently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// FieldType
// ---------------------------------------------------------------------------

/// Declared value shape of a field.
///
/// Unrecognized type names are kept as [`FieldType::Unknown`] so every
/// derivation site decides explicitly how to treat them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    String,
    Integer,
    Array,
    Unknown(String),
}

impl FieldType {
    /// Returns the wire name of this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Array => "array",
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "string" => Self::String,
            "integer" => Self::Integer,
            "array" => Self::Array,
            _ => Self::Unknown(name),
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Unknown(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// Regular expression constraint with the label used in its failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    /// Regular expression the value must match.
    pub regex: String,
    /// Human-readable name of what the pattern describes (e.g. `"MAC"`).
    pub message: String,
}

// ---------------------------------------------------------------------------
// FieldDescriptor
// ---------------------------------------------------------------------------

/// Schema leaf describing one field's type, constraints, and default.
///
/// `placeholder` and `required` are kept as raw JSON: an off-type value only
/// means "no hint" or "no rule" and never rejects the whole mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Declared value shape.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub field_type: Option<FieldType>,
    /// Ordered list of permitted values.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub allowed: Option<Vec<Value>>,
    /// Hint shown in an empty input. Passed through only when truthy.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub placeholder: Option<Value>,
    /// Element descriptor for `array` fields.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub item: Option<Box<FieldDescriptor>>,
    /// Nested mapping addressed with dotted keys.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub properties: Option<SchemaMap>,
    /// Value a new object starts with.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default: Option<Value>,
    /// Non-empty constraint. Only boolean `true` enables it.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub required: Option<Value>,
    /// Smallest accepted number.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min_value: Option<f64>,
    /// Largest accepted number.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_value: Option<f64>,
    /// Fewest accepted characters or elements.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min_length: Option<usize>,
    /// Most accepted characters or elements.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_length: Option<usize>,
    /// Regular expression the value must match.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pattern: Option<Pattern>,
    /// Properties without a known meaning, kept for authoring checks.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl FieldDescriptor {
    /// Creates a descriptor of the given type with no constraints.
    #[must_use]
    pub fn of_type(field_type: FieldType) -> Self {
        Self {
            field_type: Some(field_type),
            ..Self::default()
        }
    }

    /// Whether the field is declared required (`required: true` exactly).
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self.required, Some(Value::Bool(true)))
    }

    /// The placeholder, unless it is `null`, `false`, `0`, or empty text.
    #[must_use]
    pub fn placeholder_hint(&self) -> Option<&Value> {
        self.placeholder.as_ref().filter(|value| is_truthy(value))
    }

    /// Returns the permitted values of array elements, if declared.
    #[must_use]
    pub fn item_allowed(&self) -> Option<&[Value]> {
        self.item.as_deref()?.allowed.as_deref()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ---------------------------------------------------------------------------
// SchemaMap
// ---------------------------------------------------------------------------

/// Mapping from field key to descriptor.
///
/// Keys iterate in sorted order, which keeps every derived output
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaMap(BTreeMap<String, FieldDescriptor>);

impl SchemaMap {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a mapping from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object of descriptors.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Converts an already-parsed JSON value into a mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object of descriptors.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Adds or replaces a descriptor, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.0.insert(key.into(), descriptor);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldDescriptor)> {
        self.0.iter()
    }

    /// Resolves a possibly dotted key to its descriptor.
    ///
    /// Every segment but the last must name a descriptor carrying
    /// `properties`; resolution then continues inside that nested mapping.
    /// Returns `None` when the mapping is empty, a segment is missing, or an
    /// intermediate descriptor has no `properties`. None of these are errors.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&FieldDescriptor> {
        if self.is_empty() {
            return None;
        }
        let mut meta = self;
        let mut rest = key;
        while let Some((first, remainder)) = rest.split_once('.') {
            let Some(parent) = meta.get(first) else {
                tracing::debug!(key, segment = first, "no metadata declared for key");
                return None;
            };
            let Some(children) = parent.properties.as_ref() else {
                tracing::debug!(key, segment = first, "segment has no nested properties");
                return None;
            };
            meta = children;
            rest = remainder;
        }
        meta.get(rest)
    }
}

impl FromIterator<(String, FieldDescriptor)> for SchemaMap {
    fn from_iter<I: IntoIterator<Item = (String, FieldDescriptor)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fingerbank_meta() -> SchemaMap {
        SchemaMap::from_value(json!({
            "upstream": {
                "properties": {
                    "port": { "type": "integer", "default": 443 },
                    "host": { "type": "string", "placeholder": "api.fingerbank.org" }
                }
            },
            "priority": { "type": "integer", "min_value": 1, "max_value": 10 }
        }))
        .unwrap()
    }

    // ---- FieldType ----

    #[test]
    fn field_type_parses_known_names() {
        let parsed: FieldType = serde_json::from_value(json!("integer")).unwrap();
        assert_eq!(parsed, FieldType::Integer);
        let parsed: FieldType = serde_json::from_value(json!("array")).unwrap();
        assert_eq!(parsed, FieldType::Array);
    }

    #[test]
    fn field_type_keeps_unknown_names() {
        let parsed: FieldType = serde_json::from_value(json!("boolean")).unwrap();
        assert_eq!(parsed, FieldType::Unknown("boolean".to_string()));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), json!("boolean"));
    }

    // ---- FieldDescriptor ----

    #[test]
    fn descriptor_collects_unknown_properties() {
        let descriptor: FieldDescriptor =
            serde_json::from_value(json!({ "type": "string", "foo": 1 })).unwrap();
        assert_eq!(descriptor.field_type, Some(FieldType::String));
        assert_eq!(descriptor.extra.get("foo"), Some(&json!(1)));
    }

    #[test]
    fn descriptor_parses_pattern_and_item() {
        let descriptor: FieldDescriptor = serde_json::from_value(json!({
            "type": "array",
            "item": { "allowed": ["a", "b"] },
            "pattern": { "regex": "^[a-z]+$", "message": "name" }
        }))
        .unwrap();
        assert_eq!(descriptor.item_allowed(), Some(&[json!("a"), json!("b")][..]));
        assert_eq!(descriptor.pattern.unwrap().message, "name");
        assert!(descriptor.extra.is_empty());
    }

    #[test]
    fn off_type_required_and_placeholder_still_parse() {
        let meta = SchemaMap::from_value(json!({
            "id": { "type": "string", "required": 1 },
            "name": { "type": "string", "required": "true" },
            "port": { "type": "integer", "placeholder": 443 },
            "desc": { "type": "string", "required": true, "placeholder": "" }
        }))
        .unwrap();
        assert!(!meta.get("id").unwrap().is_required());
        assert!(!meta.get("name").unwrap().is_required());
        assert!(meta.get("desc").unwrap().is_required());
        assert_eq!(meta.get("port").unwrap().placeholder_hint(), Some(&json!(443)));
        assert_eq!(meta.get("desc").unwrap().placeholder_hint(), None);
    }

    #[test]
    fn placeholder_hint_drops_falsy_values() {
        for falsy in [json!(null), json!(false), json!(0), json!(""), json!(0.0)] {
            let descriptor = FieldDescriptor {
                placeholder: Some(falsy),
                ..FieldDescriptor::default()
            };
            assert!(descriptor.placeholder_hint().is_none());
        }
        let descriptor = FieldDescriptor {
            placeholder: Some(json!("api.fingerbank.org")),
            ..FieldDescriptor::default()
        };
        assert_eq!(descriptor.placeholder_hint(), Some(&json!("api.fingerbank.org")));
    }

    // ---- resolve ----

    #[test]
    fn resolve_top_level_key() {
        let meta = fingerbank_meta();
        let descriptor = meta.resolve("priority").unwrap();
        assert_eq!(descriptor.max_value, Some(10.0));
    }

    #[test]
    fn resolve_dotted_key_walks_properties() {
        let meta = fingerbank_meta();
        let descriptor = meta.resolve("upstream.port").unwrap();
        assert_eq!(descriptor.default, Some(json!(443)));
    }

    #[test]
    fn resolve_missing_first_segment_is_none() {
        let meta = fingerbank_meta();
        assert!(meta.resolve("collector.port").is_none());
    }

    #[test]
    fn resolve_through_leaf_without_properties_is_none() {
        let meta = fingerbank_meta();
        assert!(meta.resolve("priority.value").is_none());
    }

    #[test]
    fn resolve_on_empty_mapping_is_none() {
        assert!(SchemaMap::new().resolve("anything").is_none());
    }

    #[test]
    fn resolve_missing_last_segment_is_none() {
        let meta = fingerbank_meta();
        assert!(meta.resolve("upstream.api_key").is_none());
    }
}
