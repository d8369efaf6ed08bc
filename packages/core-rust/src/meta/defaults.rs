use std::collections::BTreeMap;

use serde_json::Value;

use crate::schema::SchemaMap;

/// Flat map from field key to default value.
pub type DefaultMap = BTreeMap<String, Value>;

/// Flattens the declared defaults of `meta`.
///
/// Descriptors carrying `properties` contribute one `outer.inner` entry per
/// nested key instead of an entry of their own. Only one level is flattened;
/// deeper mappings are taken as the nested descriptor's plain default.
/// Fields without a declared default map to `null`.
#[must_use]
pub fn defaults_from_meta(meta: &SchemaMap) -> DefaultMap {
    let mut defaults = DefaultMap::new();
    for (key, descriptor) in meta.iter() {
        match &descriptor.properties {
            Some(properties) => {
                for (property, nested) in properties.iter() {
                    defaults.insert(format!("{key}.{property}"), default_of(nested.default.as_ref()));
                }
            }
            None => {
                defaults.insert(key.clone(), default_of(descriptor.default.as_ref()));
            }
        }
    }
    defaults
}

fn default_of(value: Option<&Value>) -> Value {
    value.cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_default_is_dot_joined() {
        let meta = SchemaMap::from_value(json!({ "a": { "properties": { "b": { "default": 5 } } } }))
            .unwrap();
        let defaults = defaults_from_meta(&meta);
        assert_eq!(defaults, DefaultMap::from([("a.b".to_string(), json!(5))]));
    }

    #[test]
    fn top_level_and_missing_defaults() {
        let meta = SchemaMap::from_value(json!({
            "priority": { "type": "integer", "default": 4 },
            "desc": { "type": "string" }
        }))
        .unwrap();
        let defaults = defaults_from_meta(&meta);
        assert_eq!(defaults["priority"], json!(4));
        assert_eq!(defaults["desc"], json!(null));
        assert_eq!(defaults.len(), 2);
    }

    #[test]
    fn only_one_level_is_flattened() {
        let meta = SchemaMap::from_value(json!({
            "a": { "properties": { "b": { "properties": { "c": { "default": 1 } } } } }
        }))
        .unwrap();
        let defaults = defaults_from_meta(&meta);
        assert_eq!(defaults, DefaultMap::from([("a.b".to_string(), json!(null))]));
    }

    #[test]
    fn empty_schema_has_no_defaults() {
        assert!(defaults_from_meta(&SchemaMap::new()).is_empty());
    }
}
