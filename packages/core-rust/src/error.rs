//! Errors raised while deriving metadata from a schema mapping.
//!
//! Only schema-authoring mistakes are errors. A key that cannot be resolved
//! is a normal "no metadata declared" state and yields an empty result
//! instead.

/// Hard authoring errors detected by the validator deriver.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// The descriptor declares a property the deriver has no rule for.
    #[error("unhandled meta property `{property}` on field `{key}`")]
    UnknownConstraint { key: String, property: String },
    /// The descriptor declares a `type` the deriver has no rule for.
    #[error("unhandled meta type `{type_name}` on field `{key}`")]
    UnknownType { key: String, type_name: String },
    /// The descriptor's `pattern.regex` does not compile.
    #[error("invalid pattern on field `{key}`: {source}")]
    InvalidPattern {
        key: String,
        #[source]
        source: regex::Error,
    },
    /// The schema document itself could not be parsed.
    #[error("invalid schema document: {0}")]
    InvalidSchema(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_constraint_message_names_field_and_property() {
        let err = MetaError::UnknownConstraint {
            key: "upstream.port".to_string(),
            property: "foo".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unhandled meta property `foo` on field `upstream.port`"
        );
    }

    #[test]
    fn invalid_schema_wraps_serde_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = MetaError::from(parse);
        assert!(err.to_string().starts_with("invalid schema document"));
    }
}
