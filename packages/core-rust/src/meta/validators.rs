use crate::error::MetaError;
use crate::i18n::{MessageArg, Translate};
use crate::schema::{FieldDescriptor, FieldType, SchemaMap};
use crate::validators::{self, RuleSet};

use super::DeriveOptions;

/// Derives the validation rules of `key` from its descriptor.
///
/// An unresolvable key yields an empty rule set. A descriptor declaring a
/// property or `type` without a rule, or a pattern that does not compile, is
/// a schema authoring error: the whole derivation fails and no partial rule
/// set is returned.
///
/// # Errors
///
/// Returns [`MetaError::UnknownConstraint`], [`MetaError::UnknownType`], or
/// [`MetaError::InvalidPattern`] as described above.
pub fn validators_from_meta<T>(
    meta: &SchemaMap,
    key: &str,
    options: &DeriveOptions,
    t: &T,
) -> Result<RuleSet, MetaError>
where
    T: Translate + ?Sized,
{
    let Some(descriptor) = meta.resolve(key) else {
        return Ok(RuleSet::new());
    };
    rules_for(descriptor, key, options, t).inspect_err(|err| {
        tracing::warn!(key, error = %err, "rejected schema entry");
    })
}

fn rules_for<T>(
    descriptor: &FieldDescriptor,
    key: &str,
    options: &DeriveOptions,
    t: &T,
) -> Result<RuleSet, MetaError>
where
    T: Translate + ?Sized,
{
    if let Some(property) = descriptor.extra.keys().next() {
        return Err(MetaError::UnknownConstraint {
            key: key.to_string(),
            property: property.clone(),
        });
    }
    if descriptor.properties.is_some() {
        return Err(MetaError::UnknownConstraint {
            key: key.to_string(),
            property: "properties".to_string(),
        });
    }

    let mut rules = RuleSet::new();
    if let Some(min) = descriptor.min_value {
        rules.insert(
            t.t("Minimum {minValue}.", &[MessageArg::new("minValue", min)]),
            validators::min_value(min),
        );
    }
    if let Some(max) = descriptor.max_value {
        rules.insert(
            t.t("Maximum {maxValue}.", &[MessageArg::new("maxValue", max)]),
            validators::max_value(max),
        );
    }
    if let Some(min) = descriptor.min_length {
        rules.insert(
            t.t("Minimum {minLength} characters.", &[MessageArg::new("minLength", min)]),
            validators::min_length(min),
        );
    }
    if let Some(max) = descriptor.max_length {
        rules.insert(
            t.t("Maximum {maxLength} characters.", &[MessageArg::new("maxLength", max)]),
            validators::max_length(max),
        );
    }
    if let Some(pattern) = &descriptor.pattern {
        let rule = validators::is_pattern(&pattern.regex).map_err(|source| {
            MetaError::InvalidPattern {
                key: key.to_string(),
                source,
            }
        })?;
        rules.insert(
            t.t("Invalid {fieldName}.", &[MessageArg::new("fieldName", &pattern.message)]),
            rule,
        );
    }
    if descriptor.is_required() {
        rules.insert(
            t.t(
                "{fieldName} required.",
                &[MessageArg::new("fieldName", &options.field_label)],
            ),
            validators::required(),
        );
    }
    match &descriptor.field_type {
        Some(FieldType::Integer) => rules.insert(t.text("Integers only."), validators::integer()),
        Some(FieldType::Array | FieldType::String) | None => {}
        Some(FieldType::Unknown(type_name)) => {
            return Err(MetaError::UnknownType {
                key: key.to_string(),
                type_name: type_name.clone(),
            });
        }
    }
    Ok(rules)
}
