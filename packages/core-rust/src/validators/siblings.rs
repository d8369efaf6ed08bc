//! Cross-field checks over the entries of a multi-entry list.
//!
//! Actions and conditions are edited as a list of entries, each classified by
//! a discriminator field (usually `type`). These checks look at the *other*
//! entries of that list, so a message such as "Duplicate action." shows up
//! on every offending entry and disappears as soon as a sibling changes.

use serde_json::Value;

use crate::context::RecordContext;

/// Whether `entry.field` equals the string `expected`.
fn has_field(entry: &Value, field: &str, expected: &str) -> bool {
    entry.get(field).and_then(Value::as_str) == Some(expected)
}

/// Whether some other entry carries `expected` in `field`.
fn sibling_has(ctx: &RecordContext, field: &str, expected: &str) -> bool {
    ctx.others().any(|entry| has_field(entry, field, expected))
}

/// Every value in `values` appears on some other entry.
#[must_use]
pub fn require_all(ctx: &RecordContext, field: &str, values: &[String]) -> bool {
    values.iter().all(|value| sibling_has(ctx, field, value))
}

/// At least one value in `values` appears on some other entry.
#[must_use]
pub fn require_any(ctx: &RecordContext, field: &str, values: &[String]) -> bool {
    values.iter().any(|value| sibling_has(ctx, field, value))
}

/// No value in `values` appears on any other entry.
#[must_use]
pub fn restrict_all(ctx: &RecordContext, field: &str, values: &[String]) -> bool {
    !values.iter().any(|value| sibling_has(ctx, field, value))
}

/// At most `max_others` other entries share the discriminator `value`.
///
/// The value under validation is the entry's own discriminator. When it is
/// not a string, the current entry's `field` is used instead.
#[must_use]
pub fn limit(ctx: &RecordContext, field: &str, max_others: usize, value: &Value) -> bool {
    let own = value
        .as_str()
        .or_else(|| ctx.current()?.get(field)?.as_str());
    let Some(own) = own else {
        return true;
    };
    ctx.others()
        .filter(|entry| has_field(entry, field, own))
        .count()
        <= max_others
}

/// The candidate set of existing identifiers has loaded.
#[must_use]
pub fn has_sources(ctx: &RecordContext) -> bool {
    ctx.existing.is_some()
}

/// The value names an identifier that already exists.
#[must_use]
pub fn source_exists(ctx: &RecordContext, value: &Value) -> bool {
    match (&ctx.existing, value.as_str()) {
        (Some(existing), Some(id)) => existing.contains(id),
        _ => false,
    }
}
