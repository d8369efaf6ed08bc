//! Field rows reused across configuration views.

use serde_json::Value;

use super::database::PERSON_COLUMNS;
use crate::form::{Component, FieldRow, FormField, ViewContext};
use crate::i18n::Translate;
use crate::meta::Attributes;
use crate::validators;

/// Identifier of a configuration object.
///
/// Editable only while creating. The uniqueness rule fires only on creation
/// flows, once the existing identifiers have loaded.
#[must_use]
pub fn id<T: Translate + ?Sized>(ctx: &ViewContext, t: &T) -> FieldRow {
    FieldRow::new(t.text("Name")).with_field(
        FormField::input("id")
            .with_attrs(Attributes {
                disabled: Some(!ctx.is_creating()),
                ..Attributes::default()
            })
            .with_rule(t.text("Value required."), validators::required())
            .with_rule(t.text("Maximum 255 characters."), validators::max_length(255))
            .with_rule(t.text("Alphanumeric characters only."), validators::alpha_num())
            .with_rule(
                t.text("Source exists."),
                validators::not(validators::and(vec![
                    validators::required(),
                    validators::conditional(ctx.is_creating()),
                    validators::has_sources(),
                    validators::source_exists(),
                ])),
            ),
    )
}

#[must_use]
pub fn desc<T: Translate + ?Sized>(t: &T) -> FieldRow {
    described("desc", t)
}

#[must_use]
pub fn description<T: Translate + ?Sized>(t: &T) -> FieldRow {
    described("description", t)
}

fn described<T: Translate + ?Sized>(key: &str, t: &T) -> FieldRow {
    FieldRow::new(t.text("Description")).with_field(
        FormField::input(key).with_rule(t.text("Description required."), validators::required()),
    )
}

/// Person column used as the PID.
#[must_use]
pub fn pid_field<T: Translate + ?Sized>(t: &T) -> FieldRow {
    FieldRow::new(t.text("PID field"))
        .with_text(t.text("Which field should be used as the PID."))
        .with_field(
            FormField::new("pid_field", Component::Select)
                .with_attrs(Attributes {
                    options: Some(
                        PERSON_COLUMNS
                            .iter()
                            .map(|column| Value::String((*column).to_string()))
                            .collect(),
                    ),
                    ..Attributes::default()
                })
                .with_rule(t.text("PID field required."), validators::required()),
        )
}

#[must_use]
pub fn show_first_module_on_default<T: Translate + ?Sized>(t: &T) -> FieldRow {
    FieldRow::new(t.text("Show first module when none is selected"))
        // Persisted under the portal module's historical `shuffle` key.
        .with_field(FormField::toggle("shuffle"))
}

#[must_use]
pub fn template<T: Translate + ?Sized>(t: &T) -> FieldRow {
    FieldRow::new(t.text("Template")).with_field(FormField::input("template"))
}
