//! Security event list and form.

use serde_json::{json, Value};

use crate::catalog::lists;
use crate::form::{Component, FieldRow, FormField, ViewContext, ViewSection};
use crate::i18n::Translate;
use crate::meta::Attributes;
use crate::search::{Condition, ListColumn, ListConfig, ListField, SearchableOptions};
use crate::types::{Route, SelectOption};
use crate::validators;

/// Event triggers selectable on a security event.
pub const TRIGGERS: &[&str] = &["device::2", "device::3"];

#[must_use]
pub fn list_columns<T: Translate + ?Sized>(t: &T) -> Vec<ListColumn> {
    vec![
        lists::id_column(t).relabel(t.text("Identifier")),
        lists::desc_column(t),
    ]
}

#[must_use]
pub fn list_fields<T: Translate + ?Sized>(t: &T) -> Vec<ListField> {
    vec![
        lists::id_field(t).retext(t.text("Identifier")),
        lists::desc_field(t),
    ]
}

/// Values a new security event starts with.
#[must_use]
pub fn view_defaults() -> Value {
    json!({ "id": null, "priority": 4 })
}

#[must_use]
pub fn view_fields<T: Translate + ?Sized>(ctx: &ViewContext, t: &T) -> Vec<ViewSection> {
    let roles = ctx.roles.iter().map(SelectOption::same).collect();
    let triggers = TRIGGERS.iter().map(|trigger| SelectOption::same(*trigger)).collect();
    vec![ViewSection::untitled(vec![
        FieldRow::new(t.text("Identifier")).with_field(
            FormField::input("id")
                .with_attrs(Attributes {
                    disabled: Some(!ctx.is_creating()),
                    ..Attributes::default()
                })
                .with_rule(t.text("Name required."), validators::required())
                .with_rule(t.text("Numeric value required."), validators::numeric()),
        ),
        FieldRow::new(t.text("Description")).with_field(
            FormField::input("desc")
                .with_rule(t.text("Description required."), validators::required()),
        ),
        FieldRow::new(t.text("Priority")).with_field(
            FormField::input("priority")
                .with_rule(t.text("Priority required"), validators::required())
                .with_rule(t.text("Value must be numeric."), validators::numeric())
                .with_rule(t.text("Value must be at least 1"), validators::min_value(1.0))
                .with_rule(t.text("Value must be maximum 10"), validators::max_value(10.0)),
        ),
        FieldRow::new(t.text("Ignored Roles")).with_field(
            FormField::new("whitelisted_roles", Component::Chosen)
                .with_attrs(Attributes::chosen(t.text("Click to select a role"), roles)),
        ),
        FieldRow::new(t.text("Event triggers")).with_field(
            FormField::new("trigger", Component::SecurityEventTrigger)
                .with_attrs(Attributes::chosen(t.text("Event triggers"), triggers)),
        ),
    ])]
}

#[must_use]
pub fn list_config<T: Translate + ?Sized>(t: &T) -> ListConfig {
    let search_fields = ["id".to_string(), "desc".to_string()];
    ListConfig {
        columns: list_columns(t),
        fields: list_fields(t),
        row_route: "security_event".to_string(),
        search_placeholder: t.text("Search by name"),
        searchable_options: SearchableOptions {
            search_api_endpoint: "config/security_events".to_string(),
            default_sort_keys: vec!["id".to_string()],
            default_search_condition: Condition::any_contains(&search_fields, &Value::Null),
            default_route: Route::named("security_events"),
        },
        quick_fields: vec!["id".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RecordContext;
    use crate::form::find_field;
    use crate::i18n::Catalog;

    fn fields(ctx: &ViewContext) -> Vec<ViewSection> {
        view_fields(ctx, &Catalog::english())
    }

    // ---- form ----

    #[test]
    fn defaults() {
        assert_eq!(view_defaults(), json!({ "id": null, "priority": 4 }));
    }

    #[test]
    fn id_editable_only_on_creation() {
        let editing = fields(&ViewContext::default());
        assert_eq!(find_field(&editing, "id").unwrap().attrs.disabled, Some(true));
        let creating = fields(&ViewContext::new_object());
        assert_eq!(find_field(&creating, "id").unwrap().attrs.disabled, Some(false));
    }

    #[test]
    fn priority_range() {
        let sections = fields(&ViewContext::default());
        let priority = find_field(&sections, "priority").unwrap();
        let ctx = RecordContext::default();
        assert!(priority.failures(&json!(4), &ctx).is_empty());
        assert!(priority.failures(&json!("10"), &ctx).is_empty());
        assert_eq!(priority.failures(&json!(0), &ctx), vec!["Value must be at least 1"]);
        assert_eq!(priority.failures(&json!(11), &ctx), vec!["Value must be maximum 10"]);
        assert_eq!(priority.failures(&json!(""), &ctx), vec!["Priority required"]);
        assert!(priority
            .failures(&json!("high"), &ctx)
            .contains(&"Value must be numeric."));
    }

    #[test]
    fn roles_come_from_context() {
        let ctx = ViewContext {
            roles: vec!["guest".to_string(), "staff".to_string()],
            ..ViewContext::default()
        };
        let sections = fields(&ctx);
        let roles = find_field(&sections, "whitelisted_roles").unwrap();
        assert_eq!(roles.component, Component::Chosen);
        assert_eq!(
            roles.attrs.options,
            Some(vec![
                json!({ "text": "guest", "value": "guest" }),
                json!({ "text": "staff", "value": "staff" }),
            ])
        );
        assert_eq!(roles.attrs.multiple, Some(true));
    }

    #[test]
    fn trigger_options() {
        let sections = fields(&ViewContext::default());
        let trigger = find_field(&sections, "trigger").unwrap();
        assert_eq!(trigger.component, Component::SecurityEventTrigger);
        assert_eq!(trigger.attrs.options.as_ref().map(Vec::len), Some(2));
        assert_eq!(trigger.attrs.placeholder, Some(json!("Event triggers")));
    }

    // ---- list ----

    #[test]
    fn list_relabels_identifier() {
        let t = Catalog::english();
        assert_eq!(list_columns(&t)[0].label, "Identifier");
        assert_eq!(list_fields(&t)[0].text, "Identifier");
        assert_eq!(lists::id_column(&t).label, "Name");
    }

    #[test]
    fn list_config_searches_id_and_desc() {
        let config = list_config(&Catalog::english());
        assert_eq!(config.searchable_options.search_api_endpoint, "config/security_events");
        assert_eq!(config.searchable_options.default_search_condition.leaf_count(), 2);
        assert_eq!(config.searchable_options.default_route, Route::named("security_events"));
        assert_eq!(
            config.row_click_route(&json!({ "id": "1100013" })),
            Route::named("security_event").with_param("id", "1100013")
        );
        assert_eq!(config.quick_condition("11").leaf_count(), 1);
    }
}
