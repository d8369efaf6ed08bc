//! Actions applied to a node when a rule matches.
//!
//! Each action is edited as a `{type, value}` entry of an action list. The
//! `type` rules look at the other entries of the list; the `value` rules look
//! at the entry's own value.

use std::sync::OnceLock;

use chrono::NaiveDateTime;

use super::database::{self, BANDWIDTH_BALANCE_MAX, BANDWIDTH_BALANCE_MIN};
use super::{CatalogEntry, EntryTable, FieldType};
use crate::i18n::{Catalog, MessageArg, Translate};
use crate::validators::{self, DateOperator, RuleSet};

/// Date shortcuts offered for the unregistration date.
pub const UNREG_DATE_MOMENTS: &[&str] = &["1 days", "1 weeks", "1 months", "1 years"];

static ACTIONS: OnceLock<EntryTable<FieldType>> = OnceLock::new();

/// The English action catalog.
///
/// The "Future date required." rule compares against the instant of first
/// access.
pub fn actions() -> &'static EntryTable<FieldType> {
    ACTIONS.get_or_init(|| build(&Catalog::english(), chrono::Local::now().naive_local()))
}

/// Builds the action catalog with messages localized by `t`. Date rules
/// compare against `now`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::too_many_lines)]
pub fn build<T: Translate + ?Sized>(t: &T, now: NaiveDateTime) -> EntryTable<FieldType> {
    let duplicate = t.text("Duplicate action.");
    let no_duplicate = || validators::limit_sibling_fields("type", 0);
    let only_once = || RuleSet::new().with(duplicate.clone(), no_duplicate());
    let value_required = || RuleSet::new().with(t.text("Value required."), validators::required());
    let role_rules = || {
        RuleSet::new()
            .with(
                t.text(r#"Action requires either "Access duration" or "Unregistration date"."#),
                validators::require_any_sibling_fields(
                    "type",
                    &["set_access_duration", "set_unreg_date"],
                ),
            )
            .with(duplicate.clone(), no_duplicate())
    };

    let mut table = EntryTable::new();
    table.insert(
        "set_access_duration".to_string(),
        CatalogEntry::new("set_access_duration", t.text("Access duration"), vec![FieldType::Duration])
            .with_validators(
                "type",
                RuleSet::new()
                    .with(
                        t.text(r#"Action requires "Set Role"."#),
                        validators::require_all_sibling_fields("type", &["set_role"]),
                    )
                    .with(
                        t.text(r#"Action conflicts with "Unregistration date"."#),
                        validators::restrict_all_sibling_fields("type", &["set_unreg_date"]),
                    )
                    .with(duplicate.clone(), no_duplicate()),
            )
            .with_validators("value", value_required()),
    );
    table.insert(
        "set_access_level".to_string(),
        CatalogEntry::new("set_access_level", t.text("Access level"), vec![FieldType::AdminRole])
            .with_validators("type", only_once())
            .with_validators("value", value_required()),
    );
    table.insert(
        "set_bandwidth_balance".to_string(),
        CatalogEntry::new(
            "set_bandwidth_balance",
            t.text("Bandwidth balance"),
            vec![FieldType::PrefixMultiplier],
        )
        .with_validators("type", only_once())
        .with_validators(
            "value",
            value_required()
                .with(
                    t.t(
                        "Value must be greater than {min}bytes.",
                        &[MessageArg::new("min", database::bytes_to_human(BANDWIDTH_BALANCE_MIN))],
                    ),
                    validators::min_value(BANDWIDTH_BALANCE_MIN as f64),
                )
                .with(
                    t.t(
                        "Value must be less than {max}bytes.",
                        &[MessageArg::new("max", database::bytes_to_human(BANDWIDTH_BALANCE_MAX))],
                    ),
                    validators::max_value(BANDWIDTH_BALANCE_MAX as f64),
                ),
        ),
    );
    table.insert(
        "mark_as_sponsor".to_string(),
        CatalogEntry::new("mark_as_sponsor", t.text("Mark as sponsor"), vec![FieldType::None])
            .with_validators("type", only_once()),
    );
    table.insert(
        "set_role".to_string(),
        CatalogEntry::new("set_role", t.text("Role"), vec![FieldType::Role])
            .with_validators("type", role_rules())
            .with_validators("value", value_required()),
    );
    table.insert(
        "set_role_by_name".to_string(),
        CatalogEntry::new("set_role", t.text("Role"), vec![FieldType::RoleByName])
            .with_validators("type", role_rules())
            .with_validators("value", value_required()),
    );
    table.insert(
        "set_tenant_id".to_string(),
        CatalogEntry::new("set_tenant_id", t.text("Tenant ID"), vec![FieldType::Tenant])
            .with_validators("type", only_once())
            .with_validators(
                "value",
                value_required().with(t.text("Value must be numeric."), validators::numeric()),
            ),
    );
    table.insert(
        "set_time_balance".to_string(),
        CatalogEntry::new("set_time_balance", t.text("Time balance"), vec![FieldType::TimeBalance])
            .with_validators("type", only_once())
            .with_validators("value", value_required()),
    );
    table.insert(
        "set_unreg_date".to_string(),
        CatalogEntry::new("set_unreg_date", t.text("Unregistration date"), vec![FieldType::Datetime])
            .with_moments(UNREG_DATE_MOMENTS)
            .with_validators(
                "type",
                RuleSet::new()
                    .with(
                        t.text(r#"Action requires "Set Role"."#),
                        validators::require_all_sibling_fields("type", &["set_role"]),
                    )
                    .with(
                        t.text(r#"Action conflicts with "Access duration"."#),
                        validators::restrict_all_sibling_fields("type", &["set_access_duration"]),
                    )
                    .with(duplicate.clone(), no_duplicate()),
            )
            .with_validators(
                "value",
                RuleSet::new()
                    .with(
                        t.text("Future date required."),
                        validators::compare_date(
                            DateOperator::Gte,
                            now,
                            database::unregdate_format(),
                            false,
                        ),
                    )
                    .with(
                        t.text("Invalid date."),
                        validators::is_date_format(database::unregdate_format()),
                    ),
            ),
    );
    table
}
