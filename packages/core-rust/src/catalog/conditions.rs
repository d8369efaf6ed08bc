//! Attributes an authentication rule can match on.

use std::sync::OnceLock;

use super::{AuthConditionType, CatalogEntry, EntryTable};
use crate::i18n::{Catalog, Translate};
use crate::validators::{self, RuleSet};

use super::fields::AuthConditionType::{Connection, LdapAttribute, Substring, Time, TimePeriod};

/// `(name, stored value, label, type)` of every condition.
const CONDITIONS: &[(&str, &str, &str, AuthConditionType)] = &[
    ("cn", "cn", "cn", LdapAttribute),
    ("computer_name", "computer_name", "Computer Name", Substring),
    ("connection_type", "connection_type", "Connection type", Connection),
    ("current_time", "current_time", "Current time", Time),
    ("current_time_period", "current_time_period", "Current time period", TimePeriod),
    ("department", "department", "department", LdapAttribute),
    ("description", "description", "description", LdapAttribute),
    ("displayName", "displayName", "displayName", LdapAttribute),
    ("distinguishedName", "distinguishedName", "distinguishedName", LdapAttribute),
    (
        "eduPersonPrimaryAffiliation",
        "eduPersonPrimaryAffiliation",
        "eduPersonPrimaryAffiliation",
        LdapAttribute,
    ),
    ("givenName", "givenName", "givenName", LdapAttribute),
    ("groupMembership", "groupMembership", "groupMembership", LdapAttribute),
    ("mac", "mac", "MAC Address", Substring),
    ("mail", "mail", "mail", LdapAttribute),
    ("memberOf", "memberOf", "memberOf", LdapAttribute),
    ("nested_group", "memberOf:1.2.840.113556.1.4.1941:", "nested group", Substring),
    ("postOfficeBox", "postOfficeBox", "postOfficeBox", LdapAttribute),
    ("realm", "realm", "Realm", Substring),
    ("sAMAccountName", "sAMAccountName", "sAMAccountName", Substring),
    ("sAMAccountType", "sAMAccountType", "sAMAccountType", Substring),
    ("sn", "sn", "sn", LdapAttribute),
    ("ssid", "SSID", "SSID", Substring),
    ("uid", "uid", "uid", LdapAttribute),
    ("userAccountControl", "userAccountControl", "userAccountControl", Substring),
];

static CONDITION_TABLE: OnceLock<EntryTable<AuthConditionType>> = OnceLock::new();

/// The English condition catalog.
pub fn conditions() -> &'static EntryTable<AuthConditionType> {
    CONDITION_TABLE.get_or_init(|| build(&Catalog::english()))
}

/// Builds the condition catalog with messages localized by `t`.
///
/// Every condition needs an operator and a value of at most 255 characters.
#[must_use]
pub fn build<T: Translate + ?Sized>(t: &T) -> EntryTable<AuthConditionType> {
    CONDITIONS
        .iter()
        .map(|&(name, value, text, kind)| {
            let entry = CatalogEntry::new(value, t.text(text), vec![kind])
                .with_validators(
                    "operator",
                    RuleSet::new().with(t.text("Operator required."), validators::required()),
                )
                .with_validators(
                    "value",
                    RuleSet::new()
                        .with(t.text("Value required."), validators::required())
                        .with(t.text("Maximum 255 characters."), validators::max_length(255)),
                );
            (name.to_string(), entry)
        })
        .collect()
}
