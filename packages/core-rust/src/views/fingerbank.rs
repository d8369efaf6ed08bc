//! Fingerbank device profiling settings and lists.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::form::{FieldRow, FormField, ViewSection};
use crate::i18n::Translate;
use crate::search::{Condition, ListColumn, ListConfig, ListField, SearchableOptions};
use crate::types::Route;
use crate::validators;

// ---------------------------------------------------------------------------
// General settings
// ---------------------------------------------------------------------------

fn api_key_row<T: Translate + ?Sized>(t: &T) -> FieldRow {
    FieldRow::new(t.text("API Key"))
        .with_text(t.text(
            "API key to interact with upstream Fingerbank project. Changing this value requires to restart the Fingerbank collector.",
        ))
        .with_field(
            FormField::input("upstream.api_key")
                .with_rule(t.text("Key required."), validators::required())
                .with_rule(
                    t.text("Invalid Key."),
                    validators::and(vec![validators::max_length(255), validators::is_hex()]),
                ),
        )
}

fn port_field<T: Translate + ?Sized>(key: &str, t: &T) -> FormField {
    FormField::number(key).with_rule(t.text("Invalid Port."), validators::is_port())
}

fn positive_field<T: Translate + ?Sized>(key: &str, t: &T) -> FormField {
    FormField::number(key).with_rule(t.text("Invalid Value."), validators::min_value(1.0))
}

/// Rows of the general settings form.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn general_settings_view_fields<T: Translate + ?Sized>(t: &T) -> Vec<ViewSection> {
    let row = |label: &str, text: &str, field: FormField| {
        FieldRow::new(t.text(label)).with_text(t.text(text)).with_field(field)
    };
    vec![ViewSection::untitled(vec![
        api_key_row(t),
        row(
            "Upstream API host",
            "The host on which the Fingerbank API should be reached.",
            FormField::input("upstream.host").with_rule(
                t.text("Invalid Host."),
                validators::and(vec![validators::max_length(255), validators::is_fqdn()]),
            ),
        ),
        row(
            "Upstream API port",
            "The port on which the Fingerbank API should be reached.",
            port_field("upstream.port", t),
        ),
        row(
            "Upstream API HTTPS",
            "Whether or not HTTPS should be used to communicate with the Fingerbank API.",
            FormField::toggle("upstream.use_https"),
        ),
        row(
            "Database API path",
            "Path used to fetch the database on the Fingerbank API.",
            FormField::input("upstream.db_path"),
        ),
        row(
            "Retention of the upstream sqlite DB",
            "Amount of upstream databases to retain on disk in db/. Should be at least one in case any running processes are still pointing on the old file descriptor of the database.",
            FormField::number("upstream.sqlite_db_retention"),
        ),
        row(
            "Collector host",
            "The host on which the Fingerbank collector should be reached.",
            FormField::input("collector.host")
                .with_rule(t.text("Invalid IP Address."), validators::ip_address()),
        ),
        row(
            "Collector port",
            "The port on which the Fingerbank collector should be reached.",
            port_field("collector.port", t),
        ),
        row(
            "Collector HTTPS",
            "Whether or not HTTPS should be used to communicate with the collector.",
            FormField::toggle("collector.use_https"),
        ),
        row(
            "Inactive endpoints expiration",
            "Amount of hours after which the information inactive endpoints should be removed from the collector.",
            positive_field("collector.inactive_endpoints_expiration", t),
        ),
        row(
            "ARP lookups by the collector",
            "Whether or not the collector should perform ARP lookups for devices it doesn't have DHCP information.",
            FormField::toggle("collector.arp_lookup"),
        ),
        row(
            "Query cache time in the collector",
            "Amount of minutes for which the collector API query results are cached.",
            positive_field("collector.query_cache_time", t),
        ),
        row(
            "Database persistence interval",
            "Interval in seconds at which the collector will persist its databases.",
            positive_field("collector.db_persistence_interval", t),
        ),
        row(
            "Cluster resync interval",
            "Interval in seconds at which the collector will fully resynchronize with its peers when in cluster mode. The collector synchronizes in real-time, so this only acts as a safety net when there is a communication error between the collectors.",
            positive_field("collector.cluster_resync_interval", t),
        ),
        row(
            "Record Unmatched Parameters",
            "Should the local instance of Fingerbank record unmatched parameters so that it will be possible to submit thoses unmatched parameters to the upstream Fingerbank project for contribution.",
            FormField::toggle("query.record_unmatched"),
        ),
        row(
            "Use proxy",
            "Should Fingerbank interact with WWW using a proxy?",
            FormField::toggle("proxy.use_proxy"),
        ),
        row(
            "Proxy Host",
            "Host the proxy is listening on. Only the host must be specified here without any port or protocol.",
            FormField::input("proxy.host").with_rule(t.text("Invalid Host."), validators::is_fqdn()),
        ),
        row(
            "Proxy Port",
            "Port the proxy is listening on.",
            port_field("proxy.port", t),
        ),
        row(
            "Verify SSL",
            "Whether or not to verify SSL when using proxying.",
            FormField::toggle("proxy.verify_ssl"),
        ),
    ])]
}

/// Values the general settings form starts with, nested by section.
#[must_use]
pub fn general_settings_view_defaults() -> Value {
    json!({
        "upstream": {
            "host": "api.fingerbank.org",
            "port": 443,
            "use_https": "enabled",
            "db_path": "/api/v2/download/db",
            "sqlite_db_retention": 2
        },
        "collector": {
            "host": "127.0.0.1",
            "port": 4723,
            "use_https": "enabled",
            "inactive_endpoints_expiration": 168,
            "query_cache_time": 1440,
            "db_persistence_interval": 60,
            "cluster_resync_interval": 120
        },
        "proxy": {
            "verify_ssl": "enabled"
        }
    })
}

// ---------------------------------------------------------------------------
// Device change detection
// ---------------------------------------------------------------------------

#[must_use]
pub fn device_change_detection_view_fields<T: Translate + ?Sized>(t: &T) -> Vec<ViewSection> {
    vec![ViewSection::untitled(vec![api_key_row(t)])]
}

#[must_use]
pub fn device_change_detection_view_defaults() -> Value {
    json!({})
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// Searchable Fingerbank entity lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfilingList {
    Combinations,
    Devices,
    DhcpFingerprints,
    DhcpVendors,
    Dhcpv6Fingerprints,
    Dhcpv6Enterprises,
    MacVendors,
    UserAgents,
}

impl ProfilingList {
    pub const ALL: [Self; 8] = [
        Self::Combinations,
        Self::Devices,
        Self::DhcpFingerprints,
        Self::DhcpVendors,
        Self::Dhcpv6Fingerprints,
        Self::Dhcpv6Enterprises,
        Self::MacVendors,
        Self::UserAgents,
    ];

    /// Route of a single entity.
    #[must_use]
    pub fn entity_route(self) -> &'static str {
        match self {
            Self::Combinations => "combination",
            Self::Devices => "device",
            Self::DhcpFingerprints => "dhcpFingerprint",
            Self::DhcpVendors => "dhcpVendor",
            Self::Dhcpv6Fingerprints => "dhcpv6Fingerprint",
            Self::Dhcpv6Enterprises => "dhcpv6Enterprise",
            Self::MacVendors => "macVendor",
            Self::UserAgents => "userAgent",
        }
    }

    /// Route of the list itself.
    #[must_use]
    pub fn list_route(self) -> &'static str {
        match self {
            Self::Combinations => "profilingCombinations",
            Self::Devices => "profilingDevices",
            Self::DhcpFingerprints => "profilingDhcpFingerprints",
            Self::DhcpVendors => "profilingDhcpVendors",
            Self::Dhcpv6Fingerprints => "profilingDhcpv6Fingerprints",
            Self::Dhcpv6Enterprises => "profilingDhcpv6Enterprises",
            Self::MacVendors => "profilingMacVendors",
            Self::UserAgents => "profilingUserAgents",
        }
    }

    /// Collection segment of the search endpoint.
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            Self::Combinations => "combinations",
            Self::Devices => "devices",
            Self::DhcpFingerprints => "dhcp_fingerprints",
            Self::DhcpVendors => "dhcp_vendors",
            Self::Dhcpv6Fingerprints => "dhcp6_fingerprints",
            Self::Dhcpv6Enterprises => "dhcp6_enterprises",
            Self::MacVendors => "mac_vendors",
            Self::UserAgents => "user_agents",
        }
    }

    /// Search endpoint over every entity of this kind.
    ///
    /// Assumes the API serves every profiling collection under
    /// `fingerbank/all/`. The UI has no published search route for these
    /// lists; [`list_config_with_endpoint`] takes an explicit one.
    #[must_use]
    pub fn endpoint(self) -> String {
        format!("fingerbank/all/{}", self.collection())
    }
}

#[must_use]
pub fn list_columns<T: Translate + ?Sized>(t: &T) -> Vec<ListColumn> {
    vec![ListColumn::new("id", t.text("Identifier"))]
}

#[must_use]
pub fn list_fields<T: Translate + ?Sized>(t: &T) -> Vec<ListField> {
    vec![ListField::substring("id", t.text("Identifier"))]
}

/// List configuration searching [`ProfilingList::endpoint`].
#[must_use]
pub fn list_config<T: Translate + ?Sized>(list: ProfilingList, t: &T) -> ListConfig {
    list_config_with_endpoint(list, list.endpoint(), t)
}

/// List configuration searching `endpoint`.
#[must_use]
pub fn list_config_with_endpoint<T: Translate + ?Sized>(
    list: ProfilingList,
    endpoint: impl Into<String>,
    t: &T,
) -> ListConfig {
    let search_fields = ["id".to_string()];
    ListConfig {
        columns: list_columns(t),
        fields: list_fields(t),
        row_route: list.entity_route().to_string(),
        search_placeholder: t.text("Search by identifier or description"),
        searchable_options: SearchableOptions {
            search_api_endpoint: endpoint.into(),
            default_sort_keys: vec!["id".to_string()],
            default_search_condition: Condition::any_contains(&search_fields, &Value::Null),
            default_route: Route::named(list.list_route()),
        },
        quick_fields: search_fields.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RecordContext;
    use crate::form::find_field;
    use crate::i18n::Catalog;
    use crate::meta::{Attributes, InputType};
    use std::collections::HashSet;

    fn settings() -> Vec<ViewSection> {
        general_settings_view_fields(&Catalog::english())
    }

    fn failures(key: &str, value: &Value) -> Vec<String> {
        let sections = settings();
        find_field(&sections, key)
            .unwrap()
            .failures(value, &RecordContext::default())
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    // ---- general settings ----

    #[test]
    fn settings_cover_every_section() {
        let sections = settings();
        let keys: Vec<_> = sections[0].fields().map(|f| f.key.as_str()).collect();
        assert_eq!(keys.len(), 19);
        for prefix in ["upstream.", "collector.", "query.", "proxy."] {
            assert!(keys.iter().any(|k| k.starts_with(prefix)), "{prefix}");
        }
        assert!(sections[0].rows.iter().all(|row| row.text.is_some()));
    }

    #[test]
    fn api_key_must_be_short_hex() {
        assert_eq!(failures("upstream.api_key", &json!("")), vec!["Key required."]);
        assert_eq!(failures("upstream.api_key", &json!("xyz")), vec!["Invalid Key."]);
        assert_eq!(failures("upstream.api_key", &json!("a".repeat(256))), vec!["Invalid Key."]);
        assert!(failures("upstream.api_key", &json!("deadbeef01")).is_empty());
    }

    #[test]
    fn hosts_ports_and_addresses() {
        assert!(failures("upstream.host", &json!("api.fingerbank.org")).is_empty());
        assert_eq!(failures("upstream.host", &json!("not a host")), vec!["Invalid Host."]);
        assert!(failures("proxy.host", &json!("")).is_empty());
        assert!(failures("collector.host", &json!("127.0.0.1")).is_empty());
        assert_eq!(
            failures("collector.host", &json!("localhost")),
            vec!["Invalid IP Address."]
        );
        assert!(failures("collector.port", &json!(4723)).is_empty());
        assert_eq!(failures("proxy.port", &json!(70000)), vec!["Invalid Port."]);
    }

    #[test]
    fn intervals_must_be_positive() {
        assert_eq!(
            failures("collector.query_cache_time", &json!(0)),
            vec!["Invalid Value."]
        );
        assert!(failures("collector.cluster_resync_interval", &json!(120)).is_empty());
    }

    #[test]
    fn numeric_and_toggle_attributes() {
        let sections = settings();
        let retention = find_field(&sections, "upstream.sqlite_db_retention").unwrap();
        assert_eq!(retention.attrs.input_type, Some(InputType::Number));
        assert_eq!(retention.attrs.step, Some(1));
        let verify = find_field(&sections, "proxy.verify_ssl").unwrap();
        assert_eq!(verify.attrs, Attributes::toggle());
    }

    #[test]
    fn defaults_nest_by_section() {
        let defaults = general_settings_view_defaults();
        assert_eq!(defaults["upstream"]["port"], json!(443));
        assert_eq!(defaults["collector"]["inactive_endpoints_expiration"], json!(168));
        assert_eq!(defaults["proxy"], json!({ "verify_ssl": "enabled" }));
        assert!(defaults.get("query").is_none());
    }

    // ---- device change detection ----

    #[test]
    fn device_change_detection_has_api_key_only() {
        let sections = device_change_detection_view_fields(&Catalog::english());
        let keys: Vec<_> = sections[0].fields().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["upstream.api_key"]);
        assert_eq!(device_change_detection_view_defaults(), json!({}));
    }

    // ---- lists ----

    #[test]
    fn list_routes_are_distinct() {
        let routes: HashSet<_> = ProfilingList::ALL.iter().map(|l| l.entity_route()).collect();
        let lists: HashSet<_> = ProfilingList::ALL.iter().map(|l| l.list_route()).collect();
        assert_eq!(routes.len(), 8);
        assert_eq!(lists.len(), 8);
    }

    #[test]
    fn list_config_per_entity() {
        let config = list_config(ProfilingList::MacVendors, &Catalog::english());
        assert_eq!(config.columns, vec![ListColumn::new("id", "Identifier")]);
        assert_eq!(config.search_placeholder, "Search by identifier or description");
        assert_eq!(config.searchable_options.search_api_endpoint, "fingerbank/all/mac_vendors");
        assert_eq!(
            config.searchable_options.default_route,
            Route::named("profilingMacVendors")
        );
        assert_eq!(
            config.row_click_route(&json!({ "id": "7" })),
            Route::named("macVendor").with_param("id", "7")
        );
        assert_eq!(
            config.quick_condition("apple"),
            Condition::and(vec![Condition::or(vec![Condition::contains("id", json!("apple"))])])
        );
    }

    #[test]
    fn list_config_accepts_explicit_endpoint() {
        let config = list_config_with_endpoint(
            ProfilingList::Devices,
            "fingerbank/local/devices",
            &Catalog::english(),
        );
        assert_eq!(config.searchable_options.search_api_endpoint, "fingerbank/local/devices");
        assert_eq!(config.row_route, "device");
    }
}
