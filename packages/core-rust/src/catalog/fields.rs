use serde::{Deserialize, Serialize};

/// Value shape an action entry edits. Selects the value renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// No value; the action stands alone.
    None,
    AdminRole,
    Datetime,
    Duration,
    /// Byte count with a unit prefix (`10G`).
    PrefixMultiplier,
    Role,
    RoleByName,
    Tenant,
    TimeBalance,
}

/// Value shape an authentication condition compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthConditionType {
    Connection,
    LdapAttribute,
    Substring,
    Time,
    TimePeriod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names() {
        assert_eq!(serde_json::to_string(&FieldType::RoleByName).unwrap(), "\"role_by_name\"");
        assert_eq!(
            serde_json::to_string(&FieldType::PrefixMultiplier).unwrap(),
            "\"prefix_multiplier\""
        );
        assert_eq!(
            serde_json::to_string(&AuthConditionType::LdapAttribute).unwrap(),
            "\"ldap_attribute\""
        );
    }
}
