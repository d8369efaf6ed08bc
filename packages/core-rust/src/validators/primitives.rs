//! Single-value checks behind the field-level rules.
//!
//! Apart from [`required`], every check accepts an empty value. Emptiness is
//! the business of the `required` rule alone, so an optional field with a
//! length limit stays valid while blank.

use std::borrow::Cow;
use std::net::Ipv4Addr;

use serde_json::Value;

// ---------------------------------------------------------------------------
// Value helpers
// ---------------------------------------------------------------------------

/// Whether a value counts as filled in.
///
/// `null` and empty strings, arrays, and objects are empty; booleans and
/// numbers always count as present.
#[must_use]
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(_) | Value::Number(_) => true,
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

/// Textual form of a scalar value, as a text input would hold it.
///
/// Whole floats render without a fractional part (`5.0` is `"5"`).
#[must_use]
pub fn text_of(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        Value::Number(number) => Some(Cow::Owned(match number.as_f64() {
            Some(float) if number.is_f64() && float.fract() == 0.0 && float.is_finite() => {
                format!("{float:.0}")
            }
            _ => number.to_string(),
        })),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric interpretation of a value. Strings containing whitespace never
/// count as numbers.
#[must_use]
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) if !text.chars().any(char::is_whitespace) => text.parse().ok(),
        _ => None,
    }
}

/// Length of a value: element count for arrays, key count for objects,
/// character count otherwise.
#[must_use]
pub fn length_of(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(entries) => entries.len(),
        other => text_of(other).map_or(0, |text| text.chars().count()),
    }
}

/// Applies `check` to the textual form of a present value. Empty values pass;
/// non-scalar values fail.
fn check_text(value: &Value, check: impl FnOnce(&str) -> bool) -> bool {
    if !is_present(value) {
        return true;
    }
    text_of(value).is_some_and(|text| check(&*text))
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Non-empty check. Surrounding whitespace does not count as content.
#[must_use]
pub fn required(value: &Value) -> bool {
    match value {
        Value::String(text) => !text.trim().is_empty(),
        other => is_present(other),
    }
}

#[must_use]
pub fn min_value(value: &Value, min: f64) -> bool {
    !is_present(value) || numeric_value(value).is_some_and(|number| number >= min)
}

#[must_use]
pub fn max_value(value: &Value, max: f64) -> bool {
    !is_present(value) || numeric_value(value).is_some_and(|number| number <= max)
}

#[must_use]
pub fn min_length(value: &Value, min: usize) -> bool {
    !is_present(value) || length_of(value) >= min
}

#[must_use]
pub fn max_length(value: &Value, max: usize) -> bool {
    !is_present(value) || length_of(value) <= max
}

/// Optional leading minus followed by digits only.
#[must_use]
pub fn integer(value: &Value) -> bool {
    check_text(value, |text| {
        let digits = text.strip_prefix('-').unwrap_or(text);
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
    })
}

/// Digits only.
#[must_use]
pub fn numeric(value: &Value) -> bool {
    check_text(value, |text| text.chars().all(|c| c.is_ascii_digit()))
}

#[must_use]
pub fn alpha_num(value: &Value) -> bool {
    check_text(value, |text| text.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Dotted-quad IPv4 address without leading zeros.
#[must_use]
pub fn ip_address(value: &Value) -> bool {
    check_text(value, |text| text.parse::<Ipv4Addr>().is_ok())
}

#[must_use]
pub fn hex(value: &Value) -> bool {
    check_text(value, |text| text.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Fully qualified domain name: at least two dot-separated labels of 1–63
/// alphanumerics or inner hyphens, an alphabetic top-level label, 253
/// characters at most.
#[must_use]
pub fn fqdn(value: &Value) -> bool {
    check_text(value, |text| {
        let name = text.strip_suffix('.').unwrap_or(text);
        if name.len() > 253 {
            return false;
        }
        let labels: Vec<&str> = name.split('.').collect();
        let Some(tld) = labels.last() else {
            return false;
        };
        labels.len() >= 2
            && tld.len() >= 2
            && tld.chars().all(|c| c.is_ascii_alphabetic())
            && labels.iter().all(|label| {
                (1..=63).contains(&label.len())
                    && !label.starts_with('-')
                    && !label.ends_with('-')
                    && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            })
    })
}

/// TCP/UDP port number in `1..=65535`.
#[must_use]
pub fn port(value: &Value) -> bool {
    check_text(value, |text| {
        text.chars().all(|c| c.is_ascii_digit())
            && text.parse::<u32>().is_ok_and(|port| (1..=65_535).contains(&port))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ---- helpers ----

    #[test]
    fn presence_follows_emptiness() {
        assert!(!is_present(&json!(null)));
        assert!(!is_present(&json!("")));
        assert!(!is_present(&json!([])));
        assert!(!is_present(&json!({})));
        assert!(is_present(&json!(false)));
        assert!(is_present(&json!(0)));
        assert!(is_present(&json!(" ")));
    }

    #[test]
    fn text_of_renders_whole_floats_without_fraction() {
        assert_eq!(text_of(&json!(5.0)).unwrap(), "5");
        assert_eq!(text_of(&json!(5.5)).unwrap(), "5.5");
        assert_eq!(text_of(&json!(-3)).unwrap(), "-3");
        assert!(text_of(&json!([1])).is_none());
    }

    #[test]
    fn numeric_value_rejects_whitespace() {
        assert_eq!(numeric_value(&json!("12")), Some(12.0));
        assert_eq!(numeric_value(&json!(" 12")), None);
        assert_eq!(numeric_value(&json!("abc")), None);
    }

    // ---- checks ----

    #[test]
    fn required_trims_strings() {
        assert!(!required(&json!("   ")));
        assert!(required(&json!("x")));
        assert!(required(&json!(false)));
        assert!(!required(&json!(null)));
        assert!(required(&json!(["a"])));
    }

    #[test]
    fn bounds_skip_empty_values() {
        assert!(min_value(&json!(""), 5.0));
        assert!(min_value(&json!("5"), 5.0));
        assert!(!min_value(&json!(4), 5.0));
        assert!(!min_value(&json!("four"), 5.0));
        assert!(max_value(&json!(10), 10.0));
        assert!(!max_value(&json!(11), 10.0));
    }

    #[test]
    fn lengths_count_characters_and_elements() {
        assert!(max_length(&json!("héllo"), 5));
        assert!(!max_length(&json!("héllo!"), 5));
        assert!(min_length(&json!(["a", "b"]), 2));
        assert!(!min_length(&json!("a"), 2));
        assert!(min_length(&json!(""), 2));
    }

    #[test]
    fn integer_allows_leading_minus() {
        assert!(integer(&json!("-12")));
        assert!(integer(&json!(12)));
        assert!(integer(&json!(12.0)));
        assert!(!integer(&json!(12.5)));
        assert!(!integer(&json!("-")));
        assert!(!integer(&json!("1e3")));
        assert!(integer(&json!("")));
    }

    #[test]
    fn numeric_rejects_signs() {
        assert!(numeric(&json!("1100001")));
        assert!(!numeric(&json!("-1")));
        assert!(!numeric(&json!("1.5")));
    }

    #[test]
    fn alpha_num_rejects_punctuation() {
        assert!(alpha_num(&json!("Guest01")));
        assert!(!alpha_num(&json!("guest-01")));
    }

    #[test]
    fn ip_address_requires_dotted_quad() {
        assert!(ip_address(&json!("127.0.0.1")));
        assert!(!ip_address(&json!("127.0.0")));
        assert!(!ip_address(&json!("256.0.0.1")));
        assert!(!ip_address(&json!("127.0.0.01")));
    }

    #[test]
    fn hex_is_case_insensitive() {
        assert!(hex(&json!("DEADbeef01")));
        assert!(!hex(&json!("xyz")));
    }

    #[test]
    fn fqdn_checks_labels() {
        assert!(fqdn(&json!("api.fingerbank.org")));
        assert!(fqdn(&json!("proxy.example.com.")));
        assert!(!fqdn(&json!("localhost")));
        assert!(!fqdn(&json!("-bad.example.com")));
        assert!(!fqdn(&json!("example.c0m")));
        assert!(!fqdn(&json!("a..example.com")));
    }

    #[test]
    fn port_range() {
        assert!(port(&json!(443)));
        assert!(port(&json!("65535")));
        assert!(!port(&json!(0)));
        assert!(!port(&json!(65_536)));
        assert!(!port(&json!("+80")));
    }
}
