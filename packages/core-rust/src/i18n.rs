//! Localization seam.
//!
//! Every message and label the engine emits goes through [`Translate::t`].
//! Source strings are English and double as catalog keys; `{name}`
//! placeholders are filled from [`MessageArg`]s after lookup.
//!
//! Any `Fn(&str, &[MessageArg]) -> String` is a translator, so a host
//! application can plug its own localization function straight in.

use std::collections::HashMap;

use crate::types::SelectOption;

/// Locales the administration UI ships catalogs for.
pub const LOCALES: &[&str] = &[
    "en_US", "de_DE", "es_ES", "fr_CA", "fr_FR", "he_IL", "it_IT", "nl_NL", "pl_PL", "pt_BR",
];

/// Returns [`LOCALES`] as select options.
#[must_use]
pub fn locale_options() -> Vec<SelectOption> {
    LOCALES.iter().map(|locale| SelectOption::same(*locale)).collect()
}

// ---------------------------------------------------------------------------
// MessageArg
// ---------------------------------------------------------------------------

/// A placeholder substitution for a translated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageArg {
    /// Placeholder name without braces (e.g. `"minValue"`).
    pub key: &'static str,
    /// Preformatted replacement text.
    pub value: String,
}

impl MessageArg {
    pub fn new(key: &'static str, value: impl ToString) -> Self {
        Self {
            key,
            value: value.to_string(),
        }
    }
}

/// Replaces each `{key}` in `template` with its argument value.
#[must_use]
pub fn interpolate(template: &str, args: &[MessageArg]) -> String {
    args.iter().fold(template.to_string(), |text, arg| {
        text.replace(&format!("{{{}}}", arg.key), &arg.value)
    })
}

// ---------------------------------------------------------------------------
// Translate
// ---------------------------------------------------------------------------

/// Pure, synchronous message localization.
pub trait Translate {
    /// Localizes `key` and fills its placeholders from `args`.
    fn t(&self, key: &str, args: &[MessageArg]) -> String;

    /// Localizes a message without placeholders.
    fn text(&self, key: &str) -> String {
        self.t(key, &[])
    }
}

impl<F> Translate for F
where
    F: Fn(&str, &[MessageArg]) -> String,
{
    fn t(&self, key: &str, args: &[MessageArg]) -> String {
        self(key, args)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// In-memory message catalog for a single locale.
///
/// Keys missing from the catalog fall back to the key itself, so the English
/// catalog needs no entries at all.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Creates an empty catalog for `locale`.
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: HashMap::new(),
        }
    }

    /// The source-language catalog.
    #[must_use]
    pub fn english() -> Self {
        Self::new("en_US")
    }

    /// Adds a translation, returning `self` for chaining.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, translation: impl Into<String>) -> Self {
        self.entries.insert(key.into(), translation.into());
        self
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Translate for Catalog {
    fn t(&self, key: &str, args: &[MessageArg]) -> String {
        let template = self.entries.get(key).map_or(key, String::as_str);
        interpolate(template, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_catalog_interpolates_key() {
        let catalog = Catalog::english();
        let text = catalog.t("Minimum {minValue}.", &[MessageArg::new("minValue", 3)]);
        assert_eq!(text, "Minimum 3.");
    }

    #[test]
    fn catalog_entry_overrides_key() {
        let catalog = Catalog::new("fr_FR").with_entry("Integers only.", "Entiers seulement.");
        assert_eq!(catalog.text("Integers only."), "Entiers seulement.");
        assert_eq!(catalog.text("Value required."), "Value required.");
        assert_eq!(catalog.locale(), "fr_FR");
    }

    #[test]
    fn closures_are_translators() {
        let shout = |key: &str, args: &[MessageArg]| interpolate(key, args).to_uppercase();
        assert_eq!(shout.text("value required."), "VALUE REQUIRED.");
    }

    #[test]
    fn unused_placeholders_are_left_alone() {
        assert_eq!(interpolate("{a} and {b}", &[MessageArg::new("a", "x")]), "x and {b}");
    }

    #[test]
    fn locale_options_cover_every_locale() {
        let options = locale_options();
        assert_eq!(options.len(), 10);
        assert_eq!(options[0].text, "en_US");
        assert_eq!(options[9].text, "pt_BR");
    }
}
