//! Render and validate model handed to the external form renderer.
//!
//! A view is a list of [`ViewSection`]s, each holding labelled
//! [`FieldRow`]s, each holding one or more [`FormField`]s. Fields are
//! declared statically and may be completed from a [`SchemaMap`] with
//! [`FormField::with_meta`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::RecordContext;
use crate::error::MetaError;
use crate::i18n::Translate;
use crate::meta::{attributes_from_meta, validators_from_meta, Attributes, DeriveOptions};
use crate::schema::SchemaMap;
use crate::validators::{Rule, RuleSet};

/// Renderer a field is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Component {
    Input,
    Select,
    Toggle,
    Chosen,
    SecurityEventTrigger,
}

/// Flags and lookups a view is built with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewContext {
    /// The form creates a new object.
    pub is_new: bool,
    /// The form creates a copy of an existing object.
    pub is_clone: bool,
    /// Role names offered by role pickers.
    pub roles: Vec<String>,
}

impl ViewContext {
    /// Context of a creation form.
    #[must_use]
    pub fn new_object() -> Self {
        Self {
            is_new: true,
            ..Self::default()
        }
    }

    /// Whether the object's identifier may still be edited.
    #[must_use]
    pub fn is_creating(&self) -> bool {
        self.is_new || self.is_clone
    }
}

// ---------------------------------------------------------------------------
// FormField
// ---------------------------------------------------------------------------

/// One editable value of a form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    /// Record key, dot-joined for nested settings (`upstream.port`).
    pub key: String,
    pub component: Component,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attrs: Attributes,
    #[serde(skip_serializing_if = "RuleSet::is_empty")]
    pub validators: RuleSet,
}

impl FormField {
    #[must_use]
    pub fn new(key: impl Into<String>, component: Component) -> Self {
        Self {
            key: key.into(),
            component,
            attrs: Attributes::default(),
            validators: RuleSet::new(),
        }
    }

    #[must_use]
    pub fn input(key: impl Into<String>) -> Self {
        Self::new(key, Component::Input)
    }

    /// `enabled`/`disabled` toggle.
    #[must_use]
    pub fn toggle(key: impl Into<String>) -> Self {
        Self::new(key, Component::Toggle).with_attrs(Attributes::toggle())
    }

    /// Numeric input with step 1.
    #[must_use]
    pub fn number(key: impl Into<String>) -> Self {
        Self::input(key).with_attrs(Attributes::number())
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    #[must_use]
    pub fn with_rule(mut self, message: impl Into<String>, rule: Rule) -> Self {
        self.validators.insert(message, rule);
        self
    }

    /// Completes the declaration from `meta`.
    ///
    /// Declared attributes win over derived ones. Declared rules are
    /// inserted after the derived ones, so a declared rule whose message
    /// collides with a derived one replaces it.
    ///
    /// # Errors
    ///
    /// Propagates the [`MetaError`] of [`validators_from_meta`].
    pub fn with_meta<T>(
        mut self,
        meta: &SchemaMap,
        options: &DeriveOptions,
        t: &T,
    ) -> Result<Self, MetaError>
    where
        T: Translate + ?Sized,
    {
        let mut rules = validators_from_meta(meta, &self.key, options, t)?;
        rules.merge(self.validators);
        self.validators = rules;
        self.attrs = self.attrs.or(attributes_from_meta(meta, &self.key));
        Ok(self)
    }

    /// Failure messages of `value` under this field's rules.
    #[must_use]
    pub fn failures(&self, value: &Value, ctx: &RecordContext) -> Vec<&str> {
        self.validators.failures(value, ctx)
    }
}

// ---------------------------------------------------------------------------
// FieldRow / ViewSection
// ---------------------------------------------------------------------------

/// A labelled row of fields with optional help text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRow {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub fields: Vec<FormField>,
}

impl FieldRow {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }
}

/// A tab of a form view. Views without tabs use a single untitled section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSection {
    pub tab: Option<String>,
    #[serde(rename = "fields")]
    pub rows: Vec<FieldRow>,
}

impl ViewSection {
    #[must_use]
    pub fn untitled(rows: Vec<FieldRow>) -> Self {
        Self { tab: None, rows }
    }

    /// Every field of the section in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.rows.iter().flat_map(|row| row.fields.iter())
    }
}

/// Looks up the field declared under `key` across `sections`.
#[must_use]
pub fn find_field<'a>(sections: &'a [ViewSection], key: &str) -> Option<&'a FormField> {
    sections
        .iter()
        .flat_map(ViewSection::fields)
        .find(|field| field.key == key)
}
