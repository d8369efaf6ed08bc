//! Derivation of renderer hints, defaults, and rule sets from a [`SchemaMap`].
//!
//! All three derivers are pure and recompute on every call.
//!
//! [`SchemaMap`]: crate::schema::SchemaMap

pub mod attrs;
pub mod defaults;
pub mod validators;

pub use attrs::{attributes_from_meta, Attributes, InputType};
pub use defaults::{defaults_from_meta, DefaultMap};
pub use validators::validators_from_meta;

/// Options for [`validators_from_meta`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeriveOptions {
    /// Label substituted into the "{fieldName} required." message.
    pub field_label: String,
}

impl DeriveOptions {
    #[must_use]
    pub fn with_label(field_label: impl Into<String>) -> Self {
        Self {
            field_label: field_label.into(),
        }
    }
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            field_label: "Value".to_string(),
        }
    }
}
