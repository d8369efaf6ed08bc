//! `nacform` core: schema-driven form metadata for network access control
//! configuration.
//!
//! A [`SchemaMap`] describes the fields of a configuration object. From it the
//! derivers in [`meta`] produce renderer attribute hints, default values, and
//! validator [`RuleSet`]s, which [`form`] merges with static field
//! declarations. Cross-field rules evaluate against a [`RecordContext`].

pub mod catalog;
pub mod context;
pub mod error;
pub mod form;
pub mod i18n;
pub mod meta;
pub mod schema;
pub mod search;
pub mod types;
pub mod validators;
pub mod views;

pub use context::RecordContext;
pub use error::MetaError;
pub use form::{Component, FieldRow, FormField, ViewContext, ViewSection};
pub use i18n::{Catalog, MessageArg, Translate, LOCALES};
pub use meta::{
    attributes_from_meta, defaults_from_meta, validators_from_meta, Attributes, DefaultMap,
    DeriveOptions,
};
pub use schema::{FieldDescriptor, FieldType, SchemaMap};
pub use search::{Condition, ListColumn, ListConfig, ListField};
pub use types::{Route, SelectOption};
pub use validators::{Rule, RuleSet};
