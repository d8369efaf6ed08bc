//! List and search configuration consumed by the external search API.
//!
//! All structs use `#[serde(rename_all = "camelCase")]` to match the JSON the
//! list views exchange with the search endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Route;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Operator joining the children of a condition group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOp {
    And,
    Or,
}

/// Operator of a single field condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOp {
    Equals,
    NotEquals,
    Contains,
    StartsWith,
    EndsWith,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

/// Value shape a searchable field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchConditionType {
    Substring,
    Text,
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// A recursive search condition.
///
/// Groups serialize as `{op, values}`, leaves as `{field, op, value}`. A
/// `null` leaf value is a placeholder the search bar fills in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    Group {
        op: LogicalOp,
        values: Vec<Condition>,
    },
    Field {
        field: String,
        op: ConditionOp,
        #[serde(default)]
        value: Value,
    },
}

impl Condition {
    #[must_use]
    pub fn and(values: Vec<Condition>) -> Self {
        Self::Group {
            op: LogicalOp::And,
            values,
        }
    }

    #[must_use]
    pub fn or(values: Vec<Condition>) -> Self {
        Self::Group {
            op: LogicalOp::Or,
            values,
        }
    }

    #[must_use]
    pub fn contains(field: impl Into<String>, value: Value) -> Self {
        Self::Field {
            field: field.into(),
            op: ConditionOp::Contains,
            value,
        }
    }

    /// `and(or(contains(f, value)...))` over `fields`, the shape every list
    /// view searches with.
    #[must_use]
    pub fn any_contains(fields: &[String], value: &Value) -> Self {
        Self::and(vec![Self::or(
            fields
                .iter()
                .map(|field| Self::contains(field.clone(), value.clone()))
                .collect(),
        )])
    }

    /// Number of field conditions in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Group { values, .. } => values.iter().map(Self::leaf_count).sum(),
            Self::Field { .. } => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Columns and fields
// ---------------------------------------------------------------------------

/// A column of a list table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListColumn {
    /// Record key shown in the column.
    pub key: String,
    /// Column header.
    pub label: String,
    /// Clicking the header sorts by this column.
    pub sortable: bool,
    /// Shown unless hidden by the user.
    pub visible: bool,
}

impl ListColumn {
    /// A sortable, visible column.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            visible: true,
        }
    }

    #[must_use]
    pub fn relabel(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// A field offered by the advanced search builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListField {
    /// Record key searched.
    pub value: String,
    /// Label in the field picker.
    pub text: String,
    /// Value shapes the field accepts.
    pub types: Vec<SearchConditionType>,
}

impl ListField {
    /// A free-text substring field.
    #[must_use]
    pub fn substring(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            types: vec![SearchConditionType::Substring],
        }
    }

    #[must_use]
    pub fn retext(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

// ---------------------------------------------------------------------------
// ListConfig
// ---------------------------------------------------------------------------

/// Parameters of the search API call behind a list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchableOptions {
    /// Path of the search API, relative to the API root.
    pub search_api_endpoint: String,
    /// Keys the initial result page is sorted by.
    pub default_sort_keys: Vec<String>,
    /// Condition template of the advanced search.
    pub default_search_condition: Condition,
    /// Route the list is registered under.
    pub default_route: Route,
}

/// Full configuration of a searchable list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConfig {
    /// Table columns in display order.
    pub columns: Vec<ListColumn>,
    /// Fields offered by the advanced search.
    pub fields: Vec<ListField>,
    /// Route opened when a row is clicked; the row's `id` becomes its
    /// parameter.
    pub row_route: String,
    /// Hint shown in the empty search bar.
    pub search_placeholder: String,
    /// Search API call behind the list.
    pub searchable_options: SearchableOptions,
    /// Fields matched by the quick search bar.
    pub quick_fields: Vec<String>,
}

impl ListConfig {
    /// Route for a clicked row.
    #[must_use]
    pub fn row_click_route(&self, item: &Value) -> Route {
        let id = match item.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        Route::named(&self.row_route).with_param("id", id)
    }

    /// Condition sent when the user types `text` in the quick search bar.
    #[must_use]
    pub fn quick_condition(&self, text: &str) -> Condition {
        Condition::any_contains(&self.quick_fields, &Value::String(text.to_string()))
    }
}
