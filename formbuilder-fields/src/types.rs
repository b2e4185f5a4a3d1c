//! Core types for the field type registry.
//!
//! A [`FieldTypeDef`] is an immutable template describing one kind of input:
//! its display metadata, default value, validation rule set and optional
//! display formatter. Types are grouped into [`Category`]s for the component
//! palette. Everything serializes to/from JSON via serde using the camelCase
//! wire names of the form document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A palette category grouping related field types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub label: String,
    #[serde(default)]
    pub icon: String,
    pub order: u32,
}

/// One option in a choice field (select, radio, checkbox).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declarative validation rule set attached to a field type.
///
/// All rules are optional; an absent rule is never checked. Length rules
/// count characters, not bytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Step increment for numeric inputs. Carried for the editor, not checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl ValidationRules {
    /// True when no rule is set at all.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && self.step.is_none()
    }
}

/// Named display formatter attached to a field type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Formatter {
    /// 18-digit ID card number, spaced 6/4/4/4.
    Idcard,
    /// 11-digit mobile number, spaced 3/4/4.
    Mobile,
}

/// A field type definition — the complete template for one kind of input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldTypeDef {
    /// Unique key, also the map key in the registry.
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// Type-dependent: string, number, null, or empty list.
    #[serde(default)]
    pub default_value: Value,
    #[serde(default, skip_serializing_if = "ValidationRules::is_empty")]
    pub validation: ValidationRules,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<Formatter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,
    /// Visible rows for multi-line text inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// Display format string for date-like types (e.g. `YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Partial field type configuration, merged over defaults on registration.
///
/// Unset entries fall back to `category = "BASIC"`, `default_value = ""`
/// and an empty rule set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypePatch {
    pub label: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub default_value: Option<Value>,
    pub validation: Option<ValidationRules>,
    pub placeholder: Option<String>,
    pub formatter: Option<Formatter>,
    pub options: Option<Vec<ChoiceOption>>,
    pub rows: Option<u32>,
    pub format: Option<String>,
}

impl TypePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn validation(mut self, rules: ValidationRules) -> Self {
        self.validation = Some(rules);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.options = Some(options);
        self
    }
}

/// Partial category configuration, merged over defaults on registration.
///
/// An unset `order` defaults to one past the current category count.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryPatch {
    pub label: Option<String>,
    pub icon: Option<String>,
    pub order: Option<u32>,
}

impl CategoryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }
}

/// A category together with its member field types, in registration order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryGroup {
    pub label: String,
    pub icon: String,
    pub order: u32,
    pub fields: IndexMap<String, FieldTypeDef>,
}

/// Overrides applied when instantiating a field from its type template.
#[derive(Debug, Clone, Default)]
pub struct InstanceOptions {
    pub label: Option<String>,
    pub default_value: Option<Value>,
    pub properties: serde_json::Map<String, Value>,
    pub validation: Option<ValidationRules>,
    pub placeholder: Option<String>,
}

/// The seed for a new field instance, produced by
/// [`FieldTypeRegistry::instantiate`](crate::FieldTypeRegistry::instantiate).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldSeed {
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    pub default_value: Value,
    pub properties: serde_json::Map<String, Value>,
    pub validation: ValidationRules,
    pub placeholder: String,
}
