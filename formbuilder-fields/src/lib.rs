//! Field type registry, validation engine and display formatters
//!
//! `formbuilder-fields` is the shared catalog both builder modes consume:
//! the authoring surface reads it to draw the component palette and seed new
//! field instances, the runtime reads it to validate and format entered
//! values.
//!
//! # Architecture
//!
//! - **Per-instance registry**: every builder holds its own
//!   [`FieldTypeRegistry`], seeded from the built-in catalog; no global
//!   mutable state
//! - **Declarative rules**: validation is data ([`ValidationRules`]), checked
//!   by a pure engine that returns a [`Validity`], never an error
//! - **Open registration**: new types and categories can be registered at
//!   runtime; overwriting an existing key is last-writer-wins with a warning

pub mod defaults;
pub mod error;
pub mod format;
pub mod registry;
pub mod types;
pub mod validate;

pub use defaults::base_properties;
pub use error::{FieldsError, Result};
pub use format::{
    apply_formatter, format_date_pattern, format_idcard, format_mobile, format_value,
    parse_datetime, parse_time,
};
pub use registry::FieldTypeRegistry;
pub use types::{
    Category, CategoryGroup, CategoryPatch, ChoiceOption, FieldSeed, FieldTypeDef, Formatter,
    InstanceOptions, TypePatch, ValidationRules,
};
pub use validate::{validate_with_rules, Validity};
