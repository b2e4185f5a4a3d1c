//! Runtime submission checks and formatting.
//!
//! A submission is a label-keyed map of entered values. Validation here is
//! the coarse form-level pass — required-ness plus basic type checks — run
//! once at submit time. It aggregates one message per field across the whole
//! form, unlike the per-value engine which short-circuits inside one value.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use formbuilder_fields::{format_date_pattern, parse_datetime};

use crate::model::FormLayout;

/// Result of the form-level validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation {
    pub valid: bool,
    /// One message per failing field, keyed by the field's display label.
    pub errors: IndexMap<String, String>,
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().map(|n| n.is_finite()).unwrap_or(false),
        _ => false,
    }
}

fn is_date_like(value: &Value) -> bool {
    match value {
        Value::String(s) => parse_datetime(s).is_some(),
        _ => false,
    }
}

/// Validate a submission against the form's fields.
///
/// Required fields must be non-blank; present values of `number` fields must
/// be numeric and of `date`/`datetime` fields parsable. Errors are keyed by
/// field label (falling back to the field id when a label is missing) so the
/// host can surface them next to each control.
pub fn validate_form(values: &Map<String, Value>, layout: &FormLayout) -> FormValidation {
    let mut errors = IndexMap::new();

    for (id, field) in &layout.fields {
        let label = if field.label.is_empty() {
            id.to_string()
        } else {
            field.label.clone()
        };
        let value = values.get(&label);

        if field.is_required() && is_blank(value) {
            errors.insert(label.clone(), format!("{label} 是必填项"));
            continue;
        }

        if is_blank(value) {
            continue;
        }
        let value = value.unwrap();

        match field.field_type.as_str() {
            "number" if !is_numeric(value) => {
                errors.insert(label.clone(), format!("{label} 必须是一个数字"));
            }
            "date" | "datetime" if !is_date_like(value) => {
                errors.insert(label.clone(), format!("{label} 必须是一个有效的日期"));
            }
            _ => {}
        }
    }

    FormValidation {
        valid: errors.is_empty(),
        errors,
    }
}

/// Deep-copy a submission with every `datetime` field's value normalized to
/// `YYYY-MM-DD HH:mm:ss`. Values that fail to parse pass through unchanged
/// (validation will flag them).
pub fn format_submission(values: &Map<String, Value>, layout: &FormLayout) -> Map<String, Value> {
    let mut formatted = values.clone();

    for field in layout.fields.values() {
        if field.field_type != "datetime" {
            continue;
        }
        let label = &field.label;
        let Some(Value::String(raw)) = formatted.get(label) else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        if let Some(dt) = parse_datetime(raw) {
            formatted.insert(
                label.clone(),
                Value::String(format_date_pattern(&dt, "YYYY-MM-DD HH:mm:ss")),
            );
        }
    }

    formatted
}
