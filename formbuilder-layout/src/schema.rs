//! Form document load/save.
//!
//! The persisted document is the JSON shape of [`FormLayout`]:
//! `{formSettings, layout: {rows, columns, cells}, fields}`. Loading
//! validates the structure first — collecting every problem, not just the
//! first — then deserializes into a fresh aggregate, so the caller's value
//! is never aliased. Saving produces a deep-copy snapshot.

use serde_json::Value;
use tracing::debug;

use crate::error::{LayoutError, Result};
use crate::model::FormLayout;

/// Structural pre-validation of a form document. Returns every problem found.
pub fn validate_document(value: &Value) -> Vec<String> {
    let Some(document) = value.as_object() else {
        return vec!["表单设计数据必须是一个对象".into()];
    };

    let mut errors = Vec::new();

    if !document.contains_key("formSettings") {
        errors.push("缺少必要的 formSettings 属性".into());
    }

    match document.get("layout") {
        None => errors.push("缺少必要的 layout 属性".into()),
        Some(layout) => {
            for key in ["rows", "columns", "cells"] {
                if !layout.get(key).map(Value::is_array).unwrap_or(false) {
                    errors.push(format!("layout.{key} 必须是一个数组"));
                }
            }
        }
    }

    if !document.get("fields").map(Value::is_object).unwrap_or(false) {
        errors.push("缺少必要的 fields 属性或格式不正确".into());
    }

    errors
}

/// Load a form document into a fresh [`FormLayout`].
///
/// Fails fast with the full structural error set when the document is
/// malformed; the caller decides whether to show an error state or abort.
pub fn load(value: &Value) -> Result<FormLayout> {
    let errors = validate_document(value);
    if !errors.is_empty() {
        return Err(LayoutError::invalid_document(errors));
    }

    let layout: FormLayout = serde_json::from_value(value.clone())?;
    debug!(
        rows = layout.row_count(),
        columns = layout.column_count(),
        fields = layout.fields.len(),
        "loaded form document"
    );
    Ok(layout)
}

/// Serialize a layout to its document form — a deep-copy snapshot that
/// shares nothing with the aggregate.
pub fn save(layout: &FormLayout) -> Result<Value> {
    Ok(serde_json::to_value(layout)?)
}
