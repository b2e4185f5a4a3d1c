//! The runtime session.
//!
//! A [`RuntimeSession`] renders a saved design as a live form: it loads the
//! document into its own deep copy, exposes display formatting for entered
//! values, and runs the submission pass — datetime normalization first, then
//! the form-level validation. Validation failure is an expected outcome,
//! returned as data, never an error.

use serde_json::{Map, Value};

use formbuilder_fields::{format_value, FieldTypeRegistry};
use formbuilder_layout::{schema, submit, FieldId, FormLayout, Result};

/// Outcome of a form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The formatted submission, datetime fields normalized to
    /// `YYYY-MM-DD HH:mm:ss`.
    Accepted { data: Map<String, Value> },
    /// Label-keyed messages for the host to surface next to each control.
    Rejected { errors: indexmap::IndexMap<String, String> },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Runtime-mode session: owns its copy of a saved design.
pub struct RuntimeSession {
    registry: FieldTypeRegistry,
    layout: FormLayout,
}

impl RuntimeSession {
    /// Load a saved design document. Fails with the structural error set
    /// when the document is malformed; the caller decides whether to show
    /// an error state or abort initialization.
    pub fn new(document: &Value) -> Result<Self> {
        Ok(Self {
            registry: FieldTypeRegistry::with_builtins(),
            layout: schema::load(document)?,
        })
    }

    /// Load with a caller-supplied registry (custom types).
    pub fn with_registry(document: &Value, registry: FieldTypeRegistry) -> Result<Self> {
        Ok(Self {
            registry,
            layout: schema::load(document)?,
        })
    }

    pub fn registry(&self) -> &FieldTypeRegistry {
        &self.registry
    }

    /// Read-only view of the loaded design.
    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    /// Deep-copy snapshot of the loaded design.
    pub fn data(&self) -> FormLayout {
        self.layout.clone()
    }

    /// Format a field's entered value for display (spaced id-card/mobile
    /// numbers, date rendering). Unknown fields render the raw value.
    pub fn display_value(&self, field_id: &FieldId, value: &Value) -> String {
        match self.layout.fields.get(field_id) {
            Some(field) => format_value(value, &field.field_type, &self.registry),
            None => format_value(value, "", &self.registry),
        }
    }

    /// Run the submission pass: normalize datetime values, then validate
    /// required-ness and basic types across all fields.
    pub fn submit(&self, values: &Map<String, Value>) -> SubmitOutcome {
        let formatted = submit::format_submission(values, &self.layout);
        let validation = submit::validate_form(&formatted, &self.layout);
        if validation.valid {
            SubmitOutcome::Accepted { data: formatted }
        } else {
            SubmitOutcome::Rejected {
                errors: validation.errors,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::DesignSession;
    use formbuilder_layout::FieldUpdate;
    use serde_json::json;

    fn saved_design() -> (Value, String, String) {
        let mut design = DesignSession::new();
        design.add_row();
        let name = design.add_field("text", 0, 0).unwrap();
        let when = design.add_field("datetime", 1, 0).unwrap();
        design.update_field(&name, FieldUpdate::Property("required".into(), json!(true)));
        let name_label = design.layout().fields[&name].label.clone();
        let when_label = design.layout().fields[&when].label.clone();
        (design.save().unwrap(), name_label, when_label)
    }

    #[test]
    fn new_rejects_malformed_document() {
        assert!(RuntimeSession::new(&json!({"fields": {}})).is_err());
        assert!(RuntimeSession::new(&json!(null)).is_err());
    }

    #[test]
    fn submit_rejects_missing_required_field() {
        let (document, name_label, _) = saved_design();
        let session = RuntimeSession::new(&document).unwrap();

        let SubmitOutcome::Rejected { errors } = session.submit(&Map::new()) else {
            panic!("expected rejection");
        };
        assert_eq!(errors[&name_label], format!("{name_label} 是必填项"));
    }

    #[test]
    fn submit_accepts_and_normalizes_datetime() {
        let (document, name_label, when_label) = saved_design();
        let session = RuntimeSession::new(&document).unwrap();

        let mut values = Map::new();
        values.insert(name_label, json!("张三"));
        values.insert(when_label.clone(), json!("2024-03-07T10:30:00"));

        let SubmitOutcome::Accepted { data } = session.submit(&values) else {
            panic!("expected acceptance");
        };
        assert_eq!(data[&when_label], json!("2024-03-07 10:30:00"));
    }

    #[test]
    fn sessions_do_not_share_layout_state() {
        let (document, _, _) = saved_design();
        let a = RuntimeSession::new(&document).unwrap();
        let b = RuntimeSession::new(&document).unwrap();

        let mut snapshot = a.data();
        snapshot.add_row();
        assert_eq!(a.layout().row_count(), b.layout().row_count());
    }

    #[test]
    fn display_value_formats_by_field_type() {
        let mut design = DesignSession::new();
        let id = design.add_field("mobile", 0, 0).unwrap();
        let session = RuntimeSession::new(&design.save().unwrap()).unwrap();

        assert_eq!(
            session.display_value(&id, &json!("13812345678")),
            "138 1234 5678"
        );
        assert_eq!(
            session.display_value(&FieldId::from("field_missing"), &json!("raw")),
            "raw"
        );
    }
}
