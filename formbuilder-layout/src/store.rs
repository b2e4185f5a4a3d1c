//! Field instance lifecycle.
//!
//! Fields are owned by the [`FormLayout`]'s field map and referenced from at
//! most one cell. Creation consults the type registry for the template and
//! the auto-label sequence; removal keeps every cell reference consistent.

use formbuilder_fields::FieldTypeRegistry;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::model::{FieldId, FieldInstance, FormLayout};
use crate::placement::DropTarget;

/// A field placed by [`FormLayout::add_field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedField {
    pub id: FieldId,
    pub row: usize,
    pub col: usize,
}

/// A single mutation to one field instance.
///
/// The tagged variants replace dynamic `"properties.fontSize"` path strings:
/// the two legal update shapes are spelled out in the type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Rename the field's display label.
    Label(String),
    /// Set one entry of the field's property map.
    Property(String, Value),
}

/// Generate the next auto-label for a type: `{TypeLabel}{N}` where N is one
/// past the highest numeric suffix already used with that prefix.
///
/// Only prevents duplicate auto-labels; a user can still rename two fields
/// to the same label by hand.
fn next_label(layout: &FormLayout, type_label: &str) -> String {
    let pattern = format!("^{}(\\d+)$", regex::escape(type_label));
    let max = match Regex::new(&pattern) {
        Ok(regex) => layout
            .fields
            .values()
            .filter_map(|field| regex.captures(&field.label))
            .filter_map(|captures| captures[1].parse::<u64>().ok())
            .max()
            .unwrap_or(0),
        Err(_) => 0,
    };
    format!("{}{}", type_label, max + 1)
}

impl FormLayout {
    /// Create a field of the given type and bind it at the requested
    /// position, resolving the actual cell through the placement fallback
    /// chain. Returns the new field's id and where it landed.
    ///
    /// Fails fast with an unknown-type error before touching the layout.
    pub fn add_field(
        &mut self,
        registry: &FieldTypeRegistry,
        type_key: &str,
        row: usize,
        col: usize,
    ) -> Result<AddedField> {
        let seed = registry.instantiate(type_key, Default::default())?;

        let id = FieldId::generate();
        let label = next_label(self, &seed.label);
        let target: DropTarget = self.resolve_drop_target(row, col);

        let mut field = FieldInstance::new(type_key, label);
        field.properties = seed.properties;
        self.fields.insert(id.clone(), field);

        if let Some(cell) = self.cell_at_mut(target.row, target.col) {
            cell.field_id = Some(id.clone());
        }

        debug!(
            id = %id,
            type_key,
            row = target.row,
            col = target.col,
            "added field"
        );
        Ok(AddedField {
            id,
            row: target.row,
            col: target.col,
        })
    }

    /// Delete a field instance and clear every cell that referenced it.
    /// Clearing is defensive: the invariant says at most one cell holds the
    /// id, but stray duplicates are cleaned up too. Returns false when the
    /// field does not exist.
    pub fn remove_field(&mut self, id: &FieldId) -> bool {
        if self.fields.shift_remove(id).is_none() {
            return false;
        }
        for cell in &mut self.layout.cells {
            if cell.field_id.as_ref() == Some(id) {
                cell.field_id = None;
            }
        }
        debug!(id = %id, "removed field");
        true
    }

    /// Apply one update to a field. No-op (returns false) when the field
    /// does not exist.
    pub fn update_field(&mut self, id: &FieldId, update: FieldUpdate) -> bool {
        let Some(field) = self.fields.get_mut(id) else {
            return false;
        };
        match update {
            FieldUpdate::Label(label) => field.label = label,
            FieldUpdate::Property(name, value) => {
                field.properties.insert(name, value);
            }
        }
        true
    }
}
