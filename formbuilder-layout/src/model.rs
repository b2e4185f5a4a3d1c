//! The FormLayout aggregate and its building blocks.
//!
//! A form is a row×column grid of unit cells, each optionally bound to one
//! field instance, plus the form-level settings and the field instance map.
//! The whole aggregate is one JSON-serializable document — the wire contract
//! between the authoring surface and the runtime — and is only mutated
//! through the operations in [`grid`](crate::grid), [`placement`](crate::placement)
//! and [`store`](crate::store).

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ulid::Ulid;

/// Opaque field instance identifier, unique within one form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(format!("field_{}", Ulid::new()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How the rendered form decides its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WidthMode {
    #[default]
    Auto,
    Min,
    Fixed,
}

/// Where field labels sit relative to their controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    #[default]
    Top,
    Left,
}

/// Form-level presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSettings {
    pub width: String,
    pub label_position: LabelPosition,
    pub width_mode: WidthMode,
    pub fixed_width: String,
    pub min_width: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            width: "100%".into(),
            label_position: LabelPosition::Top,
            width_mode: WidthMode::Auto,
            fixed_width: "800px".into(),
            min_width: "320px".into(),
        }
    }
}

/// One row track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRow {
    pub height: String,
}

impl Default for LayoutRow {
    fn default() -> Self {
        Self {
            height: "100px".into(),
        }
    }
}

/// One column track. Widths are percentage strings kept summing to 100%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutColumn {
    pub width: String,
}

/// One grid position, optionally bound to a field instance.
///
/// Every cell is unit-sized; the span fields are carried on the wire for
/// forward compatibility but never set to anything but 1 here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutCell {
    pub row: usize,
    pub col: usize,
    pub row_span: u32,
    pub col_span: u32,
    pub field_id: Option<FieldId>,
}

impl LayoutCell {
    /// A fresh empty unit cell at the given position.
    pub fn unit(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            row_span: 1,
            col_span: 1,
            field_id: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.field_id.is_none()
    }
}

/// A concrete field placed on the form: its type key, display label and
/// style/behavior properties.
///
/// Properties are kept schema-open (a JSON map) so a loaded document round-
/// trips losslessly whatever attributes the host stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInstance {
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl FieldInstance {
    pub fn new(field_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            label: label.into(),
            properties: serde_json::Map::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Whether this field must be filled at submission time.
    pub fn is_required(&self) -> bool {
        self.properties
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// The grid portion of the document: tracks plus the cell list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: Vec<LayoutRow>,
    pub columns: Vec<LayoutColumn>,
    pub cells: Vec<LayoutCell>,
}

/// The aggregate root: settings, grid and field instances. This is the
/// document exchanged between authoring and runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormLayout {
    pub form_settings: FormSettings,
    pub layout: GridLayout,
    pub fields: IndexMap<FieldId, FieldInstance>,
}

impl FormLayout {
    /// A fresh authoring layout: one row, one full-width column, one empty
    /// cell, no fields.
    pub fn new() -> Self {
        Self {
            form_settings: FormSettings::default(),
            layout: GridLayout {
                rows: vec![LayoutRow::default()],
                columns: vec![LayoutColumn {
                    width: "100%".into(),
                }],
                cells: vec![LayoutCell::unit(0, 0)],
            },
            fields: IndexMap::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.layout.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.layout.columns.len()
    }

    /// The cell at a grid position, if within bounds.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&LayoutCell> {
        self.layout
            .cells
            .iter()
            .find(|cell| cell.row == row && cell.col == col)
    }

    pub(crate) fn cell_at_mut(&mut self, row: usize, col: usize) -> Option<&mut LayoutCell> {
        self.layout
            .cells
            .iter_mut()
            .find(|cell| cell.row == row && cell.col == col)
    }

    /// The cell a field is bound to, if any.
    pub fn cell_of_field(&self, id: &FieldId) -> Option<&LayoutCell> {
        self.layout
            .cells
            .iter()
            .find(|cell| cell.field_id.as_ref() == Some(id))
    }

    /// The first unbound cell in creation order.
    pub fn first_empty_cell(&self) -> Option<&LayoutCell> {
        self.layout.cells.iter().find(|cell| cell.is_empty())
    }

    /// True when every cell is bound to a field.
    pub fn is_full(&self) -> bool {
        self.first_empty_cell().is_none()
    }

    /// Check the aggregate invariants: the cell set covers the row×column
    /// index space exactly once, every bound `fieldId` resolves, and no
    /// field is referenced by more than one cell. Intended for tests and
    /// debug assertions.
    pub fn is_consistent(&self) -> bool {
        let rows = self.row_count();
        let cols = self.column_count();
        if self.layout.cells.len() != rows * cols {
            return false;
        }
        let mut seen = vec![false; rows * cols];
        let mut bound: Vec<&FieldId> = Vec::new();
        for cell in &self.layout.cells {
            if cell.row >= rows || cell.col >= cols {
                return false;
            }
            if cell.row_span != 1 || cell.col_span != 1 {
                return false;
            }
            let index = cell.row * cols + cell.col;
            if seen[index] {
                return false;
            }
            seen[index] = true;
            if let Some(id) = &cell.field_id {
                if !self.fields.contains_key(id) || bound.contains(&id) {
                    return false;
                }
                bound.push(id);
            }
        }
        true
    }
}

impl Default for FormLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fresh_layout_is_one_by_one() {
        let layout = FormLayout::new();
        assert_eq!(layout.row_count(), 1);
        assert_eq!(layout.column_count(), 1);
        assert_eq!(layout.layout.cells.len(), 1);
        assert!(layout.cell_at(0, 0).unwrap().is_empty());
        assert!(layout.fields.is_empty());
        assert!(layout.is_consistent());
    }

    #[test]
    fn field_ids_are_unique() {
        let a = FieldId::generate();
        let b = FieldId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("field_"));
    }

    #[test]
    fn cell_serializes_camel_case_with_explicit_null() {
        let cell = LayoutCell::unit(0, 1);
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["rowSpan"], 1);
        assert_eq!(json["colSpan"], 1);
        assert_eq!(json["fieldId"], Value::Null);
    }

    #[test]
    fn form_settings_defaults_match_stock() {
        let json = serde_json::to_value(FormSettings::default()).unwrap();
        assert_eq!(json["width"], "100%");
        assert_eq!(json["labelPosition"], "top");
        assert_eq!(json["widthMode"], "auto");
        assert_eq!(json["fixedWidth"], "800px");
        assert_eq!(json["minWidth"], "320px");
    }

    #[test]
    fn field_instance_keeps_unknown_keys() {
        let value = json!({
            "type": "text",
            "label": "备注",
            "properties": {"required": true},
            "hostTag": "crm"
        });
        let field: FieldInstance = serde_json::from_value(value.clone()).unwrap();
        assert!(field.is_required());
        assert_eq!(field.extra["hostTag"], "crm");
        assert_eq!(serde_json::to_value(&field).unwrap(), value);
    }

    #[test]
    fn consistency_catches_missing_cell() {
        let mut layout = FormLayout::new();
        layout.layout.cells.clear();
        assert!(!layout.is_consistent());
    }

    #[test]
    fn consistency_catches_dangling_field_reference() {
        let mut layout = FormLayout::new();
        layout.layout.cells[0].field_id = Some(FieldId::from("field_missing"));
        assert!(!layout.is_consistent());
    }
}
