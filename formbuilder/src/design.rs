//! The authoring session.
//!
//! A [`DesignSession`] exclusively owns one [`FormLayout`] aggregate and the
//! transient authoring state around it: the field type registry, the current
//! selection and the optional mutation-event hook. Every mutation runs to
//! completion synchronously — a drop gesture commits directly from its
//! completion callback, with no settle delay.

use serde_json::Value;
use tracing::debug;

use formbuilder_fields::FieldTypeRegistry;
use formbuilder_layout::{
    schema, ColumnRemoval, FieldId, FieldUpdate, FormLayout, Refused, Result, RowRemoval,
};

use crate::events::MutationEvent;

type MutationHook = Box<dyn Fn(&MutationEvent)>;

/// Authoring-mode session: owns the layout being designed.
pub struct DesignSession {
    registry: FieldTypeRegistry,
    layout: FormLayout,
    selected: Option<FieldId>,
    on_mutation: Option<MutationHook>,
}

impl DesignSession {
    /// A fresh session over a 1×1 empty layout and the built-in type catalog.
    pub fn new() -> Self {
        Self {
            registry: FieldTypeRegistry::with_builtins(),
            layout: FormLayout::new(),
            selected: None,
            on_mutation: None,
        }
    }

    /// A session with a caller-supplied registry (custom types/categories).
    pub fn with_registry(registry: FieldTypeRegistry) -> Self {
        Self {
            registry,
            layout: FormLayout::new(),
            selected: None,
            on_mutation: None,
        }
    }

    /// Install a callback receiving one [`MutationEvent`] per applied
    /// mutation.
    pub fn on_mutation(&mut self, hook: impl Fn(&MutationEvent) + 'static) {
        self.on_mutation = Some(Box::new(hook));
    }

    fn emit(&self, event: MutationEvent) {
        if let Some(hook) = &self.on_mutation {
            hook(&event);
        }
    }

    pub fn registry(&self) -> &FieldTypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FieldTypeRegistry {
        &mut self.registry
    }

    /// Read-only view of the layout being designed.
    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    /// Deep-copy snapshot of the current layout. Mutating the returned value
    /// never affects the session.
    pub fn data(&self) -> FormLayout {
        self.layout.clone()
    }

    /// Replace the layout from a saved document. Clears the selection.
    /// Fails with the structural error set when the document is malformed.
    pub fn load(&mut self, document: &Value) -> Result<()> {
        self.layout = schema::load(document)?;
        self.selected = None;
        Ok(())
    }

    /// Serialize the current design to its document form (deep copy).
    pub fn save(&self) -> Result<Value> {
        schema::save(&self.layout)
    }

    /// The currently selected field, if any.
    pub fn selected(&self) -> Option<&FieldId> {
        self.selected.as_ref()
    }

    /// Select a field (or clear with `None`). Selecting a field that does
    /// not exist clears the selection.
    pub fn select(&mut self, id: Option<FieldId>) {
        self.selected = id.filter(|id| self.layout.fields.contains_key(id));
    }

    /// Append a row. Returns the new row index.
    pub fn add_row(&mut self) -> usize {
        let index = self.layout.add_row();
        self.emit(MutationEvent::RowAdded { index });
        index
    }

    /// Append a column. Returns the new column index.
    pub fn add_column(&mut self) -> usize {
        let index = self.layout.add_column();
        self.emit(MutationEvent::ColumnAdded { index });
        index
    }

    /// Row index a deletion without an explicit target applies to: the
    /// selected field's row, else the last row.
    fn default_row_target(&self) -> usize {
        self.selected
            .as_ref()
            .and_then(|id| self.layout.cell_of_field(id))
            .map(|cell| cell.row)
            .unwrap_or_else(|| self.layout.row_count() - 1)
    }

    fn default_column_target(&self) -> usize {
        self.selected
            .as_ref()
            .and_then(|id| self.layout.cell_of_field(id))
            .map(|cell| cell.col)
            .unwrap_or_else(|| self.layout.column_count() - 1)
    }

    /// Delete a row; without an explicit target, the selected field's row,
    /// else the last. Clears the selection when the selected field was
    /// deleted with the row.
    pub fn delete_row(&mut self, target: Option<usize>) -> std::result::Result<RowRemoval, Refused> {
        let target = target.unwrap_or_else(|| self.default_row_target());
        let removal = self.layout.delete_row(target)?;
        if let Some(selected) = &self.selected {
            if removal.removed_fields.contains(selected) {
                debug!(id = %selected, "selected field deleted with its row");
                self.selected = None;
            }
        }
        self.emit(MutationEvent::RowDeleted {
            index: removal.index,
            removed_fields: removal.removed_fields.clone(),
        });
        Ok(removal)
    }

    /// Delete a column; target defaulting and selection handling as in
    /// [`delete_row`](Self::delete_row).
    pub fn delete_column(
        &mut self,
        target: Option<usize>,
    ) -> std::result::Result<ColumnRemoval, Refused> {
        let target = target.unwrap_or_else(|| self.default_column_target());
        let removal = self.layout.delete_column(target)?;
        if let Some(selected) = &self.selected {
            if removal.removed_fields.contains(selected) {
                self.selected = None;
            }
        }
        self.emit(MutationEvent::ColumnDeleted {
            index: removal.index,
            removed_fields: removal.removed_fields.clone(),
        });
        Ok(removal)
    }

    /// Create a field of the given type at the requested cell, resolving
    /// occupied targets through the placement fallback chain. The new field
    /// becomes the selection. Returns its id.
    pub fn add_field(&mut self, type_key: &str, row: usize, col: usize) -> Result<FieldId> {
        let added = self.layout.add_field(&self.registry, type_key, row, col)?;
        self.selected = Some(added.id.clone());
        self.emit(MutationEvent::FieldAdded {
            id: added.id.clone(),
            row: added.row,
            col: added.col,
        });
        Ok(added.id)
    }

    /// Delete a field, clearing its cell binding and the selection when it
    /// pointed at this field. Returns false when the field does not exist.
    pub fn remove_field(&mut self, id: &FieldId) -> bool {
        if !self.layout.remove_field(id) {
            return false;
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.emit(MutationEvent::FieldRemoved { id: id.clone() });
        true
    }

    /// Apply one label/property update to a field. Rapid-fire edits are
    /// last-write-wins; no intermediate state is retained. Returns false
    /// when the field does not exist.
    pub fn update_field(&mut self, id: &FieldId, update: FieldUpdate) -> bool {
        if !self.layout.update_field(id, update) {
            return false;
        }
        self.emit(MutationEvent::FieldUpdated { id: id.clone() });
        true
    }
}

impl Default for DesignSession {
    fn default() -> Self {
        Self::new()
    }
}
