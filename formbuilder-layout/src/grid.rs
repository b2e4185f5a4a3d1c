//! Structural grid mutations.
//!
//! Each operation is a single atomic transform of the [`FormLayout`]
//! aggregate: it either applies completely and re-establishes the cell
//! coverage invariant before returning, or (for deletions against the
//! minimum grid) refuses and leaves the layout untouched.

use tracing::debug;

use crate::error::Refused;
use crate::model::{FieldId, FormLayout, LayoutCell, LayoutColumn, LayoutRow};

/// Outcome of a successful row deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRemoval {
    pub index: usize,
    /// Fields that lived in the removed row and were deleted with it.
    pub removed_fields: Vec<FieldId>,
}

/// Outcome of a successful column deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRemoval {
    pub index: usize,
    pub removed_fields: Vec<FieldId>,
}

fn percent_width(count: usize) -> String {
    format!("{}%", 100.0 / count as f64)
}

impl FormLayout {
    /// Append a row track and one empty cell per column. Returns the new
    /// row index.
    pub fn add_row(&mut self) -> usize {
        self.layout.rows.push(LayoutRow::default());
        let row = self.layout.rows.len() - 1;
        for col in 0..self.layout.columns.len() {
            self.layout.cells.push(LayoutCell::unit(row, col));
        }
        debug!(row, "added row");
        row
    }

    /// Append a column track, re-dividing all widths to `100/(n+1)%`, and
    /// one empty cell per row. Returns the new column index.
    pub fn add_column(&mut self) -> usize {
        let width = percent_width(self.layout.columns.len() + 1);
        for column in &mut self.layout.columns {
            column.width = width.clone();
        }
        self.layout.columns.push(LayoutColumn { width });
        let col = self.layout.columns.len() - 1;
        for row in 0..self.layout.rows.len() {
            self.layout.cells.push(LayoutCell::unit(row, col));
        }
        debug!(col, "added column");
        col
    }

    /// Delete a row track, cascading deletion of every field bound in it and
    /// renumbering the rows below to keep indices contiguous.
    ///
    /// Refuses when only one row remains or the index is out of bounds;
    /// the layout is left untouched.
    pub fn delete_row(&mut self, target: usize) -> Result<RowRemoval, Refused> {
        if self.layout.rows.len() <= 1 {
            return Err(Refused::new("无法删除行，至少需要保留一行"));
        }
        if target >= self.layout.rows.len() {
            return Err(Refused::new("无法删除行，行索引超出范围"));
        }

        self.layout.rows.remove(target);

        let mut removed_fields = Vec::new();
        for cell in &self.layout.cells {
            if cell.row == target {
                if let Some(id) = &cell.field_id {
                    removed_fields.push(id.clone());
                }
            }
        }
        self.layout.cells.retain(|cell| cell.row != target);
        for cell in &mut self.layout.cells {
            if cell.row > target {
                cell.row -= 1;
            }
        }
        for id in &removed_fields {
            self.fields.shift_remove(id);
        }

        debug!(
            row = target,
            removed_fields = removed_fields.len(),
            "deleted row"
        );
        Ok(RowRemoval {
            index: target,
            removed_fields,
        })
    }

    /// Delete a column track; symmetric to [`delete_row`](Self::delete_row),
    /// plus re-dividing the remaining widths to `100/n%`.
    pub fn delete_column(&mut self, target: usize) -> Result<ColumnRemoval, Refused> {
        if self.layout.columns.len() <= 1 {
            return Err(Refused::new("无法删除列，至少需要保留一列"));
        }
        if target >= self.layout.columns.len() {
            return Err(Refused::new("无法删除列，列索引超出范围"));
        }

        self.layout.columns.remove(target);
        let width = percent_width(self.layout.columns.len());
        for column in &mut self.layout.columns {
            column.width = width.clone();
        }

        let mut removed_fields = Vec::new();
        for cell in &self.layout.cells {
            if cell.col == target {
                if let Some(id) = &cell.field_id {
                    removed_fields.push(id.clone());
                }
            }
        }
        self.layout.cells.retain(|cell| cell.col != target);
        for cell in &mut self.layout.cells {
            if cell.col > target {
                cell.col -= 1;
            }
        }
        for id in &removed_fields {
            self.fields.shift_remove(id);
        }

        debug!(
            col = target,
            removed_fields = removed_fields.len(),
            "deleted column"
        );
        Ok(ColumnRemoval {
            index: target,
            removed_fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldInstance;

    fn bind(layout: &mut FormLayout, row: usize, col: usize, id: &str) {
        layout.fields.insert(
            FieldId::from(id),
            FieldInstance::new("text", format!("字段{id}")),
        );
        layout.cell_at_mut(row, col).unwrap().field_id = Some(FieldId::from(id));
    }

    #[test]
    fn add_row_extends_cells_per_column() {
        let mut layout = FormLayout::new();
        layout.add_column();
        let row = layout.add_row();
        assert_eq!(row, 1);
        assert_eq!(layout.row_count(), 2);
        assert_eq!(layout.layout.cells.len(), 4);
        assert!(layout.cell_at(1, 0).is_some());
        assert!(layout.cell_at(1, 1).is_some());
        assert!(layout.is_consistent());
    }

    #[test]
    fn add_column_redivides_widths() {
        let mut layout = FormLayout::new();
        layout.add_column();
        assert_eq!(layout.layout.columns[0].width, "50%");
        assert_eq!(layout.layout.columns[1].width, "50%");

        layout.add_column();
        for column in &layout.layout.columns {
            assert_eq!(column.width, "33.333333333333336%");
        }
        assert!(layout.is_consistent());
    }

    #[test]
    fn delete_row_refused_at_minimum() {
        let mut layout = FormLayout::new();
        let before = layout.clone();
        let refused = layout.delete_row(0).unwrap_err();
        assert_eq!(refused.reason, "无法删除行，至少需要保留一行");
        assert_eq!(layout, before);
    }

    #[test]
    fn delete_column_refused_at_minimum() {
        let mut layout = FormLayout::new();
        let before = layout.clone();
        let refused = layout.delete_column(0).unwrap_err();
        assert_eq!(refused.reason, "无法删除列，至少需要保留一列");
        assert_eq!(layout, before);
    }

    #[test]
    fn delete_row_out_of_bounds_refused() {
        let mut layout = FormLayout::new();
        layout.add_row();
        assert!(layout.delete_row(5).is_err());
        assert_eq!(layout.row_count(), 2);
    }

    #[test]
    fn delete_row_cascades_fields_and_renumbers() {
        let mut layout = FormLayout::new();
        layout.add_row();
        layout.add_row();
        bind(&mut layout, 1, 0, "a");
        bind(&mut layout, 2, 0, "b");

        let removal = layout.delete_row(1).unwrap();
        assert_eq!(removal.index, 1);
        assert_eq!(removal.removed_fields, vec![FieldId::from("a")]);

        assert_eq!(layout.row_count(), 2);
        assert!(!layout.fields.contains_key(&FieldId::from("a")));
        // the field from row 2 moved up to row 1
        let cell = layout.cell_of_field(&FieldId::from("b")).unwrap();
        assert_eq!(cell.row, 1);
        assert!(layout.is_consistent());
    }

    #[test]
    fn delete_column_cascades_and_redivides() {
        let mut layout = FormLayout::new();
        layout.add_column();
        layout.add_column();
        bind(&mut layout, 0, 1, "mid");

        let removal = layout.delete_column(1).unwrap();
        assert_eq!(removal.removed_fields, vec![FieldId::from("mid")]);
        assert_eq!(layout.column_count(), 2);
        for column in &layout.layout.columns {
            assert_eq!(column.width, "50%");
        }
        assert!(layout.fields.is_empty());
        assert!(layout.is_consistent());
    }

    #[test]
    fn mutation_sequences_preserve_coverage() {
        let mut layout = FormLayout::new();
        layout.add_row();
        layout.add_column();
        layout.add_row();
        layout.add_column();
        layout.delete_row(0).unwrap();
        layout.delete_column(2).unwrap();
        layout.add_row();
        assert!(layout.is_consistent());
        assert_eq!(
            layout.layout.cells.len(),
            layout.row_count() * layout.column_count()
        );
    }
}
