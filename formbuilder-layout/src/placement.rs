//! Drop target resolution.
//!
//! A drop gesture names a requested cell; the resolver decides where the
//! field actually lands. The fallback chain guarantees a drop never silently
//! fails and never overwrites an existing field — worst case the grid grows
//! by one row.

use tracing::debug;

use crate::model::FormLayout;

/// The cell a drop actually lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub row: usize,
    pub col: usize,
    /// True when the grid was grown by one row to make space.
    pub grew_row: bool,
}

impl FormLayout {
    /// Resolve a requested drop position to the actual target cell.
    ///
    /// 1. The requested cell, when it exists and is empty.
    /// 2. Else the first empty cell in creation order — a stable scan, so
    ///    repeated drops are reproducible.
    /// 3. Else the grid is full: grow by one row and land at its first
    ///    column.
    pub fn resolve_drop_target(&mut self, row: usize, col: usize) -> DropTarget {
        if let Some(cell) = self.cell_at(row, col) {
            if cell.is_empty() {
                return DropTarget {
                    row,
                    col,
                    grew_row: false,
                };
            }
        }

        if self.is_full() {
            let new_row = self.add_row();
            debug!(new_row, "grid full, grew by one row");
            return DropTarget {
                row: new_row,
                col: 0,
                grew_row: true,
            };
        }

        // not full, so an empty cell exists; the requested position is the
        // unreachable fallback
        let target = self
            .first_empty_cell()
            .map(|cell| DropTarget {
                row: cell.row,
                col: cell.col,
                grew_row: false,
            })
            .unwrap_or(DropTarget {
                row,
                col,
                grew_row: false,
            });
        debug!(
            requested_row = row,
            requested_col = col,
            row = target.row,
            col = target.col,
            "requested cell occupied, falling back to first empty cell"
        );
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldId, FieldInstance};

    fn occupy(layout: &mut FormLayout, row: usize, col: usize, id: &str) {
        layout
            .fields
            .insert(FieldId::from(id), FieldInstance::new("text", id));
        layout.cell_at_mut(row, col).unwrap().field_id = Some(FieldId::from(id));
    }

    #[test]
    fn empty_requested_cell_is_returned_as_is() {
        let mut layout = FormLayout::new();
        let target = layout.resolve_drop_target(0, 0);
        assert_eq!(
            target,
            DropTarget {
                row: 0,
                col: 0,
                grew_row: false
            }
        );
    }

    #[test]
    fn occupied_cell_falls_back_to_first_empty_in_creation_order() {
        let mut layout = FormLayout::new();
        layout.add_column();
        layout.add_row();
        occupy(&mut layout, 0, 0, "a");

        // cells were created in order (0,0) (0,1) (1,0) (1,1)
        let target = layout.resolve_drop_target(0, 0);
        assert_eq!(target.row, 0);
        assert_eq!(target.col, 1);
        assert!(!target.grew_row);
    }

    #[test]
    fn full_grid_grows_by_one_row_and_lands_at_column_zero() {
        let mut layout = FormLayout::new();
        occupy(&mut layout, 0, 0, "a");

        let target = layout.resolve_drop_target(0, 0);
        assert_eq!(
            target,
            DropTarget {
                row: 1,
                col: 0,
                grew_row: true
            }
        );
        assert_eq!(layout.row_count(), 2);
        assert!(layout.is_consistent());
    }

    #[test]
    fn out_of_bounds_request_falls_back() {
        let mut layout = FormLayout::new();
        let target = layout.resolve_drop_target(7, 7);
        assert_eq!(target.row, 0);
        assert_eq!(target.col, 0);
    }

    #[test]
    fn is_full_tracks_remaining_capacity() {
        let mut layout = FormLayout::new();
        assert!(!layout.is_full());
        occupy(&mut layout, 0, 0, "a");
        assert!(layout.is_full());
        layout.add_row();
        assert!(!layout.is_full());
    }

    #[test]
    fn repeated_drops_on_full_grid_are_reproducible() {
        let mut layout = FormLayout::new();
        occupy(&mut layout, 0, 0, "a");

        let first = layout.resolve_drop_target(0, 0);
        assert_eq!((first.row, first.col), (1, 0));
        occupy(&mut layout, first.row, first.col, "b");

        let second = layout.resolve_drop_target(0, 0);
        assert_eq!((second.row, second.col), (2, 0));
        assert!(second.grew_row);
    }
}
