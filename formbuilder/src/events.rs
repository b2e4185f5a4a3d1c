//! Structured mutation events.
//!
//! An authoring session can hand its host a callback that receives one event
//! per applied mutation — the observability hook standing in for ad-hoc
//! console tracing. Refused mutations emit nothing.

use formbuilder_layout::FieldId;

/// One applied mutation of the design session's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationEvent {
    RowAdded {
        index: usize,
    },
    ColumnAdded {
        index: usize,
    },
    RowDeleted {
        index: usize,
        removed_fields: Vec<FieldId>,
    },
    ColumnDeleted {
        index: usize,
        removed_fields: Vec<FieldId>,
    },
    FieldAdded {
        id: FieldId,
        row: usize,
        col: usize,
    },
    FieldRemoved {
        id: FieldId,
    },
    FieldUpdated {
        id: FieldId,
    },
}
