//! Grid layout model, placement resolver and field instance store
//!
//! `formbuilder-layout` owns the [`FormLayout`] aggregate — the row×column
//! grid of cells, the form settings and the field instance map — and every
//! operation that mutates it. The aggregate is one JSON document, the wire
//! contract between the authoring surface and the runtime.
//!
//! # Architecture
//!
//! - **Atomic mutations**: every public operation re-establishes the cell
//!   coverage invariant before returning; a refused deletion leaves the
//!   layout untouched
//! - **Placement fallback**: a drop never overwrites an existing field —
//!   occupied targets fall back to the first empty cell, a full grid grows
//!   by one row
//! - **Single-writer**: the aggregate is exclusively owned by one session on
//!   one thread; load and save always deep-copy

pub mod error;
pub mod grid;
pub mod model;
pub mod placement;
pub mod schema;
pub mod store;
pub mod submit;

pub use error::{LayoutError, Refused, Result};
pub use grid::{ColumnRemoval, RowRemoval};
pub use model::{
    FieldId, FieldInstance, FormLayout, FormSettings, GridLayout, LabelPosition, LayoutCell,
    LayoutColumn, LayoutRow, WidthMode,
};
pub use placement::DropTarget;
pub use schema::{load, save, validate_document};
pub use store::{AddedField, FieldUpdate};
pub use submit::{format_submission, validate_form, FormValidation};
