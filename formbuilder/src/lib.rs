//! Visual form builder core
//!
//! Two modes over one document: a [`DesignSession`] composes a data-entry
//! form from typed fields on a grid, a [`RuntimeSession`] renders the saved
//! layout as a live, validated form. Both consume the same building blocks —
//! the field type catalog from `formbuilder-fields` and the [`FormLayout`]
//! aggregate from `formbuilder-layout`.
//!
//! Each session exclusively owns its aggregate; documents cross the boundary
//! only as deep copies, so two sessions on one page can never alias state.
//!
//! ```
//! use formbuilder::{DesignSession, RuntimeSession, SubmitOutcome};
//! use serde_json::Map;
//!
//! let mut design = DesignSession::new();
//! design.add_field("text", 0, 0).unwrap();
//! let document = design.save().unwrap();
//!
//! let runtime = RuntimeSession::new(&document).unwrap();
//! assert!(runtime.submit(&Map::new()).is_accepted());
//! ```

pub mod design;
pub mod events;
pub mod runtime;

pub use design::DesignSession;
pub use events::MutationEvent;
pub use runtime::{RuntimeSession, SubmitOutcome};

pub use formbuilder_fields::{
    FieldTypeRegistry, FieldsError, Formatter, TypePatch, ValidationRules, Validity,
};
pub use formbuilder_layout::{
    FieldId, FieldInstance, FieldUpdate, FormLayout, FormValidation, LayoutError, Refused,
};
