//! # Models Module
//!
//! Re-exports the state owned by each controller. No model is shared between
//! controllers.

pub mod form_state;
pub mod modal_record;
pub mod nav_state;

pub use form_state::{FieldLabelState, FormPhase, FormState, FormSubmission};
pub use modal_record::{ModalCatalog, ModalRecord, ModalState};
pub use nav_state::{active_section, NavState, Section};
