//! Form fields, validation, state and the controller that drives submission

pub mod controller;
pub mod field;
pub mod state;

pub use controller::{FormController, Submission, SubmitRejected};
pub use field::{FieldId, UnknownField};
pub use state::FormState;
