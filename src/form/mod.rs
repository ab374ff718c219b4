//! Registration form domain layer
//!
//! Field identifiers, the form aggregate, its validation schema and the
//! controller that drives lookup and submission.

mod controller;
mod errors;
mod field;
mod registration;
pub mod schema;

pub use controller::{
    FormController, LookupRequest, Notification, SubmitAttempt, SubmitPhase, SubmitReport,
    FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
pub use errors::FieldErrors;
pub use field::{Field, FieldTypeMismatch, FieldValue};
pub use registration::RegistrationForm;
