pub mod form;
pub mod session;
pub mod workflow;

pub use form::ReservationForm;
pub use session::SessionState;
pub use workflow::{Redirect, SubmissionState, SubmissionWorkflow, SubmitError};
