pub mod form;
pub mod submission;
pub mod schedule;

pub use form::{FormField, FormState, ValidationError};
pub use schedule::{schedule, ScheduledHandle};
pub use submission::{Submission, SubmissionState};

/// Failure reported by the hosted store.
///
/// Every cause (network, constraint violation, rejected payload) collapses into this one
/// type; callers never branch on the reason, they only offer a resubmit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Persistence failed: {message}")]
pub struct PersistenceError {
    pub message: String,
}

impl PersistenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
