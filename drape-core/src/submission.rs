use crate::{CoreError, CoreResult};

/// Lifecycle of one form submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed { message: String },
}

impl SubmissionState {
    fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "IDLE",
            SubmissionState::Submitting => "SUBMITTING",
            SubmissionState::Success => "SUCCESS",
            SubmissionState::Failed { .. } => "FAILED",
        }
    }
}

/// Tracks `Idle → Submitting → {Success, Failed}` for a single form.
///
/// `begin` while a call is in flight is refused, which is what keeps a double click from
/// writing the same order twice.
#[derive(Debug, Default)]
pub struct Submission {
    state: SubmissionState,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// The submit control is disabled while this is true.
    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Error message of the last failed attempt, kept until the next `begin`.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Transition: Idle | Failed → Submitting
    pub fn begin(&mut self) -> CoreResult<()> {
        match self.state {
            SubmissionState::Idle | SubmissionState::Failed { .. } => {
                self.state = SubmissionState::Submitting;
                Ok(())
            }
            _ => Err(self.invalid("SUBMITTING")),
        }
    }

    /// Transition: Submitting → Success
    pub fn succeed(&mut self) -> CoreResult<()> {
        if !self.is_submitting() {
            return Err(self.invalid("SUCCESS"));
        }
        self.state = SubmissionState::Success;
        Ok(())
    }

    /// Transition: Submitting → Failed
    pub fn fail(&mut self, message: impl Into<String>) -> CoreResult<()> {
        if !self.is_submitting() {
            return Err(self.invalid("FAILED"));
        }
        self.state = SubmissionState::Failed {
            message: message.into(),
        };
        Ok(())
    }

    /// Start a fresh submission instance.
    pub fn reset(&mut self) {
        self.state = SubmissionState::Idle;
    }

    fn invalid(&self, to: &str) -> CoreError {
        CoreError::InvalidTransition {
            from: self.state.label().to_string(),
            to: to.to_string(),
        }
    }
}
