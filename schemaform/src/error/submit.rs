//! Submission errors

use crate::validation::ErrorMap;

/// Error returned when a submit is refused.
///
/// The submit callback has not been invoked.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmitError {
    /// The validation pass before submit reported errors.
    #[error("Form has {} invalid field(s)", .errors.len())]
    Invalid { errors: ErrorMap },
}

impl SubmitError {
    /// The errors that blocked the submit.
    pub fn errors(&self) -> &ErrorMap {
        match self {
            SubmitError::Invalid { errors } => errors,
        }
    }
}
