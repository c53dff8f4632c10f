//! Common error type for the HLS workspace.

/// An internal error indicating a bug in the synthesis core, not a user input problem.
///
/// User-level problems (questionable flow matrices, skipped drivers) are
/// reported through the diagnostic sink instead.
#[derive(Debug, thiserror::Error)]
#[error("internal synthesis error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
