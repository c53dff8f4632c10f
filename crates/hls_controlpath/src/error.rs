//! Error types for control-path synthesis.

use hls_common::InternalError;
use hls_fixed::FixError;
use hls_ir::IrError;

/// Errors that abort control-path synthesis.
#[derive(Debug, thiserror::Error)]
pub enum ControlpathError {
    /// The caller broke the builder protocol or handed in an unusable matrix.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A numeric operation on a constant failed.
    #[error(transparent)]
    Fix(#[from] FixError),

    /// The IR rejected a construct.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// An invariant of the synthesis core was broken.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// Result alias for control-path operations.
pub type ControlpathResult<T> = Result<T, ControlpathError>;
