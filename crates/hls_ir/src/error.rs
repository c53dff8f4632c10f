//! Error types for IR construction.

use thiserror::Error;

/// Result alias for IR operations.
pub type IrResult<T> = Result<T, IrError>;

/// Errors raised while building or querying the IR.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    /// A type has no fixed-point interpretation, or its range is malformed.
    #[error("invalid fixed-point format: {0}")]
    InvalidFormat(String),
    /// A [`ProcessBuilder`](crate::builder::ProcessBuilder) was driven out of order.
    #[error("process builder misuse: {0}")]
    Builder(String),
}
