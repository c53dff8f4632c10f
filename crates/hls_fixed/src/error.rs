//! Errors raised by fixed-point and integer arithmetic.

/// Result alias for numeric operations.
pub type FixResult<T> = Result<T, FixError>;

/// Errors raised by the numeric types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixError {
    /// A value had to be trimmed under the `fail` overflow mode.
    #[error("arithmetic overflow: {value} does not fit in {width} {} bits", signedness(.signed))]
    Overflow {
        /// Decimal rendering of the offending value.
        value: String,
        /// The target width.
        width: u32,
        /// Whether the target is two's complement.
        signed: bool,
    },

    /// A concrete zero divisor reached the arithmetic layer.
    #[error("division by zero")]
    DivideByZero,

    /// A format, bit pattern, or floating-point input could not be represented.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Only radix 2, 10 and 16 are supported for rendering.
    #[error("unsupported radix {0}")]
    UnsupportedRadix(u32),
}

fn signedness(signed: &bool) -> &'static str {
    if *signed {
        "signed"
    } else {
        "unsigned"
    }
}
