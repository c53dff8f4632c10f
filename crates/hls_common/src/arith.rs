//! Arithmetic policy enums shared by the numeric types and `hls.toml`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a value that does not fit its target bit width is handled.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowMode {
    /// Reduce modulo `2^width` (two's-complement wraparound for signed values).
    #[default]
    Wrap,
    /// Clamp to the nearest representable value.
    Saturate,
    /// Report an arithmetic overflow error.
    Fail,
}

/// How the result width of an arithmetic operator is derived from its operands.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizingMode {
    /// Result widths follow `numeric_std` conventions.
    #[default]
    VhdlCompliant,
    /// Add/sub grow by one bit so they can never overflow.
    Safe,
    /// Every result takes the format of the left operand.
    InSizeIsOutSize,
}

impl fmt::Display for OverflowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowMode::Wrap => write!(f, "wrap"),
            OverflowMode::Saturate => write!(f, "saturate"),
            OverflowMode::Fail => write!(f, "fail"),
        }
    }
}

impl fmt::Display for SizingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizingMode::VhdlCompliant => write!(f, "vhdl-compliant"),
            SizingMode::Safe => write!(f, "safe"),
            SizingMode::InSizeIsOutSize => write!(f, "in-size-is-out-size"),
        }
    }
}
