//! Fixed-point formats.

use crate::error::{FixError, FixResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signedness plus integer and fractional widths of a fixed-point number.
///
/// The raw bit pattern of a value in this format is `real * 2^frac_width`.
/// Either width may be negative (a binary point outside the stored bits), but
/// the total width never is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FixFormat {
    is_signed: bool,
    int_width: i32,
    frac_width: i32,
}

impl FixFormat {
    /// Creates a format, rejecting a negative total width.
    pub fn new(is_signed: bool, int_width: i32, frac_width: i32) -> FixResult<Self> {
        if int_width + frac_width < 0 {
            return Err(FixError::InvalidFormat(format!(
                "total width {int_width} + {frac_width} is negative"
            )));
        }
        Ok(Self {
            is_signed,
            int_width,
            frac_width,
        })
    }

    /// A signed format.
    pub fn signed(int_width: i32, frac_width: i32) -> FixResult<Self> {
        Self::new(true, int_width, frac_width)
    }

    /// An unsigned format.
    pub fn unsigned(int_width: i32, frac_width: i32) -> FixResult<Self> {
        Self::new(false, int_width, frac_width)
    }

    /// Format of a raw integer of `total` bits with `frac_width` fractional bits.
    pub(crate) fn of_raw(is_signed: bool, total: u32, frac_width: i32) -> Self {
        Self {
            is_signed,
            int_width: total as i32 - frac_width,
            frac_width,
        }
    }

    /// Recovers a format from a declared bit range `high downto low`.
    pub fn from_range(is_signed: bool, high: i32, low: i32) -> FixResult<Self> {
        Self::new(is_signed, high + 1, -low)
    }

    /// Whether values are two's complement.
    pub fn is_signed(&self) -> bool {
        self.is_signed
    }

    /// Bits left of the binary point, including the sign bit.
    pub fn int_width(&self) -> i32 {
        self.int_width
    }

    /// Bits right of the binary point.
    pub fn frac_width(&self) -> i32 {
        self.frac_width
    }

    /// `int_width + frac_width`.
    pub fn total_width(&self) -> i32 {
        self.int_width + self.frac_width
    }

    /// The total width as a bit count.
    pub fn total_bits(&self) -> u32 {
        self.total_width().max(0) as u32
    }

    /// Declared range `(high, low)`, i.e. `int_width - 1 downto -frac_width`.
    pub fn range(&self) -> (i32, i32) {
        (self.int_width - 1, -self.frac_width)
    }
}

impl fmt::Display for FixFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.is_signed { "SFix" } else { "UFix" };
        write!(f, "{prefix}{}_{}", self.total_width(), self.frac_width)
    }
}
