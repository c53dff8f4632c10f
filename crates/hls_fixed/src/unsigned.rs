//! Width-tracked unsigned integers.

use crate::bits;
use crate::context::FixContext;
use crate::error::{FixError, FixResult};
use crate::signed::Signed;
use hls_common::{LogicVec, SizingMode};
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An unsigned integer of `size` bits with `0 <= value < 2^size`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Unsigned {
    value: BigInt,
    size: u32,
}

impl Unsigned {
    /// Fits `value` into `size` bits using the context's overflow mode.
    pub fn from_bigint(value: BigInt, size: u32, ctx: &FixContext) -> FixResult<Self> {
        let value = bits::trim(value, size, false, ctx.overflow_mode())?;
        Ok(Self { value, size })
    }

    /// Fits a native value into `size` bits.
    pub fn from_u64(value: u64, size: u32, ctx: &FixContext) -> FixResult<Self> {
        Self::from_bigint(BigInt::from(value), size, ctx)
    }

    /// Builds a value already known to be in range.
    pub(crate) fn from_raw(value: BigInt, size: u32) -> Self {
        debug_assert!(value >= BigInt::zero() && value < bits::pow2(size));
        Self { value, size }
    }

    /// Zero of width 1.
    pub fn zero() -> Self {
        Self::from_raw(BigInt::zero(), 1)
    }

    /// One of width 1.
    pub fn one() -> Self {
        Self::from_raw(BigInt::from(1u32), 1)
    }

    /// Zero of the given width.
    pub fn zero_of(size: u32) -> Self {
        Self::from_raw(BigInt::zero(), size)
    }

    /// Parses an MSB-first `0`/`1` string; its length becomes the width.
    pub fn from_bit_string(s: &str) -> FixResult<Self> {
        let (value, size) = bits::parse_bit_string(s, false)?;
        Ok(Self::from_raw(value, size))
    }

    /// Reads a bit vector; every bit must be `0` or `1`.
    pub fn from_logic_vec(v: &LogicVec) -> FixResult<Self> {
        Ok(Self::from_raw(bits::from_logic_vec(v, false)?, v.width()))
    }

    /// The magnitude.
    pub fn value(&self) -> &BigInt {
        &self.value
    }

    /// The width in bits.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns `true` if the magnitude is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Returns bit `index` (0 is the least significant bit).
    pub fn bit(&self, index: u32) -> bool {
        index < self.size && self.value.bit(u64::from(index))
    }

    /// Truncates or zero-extends to `size` bits.
    pub fn resize(&self, size: u32, ctx: &FixContext) -> FixResult<Self> {
        Self::from_bigint(self.value.clone(), size, ctx)
    }

    fn add_sub_width(&self, other: &Unsigned, ctx: &FixContext) -> u32 {
        match ctx.sizing_mode() {
            SizingMode::Safe => self.size.max(other.size) + 1,
            SizingMode::VhdlCompliant | SizingMode::InSizeIsOutSize => self.size,
        }
    }

    /// Sum; the width follows the sizing mode.
    pub fn add(&self, other: &Unsigned, ctx: &FixContext) -> FixResult<Unsigned> {
        let width = self.add_sub_width(other, ctx);
        Self::from_bigint(&self.value + &other.value, width, ctx)
    }

    /// Difference; negative results are handled by the overflow mode.
    pub fn sub(&self, other: &Unsigned, ctx: &FixContext) -> FixResult<Unsigned> {
        let width = self.add_sub_width(other, ctx);
        Self::from_bigint(&self.value - &other.value, width, ctx)
    }

    /// Two's-complement negation, one bit wider unless sizes are pinned.
    pub fn neg(&self, ctx: &FixContext) -> FixResult<Signed> {
        let width = match ctx.sizing_mode() {
            SizingMode::InSizeIsOutSize => self.size,
            SizingMode::Safe | SizingMode::VhdlCompliant => self.size + 1,
        };
        Signed::from_bigint(-&self.value, width, ctx)
    }

    /// Product, `size(a) + size(b)` bits wide.
    pub fn mul(&self, other: &Unsigned) -> Unsigned {
        Self::from_raw(&self.value * &other.value, self.size + other.size)
    }

    /// Quotient, as wide as the dividend.
    pub fn div(&self, other: &Unsigned, ctx: &FixContext) -> FixResult<Unsigned> {
        if other.is_zero() {
            return Err(FixError::DivideByZero);
        }
        Self::from_bigint(&self.value / &other.value, self.size, ctx)
    }

    /// Remainder, as wide as the divisor.
    pub fn rem(&self, other: &Unsigned, ctx: &FixContext) -> FixResult<Unsigned> {
        if other.is_zero() {
            return Err(FixError::DivideByZero);
        }
        Self::from_bigint(&self.value % &other.value, other.size, ctx)
    }

    /// Floored modulo; identical to [`Unsigned::rem`] for non-negative operands.
    pub fn modulo(&self, other: &Unsigned, ctx: &FixContext) -> FixResult<Unsigned> {
        self.rem(other, ctx)
    }

    /// Quotient and remainder in one call.
    pub fn div_mod(&self, other: &Unsigned, ctx: &FixContext) -> FixResult<(Unsigned, Unsigned)> {
        Ok((self.div(other, ctx)?, self.rem(other, ctx)?))
    }

    /// Left shift within the current width.
    pub fn shl(&self, amount: u32, ctx: &FixContext) -> FixResult<Unsigned> {
        Self::from_bigint(&self.value << amount, self.size, ctx)
    }

    /// Logical right shift.
    pub fn shr(&self, amount: u32) -> Unsigned {
        Self::from_raw(&self.value >> amount, self.size)
    }

    /// `self + 1` kept at the current width.
    pub fn inc(&self, ctx: &FixContext) -> FixResult<Unsigned> {
        Self::from_bigint(&self.value + 1u32, self.size, ctx)
    }

    /// `self - 1` kept at the current width.
    pub fn dec(&self, ctx: &FixContext) -> FixResult<Unsigned> {
        Self::from_bigint(&self.value - 1u32, self.size, ctx)
    }

    /// Reinterprets as signed with one extra (zero) sign bit.
    pub fn to_signed(&self) -> Signed {
        Signed::from_raw(self.value.clone(), self.size + 1)
    }

    /// Converts to `u64`, applying the overflow mode when the value needs more bits.
    pub fn to_u64(&self, ctx: &FixContext) -> FixResult<u64> {
        let fitted = bits::trim(self.value.clone(), 64, false, ctx.overflow_mode())?;
        Ok(fitted.to_u64().unwrap_or_default())
    }

    /// Converts to `u32`, applying the overflow mode when the value needs more bits.
    pub fn to_u32(&self, ctx: &FixContext) -> FixResult<u32> {
        let fitted = bits::trim(self.value.clone(), 32, false, ctx.overflow_mode())?;
        Ok(fitted.to_u32().unwrap_or_default())
    }

    /// The bit pattern, index 0 being the least significant bit.
    pub fn to_logic_vec(&self) -> LogicVec {
        bits::to_logic_vec(&self.value, self.size)
    }

    /// MSB-first `0`/`1` string, exactly `size` characters long.
    pub fn to_bit_string(&self) -> String {
        self.to_logic_vec().to_string()
    }

    /// Renders in radix 2, 10 or 16 with at least `pad` digits.
    pub fn to_string_radix(&self, radix: u32, pad: usize) -> FixResult<String> {
        bits::render_int(&self.value, self.size, radix, pad)
    }

    /// Renders in the context's default radix.
    pub fn to_string_in(&self, ctx: &FixContext) -> FixResult<String> {
        self.to_string_radix(ctx.default_radix(), 0)
    }
}

impl From<u64> for Unsigned {
    /// Native values become 64 bits wide.
    fn from(value: u64) -> Self {
        Self::from_raw(BigInt::from(value), 64)
    }
}

impl fmt::Display for Unsigned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
