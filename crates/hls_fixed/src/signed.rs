//! Width-tracked two's-complement integers.

use crate::bits;
use crate::context::FixContext;
use crate::error::{FixError, FixResult};
use crate::unsigned::Unsigned;
use hls_common::{LogicVec, SizingMode};
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A two's-complement integer of `size` bits.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Signed {
    value: BigInt,
    size: u32,
}

impl Signed {
    /// Fits `value` into `size` bits using the context's overflow mode.
    pub fn from_bigint(value: BigInt, size: u32, ctx: &FixContext) -> FixResult<Self> {
        let value = bits::trim(value, size, true, ctx.overflow_mode())?;
        Ok(Self { value, size })
    }

    /// Fits a native value into `size` bits.
    pub fn from_i64(value: i64, size: u32, ctx: &FixContext) -> FixResult<Self> {
        Self::from_bigint(BigInt::from(value), size, ctx)
    }

    pub(crate) fn from_raw(value: BigInt, size: u32) -> Self {
        debug_assert!({
            let (lo, hi) = bits::signed_bounds(size);
            value >= lo && value <= hi
        });
        Self { value, size }
    }

    /// Zero of width 1.
    pub fn zero() -> Self {
        Self::from_raw(BigInt::zero(), 1)
    }

    /// One of width 2.
    pub fn one() -> Self {
        Self::from_raw(BigInt::from(1), 2)
    }

    /// Zero of the given width.
    pub fn zero_of(size: u32) -> Self {
        Self::from_raw(BigInt::zero(), size)
    }

    /// Parses an MSB-first two's-complement `0`/`1` string.
    pub fn from_bit_string(s: &str) -> FixResult<Self> {
        let (value, size) = bits::parse_bit_string(s, true)?;
        Ok(Self::from_raw(value, size))
    }

    /// Reads a two's-complement bit vector; every bit must be `0` or `1`.
    pub fn from_logic_vec(v: &LogicVec) -> FixResult<Self> {
        Ok(Self::from_raw(bits::from_logic_vec(v, true)?, v.width()))
    }

    /// The value.
    pub fn value(&self) -> &BigInt {
        &self.value
    }

    /// The width in bits.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns `true` if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Returns `true` if the value is below zero.
    pub fn is_negative(&self) -> bool {
        bits::is_negative(&self.value)
    }

    /// Returns bit `index` of the two's-complement pattern.
    pub fn bit(&self, index: u32) -> bool {
        index < self.size && bits::wrap_unsigned(&self.value, self.size).bit(u64::from(index))
    }

    /// Truncates or sign-extends to `size` bits.
    pub fn resize(&self, size: u32, ctx: &FixContext) -> FixResult<Self> {
        Self::from_bigint(self.value.clone(), size, ctx)
    }

    fn add_sub_width(&self, other: &Signed, ctx: &FixContext) -> u32 {
        match ctx.sizing_mode() {
            SizingMode::Safe => self.size.max(other.size) + 1,
            SizingMode::VhdlCompliant | SizingMode::InSizeIsOutSize => self.size,
        }
    }

    /// Sum; the width follows the sizing mode.
    pub fn add(&self, other: &Signed, ctx: &FixContext) -> FixResult<Signed> {
        let width = self.add_sub_width(other, ctx);
        Self::from_bigint(&self.value + &other.value, width, ctx)
    }

    /// Difference; the width follows the sizing mode.
    pub fn sub(&self, other: &Signed, ctx: &FixContext) -> FixResult<Signed> {
        let width = self.add_sub_width(other, ctx);
        Self::from_bigint(&self.value - &other.value, width, ctx)
    }

    /// Negation; `Safe` grows one bit so the most negative value survives.
    pub fn neg(&self, ctx: &FixContext) -> FixResult<Signed> {
        let width = match ctx.sizing_mode() {
            SizingMode::Safe => self.size + 1,
            SizingMode::VhdlCompliant | SizingMode::InSizeIsOutSize => self.size,
        };
        Self::from_bigint(-&self.value, width, ctx)
    }

    /// Product, `size(a) + size(b)` bits wide.
    pub fn mul(&self, other: &Signed) -> Signed {
        Self::from_raw(&self.value * &other.value, self.size + other.size)
    }

    /// Quotient truncated toward zero, as wide as the dividend.
    pub fn div(&self, other: &Signed, ctx: &FixContext) -> FixResult<Signed> {
        if other.is_zero() {
            return Err(FixError::DivideByZero);
        }
        Self::from_bigint(&self.value / &other.value, self.size, ctx)
    }

    /// Remainder with the sign of the dividend (VHDL `rem`), as wide as the divisor.
    pub fn rem(&self, other: &Signed, ctx: &FixContext) -> FixResult<Signed> {
        if other.is_zero() {
            return Err(FixError::DivideByZero);
        }
        Self::from_bigint(&self.value % &other.value, other.size, ctx)
    }

    /// Remainder with the sign of the divisor (VHDL `mod`), as wide as the divisor.
    pub fn modulo(&self, other: &Signed, ctx: &FixContext) -> FixResult<Signed> {
        if other.is_zero() {
            return Err(FixError::DivideByZero);
        }
        let mut r = &self.value % &other.value;
        if !r.is_zero() && bits::is_negative(&r) != other.is_negative() {
            r += &other.value;
        }
        Self::from_bigint(r, other.size, ctx)
    }

    /// Quotient and remainder (`div` and `rem`) in one call.
    pub fn div_mod(&self, other: &Signed, ctx: &FixContext) -> FixResult<(Signed, Signed)> {
        Ok((self.div(other, ctx)?, self.rem(other, ctx)?))
    }

    /// Left shift within the current width.
    pub fn shl(&self, amount: u32, ctx: &FixContext) -> FixResult<Signed> {
        Self::from_bigint(&self.value << amount, self.size, ctx)
    }

    /// Arithmetic right shift.
    pub fn shr(&self, amount: u32) -> Signed {
        Self::from_raw(&self.value >> amount, self.size)
    }

    /// `self + 1` kept at the current width.
    pub fn inc(&self, ctx: &FixContext) -> FixResult<Signed> {
        Self::from_bigint(&self.value + 1u32, self.size, ctx)
    }

    /// `self - 1` kept at the current width.
    pub fn dec(&self, ctx: &FixContext) -> FixResult<Signed> {
        Self::from_bigint(&self.value - 1u32, self.size, ctx)
    }

    /// Reinterprets the raw two's-complement bits as an unsigned value of the same width.
    pub fn to_unsigned(&self) -> Unsigned {
        Unsigned::from_raw(bits::wrap_unsigned(&self.value, self.size), self.size)
    }

    /// Converts to `i64`, applying the overflow mode when the value needs more bits.
    pub fn to_i64(&self, ctx: &FixContext) -> FixResult<i64> {
        let fitted = bits::trim(self.value.clone(), 64, true, ctx.overflow_mode())?;
        Ok(fitted.to_i64().unwrap_or_default())
    }

    /// Converts to `i32`, applying the overflow mode when the value needs more bits.
    pub fn to_i32(&self, ctx: &FixContext) -> FixResult<i32> {
        let fitted = bits::trim(self.value.clone(), 32, true, ctx.overflow_mode())?;
        Ok(fitted.to_i32().unwrap_or_default())
    }

    /// The two's-complement bit pattern, index 0 being the least significant bit.
    pub fn to_logic_vec(&self) -> LogicVec {
        bits::to_logic_vec(&self.value, self.size)
    }

    /// MSB-first `0`/`1` string, exactly `size` characters long.
    pub fn to_bit_string(&self) -> String {
        self.to_logic_vec().to_string()
    }

    /// Renders in radix 2 or 16 (raw bits) or 10 (signed value) with at least `pad` digits.
    pub fn to_string_radix(&self, radix: u32, pad: usize) -> FixResult<String> {
        bits::render_int(&self.value, self.size, radix, pad)
    }

    /// Renders in the context's default radix.
    pub fn to_string_in(&self, ctx: &FixContext) -> FixResult<String> {
        self.to_string_radix(ctx.default_radix(), 0)
    }
}

impl From<i64> for Signed {
    /// Native values get the smallest width that holds them.
    fn from(value: i64) -> Self {
        let value = BigInt::from(value);
        let size = bits::min_signed_width(&value);
        Self::from_raw(value, size)
    }
}

impl fmt::Display for Signed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
