//! Signed fixed-point numbers.

use crate::bits;
use crate::context::FixContext;
use crate::error::{FixError, FixResult};
use crate::format::FixFormat;
use crate::signed::Signed;
use crate::ufix::UFix;
use crate::unsigned::Unsigned;
use hls_common::{LogicVec, SizingMode};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A signed fixed-point number: a [`Signed`] raw value plus a [`FixFormat`].
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SFix {
    raw: Signed,
    format: FixFormat,
}

/// Brings both operands to a common format before an arithmetic operator.
///
/// Returns the result format and the two aligned raw values. Under `Safe` the
/// raw values are one bit narrower than the format so that the growing
/// add/sub lands exactly on it.
fn equalize(a: &SFix, b: &SFix, ctx: &FixContext) -> FixResult<(FixFormat, Signed, Signed)> {
    let mode = ctx.sizing_mode();
    if mode == SizingMode::InSizeIsOutSize {
        let coerced = b.resize(a.int_width(), a.frac_width(), ctx)?;
        return Ok((a.format, a.raw.clone(), coerced.raw));
    }
    let frac = a.frac_width().max(b.frac_width());
    let format = FixFormat::signed(a.int_width().max(b.int_width()) + 1, frac)?;
    let width = match mode {
        SizingMode::Safe => format.total_bits() - 1,
        _ => format.total_bits(),
    };
    let align = |x: &SFix| -> FixResult<Signed> {
        x.raw
            .resize(width, ctx)?
            .shl((frac - x.frac_width()) as u32, ctx)
    };
    Ok((format, align(a)?, align(b)?))
}

impl SFix {
    pub(crate) fn with_format(raw: Signed, format: FixFormat) -> Self {
        debug_assert_eq!(raw.size(), format.total_bits());
        Self { raw, format }
    }

    /// Reinterprets `raw` as having `frac_width` fractional bits.
    pub fn from_signed(raw: Signed, frac_width: i32) -> Self {
        let format = FixFormat::of_raw(true, raw.size(), frac_width);
        Self { raw, format }
    }

    /// Reinterprets a two's-complement bit vector.
    pub fn from_logic_vec(v: &LogicVec, frac_width: i32) -> FixResult<Self> {
        Ok(Self::from_signed(Signed::from_logic_vec(v)?, frac_width))
    }

    /// The integer `value` in format `(int_width, frac_width)`.
    pub fn from_i64(value: i64, int_width: i32, frac_width: i32, ctx: &FixContext) -> FixResult<Self> {
        let format = FixFormat::signed(int_width, frac_width)?;
        let scaled = bits::shift(&BigInt::from(value), frac_width);
        let raw = Signed::from_bigint(scaled, format.total_bits(), ctx)?;
        Ok(Self::with_format(raw, format))
    }

    /// `value * 2^frac_width`, truncated toward zero, in format `(int_width, frac_width)`.
    pub fn from_f64(value: f64, int_width: i32, frac_width: i32, ctx: &FixContext) -> FixResult<Self> {
        let format = FixFormat::signed(int_width, frac_width)?;
        let scaled = (value * 2f64.powi(frac_width)).trunc();
        let raw = BigInt::from_f64(scaled)
            .ok_or_else(|| FixError::InvalidFormat(format!("{value} is not a finite number")))?;
        Ok(Self::with_format(
            Signed::from_bigint(raw, format.total_bits(), ctx)?,
            format,
        ))
    }

    /// Zero in format `(1, 0)`.
    pub fn zero() -> Self {
        Self::from_signed(Signed::zero(), 0)
    }

    /// One in format `(2, 0)`.
    pub fn one() -> Self {
        Self::from_signed(Signed::one(), 0)
    }

    /// The format of this value.
    pub fn format(&self) -> FixFormat {
        self.format
    }

    /// Integer bits including the sign bit.
    pub fn int_width(&self) -> i32 {
        self.format.int_width()
    }

    /// Fractional bits.
    pub fn frac_width(&self) -> i32 {
        self.format.frac_width()
    }

    /// The raw two's-complement value.
    pub fn signed_value(&self) -> &Signed {
        &self.raw
    }

    /// Returns `true` if the raw value is zero.
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// The approximate real value.
    pub fn to_f64(&self) -> f64 {
        self.raw.value().to_f64().unwrap_or(f64::NAN) * 2f64.powi(-self.frac_width())
    }

    /// The raw bit pattern.
    pub fn to_logic_vec(&self) -> LogicVec {
        self.raw.to_logic_vec()
    }

    /// Drops the sign bit, keeping the low `total - 1` bits as an unsigned value.
    pub fn to_ufix(&self) -> UFix {
        let width = self.raw.size().saturating_sub(1);
        let bits = bits::wrap_unsigned(self.raw.value(), width);
        UFix::from_unsigned(Unsigned::from_raw(bits, width), self.frac_width())
    }

    /// The bits left of the binary point, as a signed slice.
    pub fn int_part(&self) -> Signed {
        let width = self.int_width().max(0) as u32;
        let shifted = bits::shift(self.raw.value(), -self.frac_width());
        Signed::from_raw(bits::wrap_signed(&shifted, width), width)
    }

    /// The bits right of the binary point, as an unsigned slice.
    pub fn frac_part(&self) -> Unsigned {
        let width = self.frac_width().max(0) as u32;
        Unsigned::from_raw(bits::wrap_unsigned(self.raw.value(), width), width)
    }

    /// Splits the magnitude into sign, integer digits and fractional digits.
    pub fn split(&self) -> (bool, Unsigned, Unsigned) {
        let magnitude = BigInt::from(self.raw.value().magnitude().clone());
        let int_width = self.int_width().max(0) as u32;
        let frac_width = self.frac_width().max(0) as u32;
        let int = bits::wrap_unsigned(&bits::shift(&magnitude, -self.frac_width()), int_width);
        let frac = bits::wrap_unsigned(&magnitude, frac_width);
        (
            self.raw.is_negative(),
            Unsigned::from_raw(int, int_width),
            Unsigned::from_raw(frac, frac_width),
        )
    }

    /// Moves to format `(int_width, frac_width)`.
    ///
    /// Dropped fractional bits are truncated toward negative infinity; the
    /// integer part is subject to the overflow mode.
    pub fn resize(&self, int_width: i32, frac_width: i32, ctx: &FixContext) -> FixResult<SFix> {
        let format = FixFormat::signed(int_width, frac_width)?;
        let aligned = bits::shift(self.raw.value(), frac_width - self.frac_width());
        let raw = Signed::from_bigint(aligned, format.total_bits(), ctx)?;
        Ok(Self::with_format(raw, format))
    }

    /// Sum on the equalized format.
    pub fn add(&self, other: &SFix, ctx: &FixContext) -> FixResult<SFix> {
        let (format, a, b) = equalize(self, other, ctx)?;
        Ok(Self::with_format(a.add(&b, ctx)?, format))
    }

    /// Difference on the equalized format.
    pub fn sub(&self, other: &SFix, ctx: &FixContext) -> FixResult<SFix> {
        let (format, a, b) = equalize(self, other, ctx)?;
        Ok(Self::with_format(a.sub(&b, ctx)?, format))
    }

    /// Negation; one more integer bit unless sizes are pinned.
    pub fn neg(&self, ctx: &FixContext) -> FixResult<SFix> {
        if ctx.sizing_mode() == SizingMode::InSizeIsOutSize {
            return Ok(Self::with_format(self.raw.neg(ctx)?, self.format));
        }
        let raw = Signed::from_bigint(-self.raw.value(), self.raw.size() + 1, ctx)?;
        Ok(Self::from_signed(raw, self.frac_width()))
    }

    /// Product in format `(ai + bi, af + bf)`.
    pub fn mul(&self, other: &SFix, ctx: &FixContext) -> FixResult<SFix> {
        let product = Self::from_signed(
            self.raw.mul(&other.raw),
            self.frac_width() + other.frac_width(),
        );
        if ctx.sizing_mode() == SizingMode::InSizeIsOutSize {
            return product.resize(self.int_width(), self.frac_width(), ctx);
        }
        Ok(product)
    }

    /// Quotient in format `(ai + bf + 1, af + bi)`.
    ///
    /// The dividend is pre-shifted by the divisor's total width so the
    /// quotient keeps fractional precision.
    pub fn div(&self, other: &SFix, ctx: &FixContext) -> FixResult<SFix> {
        if other.is_zero() {
            return Err(FixError::DivideByZero);
        }
        let shift = other.raw.size();
        let dividend = Signed::from_raw(self.raw.value() << shift, self.raw.size() + shift + 1);
        let quotient = dividend.div(&other.raw, ctx)?;
        let result = Self::from_signed(quotient, self.frac_width() + other.int_width());
        if ctx.sizing_mode() == SizingMode::InSizeIsOutSize {
            return result.resize(self.int_width(), self.frac_width(), ctx);
        }
        Ok(result)
    }

    /// Remainder (sign of the dividend) in format `(b.int, max frac)`.
    pub fn rem(&self, other: &SFix, ctx: &FixContext) -> FixResult<SFix> {
        if other.is_zero() {
            return Err(FixError::DivideByZero);
        }
        let frac = self.frac_width().max(other.frac_width());
        let widen = |x: &SFix| {
            let pad = (frac - x.frac_width()) as u32;
            Signed::from_raw(x.raw.value() << pad, x.raw.size() + pad)
        };
        let r = widen(self).rem(&widen(other), ctx)?;
        Ok(Self::from_signed(r, frac))
    }

    /// Renders in radix 2, 10 or 16 with up to `precision` fractional digits.
    pub fn to_string_radix(&self, radix: u32, precision: usize) -> FixResult<String> {
        let magnitude = BigInt::from(self.raw.value().magnitude().clone());
        bits::render_fixed(
            self.raw.is_negative(),
            &magnitude,
            self.frac_width(),
            radix,
            precision,
        )
    }

    /// Renders in the context's default radix with ten fractional digits.
    pub fn to_string_in(&self, ctx: &FixContext) -> FixResult<String> {
        self.to_string_radix(ctx.default_radix(), 10)
    }
}

impl fmt::Display for SFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_string_radix(10, 10) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hls_common::OverflowMode;

    fn ctx() -> FixContext {
        FixContext::default()
    }

    fn fix(v: f64, int: i32, frac: i32) -> SFix {
        SFix::from_f64(v, int, frac, &ctx()).unwrap()
    }

    #[test]
    fn from_f64_scales_and_truncates() {
        let v = fix(1.75, 4, 4);
        assert_eq!(v.signed_value().value(), &BigInt::from(28));
        assert_eq!(v.format().to_string(), "SFix8_4");
        assert_eq!(fix(-0.3, 2, 2).signed_value().value(), &BigInt::from(-1));
        assert!(SFix::from_f64(f64::NAN, 4, 4, &ctx()).is_err());
    }

    #[test]
    fn from_i64_shifts_into_place() {
        let v = SFix::from_i64(3, 4, 2, &ctx()).unwrap();
        assert_eq!(v.signed_value().value(), &BigInt::from(12));
        assert_eq!(v.to_f64(), 3.0);
    }

    #[test]
    fn from_signed_is_reinterpretation() {
        let s = Signed::from_i64(-6, 8, &ctx()).unwrap();
        let v = SFix::from_signed(s.clone(), 3);
        assert_eq!(v.format(), FixFormat::signed(5, 3).unwrap());
        assert_eq!(v.signed_value(), &s);
        assert_eq!(v.to_f64(), -0.75);
    }

    #[test]
    fn add_aligns_binary_points() {
        let a = fix(1.5, 3, 1);
        let b = fix(0.25, 2, 2);
        let r = a.add(&b, &ctx()).unwrap();
        assert_eq!(r.format(), FixFormat::signed(4, 2).unwrap());
        assert_eq!(r.to_f64(), 1.75);
        let safe = ctx().with_sizing_mode(SizingMode::Safe);
        let r = a.add(&b, &safe).unwrap();
        assert_eq!(r.format(), FixFormat::signed(4, 2).unwrap());
        assert_eq!(r.to_f64(), 1.75);
    }

    #[test]
    fn in_size_add_keeps_left_format() {
        let pinned = ctx().with_sizing_mode(SizingMode::InSizeIsOutSize);
        let a = fix(1.5, 3, 1);
        let b = fix(0.75, 2, 2);
        let r = a.add(&b, &pinned).unwrap();
        assert_eq!(r.format(), a.format());
        // 0.75 truncates to 0.5 in one fractional bit
        assert_eq!(r.to_f64(), 2.0);
    }

    #[test]
    fn sub_can_go_negative() {
        let r = fix(0.5, 2, 2).sub(&fix(1.25, 2, 2), &ctx()).unwrap();
        assert_eq!(r.to_f64(), -0.75);
    }

    #[test]
    fn neg_grows_integer_part() {
        let v = fix(-2.0, 2, 1);
        let r = v.neg(&ctx()).unwrap();
        assert_eq!(r.format(), FixFormat::signed(3, 1).unwrap());
        assert_eq!(r.to_f64(), 2.0);
        let pinned = ctx().with_sizing_mode(SizingMode::InSizeIsOutSize);
        assert_eq!(v.neg(&pinned).unwrap().to_f64(), -2.0);
    }

    #[test]
    fn mul_sums_widths() {
        let r = fix(1.5, 3, 1).mul(&fix(-0.75, 2, 2), &ctx()).unwrap();
        assert_eq!(r.format(), FixFormat::signed(5, 3).unwrap());
        assert_eq!(r.to_f64(), -1.125);
        let pinned = ctx().with_sizing_mode(SizingMode::InSizeIsOutSize);
        let r = fix(1.5, 3, 1).mul(&fix(-0.75, 2, 2), &pinned).unwrap();
        assert_eq!(r.format(), FixFormat::signed(3, 1).unwrap());
        assert_eq!(r.to_f64(), -1.5);
    }

    #[test]
    fn div_format_and_value() {
        let a = fix(3.0, 4, 2);
        let b = fix(1.5, 3, 1);
        let q = a.div(&b, &ctx()).unwrap();
        assert_eq!(q.format(), FixFormat::signed(6, 5).unwrap());
        assert_eq!(q.to_f64(), 2.0);
        assert_eq!(a.div(&fix(0.0, 3, 1), &ctx()), Err(FixError::DivideByZero));
    }

    #[test]
    fn rem_uses_divisor_integer_width() {
        let r = fix(3.5, 4, 1).rem(&fix(1.25, 3, 2), &ctx()).unwrap();
        assert_eq!(r.format(), FixFormat::signed(3, 2).unwrap());
        assert_eq!(r.to_f64(), 1.0);
    }

    #[test]
    fn resize_truncates_and_overflows() {
        let v = fix(2.75, 4, 2);
        assert_eq!(v.resize(4, 1, &ctx()).unwrap().to_f64(), 2.5);
        assert_eq!(v.resize(6, 4, &ctx()).unwrap().to_f64(), 2.75);
        let fail = ctx().with_overflow_mode(OverflowMode::Fail);
        assert!(v.resize(2, 2, &fail).is_err());
        assert!(v.resize(-4, 2, &ctx()).is_err());
    }

    #[test]
    fn ufix_conversion_slices_sign_bit() {
        let v = fix(1.5, 3, 2);
        let u = v.to_ufix();
        assert_eq!(u.format(), FixFormat::unsigned(2, 2).unwrap());
        assert_eq!(u.to_f64(), 1.5);
    }

    #[test]
    fn parts_and_split() {
        let v = fix(-2.75, 4, 2);
        assert_eq!(v.to_logic_vec().to_string(), "110101");
        assert_eq!(v.int_part().to_bit_string(), "1101");
        assert_eq!(v.frac_part().to_bit_string(), "01");
        let (negative, int, frac) = v.split();
        assert!(negative);
        assert_eq!(int.value(), &BigInt::from(2));
        assert_eq!(frac.to_bit_string(), "11");
    }

    #[test]
    fn render() {
        assert_eq!(fix(-2.75, 4, 2).to_string(), "-2.75");
        assert_eq!(fix(3.0, 4, 2).to_string(), "3");
        assert_eq!(fix(2.5, 4, 2).to_string_radix(2, 4).unwrap(), "10.1");
        assert_eq!(fix(2.5, 4, 2).to_string_radix(16, 2).unwrap(), "2.8");
    }
}
