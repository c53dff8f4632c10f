//! Unsigned fixed-point numbers.

use crate::bits;
use crate::context::FixContext;
use crate::error::{FixError, FixResult};
use crate::format::FixFormat;
use crate::sfix::SFix;
use crate::unsigned::Unsigned;
use hls_common::{LogicVec, SizingMode};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An unsigned fixed-point number: an [`Unsigned`] raw value plus a [`FixFormat`].
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct UFix {
    raw: Unsigned,
    format: FixFormat,
}

fn equalize(a: &UFix, b: &UFix, ctx: &FixContext) -> FixResult<(FixFormat, Unsigned, Unsigned)> {
    let mode = ctx.sizing_mode();
    if mode == SizingMode::InSizeIsOutSize {
        let coerced = b.resize(a.int_width(), a.frac_width(), ctx)?;
        return Ok((a.format, a.raw.clone(), coerced.raw));
    }
    let frac = a.frac_width().max(b.frac_width());
    let format = FixFormat::unsigned(a.int_width().max(b.int_width()) + 1, frac)?;
    let width = match mode {
        SizingMode::Safe => format.total_bits() - 1,
        _ => format.total_bits(),
    };
    let align = |x: &UFix| -> FixResult<Unsigned> {
        x.raw
            .resize(width, ctx)?
            .shl((frac - x.frac_width()) as u32, ctx)
    };
    Ok((format, align(a)?, align(b)?))
}

impl UFix {
    pub(crate) fn with_format(raw: Unsigned, format: FixFormat) -> Self {
        debug_assert_eq!(raw.size(), format.total_bits());
        Self { raw, format }
    }

    /// Reinterprets `raw` as having `frac_width` fractional bits.
    pub fn from_unsigned(raw: Unsigned, frac_width: i32) -> Self {
        let format = FixFormat::of_raw(false, raw.size(), frac_width);
        Self { raw, format }
    }

    /// Reinterprets a bit vector.
    pub fn from_logic_vec(v: &LogicVec, frac_width: i32) -> FixResult<Self> {
        Ok(Self::from_unsigned(Unsigned::from_logic_vec(v)?, frac_width))
    }

    /// The integer `value` in format `(int_width, frac_width)`.
    pub fn from_u64(value: u64, int_width: i32, frac_width: i32, ctx: &FixContext) -> FixResult<Self> {
        let format = FixFormat::unsigned(int_width, frac_width)?;
        let scaled = bits::shift(&BigInt::from(value), frac_width);
        let raw = Unsigned::from_bigint(scaled, format.total_bits(), ctx)?;
        Ok(Self::with_format(raw, format))
    }

    /// `value * 2^frac_width`, truncated toward zero. Negative inputs go
    /// through the overflow mode.
    pub fn from_f64(value: f64, int_width: i32, frac_width: i32, ctx: &FixContext) -> FixResult<Self> {
        let format = FixFormat::unsigned(int_width, frac_width)?;
        let scaled = (value * 2f64.powi(frac_width)).trunc();
        let raw = BigInt::from_f64(scaled)
            .ok_or_else(|| FixError::InvalidFormat(format!("{value} is not a finite number")))?;
        Ok(Self::with_format(
            Unsigned::from_bigint(raw, format.total_bits(), ctx)?,
            format,
        ))
    }

    /// Zero in format `(1, 0)`.
    pub fn zero() -> Self {
        Self::from_unsigned(Unsigned::zero(), 0)
    }

    /// One in format `(1, 0)`.
    pub fn one() -> Self {
        Self::from_unsigned(Unsigned::one(), 0)
    }

    /// The format of this value.
    pub fn format(&self) -> FixFormat {
        self.format
    }

    /// Integer bits.
    pub fn int_width(&self) -> i32 {
        self.format.int_width()
    }

    /// Fractional bits.
    pub fn frac_width(&self) -> i32 {
        self.format.frac_width()
    }

    /// The raw value.
    pub fn unsigned_value(&self) -> &Unsigned {
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

    /// Zero-extends by one integer bit into a signed value.
    pub fn to_sfix(&self) -> SFix {
        SFix::from_signed(self.raw.to_signed(), self.frac_width())
    }

    /// The bits left of the binary point.
    pub fn int_part(&self) -> Unsigned {
        let width = self.int_width().max(0) as u32;
        let shifted = bits::shift(self.raw.value(), -self.frac_width());
        Unsigned::from_raw(bits::wrap_unsigned(&shifted, width), width)
    }

    /// The bits right of the binary point.
    pub fn frac_part(&self) -> Unsigned {
        let width = self.frac_width().max(0) as u32;
        Unsigned::from_raw(bits::wrap_unsigned(self.raw.value(), width), width)
    }

    /// Splits into sign (always `false`), integer digits and fractional digits.
    pub fn split(&self) -> (bool, Unsigned, Unsigned) {
        (false, self.int_part(), self.frac_part())
    }

    /// Moves to format `(int_width, frac_width)`.
    pub fn resize(&self, int_width: i32, frac_width: i32, ctx: &FixContext) -> FixResult<UFix> {
        let format = FixFormat::unsigned(int_width, frac_width)?;
        let aligned = bits::shift(self.raw.value(), frac_width - self.frac_width());
        let raw = Unsigned::from_bigint(aligned, format.total_bits(), ctx)?;
        Ok(Self::with_format(raw, format))
    }

    /// Sum on the equalized format.
    pub fn add(&self, other: &UFix, ctx: &FixContext) -> FixResult<UFix> {
        let (format, a, b) = equalize(self, other, ctx)?;
        Ok(Self::with_format(a.add(&b, ctx)?, format))
    }

    /// Difference on the equalized format; negative results obey the overflow mode.
    pub fn sub(&self, other: &UFix, ctx: &FixContext) -> FixResult<UFix> {
        let (format, a, b) = equalize(self, other, ctx)?;
        Ok(Self::with_format(a.sub(&b, ctx)?, format))
    }

    /// Negation into a signed value.
    pub fn neg(&self, ctx: &FixContext) -> FixResult<SFix> {
        Ok(SFix::from_signed(self.raw.neg(ctx)?, self.frac_width()))
    }

    /// Product in format `(ai + bi, af + bf)`.
    pub fn mul(&self, other: &UFix, ctx: &FixContext) -> FixResult<UFix> {
        let product = Self::from_unsigned(
            self.raw.mul(&other.raw),
            self.frac_width() + other.frac_width(),
        );
        if ctx.sizing_mode() == SizingMode::InSizeIsOutSize {
            return product.resize(self.int_width(), self.frac_width(), ctx);
        }
        Ok(product)
    }

    /// Quotient in format `(ai + bf, af + bi)`.
    pub fn div(&self, other: &UFix, ctx: &FixContext) -> FixResult<UFix> {
        if other.is_zero() {
            return Err(FixError::DivideByZero);
        }
        let shift = other.raw.size();
        let dividend = Unsigned::from_raw(self.raw.value() << shift, self.raw.size() + shift);
        let quotient = dividend.div(&other.raw, ctx)?;
        let result = Self::from_unsigned(quotient, self.frac_width() + other.int_width());
        if ctx.sizing_mode() == SizingMode::InSizeIsOutSize {
            return result.resize(self.int_width(), self.frac_width(), ctx);
        }
        Ok(result)
    }

    /// Remainder in format `(b.int, max frac)`.
    pub fn rem(&self, other: &UFix, ctx: &FixContext) -> FixResult<UFix> {
        if other.is_zero() {
            return Err(FixError::DivideByZero);
        }
        let frac = self.frac_width().max(other.frac_width());
        let widen = |x: &UFix| {
            let pad = (frac - x.frac_width()) as u32;
            Unsigned::from_raw(x.raw.value() << pad, x.raw.size() + pad)
        };
        let r = widen(self).rem(&widen(other), ctx)?;
        Ok(Self::from_unsigned(r, frac))
    }

    /// Renders in radix 2, 10 or 16 with up to `precision` fractional digits.
    pub fn to_string_radix(&self, radix: u32, precision: usize) -> FixResult<String> {
        bits::render_fixed(false, self.raw.value(), self.frac_width(), radix, precision)
    }

    /// Renders in the context's default radix with ten fractional digits.
    pub fn to_string_in(&self, ctx: &FixContext) -> FixResult<String> {
        self.to_string_radix(ctx.default_radix(), 10)
    }
}

impl fmt::Display for UFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_string_radix(10, 10) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}
