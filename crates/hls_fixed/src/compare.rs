//! Sizing-mode-aware value comparison.
//!
//! Under `Safe` and `VhdlCompliant` operands are compared losslessly. Under
//! `InSizeIsOutSize` both operands are first coerced into the narrower width
//! (for fixed point, the intersection format, widened to at least one bit)
//! using the active overflow mode, so the outcome can depend on the
//! configuration while staying symmetric. Under `Fail` a coercion that
//! discards significant bits is an error for every comparison.

use crate::bits;
use crate::context::FixContext;
use crate::error::FixResult;
use crate::sfix::SFix;
use crate::signed::Signed;
use crate::ufix::UFix;
use crate::unsigned::Unsigned;
use hls_common::SizingMode;
use num_bigint::BigInt;
use std::cmp::Ordering;

/// HDL comparison between hardware numeric values.
pub trait HwCompare<Rhs: ?Sized = Self> {
    /// Orders `self` against `other` under the context's sizing mode.
    fn compare(&self, other: &Rhs, ctx: &FixContext) -> FixResult<Ordering>;

    /// Value equality.
    fn equals(&self, other: &Rhs, ctx: &FixContext) -> FixResult<bool> {
        Ok(self.compare(other, ctx)? == Ordering::Equal)
    }

    /// Negation of [`equals`](Self::equals).
    fn not_equals(&self, other: &Rhs, ctx: &FixContext) -> FixResult<bool> {
        Ok(!self.equals(other, ctx)?)
    }

    /// `self < other`.
    fn less_than(&self, other: &Rhs, ctx: &FixContext) -> FixResult<bool> {
        Ok(self.compare(other, ctx)? == Ordering::Less)
    }

    /// `self <= other`.
    fn less_equal(&self, other: &Rhs, ctx: &FixContext) -> FixResult<bool> {
        Ok(self.compare(other, ctx)? != Ordering::Greater)
    }

    /// `self > other`.
    fn greater_than(&self, other: &Rhs, ctx: &FixContext) -> FixResult<bool> {
        Ok(self.compare(other, ctx)? == Ordering::Greater)
    }

    /// `self >= other`.
    fn greater_equal(&self, other: &Rhs, ctx: &FixContext) -> FixResult<bool> {
        Ok(self.compare(other, ctx)? != Ordering::Less)
    }
}

fn pinned(ctx: &FixContext) -> bool {
    ctx.sizing_mode() == SizingMode::InSizeIsOutSize
}

/// Common format for a pinned fixed-point comparison: the narrower integer
/// and fractional widths, with the integer part raised so at least one bit
/// remains when the operands' binary points do not overlap.
fn pinned_format(a_int: i32, a_frac: i32, b_int: i32, b_frac: i32) -> (i32, i32) {
    let frac = a_frac.min(b_frac);
    (a_int.min(b_int).max(1 - frac), frac)
}

/// Compares two raw values after moving both binary points to the finer one.
fn cmp_aligned(a: &BigInt, a_frac: i32, b: &BigInt, b_frac: i32) -> Ordering {
    let frac = a_frac.max(b_frac);
    bits::shift(a, frac - a_frac).cmp(&bits::shift(b, frac - b_frac))
}

impl HwCompare for Unsigned {
    fn compare(&self, other: &Unsigned, ctx: &FixContext) -> FixResult<Ordering> {
        if !pinned(ctx) {
            return Ok(self.value().cmp(other.value()));
        }
        let width = self.size().min(other.size());
        let a = self.resize(width, ctx)?;
        let b = other.resize(width, ctx)?;
        Ok(a.value().cmp(b.value()))
    }
}

impl HwCompare for Signed {
    fn compare(&self, other: &Signed, ctx: &FixContext) -> FixResult<Ordering> {
        if !pinned(ctx) {
            return Ok(self.value().cmp(other.value()));
        }
        let width = self.size().min(other.size());
        let a = self.resize(width, ctx)?;
        let b = other.resize(width, ctx)?;
        Ok(a.value().cmp(b.value()))
    }
}

impl HwCompare for SFix {
    fn compare(&self, other: &SFix, ctx: &FixContext) -> FixResult<Ordering> {
        if !pinned(ctx) {
            return Ok(cmp_aligned(
                self.signed_value().value(),
                self.frac_width(),
                other.signed_value().value(),
                other.frac_width(),
            ));
        }
        let (int, frac) = pinned_format(
            self.int_width(),
            self.frac_width(),
            other.int_width(),
            other.frac_width(),
        );
        let a = self.resize(int, frac, ctx)?;
        let b = other.resize(int, frac, ctx)?;
        Ok(a.signed_value().value().cmp(b.signed_value().value()))
    }
}

impl HwCompare for UFix {
    fn compare(&self, other: &UFix, ctx: &FixContext) -> FixResult<Ordering> {
        if !pinned(ctx) {
            return Ok(cmp_aligned(
                self.unsigned_value().value(),
                self.frac_width(),
                other.unsigned_value().value(),
                other.frac_width(),
            ));
        }
        let (int, frac) = pinned_format(
            self.int_width(),
            self.frac_width(),
            other.int_width(),
            other.frac_width(),
        );
        let a = self.resize(int, frac, ctx)?;
        let b = other.resize(int, frac, ctx)?;
        Ok(a.unsigned_value().value().cmp(b.unsigned_value().value()))
    }
}

impl HwCompare<UFix> for SFix {
    fn compare(&self, other: &UFix, ctx: &FixContext) -> FixResult<Ordering> {
        self.compare(&other.to_sfix(), ctx)
    }
}

impl HwCompare<SFix> for UFix {
    fn compare(&self, other: &SFix, ctx: &FixContext) -> FixResult<Ordering> {
        self.to_sfix().compare(other, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FixError;
    use hls_common::OverflowMode;

    fn ctx() -> FixContext {
        FixContext::default()
    }

    #[test]
    fn integers_compare_by_value_across_widths() {
        let a = Unsigned::from_u64(5, 4, &ctx()).unwrap();
        let b = Unsigned::from_u64(5, 12, &ctx()).unwrap();
        assert_ne!(a, b);
        assert!(a.equals(&b, &ctx()).unwrap());
        assert!(b.equals(&a, &ctx()).unwrap());
        let c = Signed::from_i64(-2, 4, &ctx()).unwrap();
        let d = Signed::from_i64(3, 8, &ctx()).unwrap();
        assert!(c.less_than(&d, &ctx()).unwrap());
        assert!(d.greater_equal(&c, &ctx()).unwrap());
    }

    #[test]
    fn pinned_sizes_coerce_to_narrower() {
        let pinned = ctx().with_sizing_mode(SizingMode::InSizeIsOutSize);
        let a = Unsigned::from_u64(3, 4, &ctx()).unwrap();
        let b = Unsigned::from_u64(19, 8, &ctx()).unwrap();
        assert!(!a.equals(&b, &ctx()).unwrap());
        assert!(a.equals(&b, &pinned).unwrap());
        assert!(b.equals(&a, &pinned).unwrap());
        let fail = pinned.with_overflow_mode(OverflowMode::Fail);
        assert!(matches!(a.equals(&b, &fail), Err(FixError::Overflow { .. })));
        assert!(matches!(a.not_equals(&b, &fail), Err(FixError::Overflow { .. })));
        assert!(a.less_than(&b, &fail).is_err());
    }

    #[test]
    fn pinned_fail_propagates_from_every_comparison() {
        let fail = ctx()
            .with_sizing_mode(SizingMode::InSizeIsOutSize)
            .with_overflow_mode(OverflowMode::Fail);
        let a = Unsigned::from_u64(3, 4, &ctx()).unwrap();
        let b = Unsigned::from_u64(200, 8, &ctx()).unwrap();
        let overflow = FixError::Overflow {
            value: "200".into(),
            width: 4,
            signed: false,
        };
        assert_eq!(a.less_than(&b, &fail), Err(overflow.clone()));
        assert_eq!(a.equals(&b, &fail), Err(overflow.clone()));
        assert_eq!(b.equals(&a, &fail), Err(overflow));
        // Fits in the narrower width, so no bits are lost.
        let c = Unsigned::from_u64(3, 8, &ctx()).unwrap();
        assert!(a.equals(&c, &fail).unwrap());
    }

    #[test]
    fn pinned_disjoint_binary_points() {
        let pinned = ctx().with_sizing_mode(SizingMode::InSizeIsOutSize);
        let s4 = Signed::from_i64(5, 4, &ctx()).unwrap();
        // (-2, 6) holds 5/64; (6, -2) holds 20. The common format is (3, -2).
        let a = SFix::from_signed(s4.clone(), 6);
        let b = SFix::from_signed(s4, -2);
        assert_eq!((a.int_width(), a.frac_width()), (-2, 6));
        assert_eq!((b.int_width(), b.frac_width()), (6, -2));

        let wrap = pinned.clone().with_overflow_mode(OverflowMode::Wrap);
        assert!(!a.equals(&b, &wrap).unwrap());
        assert!(!b.equals(&a, &wrap).unwrap());
        assert!(a.greater_than(&b, &wrap).unwrap());
        assert!(b.less_than(&a, &wrap).unwrap());

        let saturate = pinned.clone().with_overflow_mode(OverflowMode::Saturate);
        assert!(a.equals(&b, &saturate).unwrap());
        assert!(b.equals(&a, &saturate).unwrap());

        let fail = pinned.with_overflow_mode(OverflowMode::Fail);
        assert!(matches!(a.equals(&b, &fail), Err(FixError::Overflow { .. })));
        assert!(matches!(b.equals(&a, &fail), Err(FixError::Overflow { .. })));

        let u4 = Unsigned::from_u64(5, 4, &ctx()).unwrap();
        let c = UFix::from_unsigned(u4.clone(), 6);
        let d = UFix::from_unsigned(u4, -2);
        assert!(c.less_than(&d, &saturate).unwrap());
        assert!(d.greater_than(&c, &saturate).unwrap());
        assert!(c.not_equals(&d, &wrap).unwrap());
    }

    #[test]
    fn fixed_compare_aligns_binary_points() {
        let a = SFix::from_f64(1.5, 3, 1, &ctx()).unwrap();
        let b = SFix::from_f64(1.5, 5, 6, &ctx()).unwrap();
        assert!(a.equals(&b, &ctx()).unwrap());
        let c = SFix::from_f64(1.625, 5, 6, &ctx()).unwrap();
        assert!(a.less_than(&c, &ctx()).unwrap());
        let pinned = ctx().with_sizing_mode(SizingMode::InSizeIsOutSize);
        assert!(a.equals(&c, &pinned).unwrap());
        assert!(c.equals(&a, &pinned).unwrap());
    }

    #[test]
    fn mixed_signedness() {
        let s = SFix::from_f64(-0.5, 2, 2, &ctx()).unwrap();
        let u = UFix::from_f64(0.5, 2, 2, &ctx()).unwrap();
        assert!(s.less_than(&u, &ctx()).unwrap());
        assert!(u.greater_than(&s, &ctx()).unwrap());
        let v = SFix::from_f64(0.5, 4, 1, &ctx()).unwrap();
        assert!(u.equals(&v, &ctx()).unwrap());
        assert!(v.equals(&u, &ctx()).unwrap());
    }
}
