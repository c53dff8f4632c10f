//! Placeholder divisors for value-range analysis.

use crate::format::FixFormat;
use crate::sfix::SFix;
use crate::signed::Signed;
use crate::ufix::UFix;
use crate::unsigned::Unsigned;
use num_bigint::BigInt;

/// Supplies a non-zero divisor of the same shape as `self`.
///
/// Analysis passes that evaluate expressions over symbolic ranges use this to
/// keep a division well defined when the sampled divisor happens to be zero.
/// Ordinary arithmetic never calls it; a concrete zero divisor is an error.
pub trait DivisionGuard {
    /// The value 1 in the same width or format, or the smallest positive
    /// value when 1 is not representable.
    fn guarded_divisor(&self) -> Self;
}

impl DivisionGuard for Unsigned {
    fn guarded_divisor(&self) -> Self {
        Unsigned::from_raw(BigInt::from(1), self.size().max(1))
    }
}

impl DivisionGuard for Signed {
    fn guarded_divisor(&self) -> Self {
        Signed::from_raw(BigInt::from(1), self.size().max(2))
    }
}

/// Raw value of 1.0 in `format`, or raw LSB 1 when 1.0 does not fit.
fn raw_one(format: FixFormat) -> BigInt {
    let frac = format.frac_width();
    let int_room = if format.is_signed() {
        format.int_width() - 1
    } else {
        format.int_width()
    };
    if frac >= 0 && int_room >= 1 {
        BigInt::from(1) << frac as u32
    } else {
        BigInt::from(1)
    }
}

impl DivisionGuard for SFix {
    fn guarded_divisor(&self) -> Self {
        let format = self.format();
        if format.total_bits() < 2 {
            return SFix::one();
        }
        SFix::with_format(Signed::from_raw(raw_one(format), format.total_bits()), format)
    }
}

impl DivisionGuard for UFix {
    fn guarded_divisor(&self) -> Self {
        let format = self.format();
        if format.total_bits() < 1 {
            return UFix::one();
        }
        UFix::with_format(Unsigned::from_raw(raw_one(format), format.total_bits()), format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FixContext;

    #[test]
    fn integer_guard_is_one() {
        let ctx = FixContext::default();
        let u = Unsigned::zero_of(6).guarded_divisor();
        assert_eq!((u.size(), u.value().clone()), (6, BigInt::from(1)));
        let s = Signed::from_i64(0, 4, &ctx).unwrap().guarded_divisor();
        assert_eq!((s.size(), s.value().clone()), (4, BigInt::from(1)));
    }

    #[test]
    fn fixed_guard_keeps_format() {
        let ctx = FixContext::default();
        let v = SFix::from_f64(0.0, 3, 4, &ctx).unwrap().guarded_divisor();
        assert_eq!(v.format(), FixFormat::signed(3, 4).unwrap());
        assert_eq!(v.to_f64(), 1.0);
        let u = UFix::from_f64(0.0, 2, 2, &ctx).unwrap().guarded_divisor();
        assert_eq!(u.to_f64(), 1.0);
    }

    #[test]
    fn fixed_guard_falls_back_to_lsb() {
        let ctx = FixContext::default();
        let v = SFix::from_f64(0.0, 1, 3, &ctx).unwrap().guarded_divisor();
        assert_eq!(v.format(), FixFormat::signed(1, 3).unwrap());
        assert_eq!(v.to_f64(), 0.125);
        let u = UFix::from_f64(0.0, -1, 4, &ctx).unwrap().guarded_divisor();
        assert_eq!(u.to_f64(), 0.0625);
    }
}
