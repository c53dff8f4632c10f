use hls_common::{OverflowMode, SizingMode};
use hls_fixed::{
    FixContext, FixError, FixFormat, HwCompare, HwValue, SFix, Signed, UFix, Unsigned,
};
use proptest::prelude::*;

const SIZING: [SizingMode; 3] = [
    SizingMode::Safe,
    SizingMode::VhdlCompliant,
    SizingMode::InSizeIsOutSize,
];

const OVERFLOW: [OverflowMode; 3] = [
    OverflowMode::Wrap,
    OverflowMode::Saturate,
    OverflowMode::Fail,
];

fn every_context() -> Vec<FixContext> {
    let mut contexts = Vec::new();
    for sizing in SIZING {
        for overflow in OVERFLOW {
            contexts.push(
                FixContext::default()
                    .with_sizing_mode(sizing)
                    .with_overflow_mode(overflow),
            );
        }
    }
    contexts
}

proptest! {
    #[test]
    fn safe_add_never_overflows(a in any::<u32>(), wa in 32u32..40, b in any::<u32>(), wb in 32u32..40) {
        let ctx = FixContext::default()
            .with_sizing_mode(SizingMode::Safe)
            .with_overflow_mode(OverflowMode::Fail);
        let x = Unsigned::from_u64(u64::from(a), wa, &ctx).unwrap();
        let y = Unsigned::from_u64(u64::from(b), wb, &ctx).unwrap();
        let sum = x.add(&y, &ctx).unwrap();
        prop_assert_eq!(sum.size(), wa.max(wb) + 1);
        prop_assert_eq!(sum.to_u64(&ctx).unwrap(), u64::from(a) + u64::from(b));
    }

    #[test]
    fn unsigned_native_roundtrip(v in any::<u64>(), extra in 0u32..8) {
        let ctx = FixContext::default();
        let width = (64 - v.leading_zeros()).max(1) + extra;
        let u = Unsigned::from_u64(v, width, &ctx).unwrap();
        prop_assert_eq!(u.to_u64(&ctx).unwrap(), v);
        prop_assert_eq!(Unsigned::from_bit_string(&u.to_bit_string()).unwrap(), u);
    }

    #[test]
    fn sfix_reinterpretation_keeps_raw(v in any::<i32>(), frac in -8i32..40) {
        let s = Signed::from(i64::from(v));
        let fix = SFix::from_signed(s.clone(), frac);
        prop_assert_eq!(fix.signed_value(), &s);
        prop_assert_eq!(fix.format().total_bits(), s.size());
    }

    #[test]
    fn integer_equality_is_symmetric(a in any::<u16>(), wa in 1u32..20, b in any::<u16>(), wb in 1u32..20) {
        let wrap = FixContext::default();
        let x = Unsigned::from_u64(u64::from(a), wa, &wrap).unwrap();
        let y = Unsigned::from_u64(u64::from(b), wb, &wrap).unwrap();
        for ctx in every_context() {
            prop_assert_eq!(x.equals(&y, &ctx).ok(), y.equals(&x, &ctx).ok());
        }
    }

    #[test]
    fn fixed_equality_is_symmetric(
        a in any::<i16>(),
        af in -12i32..24,
        b in any::<i16>(),
        bf in -12i32..24,
    ) {
        // Raw widths stay at most 16 bits, so either width may go negative.
        let x = SFix::from_signed(Signed::from(i64::from(a)), af);
        let y = SFix::from_signed(Signed::from(i64::from(b)), bf);
        let magnitude = Unsigned::from_u64(u64::from(b.unsigned_abs()), 16, &FixContext::default()).unwrap();
        let u = UFix::from_unsigned(magnitude, bf);
        for ctx in every_context() {
            let pairs = [
                (x.equals(&y, &ctx), y.equals(&x, &ctx)),
                (x.equals(&u, &ctx), u.equals(&x, &ctx)),
            ];
            for (lhs, rhs) in pairs {
                prop_assert!(!matches!(lhs, Err(FixError::InvalidFormat(_))), "{:?}", lhs);
                prop_assert_eq!(lhs.ok(), rhs.ok());
            }
        }
        prop_assert!(x.equals(&x.clone(), &FixContext::default()).unwrap());
    }

    #[test]
    fn safe_fixed_add_is_exact(
        a in -1000i64..1000,
        af in 0i32..6,
        b in -1000i64..1000,
        bf in 0i32..6,
    ) {
        let ctx = FixContext::default()
            .with_sizing_mode(SizingMode::Safe)
            .with_overflow_mode(OverflowMode::Fail);
        let x = SFix::from_signed(Signed::from(a), af);
        let y = SFix::from_signed(Signed::from(b), bf);
        let sum = x.add(&y, &ctx).unwrap();
        prop_assert_eq!(sum.to_f64(), x.to_f64() + y.to_f64());
        prop_assert_eq!(
            sum.format(),
            FixFormat::signed(x.int_width().max(y.int_width()) + 1, af.max(bf)).unwrap()
        );
    }

    #[test]
    fn conversion_preserves_bit_pattern_within_signedness(v in any::<i16>(), frac in 0i32..8) {
        let value = HwValue::from(SFix::from_signed(Signed::from(i64::from(v)), frac));
        for kind in [hls_fixed::ValueKind::Signed, hls_fixed::ValueKind::Unsigned] {
            prop_assert_eq!(value.convert(kind).to_logic_vec(), value.to_logic_vec());
        }
    }
}
