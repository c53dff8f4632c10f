//! Raw big-integer helpers shared by the numeric types.

use crate::error::{FixError, FixResult};
use hls_common::{Logic, LogicVec, OverflowMode};
use num_bigint::{BigInt, Sign};
use num_traits::{One, Zero};

pub(crate) fn pow2(bits: u32) -> BigInt {
    BigInt::one() << bits
}

pub(crate) fn is_negative(value: &BigInt) -> bool {
    value.sign() == Sign::Minus
}

/// Inclusive range of a two's-complement field; width 0 only holds zero.
pub(crate) fn signed_bounds(width: u32) -> (BigInt, BigInt) {
    if width == 0 {
        return (BigInt::zero(), BigInt::zero());
    }
    let half = pow2(width - 1);
    (-&half, half - 1u32)
}

pub(crate) fn unsigned_bounds(width: u32) -> (BigInt, BigInt) {
    (BigInt::zero(), pow2(width) - 1u32)
}

/// Reduces `value` modulo `2^width` into `[0, 2^width)`.
pub(crate) fn wrap_unsigned(value: &BigInt, width: u32) -> BigInt {
    let modulus = pow2(width);
    let rem = value % &modulus;
    if is_negative(&rem) {
        rem + modulus
    } else {
        rem
    }
}

/// Reduces `value` modulo `2^width` and folds it into the two's-complement range.
pub(crate) fn wrap_signed(value: &BigInt, width: u32) -> BigInt {
    if width == 0 {
        return BigInt::zero();
    }
    let raw = wrap_unsigned(value, width);
    if raw >= pow2(width - 1) {
        raw - pow2(width)
    } else {
        raw
    }
}

/// Fits `value` into a `width`-bit field according to `mode`.
pub(crate) fn trim(value: BigInt, width: u32, signed: bool, mode: OverflowMode) -> FixResult<BigInt> {
    let (lo, hi) = if signed {
        signed_bounds(width)
    } else {
        unsigned_bounds(width)
    };
    if value >= lo && value <= hi {
        return Ok(value);
    }
    match mode {
        OverflowMode::Wrap => Ok(if signed {
            wrap_signed(&value, width)
        } else {
            wrap_unsigned(&value, width)
        }),
        OverflowMode::Saturate => Ok(if value < lo { lo } else { hi }),
        OverflowMode::Fail => Err(FixError::Overflow {
            value: value.to_string(),
            width,
            signed,
        }),
    }
}

/// Smallest two's-complement width holding `value` (at least one bit).
pub(crate) fn min_signed_width(value: &BigInt) -> u32 {
    let magnitude_bits = if is_negative(value) {
        (-value - 1u32).bits()
    } else {
        value.bits()
    };
    magnitude_bits as u32 + 1
}

/// Shifts left for positive amounts and arithmetically right for negative ones.
pub(crate) fn shift(value: &BigInt, amount: i32) -> BigInt {
    if amount >= 0 {
        value << amount.unsigned_abs()
    } else {
        value >> amount.unsigned_abs()
    }
}

pub(crate) fn to_logic_vec(value: &BigInt, width: u32) -> LogicVec {
    let raw = wrap_unsigned(value, width);
    let mut v = LogicVec::new(width);
    for i in 0..width {
        if raw.bit(u64::from(i)) {
            v.set(i, Logic::One);
        }
    }
    v
}

pub(crate) fn from_logic_vec(v: &LogicVec, signed: bool) -> FixResult<BigInt> {
    let mut raw = BigInt::zero();
    for i in (0..v.width()).rev() {
        let bit = v.get(i).to_bool().ok_or_else(|| {
            FixError::InvalidFormat(format!("bit {i} of \"{v}\" is not 0 or 1"))
        })?;
        raw <<= 1u32;
        if bit {
            raw += 1u32;
        }
    }
    if signed && v.width() > 0 && raw >= pow2(v.width() - 1) {
        raw -= pow2(v.width());
    }
    Ok(raw)
}

pub(crate) fn parse_bit_string(s: &str, signed: bool) -> FixResult<(BigInt, u32)> {
    let v = LogicVec::from_binary_str(s)
        .ok_or_else(|| FixError::InvalidFormat(format!("\"{s}\" is not a bit string")))?;
    Ok((from_logic_vec(&v, signed)?, v.width()))
}

pub(crate) fn check_radix(radix: u32) -> FixResult<()> {
    match radix {
        2 | 10 | 16 => Ok(()),
        _ => Err(FixError::UnsupportedRadix(radix)),
    }
}

/// Renders an integer field: radix 2 and 16 show the raw bit pattern, radix 10
/// the signed value. `pad` is a minimum digit count.
pub(crate) fn render_int(value: &BigInt, width: u32, radix: u32, pad: usize) -> FixResult<String> {
    check_radix(radix)?;
    let (sign, digits) = match radix {
        2 => ("", to_logic_vec(value, width).to_string()),
        16 => {
            let natural = width.div_ceil(4).max(1) as usize;
            let hex = wrap_unsigned(value, width).to_str_radix(16).to_uppercase();
            ("", format!("{hex:0>natural$}"))
        }
        _ => {
            let sign = if is_negative(value) { "-" } else { "" };
            (sign, value.magnitude().to_str_radix(10))
        }
    };
    Ok(format!("{sign}{digits:0>pad$}"))
}

/// Renders a fixed-point magnitude with up to `precision` fractional digits,
/// trailing fractional zeros trimmed.
pub(crate) fn render_fixed(
    negative: bool,
    magnitude: &BigInt,
    frac_width: i32,
    radix: u32,
    precision: usize,
) -> FixResult<String> {
    check_radix(radix)?;
    let scale = num_traits::pow(BigInt::from(radix), precision);
    let normalized = shift(&(magnitude * scale), -frac_width);
    let digits = normalized.to_str_radix(radix).to_uppercase();
    let digits = format!("{digits:0>width$}", width = precision + 1);
    let (pre, post) = digits.split_at(digits.len() - precision);
    let post = post.trim_end_matches('0');
    let sign = if negative { "-" } else { "" };
    if post.is_empty() {
        Ok(format!("{sign}{pre}"))
    } else {
        Ok(format!("{sign}{pre}.{post}"))
    }
}
