//! A tagged union over the four numeric kinds.

use crate::format::FixFormat;
use crate::sfix::SFix;
use crate::signed::Signed;
use crate::ufix::UFix;
use crate::unsigned::Unsigned;
use hls_common::LogicVec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which numeric kind an [`HwValue`] holds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ValueKind {
    /// [`Unsigned`].
    Unsigned,
    /// [`Signed`].
    Signed,
    /// [`UFix`].
    UFix,
    /// [`SFix`].
    SFix,
}

/// Any hardware numeric value.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum HwValue {
    /// An unsigned integer.
    Unsigned(Unsigned),
    /// A two's-complement integer.
    Signed(Signed),
    /// An unsigned fixed-point number.
    UFix(UFix),
    /// A signed fixed-point number.
    SFix(SFix),
}

impl HwValue {
    /// The kind of the held value.
    pub fn kind(&self) -> ValueKind {
        match self {
            HwValue::Unsigned(_) => ValueKind::Unsigned,
            HwValue::Signed(_) => ValueKind::Signed,
            HwValue::UFix(_) => ValueKind::UFix,
            HwValue::SFix(_) => ValueKind::SFix,
        }
    }

    /// Width of the raw bit pattern.
    pub fn width(&self) -> u32 {
        match self {
            HwValue::Unsigned(v) => v.size(),
            HwValue::Signed(v) => v.size(),
            HwValue::UFix(v) => v.format().total_bits(),
            HwValue::SFix(v) => v.format().total_bits(),
        }
    }

    /// The fixed-point view of this value; integers have no fractional bits.
    pub fn format(&self) -> FixFormat {
        match self {
            HwValue::Unsigned(v) => FixFormat::of_raw(false, v.size(), 0),
            HwValue::Signed(v) => FixFormat::of_raw(true, v.size(), 0),
            HwValue::UFix(v) => v.format(),
            HwValue::SFix(v) => v.format(),
        }
    }

    /// The raw bit pattern.
    pub fn to_logic_vec(&self) -> LogicVec {
        match self {
            HwValue::Unsigned(v) => v.to_logic_vec(),
            HwValue::Signed(v) => v.to_logic_vec(),
            HwValue::UFix(v) => v.to_logic_vec(),
            HwValue::SFix(v) => v.to_logic_vec(),
        }
    }

    /// Converts to `kind`. Every pair is supported.
    ///
    /// Integer and fixed-point kinds of the same signedness reinterpret the raw
    /// value (an integer has no fractional bits, and a fixed-point value turned
    /// integer keeps its raw bits). Unsigned to signed adds a zero sign bit;
    /// signed to unsigned reinterprets (integers) or drops the sign bit
    /// (fixed point).
    pub fn convert(&self, kind: ValueKind) -> HwValue {
        match (self, kind) {
            (HwValue::Unsigned(v), ValueKind::Unsigned) => HwValue::Unsigned(v.clone()),
            (HwValue::Unsigned(v), ValueKind::Signed) => HwValue::Signed(v.to_signed()),
            (HwValue::Unsigned(v), ValueKind::UFix) => {
                HwValue::UFix(UFix::from_unsigned(v.clone(), 0))
            }
            (HwValue::Unsigned(v), ValueKind::SFix) => {
                HwValue::SFix(SFix::from_signed(v.to_signed(), 0))
            }

            (HwValue::Signed(v), ValueKind::Unsigned) => HwValue::Unsigned(v.to_unsigned()),
            (HwValue::Signed(v), ValueKind::Signed) => HwValue::Signed(v.clone()),
            (HwValue::Signed(v), ValueKind::UFix) => {
                HwValue::UFix(SFix::from_signed(v.clone(), 0).to_ufix())
            }
            (HwValue::Signed(v), ValueKind::SFix) => {
                HwValue::SFix(SFix::from_signed(v.clone(), 0))
            }

            (HwValue::UFix(v), ValueKind::Unsigned) => {
                HwValue::Unsigned(v.unsigned_value().clone())
            }
            (HwValue::UFix(v), ValueKind::Signed) => {
                HwValue::Signed(v.unsigned_value().to_signed())
            }
            (HwValue::UFix(v), ValueKind::UFix) => HwValue::UFix(v.clone()),
            (HwValue::UFix(v), ValueKind::SFix) => HwValue::SFix(v.to_sfix()),

            (HwValue::SFix(v), ValueKind::Unsigned) => {
                HwValue::Unsigned(v.signed_value().to_unsigned())
            }
            (HwValue::SFix(v), ValueKind::Signed) => HwValue::Signed(v.signed_value().clone()),
            (HwValue::SFix(v), ValueKind::UFix) => HwValue::UFix(v.to_ufix()),
            (HwValue::SFix(v), ValueKind::SFix) => HwValue::SFix(v.clone()),
        }
    }
}

impl From<Unsigned> for HwValue {
    fn from(v: Unsigned) -> Self {
        HwValue::Unsigned(v)
    }
}

impl From<Signed> for HwValue {
    fn from(v: Signed) -> Self {
        HwValue::Signed(v)
    }
}

impl From<UFix> for HwValue {
    fn from(v: UFix) -> Self {
        HwValue::UFix(v)
    }
}

impl From<SFix> for HwValue {
    fn from(v: SFix) -> Self {
        HwValue::SFix(v)
    }
}

impl fmt::Display for HwValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HwValue::Unsigned(v) => write!(f, "{v}"),
            HwValue::Signed(v) => write!(f, "{v}"),
            HwValue::UFix(v) => write!(f, "{v}"),
            HwValue::SFix(v) => write!(f, "{v}"),
        }
    }
}
