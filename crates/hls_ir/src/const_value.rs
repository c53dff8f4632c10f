//! Constant values carried by value flows and initial values.

use crate::ids::TypeId;
use crate::types::{enum_width, TypeDb};
use hls_common::LogicVec;
use hls_fixed::HwValue;
use serde::{Deserialize, Serialize};

/// A compile-time constant.
///
/// Equality and hashing are structural, so constants can key flow maps: two
/// numerically equal values of different widths are different constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstValue {
    /// A 4-state bit pattern. An all-`X` pattern is the don't-care marker.
    Logic(LogicVec),
    /// A boolean.
    Bool(bool),
    /// An unconstrained integer.
    Int(i64),
    /// A sized hardware number.
    Value(HwValue),
    /// An enumeration literal, by index into its type's literal list.
    Enum {
        /// The enumeration type.
        ty: TypeId,
        /// The literal index.
        index: u32,
    },
}

impl ConstValue {
    /// Width of the value's bit pattern; `None` for unconstrained integers.
    pub fn bit_width(&self, types: &TypeDb) -> Option<u32> {
        match self {
            ConstValue::Logic(v) => Some(v.width()),
            ConstValue::Bool(_) => Some(1),
            ConstValue::Int(_) => None,
            ConstValue::Value(v) => Some(v.width()),
            ConstValue::Enum { ty, .. } => types
                .enum_literals(*ty)
                .map(|literals| enum_width(literals.len())),
        }
    }

    /// The bit pattern, if the value is a logic vector.
    pub fn as_logic(&self) -> Option<&LogicVec> {
        match self {
            ConstValue::Logic(v) => Some(v),
            _ => None,
        }
    }

    /// Returns `true` for an all-`X` logic vector of non-zero width.
    pub fn is_dont_care(&self) -> bool {
        matches!(self, ConstValue::Logic(v) if v.width() > 0 && v.is_dont_care())
    }
}

impl From<HwValue> for ConstValue {
    fn from(v: HwValue) -> Self {
        ConstValue::Value(v)
    }
}

impl From<LogicVec> for ConstValue {
    fn from(v: LogicVec) -> Self {
        ConstValue::Logic(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hls_fixed::{FixContext, Unsigned};

    #[test]
    fn dont_care_is_all_x() {
        assert!(ConstValue::Logic(LogicVec::dont_care(4)).is_dont_care());
        assert!(!ConstValue::Logic(LogicVec::high_z(4)).is_dont_care());
        assert!(!ConstValue::Logic(LogicVec::new(4)).is_dont_care());
        assert!(!ConstValue::Bool(false).is_dont_care());
    }

    #[test]
    fn widths() {
        let mut types = TypeDb::new();
        let ctx = FixContext::default();
        let u = Unsigned::from_u64(3, 6, &ctx).unwrap();
        assert_eq!(ConstValue::from(HwValue::from(u)).bit_width(&types), Some(6));
        assert_eq!(ConstValue::Int(3).bit_width(&types), None);
        let name = hls_common::Ident::from_raw(0);
        let ty = types.create_enum(name, vec![name; 5]);
        assert_eq!(ConstValue::Enum { ty, index: 0 }.bit_width(&types), Some(3));
    }

    #[test]
    fn structural_identity() {
        let ctx = FixContext::default();
        let a = ConstValue::from(HwValue::from(Unsigned::from_u64(3, 4, &ctx).unwrap()));
        let b = ConstValue::from(HwValue::from(Unsigned::from_u64(3, 8, &ctx).unwrap()));
        assert_ne!(a, b);
    }

    #[test]
    fn serde_roundtrip() {
        let v = ConstValue::Logic(LogicVec::dont_care(3));
        let json = serde_json::to_string(&v).unwrap();
        let back: ConstValue = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
