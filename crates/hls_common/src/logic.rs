//! Four-state logic values for hardware constants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single 4-state logic value.
///
/// - `Zero` / `One` are driven levels.
/// - `X` is unknown. In a constant that drives a signal it marks a don't-care:
///   the synthesizer may pick any value, or release a tri-state bus.
/// - `Z` is high impedance (not driven).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Logic {
    /// Logic low (0).
    Zero = 0,
    /// Logic high (1).
    One = 1,
    /// Unknown / don't-care.
    X = 2,
    /// High-impedance (tri-state).
    Z = 3,
}

impl Logic {
    /// Converts a character to a [`Logic`] value.
    ///
    /// Accepts `0`, `1`, `x`/`X`, `-` (don't-care, read as `X`) and `z`/`Z`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            'x' | 'X' | '-' => Some(Logic::X),
            'z' | 'Z' => Some(Logic::Z),
            _ => None,
        }
    }

    /// Returns the value for a boolean bit.
    pub fn from_bool(bit: bool) -> Self {
        if bit {
            Logic::One
        } else {
            Logic::Zero
        }
    }

    /// Returns `true` for `Zero` and `One`.
    pub fn is_definite(self) -> bool {
        matches!(self, Logic::Zero | Logic::One)
    }

    /// Returns the bit as a boolean, or `None` for `X`/`Z`.
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Logic::Zero => Some(false),
            Logic::One => Some(true),
            Logic::X | Logic::Z => None,
        }
    }

    pub(crate) fn from_bits(bits: u64) -> Self {
        match bits & 0b11 {
            0 => Logic::Zero,
            1 => Logic::One,
            2 => Logic::X,
            _ => Logic::Z,
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logic::Zero => write!(f, "0"),
            Logic::One => write!(f, "1"),
            Logic::X => write!(f, "X"),
            Logic::Z => write!(f, "Z"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Logic::*;
    use super::*;

    #[test]
    fn from_char_accepts_dash_as_dont_care() {
        assert_eq!(Logic::from_char('-'), Some(X));
        assert_eq!(Logic::from_char('z'), Some(Z));
        assert_eq!(Logic::from_char('2'), None);
    }

    #[test]
    fn definite_values() {
        assert!(Zero.is_definite());
        assert!(One.is_definite());
        assert!(!X.is_definite());
        assert!(!Z.is_definite());
        assert_eq!(One.to_bool(), Some(true));
        assert_eq!(Z.to_bool(), None);
    }

    #[test]
    fn bits_roundtrip() {
        for v in [Zero, One, X, Z] {
            assert_eq!(Logic::from_bits(v as u64), v);
        }
    }

    #[test]
    fn display() {
        assert_eq!(format!("{Zero}{One}{X}{Z}"), "01XZ");
    }
}
