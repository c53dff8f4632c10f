//! Packed vectors of 4-state logic values used as hardware constants.

use crate::logic::Logic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A vector of 4-state [`Logic`] values, index 0 being the least significant bit.
///
/// Each value occupies 2 bits, 32 values per `u64` word. Constants driven by
/// flows (including the all-`X` don't-care marker and the all-`Z` release
/// value of a tri-state bus) are stored in this form.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicVec {
    width: u32,
    data: Vec<u64>,
}

const VALUES_PER_WORD: u32 = 32;

impl LogicVec {
    /// Creates a vector of the given width with every bit `Zero`.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            data: vec![0; word_count(width)],
        }
    }

    /// Creates a vector of the given width with every bit set to `value`.
    pub fn filled(width: u32, value: Logic) -> Self {
        let mut v = Self::new(width);
        if value != Logic::Zero {
            for i in 0..width {
                v.set(i, value);
            }
        }
        v
    }

    /// All-`X` vector, the don't-care marker.
    pub fn dont_care(width: u32) -> Self {
        Self::filled(width, Logic::X)
    }

    /// All-`Z` vector, a released tri-state driver.
    pub fn high_z(width: u32) -> Self {
        Self::filled(width, Logic::Z)
    }

    /// Returns the number of logic values in this vector.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Gets the logic value at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn get(&self, index: u32) -> Logic {
        assert!(
            index < self.width,
            "index {index} out of bounds for width {}",
            self.width
        );
        let word = self.data[(index / VALUES_PER_WORD) as usize];
        Logic::from_bits(word >> ((index % VALUES_PER_WORD) * 2))
    }

    /// Sets the logic value at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn set(&mut self, index: u32, value: Logic) {
        assert!(
            index < self.width,
            "index {index} out of bounds for width {}",
            self.width
        );
        let word_idx = (index / VALUES_PER_WORD) as usize;
        let bit_offset = (index % VALUES_PER_WORD) * 2;
        let mask = !(0b11u64 << bit_offset);
        self.data[word_idx] = (self.data[word_idx] & mask) | ((value as u64) << bit_offset);
    }

    /// Iterates from the least significant bit upward.
    pub fn iter(&self) -> impl Iterator<Item = Logic> + '_ {
        (0..self.width).map(move |i| self.get(i))
    }

    /// Returns `true` if every bit equals `value`. An empty vector is uniform.
    pub fn is_uniform(&self, value: Logic) -> bool {
        self.iter().all(|v| v == value)
    }

    /// Returns `true` if this is the all-`X` don't-care marker.
    pub fn is_dont_care(&self) -> bool {
        self.is_uniform(Logic::X)
    }

    /// Returns `true` if every bit is `Zero` or `One`.
    pub fn is_definite(&self) -> bool {
        self.iter().all(Logic::is_definite)
    }

    /// Creates a vector from a `u64` value with the given width; higher bits are dropped.
    pub fn from_u64(value: u64, width: u32) -> Self {
        let mut v = Self::new(width);
        for i in 0..width.min(64) {
            if (value >> i) & 1 != 0 {
                v.set(i, Logic::One);
            }
        }
        v
    }

    /// Converts to a `u64` if every bit is definite and the width is at most 64.
    pub fn to_u64(&self) -> Option<u64> {
        if self.width > 64 {
            return None;
        }
        let mut result = 0u64;
        for (i, bit) in self.iter().enumerate() {
            if bit.to_bool()? {
                result |= 1 << i;
            }
        }
        Some(result)
    }

    /// Parses an MSB-first string like `"10XZ"`; `-` reads as `X`.
    pub fn from_binary_str(s: &str) -> Option<Self> {
        let mut v = Self::new(s.chars().count() as u32);
        for (i, c) in s.chars().rev().enumerate() {
            v.set(i as u32, Logic::from_char(c)?);
        }
        Some(v)
    }

    /// Extracts bits `high downto low` as a new vector.
    ///
    /// # Panics
    ///
    /// Panics if `high < low` or `high >= self.width()`.
    pub fn slice(&self, high: u32, low: u32) -> LogicVec {
        assert!(high >= low, "slice {high} downto {low} is empty");
        let mut out = LogicVec::new(high - low + 1);
        for i in low..=high {
            out.set(i - low, self.get(i));
        }
        out
    }

    /// Concatenates `self` (upper bits) with `lower`.
    pub fn concat(&self, lower: &LogicVec) -> LogicVec {
        let mut out = LogicVec::new(self.width + lower.width);
        for (i, bit) in lower.iter().chain(self.iter()).enumerate() {
            out.set(i as u32, bit);
        }
        out
    }
}

impl fmt::Display for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.width).rev() {
            write!(f, "{}", self.get(i))?;
        }
        Ok(())
    }
}

impl fmt::Debug for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogicVec(\"{self}\")")
    }
}

fn word_count(width: u32) -> usize {
    width.div_ceil(VALUES_PER_WORD) as usize
}
