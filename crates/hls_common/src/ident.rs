//! Interned names for signals, types, enum literals, and processes.

use lasso::ThreadedRodeo;
use serde::{Deserialize, Serialize};

/// An interned name.
///
/// Stored as a `u32` index into an [`Interner`], so comparison and copying are
/// O(1). Generated names such as `TState3` or `CStep0` go through the same
/// interner as user-supplied ones.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Ident(u32);

impl Ident {
    /// Creates an `Ident` from a raw index. Intended for tests and deserialization.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this identifier.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: `Ident` wraps a `u32`, which always fits a `usize` on supported
// platforms; `try_from_usize` rejects indices that do not fit in `u32`.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// Thread-safe string interner backed by [`lasso::ThreadedRodeo`].
pub struct Interner {
    rodeo: ThreadedRodeo<Ident>,
}

impl Interner {
    /// Creates a new empty interner.
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Interns a string, returning the existing identifier if already present.
    pub fn get_or_intern(&self, s: &str) -> Ident {
        self.rodeo.get_or_intern(s)
    }

    /// Looks up a string without interning it.
    pub fn get(&self, s: &str) -> Option<Ident> {
        self.rodeo.get(s)
    }

    /// Resolves an [`Ident`] back to its string.
    ///
    /// # Panics
    ///
    /// Panics if the `Ident` was not created by this interner.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.rodeo.resolve(&ident)
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_resolve_roundtrip() {
        let interner = Interner::new();
        let id = interner.get_or_intern("CStep0");
        assert_eq!(interner.resolve(id), "CStep0");
    }

    #[test]
    fn same_string_same_ident() {
        let interner = Interner::new();
        assert_eq!(
            interner.get_or_intern("TState3"),
            interner.get_or_intern("TState3")
        );
    }

    #[test]
    fn get_does_not_intern() {
        let interner = Interner::new();
        assert!(interner.get("State").is_none());
        let id = interner.get_or_intern("State");
        assert_eq!(interner.get("State"), Some(id));
    }

    #[test]
    fn serde_roundtrip() {
        let id = Ident(7);
        let json = serde_json::to_string(&id).unwrap();
        let back: Ident = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
