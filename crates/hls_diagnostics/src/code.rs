//! Diagnostic codes with category prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Errors, prefixed with `E`.
    Error,
    /// Warnings, prefixed with `W`.
    Warning,
    /// Informational synthesis notes, prefixed with `N`.
    Note,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Note => 'N',
        }
    }
}

/// A category prefix plus a number, displayed as e.g. `W301`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        assert_eq!(
            DiagnosticCode::new(Category::Warning, 301).to_string(),
            "W301"
        );
        assert_eq!(DiagnosticCode::new(Category::Note, 7).to_string(), "N007");
        assert_eq!(DiagnosticCode::new(Category::Error, 42).to_string(), "E042");
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::new(Category::Note, 401);
        let json = serde_json::to_string(&code).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
