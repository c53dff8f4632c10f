//! Shared foundational types used across the HLS workspace.
//!
//! This crate provides interned identifiers, 4-state logic values, packed logic
//! vectors for hardware constants, the arithmetic policy enums shared by the
//! numeric types and configuration, and common result types.

#![warn(missing_docs)]

pub mod arith;
pub mod ident;
pub mod logic;
pub mod logic_vec;
pub mod result;

pub use arith::{OverflowMode, SizingMode};
pub use ident::{Ident, Interner};
pub use logic::Logic;
pub use logic_vec::LogicVec;
pub use result::InternalError;
