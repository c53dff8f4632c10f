//! Arbitrary-precision hardware numeric types.
//!
//! [`Unsigned`] and [`Signed`] are width-tracked integers whose arithmetic
//! follows HDL sizing rules; [`UFix`] and [`SFix`] layer a binary point on top
//! of them, described by a [`FixFormat`]. Every operation takes a
//! [`FixContext`] carrying the overflow and sizing policy of the calling
//! process, falling back to the global [`FixDefaults`] for unset slots.
//!
//! Values are immutable: operators return new values and never mutate
//! operands. The derived `PartialEq`/`Hash` compare representations (width and
//! raw bits); HDL value comparison, which depends on the active sizing mode,
//! goes through [`HwCompare`].

#![warn(missing_docs)]

mod bits;
pub mod compare;
pub mod context;
pub mod error;
pub mod format;
pub mod guard;
pub mod sfix;
pub mod signed;
pub mod ufix;
pub mod unsigned;
pub mod value;

pub use compare::HwCompare;
pub use context::{FixContext, FixDefaults};
pub use error::{FixError, FixResult};
pub use format::FixFormat;
pub use guard::DivisionGuard;
pub use sfix::SFix;
pub use signed::Signed;
pub use ufix::UFix;
pub use unsigned::Unsigned;
pub use value::{HwValue, ValueKind};
