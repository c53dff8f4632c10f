//! Structured diagnostics emitted during control-path synthesis.
//!
//! Synthesis reports questionable input (skipped tri-state drivers, generated
//! state machines) as [`Diagnostic`] values with a severity and code. The
//! thread-safe [`DiagnosticSink`] accumulates them and [`TerminalRenderer`]
//! formats them for humans.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
