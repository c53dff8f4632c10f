//! Design IR consumed and produced by control-path synthesis.
//!
//! A [`Design`] owns a shared [`TypeDb`] and an arena of [`Component`]s. Each
//! component holds its signals, the processes generated for it, and any
//! report [`Document`]s attached during synthesis. Process bodies are
//! [`Statement`] trees, usually assembled with a [`ProcessBuilder`] from the
//! register-transfer [`Flow`]s of a control step.

#![warn(missing_docs)]

pub mod arena;
pub mod builder;
pub mod component;
pub mod const_value;
pub mod design;
pub mod error;
pub mod expr;
pub mod flow;
pub mod ids;
pub mod process;
pub mod signal;
pub mod stmt;
pub mod types;

pub use arena::{Arena, ArenaId};
pub use builder::ProcessBuilder;
pub use component::{Component, Document, Names};
pub use const_value::ConstValue;
pub use design::Design;
pub use error::{IrError, IrResult};
pub use expr::{BinaryOp, Expr, UnaryOp};
pub use flow::{Flow, FlowSource, ParFlow};
pub use ids::{ComponentId, ProcessId, SignalId, TypeId};
pub use process::{Process, ProcessKind};
pub use signal::{PortUsage, Signal, SignalRef};
pub use stmt::{CaseArm, Statement};
pub use types::{Type, TypeDb};
