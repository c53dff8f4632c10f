//! Control-path synthesis from per-step flow matrices.
//!
//! A scheduler describes a datapath's control as a [`FlowMatrix`]: for every
//! control step, the register transfers that must happen, plus a neutral
//! flow for targets a step leaves alone. A [`ControlpathBuilder`] lowers the
//! matrix into processes of a component:
//!
//! - [`FsmControlpathBuilder`] emits a single combinational state dispatch.
//! - [`TristateBusFsmControlpathBuilder`] drives shared buses with
//!   conditional tri-state assignments and the remaining targets through
//!   the state dispatch.
//!
//! [`ColumnCompressor`] estimates the control word a microcoded control
//! path would need, merging select columns with [`encode_together`].

#![warn(missing_docs)]

pub mod binder;
pub mod builder;
pub mod compress;
pub mod error;
pub mod fsm;
pub mod matrix;
pub mod microcode;
pub mod plan;
pub mod tristate;

pub use binder::{AutoBinder, ComponentHost, ControlpathHost};
pub use builder::{
    factory_for, ControlpathBuilder, ControlpathBuilderFactory, CONTROLPATH_SUMMARY,
    MISSING_ELSE_MULTI, MISSING_ELSE_SINGLE,
};
pub use compress::{ceil_log2, ColumnCompressor, ColumnPlan, EncodedColumn, MergedColumn};
pub use error::{ControlpathError, ControlpathResult};
pub use fsm::{FsmControlpathBuilder, FsmControlpathBuilderFactory};
pub use matrix::FlowMatrix;
pub use microcode::{encode_together, MergedEncoding};
pub use plan::{HlsPlan, InlineBranchControl, InstructionMapper};
pub use tristate::{TristateBusFsmControlpathBuilder, TristateBusFsmControlpathBuilderFactory};
