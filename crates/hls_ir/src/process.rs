//! Processes attached to a component.

use crate::ids::{ProcessId, SignalId};
use crate::stmt::Statement;
use hls_common::Ident;
use serde::{Deserialize, Serialize};

/// How a process body is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessKind {
    /// Sequential statements re-evaluated on any sensitivity change; later
    /// assignments override earlier ones.
    Combinational,
    /// Each statement is an independent driver; conflicts are settled by bus
    /// resolution.
    Concurrent,
    /// Clocked logic.
    Sequential,
}

/// A process registered on a component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    /// The ID of this process within its component.
    pub id: ProcessId,
    /// The process kind.
    pub kind: ProcessKind,
    /// Name of the generating function, e.g. `CombFSM`.
    pub function_name: Ident,
    /// The body.
    pub body: Statement,
    /// Signals whose changes re-trigger the process.
    pub sensitivity: Vec<SignalId>,
}
