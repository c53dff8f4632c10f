//! Signal declarations and references.

use crate::const_value::ConstValue;
use crate::ids::{SignalId, TypeId};
use hls_common::Ident;
use serde::{Deserialize, Serialize};

/// What a signal is used for, as requested from the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortUsage {
    /// An ordinary internal signal.
    Default,
    /// The clock.
    Clock,
    /// The reset.
    Reset,
    /// The FSM state register.
    State,
    /// A functional-unit operand.
    Operand,
    /// A functional-unit result.
    Result,
}

/// A signal within a component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    /// The ID of this signal within its component.
    pub id: SignalId,
    /// The signal name, unique within the component.
    pub name: Ident,
    /// The signal type.
    pub ty: TypeId,
    /// The requested usage.
    pub usage: PortUsage,
    /// The initial (reset) value.
    pub init: Option<ConstValue>,
}

/// A reference to a whole signal or to a bit slice of it.
///
/// References are totally ordered so that flow targets can key ordered maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SignalRef {
    /// The full signal.
    Signal(SignalId),
    /// Bits `high downto low` of a signal.
    Slice {
        /// The sliced signal.
        signal: SignalId,
        /// The high bit index (inclusive).
        high: u32,
        /// The low bit index (inclusive).
        low: u32,
    },
}

impl SignalRef {
    /// The referenced signal.
    pub fn signal(&self) -> SignalId {
        match self {
            SignalRef::Signal(id) | SignalRef::Slice { signal: id, .. } => *id,
        }
    }

    /// Width of a slice; `None` for a full signal, whose width lives on its type.
    pub fn slice_width(&self) -> Option<u32> {
        match self {
            SignalRef::Signal(_) => None,
            SignalRef::Slice { high, low, .. } => Some(high - low + 1),
        }
    }
}

impl From<SignalId> for SignalRef {
    fn from(id: SignalId) -> Self {
        SignalRef::Signal(id)
    }
}
