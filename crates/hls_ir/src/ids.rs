//! Opaque ID newtypes for IR entities.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// A component in the [`Design`](crate::design::Design).
    ComponentId
);

define_id!(
    /// A signal within a component.
    SignalId
);

define_id!(
    /// A process within a component.
    ProcessId
);

define_id!(
    /// An interned type in the [`TypeDb`](crate::types::TypeDb).
    TypeId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn raw_roundtrip() {
        assert_eq!(SignalId::from_raw(42).as_raw(), 42);
        assert_eq!(<TypeId as ArenaId>::from_raw(3), TypeId::from_raw(3));
    }

    #[test]
    fn ids_order_by_index() {
        let set: BTreeSet<_> = [3, 1, 2, 1].into_iter().map(SignalId::from_raw).collect();
        let raw: Vec<u32> = set.into_iter().map(SignalId::as_raw).collect();
        assert_eq!(raw, vec![1, 2, 3]);
    }
}
