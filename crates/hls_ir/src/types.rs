//! Hardware types and the interning [`TypeDb`].
//!
//! Every distinct [`Type`] is stored once. Besides plain interning, the
//! database is where synthesis looks up previously created enumerations by
//! name, so a state type such as `TState4` is created at most once per design.

use crate::error::{IrError, IrResult};
use crate::ids::TypeId;
use hls_common::Ident;
use hls_fixed::FixFormat;
use serde::{Deserialize, Serialize};

/// A hardware type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// A single bit.
    Bit,
    /// A bit vector of known width.
    BitVec {
        /// Number of bits.
        width: u32,
        /// Whether the vector is two's complement.
        signed: bool,
    },
    /// A fixed-point vector declared as `high downto low`.
    Fixed {
        /// Whether values are two's complement.
        signed: bool,
        /// Index of the most significant bit.
        high: i32,
        /// Index of the least significant bit; negative for fractional bits.
        low: i32,
    },
    /// A boolean.
    Bool,
    /// An unconstrained integer (parameters and constants).
    Integer,
    /// An enumeration; FSM state types are enums.
    Enum {
        /// The type name.
        name: Ident,
        /// The literal names, in declaration order.
        variants: Vec<Ident>,
    },
}

/// Central type database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeDb {
    types: Vec<Type>,
}

impl TypeDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a type, returning the existing ID if an identical type is present.
    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(i) = self.types.iter().position(|existing| existing == &ty) {
            return TypeId::from_raw(i as u32);
        }
        let id = TypeId::from_raw(self.types.len() as u32);
        self.types.push(ty);
        id
    }

    /// Returns the type with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.as_raw() as usize]
    }

    /// Iterates over all interned types in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, ty)| (TypeId::from_raw(i as u32), ty))
    }

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types have been interned.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Creates (or returns the existing) enumeration with the given literals.
    pub fn create_enum(&mut self, name: Ident, literals: Vec<Ident>) -> TypeId {
        self.intern(Type::Enum {
            name,
            variants: literals,
        })
    }

    /// Finds an enumeration by name.
    pub fn find_enum(&self, name: Ident) -> Option<TypeId> {
        self.iter().find_map(|(id, ty)| match ty {
            Type::Enum { name: n, .. } if *n == name => Some(id),
            _ => None,
        })
    }

    /// The literals of an enumeration type, or `None` for any other type.
    pub fn enum_literals(&self, id: TypeId) -> Option<&[Ident]> {
        match self.get(id) {
            Type::Enum { variants, .. } => Some(variants),
            _ => None,
        }
    }

    /// Interns the fixed-point type of `format`.
    pub fn fixed(&mut self, format: FixFormat) -> TypeId {
        let (high, low) = format.range();
        self.intern(Type::Fixed {
            signed: format.is_signed(),
            high,
            low,
        })
    }

    /// Recovers the fixed-point format of a type.
    ///
    /// Fixed types map through their declared range and bit vectors become
    /// integers with no fractional bits. Everything else is rejected.
    pub fn fix_format(&self, id: TypeId) -> IrResult<FixFormat> {
        let format = match self.get(id) {
            Type::Fixed { signed, high, low } => FixFormat::from_range(*signed, *high, *low),
            Type::BitVec { width, signed } => FixFormat::new(*signed, *width as i32, 0),
            other => {
                return Err(IrError::InvalidFormat(format!(
                    "{other:?} has no fixed-point format"
                )))
            }
        };
        format.map_err(|e| IrError::InvalidFormat(e.to_string()))
    }

    /// Bit width of a type, if it has one.
    pub fn bit_width(&self, id: TypeId) -> Option<u32> {
        match self.get(id) {
            Type::Bit | Type::Bool => Some(1),
            Type::BitVec { width, .. } => Some(*width),
            Type::Fixed { high, low, .. } => Some((high - low + 1).max(0) as u32),
            Type::Enum { variants, .. } => Some(enum_width(variants.len())),
            Type::Integer => None,
        }
    }
}

/// Bits needed to binary-encode `count` literals (at least one).
pub fn enum_width(count: usize) -> u32 {
    if count <= 2 {
        1
    } else {
        usize::BITS - (count - 1).leading_zeros()
    }
}
