//! Expression trees used in generated process bodies.

use crate::const_value::ConstValue;
use crate::signal::SignalRef;
use serde::{Deserialize, Serialize};

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Bitwise NOT.
    Not,
    /// Arithmetic negation.
    Neg,
    /// Logical NOT.
    LogicNot,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Equality.
    Eq,
    /// Inequality.
    Ne,
    /// Logical AND.
    LogicAnd,
    /// Logical OR.
    LogicOr,
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    /// A signal read.
    Signal(SignalRef),
    /// A constant.
    Const(ConstValue),
    /// A unary operation.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left-hand side.
        lhs: Box<Expr>,
        /// Right-hand side.
        rhs: Box<Expr>,
    },
    /// `condition ? true_val : false_val`.
    Ternary {
        /// The selecting condition.
        condition: Box<Expr>,
        /// Value when the condition holds.
        true_val: Box<Expr>,
        /// Value otherwise.
        false_val: Box<Expr>,
    },
}

impl Expr {
    /// `lhs op rhs`.
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// `lhs == rhs`.
    pub fn equals(lhs: Expr, rhs: Expr) -> Expr {
        Expr::binary(BinaryOp::Eq, lhs, rhs)
    }

    /// Left-nested logical OR of `terms`; `None` when there are none.
    pub fn any_of(terms: impl IntoIterator<Item = Expr>) -> Option<Expr> {
        terms
            .into_iter()
            .reduce(|acc, term| Expr::binary(BinaryOp::LogicOr, acc, term))
    }

    /// `condition ? true_val : false_val`.
    pub fn select(condition: Expr, true_val: Expr, false_val: Expr) -> Expr {
        Expr::Ternary {
            condition: Box::new(condition),
            true_val: Box::new(true_val),
            false_val: Box::new(false_val),
        }
    }
}

impl From<SignalRef> for Expr {
    fn from(r: SignalRef) -> Self {
        Expr::Signal(r)
    }
}

impl From<ConstValue> for Expr {
    fn from(v: ConstValue) -> Self {
        Expr::Const(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SignalId;

    fn sig(i: u32) -> Expr {
        Expr::Signal(SignalRef::Signal(SignalId::from_raw(i)))
    }

    #[test]
    fn any_of_nests_left() {
        let e = Expr::any_of([sig(0), sig(1), sig(2)]).unwrap();
        let Expr::Binary { op, lhs, rhs } = e else {
            panic!("expected Binary");
        };
        assert_eq!(op, BinaryOp::LogicOr);
        assert_eq!(*rhs, sig(2));
        assert!(matches!(*lhs, Expr::Binary { op: BinaryOp::LogicOr, .. }));
    }

    #[test]
    fn any_of_single_and_empty() {
        assert_eq!(Expr::any_of([sig(4)]), Some(sig(4)));
        assert_eq!(Expr::any_of(std::iter::empty()), None);
    }

    #[test]
    fn select_builds_ternary() {
        let e = Expr::select(Expr::equals(sig(0), sig(1)), sig(2), sig(3));
        assert!(matches!(e, Expr::Ternary { .. }));
    }
}
