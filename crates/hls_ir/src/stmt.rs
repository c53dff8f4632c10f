//! Statements of generated process bodies.

use crate::expr::Expr;
use crate::signal::SignalRef;
use serde::{Deserialize, Serialize};

/// One arm of a [`Statement::Case`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseArm {
    /// Values matched against the subject.
    pub patterns: Vec<Expr>,
    /// The arm body.
    pub body: Statement,
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// `target := value`.
    Assign {
        /// The driven signal or slice.
        target: SignalRef,
        /// The driving expression.
        value: Expr,
    },
    /// An if statement.
    If {
        /// The condition.
        condition: Expr,
        /// Taken when the condition holds.
        then_body: Box<Statement>,
        /// Taken otherwise.
        else_body: Option<Box<Statement>>,
    },
    /// A case statement.
    Case {
        /// The selecting expression.
        subject: Expr,
        /// Arms in emission order.
        arms: Vec<CaseArm>,
        /// The `others`/`default` arm.
        default: Option<Box<Statement>>,
    },
    /// Statements in order.
    Block {
        /// The statements.
        stmts: Vec<Statement>,
    },
    /// A comment carried into the generated code.
    Comment(String),
    /// No operation.
    Nop,
}

impl Statement {
    /// Visits this statement and every nested statement, parents first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Statement)) {
        f(self);
        match self {
            Statement::If {
                then_body,
                else_body,
                ..
            } => {
                then_body.walk(f);
                if let Some(e) = else_body {
                    e.walk(f);
                }
            }
            Statement::Case { arms, default, .. } => {
                for arm in arms {
                    arm.body.walk(f);
                }
                if let Some(d) = default {
                    d.walk(f);
                }
            }
            Statement::Block { stmts } => {
                for s in stmts {
                    s.walk(f);
                }
            }
            Statement::Assign { .. } | Statement::Comment(_) | Statement::Nop => {}
        }
    }

    /// Every assignment in this statement tree, in walk order.
    pub fn assignments(&self) -> Vec<(&SignalRef, &Expr)> {
        let mut out = Vec::new();
        self.walk(&mut |s| {
            if let Statement::Assign { target, value } = s {
                out.push((target, value));
            }
        });
        out
    }

    /// The statements of a block, or this statement alone.
    pub fn as_slice(&self) -> &[Statement] {
        match self {
            Statement::Block { stmts } => stmts,
            other => std::slice::from_ref(other),
        }
    }
}
