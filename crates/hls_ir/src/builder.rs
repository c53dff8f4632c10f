//! Structured construction of process bodies.
//!
//! [`ProcessBuilder`] keeps a stack of open constructs. `switch` opens a case
//! statement, `case`/`default_case` open an arm, `if_then` opens a
//! conditional, and each `end_*` closes the innermost construct of its kind.
//! Misuse (closing the wrong construct, storing directly inside a switch,
//! finishing with open constructs) is reported as [`IrError::Builder`].

use crate::error::{IrError, IrResult};
use crate::expr::Expr;
use crate::signal::SignalRef;
use crate::stmt::{CaseArm, Statement};

enum Frame {
    Block(Vec<Statement>),
    Switch {
        subject: Expr,
        arms: Vec<CaseArm>,
        default: Option<Box<Statement>>,
    },
    Case {
        patterns: Vec<Expr>,
        stmts: Vec<Statement>,
    },
    Default(Vec<Statement>),
    Then {
        condition: Expr,
        stmts: Vec<Statement>,
    },
    Else {
        condition: Expr,
        then_body: Vec<Statement>,
        stmts: Vec<Statement>,
    },
}

impl Frame {
    fn name(&self) -> &'static str {
        match self {
            Frame::Block(_) => "block",
            Frame::Switch { .. } => "switch",
            Frame::Case { .. } => "case",
            Frame::Default(_) => "default case",
            Frame::Then { .. } => "if",
            Frame::Else { .. } => "else",
        }
    }
}

fn block(stmts: Vec<Statement>) -> Statement {
    Statement::Block { stmts }
}

/// Builds a [`Statement`] tree through balanced open/close calls.
pub struct ProcessBuilder {
    stack: Vec<Frame>,
}

impl Default for ProcessBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessBuilder {
    /// Starts an empty body.
    pub fn new() -> Self {
        Self {
            stack: vec![Frame::Block(Vec::new())],
        }
    }

    fn misuse(&self, what: &str) -> IrError {
        let open = self.stack.last().map(Frame::name).unwrap_or("nothing");
        IrError::Builder(format!("{what} while {open} is open"))
    }

    fn stmts(&mut self) -> IrResult<&mut Vec<Statement>> {
        match self.stack.last_mut() {
            Some(
                Frame::Block(stmts)
                | Frame::Case { stmts, .. }
                | Frame::Default(stmts)
                | Frame::Then { stmts, .. }
                | Frame::Else { stmts, .. },
            ) => Ok(stmts),
            Some(Frame::Switch { .. }) | None => Err(IrError::Builder(
                "statement outside of a case arm".to_string(),
            )),
        }
    }

    /// Appends an arbitrary statement.
    pub fn emit(&mut self, stmt: Statement) -> IrResult<()> {
        self.stmts()?.push(stmt);
        Ok(())
    }

    /// Appends `target := value`.
    pub fn store(&mut self, target: SignalRef, value: Expr) -> IrResult<()> {
        self.emit(Statement::Assign { target, value })
    }

    /// Appends a comment.
    pub fn comment(&mut self, text: impl Into<String>) -> IrResult<()> {
        self.emit(Statement::Comment(text.into()))
    }

    /// Opens a case statement on `subject`.
    pub fn switch(&mut self, subject: Expr) -> IrResult<()> {
        self.stmts()?;
        self.stack.push(Frame::Switch {
            subject,
            arms: Vec::new(),
            default: None,
        });
        Ok(())
    }

    /// Opens an arm matching any of `patterns`.
    pub fn case(&mut self, patterns: Vec<Expr>) -> IrResult<()> {
        match self.stack.last() {
            Some(Frame::Switch { .. }) => {
                self.stack.push(Frame::Case {
                    patterns,
                    stmts: Vec::new(),
                });
                Ok(())
            }
            _ => Err(self.misuse("case")),
        }
    }

    /// Opens the default arm.
    pub fn default_case(&mut self) -> IrResult<()> {
        match self.stack.last() {
            Some(Frame::Switch { default: None, .. }) => {
                self.stack.push(Frame::Default(Vec::new()));
                Ok(())
            }
            Some(Frame::Switch { .. }) => {
                Err(IrError::Builder("switch already has a default arm".to_string()))
            }
            _ => Err(self.misuse("default case")),
        }
    }

    /// Closes the current arm.
    pub fn end_case(&mut self) -> IrResult<()> {
        let arm = match self.stack.pop() {
            Some(frame @ (Frame::Case { .. } | Frame::Default(_))) => frame,
            Some(other) => {
                self.stack.push(other);
                return Err(self.misuse("end of case"));
            }
            None => return Err(self.misuse("end of case")),
        };
        let Some(Frame::Switch { arms, default, .. }) = self.stack.last_mut() else {
            return Err(IrError::Builder("case arm outside of a switch".to_string()));
        };
        match arm {
            Frame::Case { patterns, stmts } => arms.push(CaseArm {
                patterns,
                body: block(stmts),
            }),
            Frame::Default(stmts) => *default = Some(Box::new(block(stmts))),
            _ => unreachable!("only arm frames are popped here"),
        }
        Ok(())
    }

    /// Closes the current case statement.
    pub fn end_switch(&mut self) -> IrResult<()> {
        match self.stack.pop() {
            Some(Frame::Switch {
                subject,
                arms,
                default,
            }) => self.emit(Statement::Case {
                subject,
                arms,
                default,
            }),
            Some(other) => {
                self.stack.push(other);
                Err(self.misuse("end of switch"))
            }
            None => Err(self.misuse("end of switch")),
        }
    }

    /// Opens a conditional.
    pub fn if_then(&mut self, condition: Expr) -> IrResult<()> {
        self.stmts()?;
        self.stack.push(Frame::Then {
            condition,
            stmts: Vec::new(),
        });
        Ok(())
    }

    /// Switches the open conditional to its else branch.
    pub fn else_branch(&mut self) -> IrResult<()> {
        match self.stack.pop() {
            Some(Frame::Then { condition, stmts }) => {
                self.stack.push(Frame::Else {
                    condition,
                    then_body: stmts,
                    stmts: Vec::new(),
                });
                Ok(())
            }
            Some(other) => {
                self.stack.push(other);
                Err(self.misuse("else"))
            }
            None => Err(self.misuse("else")),
        }
    }

    /// Closes the open conditional.
    pub fn end_if(&mut self) -> IrResult<()> {
        let stmt = match self.stack.pop() {
            Some(Frame::Then { condition, stmts }) => Statement::If {
                condition,
                then_body: Box::new(block(stmts)),
                else_body: None,
            },
            Some(Frame::Else {
                condition,
                then_body,
                stmts,
            }) => Statement::If {
                condition,
                then_body: Box::new(block(then_body)),
                else_body: Some(Box::new(block(stmts))),
            },
            Some(other) => {
                self.stack.push(other);
                return Err(self.misuse("end of if"));
            }
            None => return Err(self.misuse("end of if")),
        };
        self.emit(stmt)
    }

    /// Returns the finished body as a block.
    pub fn finish(mut self) -> IrResult<Statement> {
        match (self.stack.pop(), self.stack.is_empty()) {
            (Some(Frame::Block(stmts)), true) => Ok(block(stmts)),
            (Some(frame), _) => Err(IrError::Builder(format!(
                "finished with an open {}",
                frame.name()
            ))),
            (None, _) => Err(IrError::Builder("builder stack is empty".to_string())),
        }
    }
}
