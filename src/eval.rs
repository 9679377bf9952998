//! Tree-walking evaluation of parsed expressions.
//!
//! Evaluation runs in two passes. Every function call is first replaced by its value,
//! one function at a time in the order of [`Function::ALL`] and left to right within
//! a function. A call's argument is reduced the same way when that call is reached.
//! The remaining arithmetic is then folded, left operand before right.
//!
//! A failing call therefore wins over a failing division, and `tan(90)` is reported
//! before `sqrt(-1)` wherever the two appear.

use crate::error::{EvalError, Result};
use crate::types::{AstExpr, BinaryOp, Function};

/// Working copy of an expression whose calls are replaced by values as they are reached.
enum Node {
    Value(f64),
    /// A negative call result where no sign may appear, rejected when folded
    Misplaced {
        position: usize,
        found: String,
    },
    Call {
        func: Function,
        arg: Box<Node>,
        unsigned_at: Option<usize>,
    },
    Neg(Box<Node>),
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn from_ast(ast: &AstExpr) -> Self {
        match ast {
            AstExpr::Literal(val) => Node::Value(*val),
            AstExpr::Binary { op, left, right } => Node::Binary {
                op: *op,
                left: Box::new(Node::from_ast(left)),
                right: Box::new(Node::from_ast(right)),
            },
            AstExpr::Call {
                func,
                arg,
                unsigned_at,
            } => Node::Call {
                func: *func,
                arg: Box::new(Node::from_ast(arg)),
                unsigned_at: *unsigned_at,
            },
            AstExpr::Neg(inner) => Node::Neg(Box::new(Node::from_ast(inner))),
        }
    }

    /// Replaces each outermost call of `target` by its value.
    fn substitute(&mut self, target: Function) -> Result<()> {
        match self {
            Node::Call {
                func,
                arg,
                unsigned_at,
            } if *func == target => {
                let unsigned_at = *unsigned_at;
                let value = func.apply(arg.reduce()?)?;
                *self = match unsigned_at {
                    Some(position) if value < 0.0 => Node::Misplaced {
                        position,
                        found: format!("{}(...) = {}", target, value),
                    },
                    _ => Node::Value(value),
                };
            }
            Node::Call { arg, .. } | Node::Neg(arg) => arg.substitute(target)?,
            Node::Binary { left, right, .. } => {
                left.substitute(target)?;
                right.substitute(target)?;
            }
            Node::Value(_) | Node::Misplaced { .. } => {}
        }
        Ok(())
    }

    fn reduce(&mut self) -> Result<f64> {
        for func in Function::ALL {
            self.substitute(func)?;
        }
        self.fold()
    }

    fn fold(&self) -> Result<f64> {
        match self {
            Node::Value(val) => Ok(*val),
            Node::Misplaced { position, found } => Err(EvalError::invalid(
                *position,
                found.clone(),
                "a value without a sign",
            )),
            // Substitution has already replaced every call reached through `reduce`
            Node::Call { func, arg, .. } => func.apply(arg.fold()?),
            Node::Neg(inner) => Ok(-inner.fold()?),
            Node::Binary { op, left, right } => {
                let lhs = left.fold()?;
                let rhs = right.fold()?;
                op.apply(lhs, rhs)
            }
        }
    }
}

/// Reduces an AST to its numeric value.
///
/// All function calls are evaluated before any arithmetic, so when several parts of
/// an expression fail, a domain failure inside a call is the one returned.
pub fn eval_ast(ast: &AstExpr) -> Result<f64> {
    let mut node = Node::from_ast(ast);
    node.reduce()
}
