//! Type definitions for the expression parser and evaluator.
//!
//! This module contains the core data structures shared by the lexer, the parser and
//! the evaluator: token kinds, the binary operators with their precedence tiers, the
//! closed set of named functions, and the Abstract Syntax Tree (AST).

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::functions;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A decimal numeric literal such as `3`, `2.5`, `.5` or `1e3`.
    Number,
    /// A run of ASCII letters, e.g. a function name.
    Identifier,
    /// One of `+ - * / ^`.
    Operator,
    /// `(`
    Open,
    /// `)`
    Close,
    /// Anything the lexer could not classify, including malformed numbers.
    Error,
}

/// Precedence tier of a binary operator, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Additive,
    Multiplicative,
    Power,
}

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// Maps an operator character to its operator.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            '^' => Some(BinaryOp::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            BinaryOp::Add | BinaryOp::Sub => Precedence::Additive,
            BinaryOp::Mul | BinaryOp::Div => Precedence::Multiplicative,
            BinaryOp::Pow => Precedence::Power,
        }
    }

    /// Combines two operands. Only division can fail.
    pub fn apply(self, left: f64, right: f64) -> Result<f64> {
        match self {
            BinaryOp::Add => Ok(functions::add(left, right)),
            BinaryOp::Sub => Ok(functions::sub(left, right)),
            BinaryOp::Mul => Ok(functions::mul(left, right)),
            BinaryOp::Div => functions::div(left, right),
            BinaryOp::Pow => Ok(functions::pow(left, right)),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A named function callable from an expression. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Exp,
}

impl Function {
    pub const ALL: [Function; 7] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Log,
        Function::Ln,
        Function::Sqrt,
        Function::Exp,
    ];

    /// Looks up a function by its exact lowercase name.
    ///
    /// Identifiers are matched whole, so a name that merely contains another function's
    /// name (`lnx`, `sinh`) is not a call of that function.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|func| func.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Log => "log",
            Function::Ln => "ln",
            Function::Sqrt => "sqrt",
            Function::Exp => "exp",
        }
    }

    /// Applies the function's scientific operation to its argument.
    pub fn apply(self, arg: f64) -> Result<f64> {
        match self {
            Function::Sin => Ok(functions::sin(arg)),
            Function::Cos => Ok(functions::cos(arg)),
            Function::Tan => functions::tan(arg),
            Function::Log => functions::log(arg),
            Function::Ln => functions::ln(arg),
            Function::Sqrt => functions::sqrt(arg),
            Function::Exp => Ok(functions::exp(arg)),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Abstract Syntax Tree (AST) node representing an expression.
///
/// Produced by [`parse_expression`](crate::engine::parse_expression) and reduced to a
/// number by [`eval_ast`](crate::eval::eval_ast).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AstExpr {
    /// A numeric literal, including a sign written directly in front of it.
    ///
    /// Examples: `3.14`, `42`, `-1.5`
    Literal(f64),

    /// A binary operation.
    ///
    /// Examples: `a + b`, `x ^ 2`
    Binary {
        op: BinaryOp,
        left: Box<AstExpr>,
        right: Box<AstExpr>,
    },

    /// A call of one of the named functions with a single argument.
    ///
    /// Examples: `sin(45)`, `sqrt(3*3 + 4*4)`
    ///
    /// The call's value takes the place of a literal. When the call follows `-`, `*`,
    /// `/`, `^` or a sign, where a signed literal would be rejected, `unsigned_at` holds
    /// the call's offset and a negative value is rejected there.
    Call {
        func: Function,
        arg: Box<AstExpr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unsigned_at: Option<usize>,
    },

    /// A `-` sign written in front of a function call.
    Neg(Box<AstExpr>),
}

impl AstExpr {
    pub fn binary(op: BinaryOp, left: AstExpr, right: AstExpr) -> Self {
        AstExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(func: Function, arg: AstExpr) -> Self {
        AstExpr::Call {
            func,
            arg: Box::new(arg),
            unsigned_at: None,
        }
    }

    /// A call in a position where its value may not be negative.
    pub fn unsigned_call(func: Function, arg: AstExpr, position: usize) -> Self {
        AstExpr::Call {
            func,
            arg: Box::new(arg),
            unsigned_at: Some(position),
        }
    }
}

impl fmt::Display for AstExpr {
    /// Renders the tree fully parenthesized, e.g. `((2 + 3) * 4)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstExpr::Literal(value) => write!(f, "{}", value),
            AstExpr::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
            AstExpr::Call { func, arg, .. } => write!(f, "{}({})", func, arg),
            AstExpr::Neg(inner) => write!(f, "-{}", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    #[test]
    fn test_operator_precedence_tiers() {
        assert!(BinaryOp::Add.precedence() < BinaryOp::Mul.precedence());
        assert!(BinaryOp::Div.precedence() < BinaryOp::Pow.precedence());
        assert_eq!(BinaryOp::Sub.precedence(), Precedence::Additive);
    }

    #[test]
    fn test_operator_chars() {
        for c in ['+', '-', '*', '/', '^'] {
            let op = BinaryOp::from_char(c).unwrap();
            assert_eq!(op.symbol(), c);
        }
        assert_eq!(BinaryOp::from_char('%'), None);
    }

    #[test]
    fn test_binary_apply() {
        assert_eq!(BinaryOp::Pow.apply(2.0, 10.0).unwrap(), 1024.0);
        assert_eq!(BinaryOp::Div.apply(1.0, 0.0), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_function_lookup_is_exact() {
        assert_eq!(Function::from_name("ln"), Some(Function::Ln));
        assert_eq!(Function::from_name("sqrt"), Some(Function::Sqrt));
        assert_eq!(Function::from_name("sinh"), None);
        assert_eq!(Function::from_name("SIN"), None);
        for func in Function::ALL {
            assert_eq!(Function::from_name(func.name()), Some(func));
        }
    }

    #[test]
    fn test_function_apply_propagates_domain_errors() {
        assert!(matches!(
            Function::Sqrt.apply(-4.0),
            Err(EvalError::NegativeRadicand { .. })
        ));
        assert!(matches!(
            Function::Ln.apply(0.0),
            Err(EvalError::NonPositiveLogArgument { .. })
        ));
        assert_eq!(Function::Exp.apply(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_ast_display() {
        let ast = AstExpr::binary(
            BinaryOp::Mul,
            AstExpr::binary(BinaryOp::Add, AstExpr::Literal(2.0), AstExpr::Literal(3.0)),
            AstExpr::Neg(Box::new(AstExpr::call(Function::Sin, AstExpr::Literal(90.0)))),
        );
        assert_eq!(ast.to_string(), "((2 + 3) * -sin(90))");
        assert_eq!(
            AstExpr::unsigned_call(Function::Cos, AstExpr::Literal(0.0), 2).to_string(),
            "cos(0)"
        );
    }

    #[test]
    fn test_ast_serializes_to_json() {
        let ast = AstExpr::call(Function::Log, AstExpr::Literal(100.0));
        let json = serde_json::to_string(&ast).unwrap();
        assert_eq!(json, r#"{"call":{"func":"log","arg":{"literal":100.0}}}"#);
        let back: AstExpr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ast);

        let ast = AstExpr::unsigned_call(Function::Cos, AstExpr::Literal(180.0), 2);
        let json = serde_json::to_string(&ast).unwrap();
        assert_eq!(
            json,
            r#"{"call":{"func":"cos","arg":{"literal":180.0},"unsigned_at":2}}"#
        );
    }
}
