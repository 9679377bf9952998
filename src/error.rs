//! Error types and handling for the sci-calc crate.
//!
//! Every failure raised while normalizing, parsing or evaluating an expression is an
//! [`EvalError`]. Domain failures come from the scientific function library, syntax
//! failures from the lexer and parser, and the two resource guards from [`EvalConfig`].
//!
//! [`EvalConfig`]: crate::config::EvalConfig

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used throughout the crate.
///
/// This is a convenience type alias that uses the `EvalError` type for the error variant.
pub type Result<T> = core::result::Result<T, EvalError>;

/// Error type for expression parsing and evaluation.
///
/// The first error encountered aborts the whole evaluation; there is never a
/// partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The divisor of a division was exactly zero (either sign).
    #[error("Division by zero")]
    DivisionByZero,

    /// Tangent requested for an angle congruent to 90 degrees modulo 180.
    #[error("Tangent is undefined for {angle} degrees")]
    UndefinedTangent {
        /// The offending angle, in degrees
        angle: f64,
    },

    /// Square root of a negative number.
    #[error("Cannot take the square root of negative number {value}")]
    NegativeRadicand { value: f64 },

    /// Even-indexed root of a negative number.
    #[error("Cannot take root of degree {degree} of negative number {value}")]
    NegativeEvenRoot {
        /// The radicand
        value: f64,
        /// The root index
        degree: f64,
    },

    /// Logarithm (base 10 or natural) of zero or a negative number.
    #[error("Logarithm is undefined for {value}")]
    NonPositiveLogArgument { value: f64 },

    /// The expression could not be parsed.
    ///
    /// `position` is a byte offset into the normalized expression (whitespace
    /// removed, lowercased). `found` is the offending token text, or `end of input`.
    #[error("Invalid expression at position {position}: expected {expected}, found '{found}'")]
    InvalidExpression {
        position: usize,
        found: String,
        expected: &'static str,
    },

    /// The normalized expression is longer than the configured limit.
    #[error("Expression too long: {length} characters (maximum is {limit})")]
    ExpressionTooLong { length: usize, limit: usize },

    /// Parentheses or function calls are nested deeper than the configured limit.
    #[error("Expression too complex: nesting exceeds maximum depth of {limit}")]
    NestingTooDeep { limit: usize },
}

/// The kind of an [`EvalError`], without its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    DivisionByZero,
    UndefinedTangent,
    NegativeRadicand,
    NegativeEvenRoot,
    NonPositiveLogArgument,
    InvalidExpression,
    ExpressionTooLong,
    NestingTooDeep,
}

impl EvalError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::DivisionByZero => ErrorKind::DivisionByZero,
            EvalError::UndefinedTangent { .. } => ErrorKind::UndefinedTangent,
            EvalError::NegativeRadicand { .. } => ErrorKind::NegativeRadicand,
            EvalError::NegativeEvenRoot { .. } => ErrorKind::NegativeEvenRoot,
            EvalError::NonPositiveLogArgument { .. } => ErrorKind::NonPositiveLogArgument,
            EvalError::InvalidExpression { .. } => ErrorKind::InvalidExpression,
            EvalError::ExpressionTooLong { .. } => ErrorKind::ExpressionTooLong,
            EvalError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
        }
    }

    /// True for failures raised by the scientific function library rather than the parser.
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::DivisionByZero
                | ErrorKind::UndefinedTangent
                | ErrorKind::NegativeRadicand
                | ErrorKind::NegativeEvenRoot
                | ErrorKind::NonPositiveLogArgument
        )
    }

    pub(crate) fn invalid(position: usize, found: impl Into<String>, expected: &'static str) -> Self {
        EvalError::InvalidExpression {
            position,
            found: found.into(),
            expected,
        }
    }
}
