//! Configured expression evaluator
//!
//! This module binds an [`EvalConfig`] to the evaluation pipeline so callers that need
//! non-default limits do not have to pass them on every call.

use crate::config::EvalConfig;
use crate::engine::{evaluate_with_config, parse_expression_with_config};
use crate::error::Result;
use crate::types::AstExpr;

/// An expression evaluator with fixed limits.
///
/// Evaluation holds no state between calls, so one evaluator can be shared freely,
/// including across threads.
///
/// # Examples
///
/// ```
/// use sci_calc::config::EvalConfig;
/// use sci_calc::evaluator::Evaluator;
///
/// let evaluator = Evaluator::new();
/// assert_eq!(evaluator.eval("2 + 3 * 4").unwrap(), 14.0);
///
/// let strict = Evaluator::with_config(EvalConfig::new().with_max_expression_length(3));
/// assert!(strict.eval("1+2+3").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    /// Creates an evaluator with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluates an expression.
    pub fn eval(&self, expression: &str) -> Result<f64> {
        evaluate_with_config(expression, &self.config)
    }

    /// Parses an expression without evaluating it.
    pub fn parse(&self, expression: &str) -> Result<AstExpr> {
        parse_expression_with_config(expression, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    #[test]
    fn test_simple_evaluation() {
        let evaluator = Evaluator::new();
        assert_eq!(evaluator.eval("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(evaluator.eval("2^3+1").unwrap(), 9.0);
    }

    #[test]
    fn test_custom_limits() {
        let evaluator = Evaluator::with_config(EvalConfig::new().with_max_depth(1));
        assert_eq!(evaluator.config().max_depth, 1);
        assert_eq!(evaluator.eval("sqrt(16)").unwrap(), 4.0);
        assert_eq!(
            evaluator.eval("sqrt((16))"),
            Err(EvalError::NestingTooDeep { limit: 1 })
        );
    }

    #[test]
    fn test_parse_without_evaluating() {
        let evaluator = Evaluator::new();
        let ast = evaluator.parse("1/0").unwrap();
        assert_eq!(ast.to_string(), "(1 / 0)");
        assert_eq!(evaluator.eval("1/0"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_evaluator_is_shareable_across_threads() {
        let evaluator = Evaluator::new();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || evaluator.eval(&format!("{} * 10 + 1", i)).unwrap())
            })
            .collect();
        let results: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![1.0, 11.0, 21.0, 31.0]);
    }
}
