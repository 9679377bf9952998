//! Evaluation limits.

/// Default maximum length of a normalized expression, in characters.
pub const DEFAULT_MAX_EXPRESSION_LENGTH: usize = 10_000;

/// Default maximum nesting depth of parentheses and function calls.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Resource limits applied to every evaluation.
///
/// ```
/// use sci_calc::config::EvalConfig;
///
/// let config = EvalConfig::new().with_max_depth(16);
/// assert_eq!(config.max_depth, 16);
/// assert_eq!(config.max_expression_length, 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Longest accepted expression after whitespace removal, in characters.
    pub max_expression_length: usize,
    /// Deepest accepted nesting of `(...)` groups and function calls.
    pub max_depth: usize,
}

impl EvalConfig {
    pub const fn new() -> Self {
        Self {
            max_expression_length: DEFAULT_MAX_EXPRESSION_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub const fn with_max_expression_length(mut self, limit: usize) -> Self {
        self.max_expression_length = limit;
        self
    }

    pub const fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self::new()
    }
}
