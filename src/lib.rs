#![doc = r#"
# sci-calc

A scientific calculator core: a string expression evaluator backed by a small library
of domain-checked scientific functions.

## Quick Start

```rust
use sci_calc::engine::evaluate;

// Multiplication binds tighter than addition
assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);

// Trigonometric functions take degrees
let result = evaluate("sin(45) + cos(30)").unwrap();
assert!((result - (0.7071 + 0.8660)).abs() < 1e-4);

// Input is case- and whitespace-insensitive
assert_eq!(evaluate("2^3 + LOG( 100 )").unwrap(), 10.0);
```

## Supported Grammar

| Precedence | Operators | Associativity |
|------------|-----------|---------------|
| 1          | `+` `-`   | Left          |
| 2          | `*` `/`   | Left          |
| 3          | `^`       | Left          |

A `+` or `-` at the start of an operand is a sign and applies only to the number or
function call right after it: `-3+4` is `1`, `3+-4` is `-1`, `-2^2` is `4`, while
`-(2)` is rejected. A sign may only start the input or a group, or follow a binary
`+`, so `2*-3` and `3--4` are rejected; write `2*(-3)` instead. A function result
counts as a literal here: `2*cos(180)` is rejected because `cos(180)` is negative.

Function calls are evaluated before the arithmetic around them, so `1/0+log(0)`
reports the logarithm, not the division.

### Built-in Functions

Each takes a single argument:

- Trigonometric (degrees): `sin`, `cos`, `tan`
- Logarithmic: `log` (base 10), `ln`
- Other: `sqrt`, `exp`

## Error Handling

Every failure aborts the whole evaluation:

```rust
use sci_calc::engine::evaluate;
use sci_calc::error::{ErrorKind, EvalError};

assert_eq!(evaluate("1/0"), Err(EvalError::DivisionByZero));
assert_eq!(evaluate("tan(90)").unwrap_err().kind(), ErrorKind::UndefinedTangent);
assert_eq!(evaluate("sqrt(-1)").unwrap_err().kind(), ErrorKind::NegativeRadicand);
assert_eq!(evaluate("log(0)").unwrap_err().kind(), ErrorKind::NonPositiveLogArgument);
assert_eq!(evaluate("(2+3").unwrap_err().kind(), ErrorKind::InvalidExpression);
```

## Feature Flags

- `libm` (default): compute transcendental functions with the `libm` crate. Without
  it, the `f64` methods from std are used.
"#]

pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod memory;
pub mod session;
pub mod types;

pub use config::EvalConfig;
pub use engine::{evaluate, evaluate_with_config, parse_expression};
pub use error::{ErrorKind, EvalError, Result};
pub use evaluator::Evaluator;
pub use memory::Memory;
pub use types::{AstExpr, BinaryOp, Function};

pub mod constants {
    /// Angles whose remainder modulo 180 lies this close to 90 have no tangent.
    pub const TANGENT_TOLERANCE: f64 = 1e-10;

    pub const TEST_PRECISION: f64 = 1e-10;
}

/// Utility macro to check if two floating point values are approximately equal
/// within a specified epsilon. Supports optional format arguments like assert_eq!.
#[macro_export]
macro_rules! assert_approx_eq {
    // Case 1: assert_approx_eq!(left, right) -> use default epsilon
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, $crate::constants::TEST_PRECISION)
    };
    // Case 2: assert_approx_eq!(left, right, epsilon) -> use specified epsilon
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let eps: f64 = $epsilon;

        let message = format!(
            "assertion failed: `(left ≈ right)` \
             (left: `{}`, right: `{}`, epsilon: `{}`)",
            left_val, right_val, eps
        );

        if left_val.is_nan() && right_val.is_nan() {
            // NaN == NaN for our purposes
        } else if left_val.is_infinite()
            && right_val.is_infinite()
            && left_val.signum() == right_val.signum()
        {
            // Same-signed infinities are equal
        } else {
            assert!((left_val - right_val).abs() < eps, "{}", message);
        }
    }};
    // Case 3: assert_approx_eq!(left, right, epsilon, "format message", args...)
    ($left:expr, $right:expr, $epsilon:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let eps: f64 = $epsilon;

        if left_val.is_nan() && right_val.is_nan() {
            // NaN == NaN for our purposes
        } else if left_val.is_infinite()
            && right_val.is_infinite()
            && left_val.signum() == right_val.signum()
        {
            // Same-signed infinities are equal
        } else {
            assert!((left_val - right_val).abs() < eps, $($arg)+);
        }
    }};
}
