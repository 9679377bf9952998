//! Expression parsing and the `evaluate` entry point.
//!
//! Raw input is normalized (whitespace removed, lowercased), tokenized by the
//! [`Lexer`], and parsed by a Pratt parser into an [`AstExpr`], which
//! [`eval_ast`] reduces to a number.
//!
//! Grammar, lowest precedence first:
//!
//! | Tier           | Operators | Associativity |
//! |----------------|-----------|---------------|
//! | additive       | `+` `-`   | left          |
//! | multiplicative | `*` `/`   | left          |
//! | power          | `^`       | left          |
//!
//! A `+` or `-` at the start of an operand is a sign. It binds only to the numeric
//! literal or function call right after it, so `-2^2` is `(-2)^2` and `-(2)` is
//! rejected. A sign may start the whole input or a group, or follow a binary `+`
//! (`3+-4`). After `-`, `*`, `/` or `^` it is rejected: `2*-3`, `3--4` and `2^-1` are
//! all invalid.
//!
//! A function call stands where a literal would, so the same rule applies to its
//! value: `2-cos(180)` and `2*cos(180)` are rejected because `cos(180)` is negative,
//! while `2+cos(180)` and `cos(180)*2` are fine.

use tracing::{debug, trace};

use crate::config::EvalConfig;
use crate::error::{EvalError, Result};
use crate::eval::eval_ast;
use crate::lexer::{Lexer, Token};
use crate::types::{AstExpr, BinaryOp, Function, Precedence, TokenKind};

/// Strips all whitespace and lowercases the input.
///
/// ```
/// assert_eq!(sci_calc::engine::normalize(" Sin( 9 0 ) "), "sin(90)");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Pratt parser for normalized expressions
struct PrattParser<'a> {
    lexer: Lexer<'a>,
    current: Option<Token>,
    depth: usize,
    max_depth: usize,
}

/// Token binding powers for the Pratt parser
#[derive(Debug, Clone, Copy)]
struct BindingPower {
    left: u8,
    right: u8,
}

impl BindingPower {
    const fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    // For left-associative operators, right binding power is left + 1
    const fn left_assoc(power: u8) -> Self {
        Self::new(power, power + 1)
    }
}

impl<'a> PrattParser<'a> {
    fn new(input: &'a str, max_depth: usize) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            depth: 0,
            max_depth,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.current.take();
        self.current = self.lexer.next_token();
        tok
    }

    fn end_of_input(&self, expected: &'static str) -> EvalError {
        EvalError::invalid(
            self.lexer.get_original_input().len(),
            "end of input",
            expected,
        )
    }

    fn unexpected(tok: &Token, expected: &'static str) -> EvalError {
        EvalError::invalid(tok.position, tok.text.clone(), expected)
    }

    // Every tier is left-associative: `a-b-c`, `a/b/c` and `a^b^c` all group to the left
    fn get_binding_power(op: BinaryOp) -> BindingPower {
        match op.precedence() {
            Precedence::Additive => BindingPower::left_assoc(1),
            Precedence::Multiplicative => BindingPower::left_assoc(3),
            Precedence::Power => BindingPower::left_assoc(5),
        }
    }

    fn enter_nested(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(EvalError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn exit_nested(&mut self) {
        self.depth -= 1;
    }

    fn parse_expr(&mut self, min_bp: u8, sign_allowed: bool) -> Result<AstExpr> {
        let mut lhs = self.parse_operand(sign_allowed)?;

        while let Some(tok) = self.peek() {
            let op = match tok.kind {
                TokenKind::Operator => tok.text.chars().next().and_then(BinaryOp::from_char),
                // The enclosing group or call decides whether a ')' is balanced
                TokenKind::Close => break,
                _ => None,
            };
            let Some(op) = op else {
                return Err(Self::unexpected(tok, "an operator"));
            };

            let bp = Self::get_binding_power(op);
            if bp.left < min_bp {
                break;
            }
            self.next();

            // Only a binary '+' may be followed by a signed operand
            let rhs = self.parse_expr(bp.right, op == BinaryOp::Add)?;
            lhs = AstExpr::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_operand(&mut self, sign_allowed: bool) -> Result<AstExpr> {
        match self.peek() {
            Some(tok) if tok.kind == TokenKind::Operator && matches!(tok.text.as_str(), "+" | "-") => {
                if !sign_allowed {
                    return Err(Self::unexpected(tok, "an operand without a sign"));
                }
                self.parse_signed()
            }
            Some(_) => self.parse_primary(sign_allowed),
            None => Err(self.end_of_input("an operand")),
        }
    }

    // A sign applies to the literal or call immediately after it, nothing wider
    fn parse_signed(&mut self) -> Result<AstExpr> {
        let negative = self.next().is_some_and(|sign| sign.text == "-");

        let tok = match self.peek() {
            Some(tok) => tok,
            None => return Err(self.end_of_input("a number or function call after sign")),
        };

        match tok.kind {
            TokenKind::Number => {
                let val = Self::number(tok)?;
                self.next();
                Ok(AstExpr::Literal(if negative { -val } else { val }))
            }
            TokenKind::Identifier => {
                // The call's own value cannot carry a second sign
                let call = self.parse_call(false)?;
                Ok(if negative {
                    AstExpr::Neg(Box::new(call))
                } else {
                    call
                })
            }
            _ => Err(Self::unexpected(tok, "a number or function call after sign")),
        }
    }

    fn number(tok: &Token) -> Result<f64> {
        tok.value.ok_or_else(|| Self::unexpected(tok, "a numeric literal"))
    }

    // Parse a primary expression (number, function call, parenthesized expression)
    fn parse_primary(&mut self, sign_allowed: bool) -> Result<AstExpr> {
        let tok = match self.peek() {
            Some(tok) => tok,
            None => return Err(self.end_of_input("an operand")),
        };

        match tok.kind {
            TokenKind::Number => {
                let val = Self::number(tok)?;
                self.next();
                Ok(AstExpr::Literal(val))
            }
            TokenKind::Identifier => self.parse_call(sign_allowed),
            TokenKind::Open => self.parse_parenthesized_expr(),
            _ => Err(Self::unexpected(tok, "an operand")),
        }
    }

    fn parse_call(&mut self, sign_allowed: bool) -> Result<AstExpr> {
        let name_tok = match self.next() {
            Some(tok) => tok,
            None => return Err(self.end_of_input("a function name")),
        };
        let func = Function::from_name(&name_tok.text)
            .ok_or_else(|| Self::unexpected(&name_tok, "a function name"))?;

        match self.peek() {
            Some(tok) if tok.kind == TokenKind::Open => {}
            Some(tok) => return Err(Self::unexpected(tok, "'(' after function name")),
            None => return Err(self.end_of_input("'(' after function name")),
        }

        let arg = self.parse_parenthesized_expr()?;
        Ok(if sign_allowed {
            AstExpr::call(func, arg)
        } else {
            AstExpr::unsigned_call(func, arg, name_tok.position)
        })
    }

    // Helper method for parsing parenthesized expressions
    fn parse_parenthesized_expr(&mut self) -> Result<AstExpr> {
        self.enter_nested()?;
        self.next(); // consume '('

        let expr = self.parse_expr(0, true)?;

        match self.peek() {
            Some(tok) if tok.kind == TokenKind::Close => {
                self.next();
            }
            Some(tok) => return Err(Self::unexpected(tok, "closing parenthesis ')'")),
            None => return Err(self.end_of_input("closing parenthesis ')'")),
        }

        self.exit_nested();
        Ok(expr)
    }

    // Parse a complete expression
    fn parse(&mut self) -> Result<AstExpr> {
        let expr = self.parse_expr(0, true)?;

        // parse_expr stops only at end of input or at a ')' with no matching '('
        if let Some(tok) = self.peek() {
            return Err(Self::unexpected(tok, "end of input"));
        }

        Ok(expr)
    }
}

fn parse_normalized(normalized: &str, config: &EvalConfig) -> Result<AstExpr> {
    let length = normalized.chars().count();
    if length > config.max_expression_length {
        return Err(EvalError::ExpressionTooLong {
            length,
            limit: config.max_expression_length,
        });
    }

    PrattParser::new(normalized, config.max_depth).parse()
}

/// Normalizes and parses an expression into an AST using the default limits.
pub fn parse_expression(input: &str) -> Result<AstExpr> {
    parse_expression_with_config(input, &EvalConfig::default())
}

/// Normalizes and parses an expression into an AST.
///
/// Positions in returned errors refer to the normalized string.
pub fn parse_expression_with_config(input: &str, config: &EvalConfig) -> Result<AstExpr> {
    parse_normalized(&normalize(input), config)
}

/// Evaluates a mathematical expression with the default limits.
///
/// Trigonometric functions take degrees. The first domain or syntax failure aborts the
/// whole evaluation.
///
/// ```
/// use sci_calc::engine::evaluate;
/// use sci_calc::error::EvalError;
///
/// assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
/// assert_eq!(evaluate("10 - 3 - 2").unwrap(), 5.0);
/// assert!((evaluate("sin(90)").unwrap() - 1.0).abs() < 1e-9);
/// assert_eq!(evaluate("1/0"), Err(EvalError::DivisionByZero));
/// ```
pub fn evaluate(expression: &str) -> Result<f64> {
    evaluate_with_config(expression, &EvalConfig::default())
}

/// Evaluates a mathematical expression under the given limits.
pub fn evaluate_with_config(expression: &str, config: &EvalConfig) -> Result<f64> {
    let normalized = normalize(expression);
    debug!(expression = %normalized, "evaluating expression");

    let result = parse_normalized(&normalized, config).and_then(|ast| {
        trace!(ast = %ast, "parsed expression");
        eval_ast(&ast)
    });

    if let Err(err) = &result {
        debug!(expression = %normalized, error = %err, "evaluation failed");
    }
    result
}
