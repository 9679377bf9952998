use crate::types::TokenKind;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Parsed value, set for `Number` tokens only.
    pub value: Option<f64>,
    pub text: String,
    /// Byte offset of the token in the lexed input.
    pub position: usize,
}

/// The lexer struct, which produces tokens from a normalized expression.
///
/// The input is expected to be whitespace-free already; a whitespace character that
/// slips through is reported as an `Error` token like any other unknown character.
#[derive(Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Peek at the current character.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Peek at the character `n` characters ahead of the current one.
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    /// Advance the position by one character.
    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// Get the original input string
    pub fn get_original_input(&self) -> &'a str {
        self.input
    }

    fn token(&self, kind: TokenKind, start_pos: usize, value: Option<f64>) -> Token {
        Token {
            kind,
            value,
            text: String::from(&self.input[start_pos..self.pos]),
            position: start_pos,
        }
    }

    /// Consume an unsigned exponent suffix (`e3`) if one follows.
    ///
    /// An `e` that is not followed by a digit is left alone, so `2exp(1)` lexes as the
    /// number `2` followed by the identifier `exp`. A signed exponent is never part of
    /// the literal: in `1e-3` the `-` is an operator, and the `e` before it is lexed as
    /// an identifier.
    fn consume_exponent(&mut self) {
        if self.peek() != Some('e') || !self.peek_nth(1).is_some_and(|d| d.is_ascii_digit()) {
            return;
        }
        self.advance();
        while self.peek().is_some_and(|d| d.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Lex a numeric literal: digits and dots, then an optional exponent.
    ///
    /// The whole run is handed to `str::parse`, so malformed runs such as `1.2.3` or a
    /// lone `.` become `Error` tokens.
    fn lex_number(&mut self, start_pos: usize) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            self.advance();
        }
        self.consume_exponent();

        let num_str = &self.input[start_pos..self.pos];
        match num_str.parse::<f64>() {
            Ok(val) => self.token(TokenKind::Number, start_pos, Some(val)),
            Err(_) => self.token(TokenKind::Error, start_pos, None),
        }
    }

    /// Get the next token from the input.
    pub fn next_token(&mut self) -> Option<Token> {
        let start_pos = self.pos;
        let c = self.peek()?;

        if c.is_ascii_digit() || c == '.' {
            return Some(self.lex_number(start_pos));
        }

        if c.is_ascii_alphabetic() {
            while self.peek().is_some_and(|nc| nc.is_ascii_alphabetic()) {
                self.advance();
            }
            return Some(self.token(TokenKind::Identifier, start_pos, None));
        }

        let kind = match c {
            '+' | '-' | '*' | '/' | '^' => TokenKind::Operator,
            '(' => TokenKind::Open,
            ')' => TokenKind::Close,
            _ => TokenKind::Error,
        };
        self.advance();
        Some(self.token(kind, start_pos, None))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
