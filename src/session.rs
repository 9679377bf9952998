//! Interactive calculator session.
//!
//! A session reads one line at a time, turns it into a [`Command`] and runs it against
//! its [`Evaluator`] and [`Memory`]. The session is the only owner of the memory
//! register; expressions cannot refer to it.

use thiserror::Error;

use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::functions;
use crate::memory::Memory;

pub const HELP: &str = "\
Enter an expression to evaluate it, e.g. 2+3*4, sin(45)+cos(30), 2^3+log(100).
Functions (angles in degrees): sin cos tan log ln sqrt exp
Operators: + - * / ^ and parentheses

Commands:
  m+ EXPR     add the value of EXPR to memory
  m- EXPR     subtract the value of EXPR from memory
  mr          recall memory
  mc          clear memory
  root X N    N-th root of X
  rad EXPR    convert degrees to radians
  deg EXPR    convert radians to degrees
  help        show this text
  quit        leave the calculator";

/// Error raised by a session command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// A command word was given the wrong arguments.
    #[error("usage: {usage}")]
    Usage { usage: &'static str },
}

/// One line of session input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Evaluate(String),
    MemoryAdd(String),
    MemorySubtract(String),
    MemoryRecall,
    MemoryClear,
    Root { value: String, degree: String },
    ToRadians(String),
    ToDegrees(String),
    Help,
    Quit,
}

impl Command {
    /// Parses a line. Blank lines yield `None`.
    ///
    /// The first whitespace-separated word selects a command (case-insensitive); a
    /// line that does not start with a command word is evaluated as an expression.
    pub fn parse(line: &str) -> Result<Option<Command>, SessionError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let with_expr = |usage: &'static str| -> Result<String, SessionError> {
            if rest.is_empty() {
                Err(SessionError::Usage { usage })
            } else {
                Ok(rest.to_string())
            }
        };
        let without_args = |command: Command, usage: &'static str| {
            if rest.is_empty() {
                Ok(command)
            } else {
                Err(SessionError::Usage { usage })
            }
        };

        let command = match word.to_lowercase().as_str() {
            "m+" => Command::MemoryAdd(with_expr("m+ EXPR")?),
            "m-" => Command::MemorySubtract(with_expr("m- EXPR")?),
            "mr" => without_args(Command::MemoryRecall, "mr")?,
            "mc" => without_args(Command::MemoryClear, "mc")?,
            "rad" => Command::ToRadians(with_expr("rad EXPR")?),
            "deg" => Command::ToDegrees(with_expr("deg EXPR")?),
            "root" => {
                let args: Vec<&str> = rest.split_whitespace().collect();
                match args.as_slice() {
                    [value, degree] => Command::Root {
                        value: value.to_string(),
                        degree: degree.to_string(),
                    },
                    _ => return Err(SessionError::Usage { usage: "root X N" }),
                }
            }
            "help" | "?" => without_args(Command::Help, "help")?,
            "quit" | "exit" => without_args(Command::Quit, "quit")?,
            _ => Command::Evaluate(line.to_string()),
        };
        Ok(Some(command))
    }
}

/// The result of running a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A computed value.
    Value(f64),
    /// The memory contents after a memory command.
    Memory(f64),
    MemoryCleared,
    Help,
    Quit,
}

/// A calculator session: an evaluator plus the memory register.
#[derive(Debug, Default)]
pub struct Session {
    evaluator: Evaluator,
    memory: Memory,
}

impl Session {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            evaluator,
            memory: Memory::new(),
        }
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Runs a command. A failed command leaves the memory untouched.
    pub fn execute(&mut self, command: &Command) -> Result<Outcome, SessionError> {
        let outcome = match command {
            Command::Evaluate(expr) => Outcome::Value(self.evaluator.eval(expr)?),
            Command::MemoryAdd(expr) => {
                let value = self.evaluator.eval(expr)?;
                Outcome::Memory(self.memory.add(value))
            }
            Command::MemorySubtract(expr) => {
                let value = self.evaluator.eval(expr)?;
                Outcome::Memory(self.memory.subtract(value))
            }
            Command::MemoryRecall => Outcome::Memory(self.memory.recall()),
            Command::MemoryClear => {
                self.memory.clear();
                Outcome::MemoryCleared
            }
            Command::Root { value, degree } => {
                let value = self.evaluator.eval(value)?;
                let degree = self.evaluator.eval(degree)?;
                Outcome::Value(functions::nth_root(value, degree)?)
            }
            Command::ToRadians(expr) => {
                Outcome::Value(functions::deg_to_rad(self.evaluator.eval(expr)?))
            }
            Command::ToDegrees(expr) => {
                Outcome::Value(functions::rad_to_deg(self.evaluator.eval(expr)?))
            }
            Command::Help => Outcome::Help,
            Command::Quit => Outcome::Quit,
        };
        Ok(outcome)
    }

    /// Parses and runs one input line. Blank lines yield `None`.
    pub fn run_line(&mut self, line: &str) -> Result<Option<Outcome>, SessionError> {
        match Command::parse(line)? {
            Some(command) => self.execute(&command).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    fn value(outcome: Option<Outcome>) -> f64 {
        match outcome {
            Some(Outcome::Value(v)) | Some(Outcome::Memory(v)) => v,
            other => panic!("expected a number, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(
            Command::parse("M+ 2 * 3").unwrap(),
            Some(Command::MemoryAdd("2 * 3".to_string()))
        );
        assert_eq!(Command::parse("mr").unwrap(), Some(Command::MemoryRecall));
        assert_eq!(Command::parse("EXIT").unwrap(), Some(Command::Quit));
        assert_eq!(
            Command::parse("root 27 3").unwrap(),
            Some(Command::Root {
                value: "27".to_string(),
                degree: "3".to_string()
            })
        );
        assert_eq!(
            Command::parse("sin (30) + 1").unwrap(),
            Some(Command::Evaluate("sin (30) + 1".to_string()))
        );
    }

    #[test]
    fn test_parse_usage_errors() {
        assert_eq!(
            Command::parse("m+"),
            Err(SessionError::Usage { usage: "m+ EXPR" })
        );
        assert_eq!(
            Command::parse("root 8"),
            Err(SessionError::Usage { usage: "root X N" })
        );
        assert_eq!(
            Command::parse("mc now"),
            Err(SessionError::Usage { usage: "mc" })
        );
    }

    #[test]
    fn test_memory_commands() {
        let mut session = Session::default();
        assert_eq!(value(session.run_line("m+ 2+3").unwrap()), 5.0);
        assert_eq!(value(session.run_line("m- 1.5").unwrap()), 3.5);
        assert_eq!(value(session.run_line("mr").unwrap()), 3.5);
        assert_eq!(
            session.run_line("mc").unwrap(),
            Some(Outcome::MemoryCleared)
        );
        assert_eq!(session.memory().recall(), 0.0);
    }

    #[test]
    fn test_failed_command_leaves_memory_untouched() {
        let mut session = Session::default();
        session.run_line("m+ 10").unwrap();
        let err = session.run_line("m+ log(0)").unwrap_err();
        assert_eq!(
            err,
            SessionError::Eval(EvalError::NonPositiveLogArgument { value: 0.0 })
        );
        assert_eq!(session.memory().recall(), 10.0);
    }

    #[test]
    fn test_root_and_angle_commands() {
        let mut session = Session::default();
        assert_approx_eq!(value(session.run_line("root 27 3").unwrap()), 3.0);
        assert_approx_eq!(value(session.run_line("root 2^4 2*2").unwrap()), 2.0);
        assert!(matches!(
            session.run_line("root -4 2"),
            Err(SessionError::Eval(EvalError::NegativeEvenRoot { .. }))
        ));
        assert_approx_eq!(
            value(session.run_line("rad 180").unwrap()),
            core::f64::consts::PI
        );
        assert_approx_eq!(value(session.run_line("deg 0").unwrap()), 0.0);
    }

    #[test]
    fn test_evaluate_and_control_commands() {
        let mut session = Session::new(Evaluator::new());
        assert_eq!(value(session.run_line("2+3*4").unwrap()), 14.0);
        assert_eq!(session.run_line("help").unwrap(), Some(Outcome::Help));
        assert_eq!(session.run_line("quit").unwrap(), Some(Outcome::Quit));
        assert_eq!(session.run_line("").unwrap(), None);
        assert!(matches!(
            session.run_line("2++"),
            Err(SessionError::Eval(EvalError::InvalidExpression { .. }))
        ));
    }
}
