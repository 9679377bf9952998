use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use sci_calc::config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPRESSION_LENGTH, EvalConfig};
use sci_calc::error::EvalError;
use sci_calc::evaluator::Evaluator;
use sci_calc::session::{HELP, Outcome, Session, SessionError};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Expressions to evaluate; starts an interactive session when none are given
    expressions: Vec<String>,

    /// Print the parsed expression tree as JSON instead of evaluating
    #[arg(long)]
    ast: bool,

    /// Maximum expression length in characters
    #[arg(long, default_value_t = DEFAULT_MAX_EXPRESSION_LENGTH)]
    max_length: usize,

    /// Maximum nesting depth of parentheses and function calls
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Label for an error line; failures from the function library are math errors.
fn error_label(err: &EvalError) -> &'static str {
    if err.is_domain_error() {
        "math error"
    } else {
        "error"
    }
}

/// Evaluates (or, with `--ast`, parses) each argument. Returns false if any failed.
fn run_batch(
    evaluator: &Evaluator,
    expressions: &[String],
    print_ast: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    let mut all_ok = true;
    for expr in expressions {
        let printed: Result<String, Box<dyn Error>> = if print_ast {
            evaluator
                .parse(expr)
                .map_err(Into::into)
                .and_then(|ast| serde_json::to_string_pretty(&ast).map_err(Into::into))
        } else {
            evaluator
                .eval(expr)
                .map(|value| format!("{} = {}", expr, value))
                .map_err(Into::into)
        };

        match printed {
            Ok(line) => writeln!(out, "{}", line)?,
            Err(e) => {
                let label = e.downcast_ref::<EvalError>().map_or("error", error_label);
                writeln!(err, "{}: {}: {}", expr, label, e)?;
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

fn run_interactive(evaluator: Evaluator) -> io::Result<()> {
    let mut session = Session::new(evaluator);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Scientific calculator. Type 'help' for commands, 'quit' to leave.");
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            debug!("end of input");
            break;
        }

        match session.run_line(&line) {
            Ok(Some(Outcome::Value(value))) => println!("{}", value),
            Ok(Some(Outcome::Memory(value))) => println!("memory: {}", value),
            Ok(Some(Outcome::MemoryCleared)) => println!("memory cleared"),
            Ok(Some(Outcome::Help)) => println!("{}", HELP),
            Ok(Some(Outcome::Quit)) => break,
            Ok(None) => {}
            Err(SessionError::Eval(e)) => println!("{}: {}", error_label(&e), e),
            Err(e) => println!("error: {}", e),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = EvalConfig::new()
        .with_max_expression_length(cli.max_length)
        .with_max_depth(cli.max_depth);
    info!(?config, "starting calculator");
    let evaluator = Evaluator::with_config(config);

    if !cli.expressions.is_empty() {
        let status = run_batch(
            &evaluator,
            &cli.expressions,
            cli.ast,
            &mut io::stdout(),
            &mut io::stderr(),
        );
        return match status {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    match run_interactive(evaluator) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(expressions: &[&str], print_ast: bool) -> (bool, String, String) {
        let expressions: Vec<String> = expressions.iter().map(|e| e.to_string()).collect();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let ok = run_batch(&Evaluator::new(), &expressions, print_ast, &mut out, &mut err).unwrap();
        (ok, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_batch_prints_values() {
        let (ok, out, err) = batch(&["2+3*4", "sqrt(16)"], false);
        assert!(ok);
        assert_eq!(out, "2+3*4 = 14\nsqrt(16) = 4\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_batch_reports_failures_and_keeps_going() {
        let (ok, out, err) = batch(&["log(0)", "2*-3", "1+1"], false);
        assert!(!ok);
        assert_eq!(out, "1+1 = 2\n");
        let lines: Vec<&str> = err.lines().collect();
        assert_eq!(lines[0], "log(0): math error: Logarithm is undefined for 0");
        assert!(lines[1].starts_with("2*-3: error: Invalid expression at position 2"));
    }

    #[test]
    fn test_batch_prints_ast_as_json() {
        let (ok, out, _) = batch(&["log(100)"], true);
        assert!(ok);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["call"]["func"], "log");
        assert_eq!(json["call"]["arg"]["literal"], 100.0);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["scicalc", "--ast", "--max-depth", "8", "1+2"]);
        assert!(cli.ast);
        assert_eq!(cli.max_depth, 8);
        assert_eq!(cli.max_length, DEFAULT_MAX_EXPRESSION_LENGTH);
        assert_eq!(cli.expressions, vec!["1+2"]);
    }

    #[test]
    fn test_error_label() {
        assert_eq!(error_label(&EvalError::DivisionByZero), "math error");
        assert_eq!(error_label(&EvalError::NestingTooDeep { limit: 2 }), "error");
    }
}
