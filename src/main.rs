//! Interactive REPL and script runner for Lisplet
//!
//! Usage:
//!   lisplet             start an interactive session
//!   lisplet <script>    evaluate a file and print the final value

use std::fs::File;
use std::io::{self, BufReader, Write};

use anyhow::{Context, Result};
use lisplet::{EnvRef, Environment, Evaluator, Expression, SExprParser, TokenStream};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next() {
        Some(path) => run_file(&path),
        None => repl(),
    }
}

/// Evaluates every top-level form in a script against one global
/// environment and prints the final value
fn run_file(path: &str) -> Result<()> {
    let file = File::open(path).with_context(|| format!("failed to open '{}'", path))?;
    let mut parser = SExprParser::new(TokenStream::new(BufReader::new(file)));
    let env = Environment::global();
    let evaluator = Evaluator::new();

    let mut last = None;
    while let Some(expr) = parser.read()? {
        last = Some(evaluator.eval(&expr, &env)?);
    }
    if let Some(value) = last {
        println!("{}", value);
    }
    Ok(())
}

fn repl() -> Result<()> {
    println!("Lisplet {} REPL", lisplet::VERSION);
    println!("Type expressions and press Enter; 'exit' to quit.");
    println!();

    let env = Environment::global();
    let evaluator = Evaluator::new();
    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();

        match line {
            "" => continue,
            "exit" | "quit" => break,
            _ => {}
        }

        // Errors abort only the current input; the session and its
        // environment continue
        match eval_line(&evaluator, &env, line) {
            Ok(results) => {
                for value in results {
                    println!("{}", value);
                }
            }
            Err(err) => eprintln!("error: {}", err),
        }
    }
    Ok(())
}

/// Reads every expression on the line and evaluates them in order
fn eval_line(
    evaluator: &Evaluator,
    env: &EnvRef,
    line: &str,
) -> lisplet::Result<Vec<Expression>> {
    let mut parser = SExprParser::from_text(line);
    let mut results = Vec::new();
    while let Some(expr) = parser.read()? {
        results.push(evaluator.eval(&expr, env)?);
    }
    Ok(results)
}
