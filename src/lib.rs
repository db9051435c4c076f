//! # Lisplet - an embeddable Lisp-family expression engine
//!
//! A small Lisp implementation for embedding in a host application: a
//! reader that turns source text into an expression tree, an environment
//! model with lexical scoping and closures, and a tree-walking evaluator
//! with special forms and a built-in procedure library.
//!
//! ## Quick Start
//!
//! ```rust
//! use lisplet::{parse, Environment, Evaluator};
//!
//! # fn main() -> lisplet::Result<()> {
//! let env = Environment::global();
//! let evaluator = Evaluator::new();
//!
//! let expr = parse("(+ 1 2 3)")?;
//! let result = evaluator.eval(&expr, &env)?;
//! assert_eq!(result.to_lisp_text(), "6");
//! # Ok(())
//! # }
//! ```
//!
//! Definitions persist in the environment across top-level forms, so a
//! REPL-style host evaluates each input against one shared global scope:
//!
//! ```rust
//! use lisplet::{parse, Environment, Evaluator};
//!
//! # fn main() -> lisplet::Result<()> {
//! let env = Environment::global();
//! let evaluator = Evaluator::new();
//!
//! evaluator.eval(&parse("(def twice (fn (x) (* 2 x)))")?, &env)?;
//! let result = evaluator.eval(&parse("(twice 21)")?, &env)?;
//! assert_eq!(result.to_lisp_text(), "42");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source text -> TokenStream -> SExprParser -> Expression -> Evaluator -> Expression
//! ```
//!
//! - [`TokenStream`] - pull-based tokenizer over any buffered input
//! - [`SExprParser`] - recursive-descent structural parser
//! - [`Expression`] - the single polymorphic value type
//! - [`Environment`] - chained symbol-to-value scopes
//! - [`Evaluator`] - special forms, closures and procedure application
//!
//! ## Language Overview
//!
//! - Special forms: `quote` (with `'` shorthand), `if`, `def`,
//!   `lambda`/`fn`, `do`, `cons`
//! - Built-in procedures: `+ - * /`, `> >= < <=`, `==`, `first`, `rest`
//! - Constants: `PI`, `E`
//! - Comments run from `;` to the end of the line
//!
//! ## Error Handling
//!
//! Every failure surfaces as a distinguishable error, never a fallback
//! value. The reader raises [`ParserError`], the evaluator
//! [`EvaluatorError`]; a host catches them per top-level form and
//! continues:
//!
//! ```rust
//! use lisplet::{parse, Environment, Evaluator, EvaluatorError};
//!
//! let env = Environment::global();
//! let err = Evaluator::new()
//!     .eval(&parse("(+ 1 unknown)").unwrap(), &env)
//!     .unwrap_err();
//! assert_eq!(
//!     err,
//!     EvaluatorError::UnboundSymbol { name: "unknown".to_string() }
//! );
//! ```

/// Version of the Lisplet interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use error::{Error, EvaluatorError, ParserError, Result};
pub use lexer::{tokenize, Token, TokenStream};
pub use parser::{parse, parse_atom, SExprParser};
pub use runtime::{
    Builtin, Closure, EnvRef, Environment, Evaluator, Expression, NativeFn, Number,
    DEFAULT_MAX_DEPTH,
};
