//! Error types for the Lisplet interpreter

use thiserror::Error;

/// Errors raised by the reader while turning source text into expressions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// Input ended while a list or quote form was still open
    ///
    /// **Triggered by:** `(+ 1 2` (missing closing parenthesis)
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// A closing parenthesis appeared with no matching open list
    ///
    /// **Triggered by:** `)` or `(+ 1 2))` at the top level
    #[error("Unexpected ')' at line {line}")]
    UnexpectedCloseParen {
        /// Line number where the parenthesis appeared (1-indexed)
        line: usize,
    },

    /// A string literal was not closed before the end of the line
    #[error("Unterminated string literal at line {line}")]
    UnterminatedString {
        /// Line number where the literal started (1-indexed)
        line: usize,
    },

    /// The underlying input source failed while the reader pulled more text
    #[error("Read error: {0}")]
    Io(String),
}

/// Errors raised while evaluating an expression tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluatorError {
    /// Symbol lookup failed in the current scope and every ancestor
    ///
    /// **Triggered by:** using a symbol before `def` binds it
    /// **Prevention:** bind names with `(def name value)` before use
    #[error("Unbound symbol: {name}")]
    UnboundSymbol {
        /// Symbol name that failed to resolve
        name: String,
    },

    /// Wrong number of arguments to a special form or procedure
    #[error("Arity mismatch in {form}: expected {expected} arguments, got {got}")]
    Arity {
        /// Special form or procedure name
        form: String,
        /// Expected argument count, as prose ("3", "at least 1")
        expected: String,
        /// Actual argument count
        got: usize,
    },

    /// An operand had the wrong expression variant
    ///
    /// **Triggered by:** `(first 42)` (number where a list is required)
    #[error("Type error in {operation}: expected {expected}, got {got}")]
    Type {
        /// Operation that rejected the operand
        operation: String,
        /// Expected variant name
        expected: String,
        /// Actual variant name
        got: String,
    },

    /// An operation that needs elements was given an empty list
    #[error("Empty list passed to {operation}")]
    EmptyList {
        /// Operation that required a non-empty list
        operation: String,
    },

    /// An empty list appeared in call position
    #[error("Cannot evaluate an empty list")]
    EmptyCall,

    /// The operator of a call form evaluated to something not callable
    #[error("Value is not callable: {type_name}")]
    NotCallable {
        /// Variant name of the non-callable value
        type_name: String,
    },

    /// Expression nesting exceeded the evaluator's stack guard
    #[error("Recursion limit exceeded ({limit} frames)")]
    RecursionLimit {
        /// Configured frame limit
        limit: usize,
    },
}

/// Umbrella error for embedders driving the full read-eval pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Syntax error from the reader
    #[error(transparent)]
    Parse(#[from] ParserError),

    /// Semantic or runtime error from the evaluator
    #[error(transparent)]
    Eval(#[from] EvaluatorError),
}

/// Result type for Lisplet operations
pub type Result<T> = std::result::Result<T, Error>;
