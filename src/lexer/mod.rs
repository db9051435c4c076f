//! Lexical analysis for Lisplet
//!
//! Converts source text into a stream of tokens, read incrementally from any
//! buffered input.

mod scanner;
mod token;

pub use scanner::{tokenize, TokenStream};
pub use token::Token;
