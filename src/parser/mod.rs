//! Structural parsing of token streams into expression trees
//!
//! The reader pairs the lexer's [`TokenStream`](crate::lexer::TokenStream)
//! with a recursive-descent parser and the atom classifier.

mod sexpr_parser;

pub use sexpr_parser::{parse, parse_atom, SExprParser};
