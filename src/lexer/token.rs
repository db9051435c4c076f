use serde::{Deserialize, Serialize};

/// A single token from the source text
///
/// Tokens carry their raw text; classification into atoms happens later in
/// [`parse_atom`](crate::parser::parse_atom). Line and column are kept for
/// error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Original text of the token
    pub text: String,
    /// Line number where the token appears (1-indexed)
    pub line: usize,
    /// Column number where the token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(text: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            text: text.into(),
            line,
            column,
        }
    }

    /// True if this token opens or closes a list
    pub fn is_delimiter(&self) -> bool {
        matches!(self.text.as_str(), "(" | ")")
    }

    /// True if this token is reader shorthand for one of the quote forms
    pub fn is_quote_family(&self) -> bool {
        matches!(self.text.as_str(), "'" | "`" | "," | ",@")
    }
}
