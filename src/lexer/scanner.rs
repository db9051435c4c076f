use std::io::BufRead;

use super::token::Token;
use crate::error::ParserError;

/// Splits source text into token strings
///
/// Surrounds every `(` and `)` with spaces, then splits on whitespace,
/// dropping empty tokens. This is the quick whole-string tokenization;
/// [`TokenStream`] is the full streaming variant that also understands
/// quote shorthand, comments, and incremental input.
pub fn tokenize(text: &str) -> Vec<String> {
    text.replace('(', " ( ")
        .replace(')', " ) ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Pull-based token source over a buffered input
///
/// Keeps a cursor over the current partial line and refills it from the
/// underlying reader on demand, so expressions may span lines. Recognizes
/// `(` and `)`, string literals, the quote-family shorthand characters
/// (`'`, `` ` ``, `,`, `,@`) as standalone tokens, and discards `;` line
/// comments.
pub struct TokenStream<R> {
    /// Underlying input, read one line at a time
    input: R,
    /// Characters of the current partial line
    line: Vec<char>,
    /// Cursor into the current line
    pos: usize,
    /// Line number of the current line (1-indexed)
    line_no: usize,
}

impl<R: BufRead> TokenStream<R> {
    /// Creates a token stream over a buffered input source
    pub fn new(input: R) -> Self {
        TokenStream {
            input,
            line: Vec::new(),
            pos: 0,
            line_no: 0,
        }
    }

    /// Returns the next token, or `None` when the input is exhausted
    pub fn next_token(&mut self) -> Result<Option<Token>, ParserError> {
        loop {
            while self.pos < self.line.len() && self.line[self.pos].is_whitespace() {
                self.pos += 1;
            }
            if self.pos >= self.line.len() {
                if !self.refill()? {
                    return Ok(None);
                }
                continue;
            }
            if self.line[self.pos] == ';' {
                // Line comment: discard the rest of the line
                self.pos = self.line.len();
                continue;
            }
            break;
        }

        let column = self.pos + 1;
        let c = self.line[self.pos];
        let text = match c {
            '(' | ')' | '\'' | '`' => {
                self.pos += 1;
                c.to_string()
            }
            ',' => {
                self.pos += 1;
                if self.peek() == Some('@') {
                    self.pos += 1;
                    ",@".to_string()
                } else {
                    ",".to_string()
                }
            }
            '"' => self.read_string()?,
            _ => self.read_atom_text(),
        };

        Ok(Some(Token::new(text, self.line_no, column)))
    }

    /// Pulls the next line into the buffer; false once the input is exhausted
    fn refill(&mut self) -> Result<bool, ParserError> {
        let mut buf = String::new();
        let read = self
            .input
            .read_line(&mut buf)
            .map_err(|err| ParserError::Io(err.to_string()))?;
        if read == 0 {
            return Ok(false);
        }
        self.line = buf.chars().collect();
        self.pos = 0;
        self.line_no += 1;
        Ok(true)
    }

    fn peek(&self) -> Option<char> {
        self.line.get(self.pos).copied()
    }

    /// Reads a string literal, surrounding quotes included in the token text
    fn read_string(&mut self) -> Result<String, ParserError> {
        let start = self.pos;
        self.pos += 1; // opening quote
        while self.pos < self.line.len() && self.line[self.pos] != '"' {
            self.pos += 1;
        }
        if self.pos >= self.line.len() {
            return Err(ParserError::UnterminatedString { line: self.line_no });
        }
        self.pos += 1; // closing quote
        Ok(self.line[start..self.pos].iter().collect())
    }

    fn read_atom_text(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.line.len() {
            let c = self.line[self.pos];
            if c.is_whitespace() || matches!(c, '(' | ')' | '\'' | '`' | ',' | ';' | '"') {
                break;
            }
            self.pos += 1;
        }
        self.line[start..self.pos].iter().collect()
    }
}
