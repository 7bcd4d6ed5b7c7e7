//! Tokenizer and parser errors.

use thiserror::Error;

/// A tokenizer failure (unterminated literal, illegal character, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LexError {
    /// Byte offset where the offending input starts.
    pub offset: usize,
    /// Human-readable description.
    pub message: String,
}

impl LexError {
    /// Creates a new tokenizer error.
    #[must_use]
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// A statement that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// Byte offset of the token the parser stopped at.
    pub offset: usize,
    /// Human-readable description.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }

    /// Creates an "expected X but got Y" error.
    #[must_use]
    pub fn unexpected(offset: usize, expected: &str, found: &str) -> Self {
        Self::new(
            offset,
            format!("Syntax error: Expected {expected} but got {found}"),
        )
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        Self {
            offset: err.offset,
            message: err.message,
        }
    }
}
