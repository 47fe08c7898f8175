//! Parse errors for instruction lines and define headers

use thiserror::Error;

/// Failure to read one line of IR
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of line, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("expected {expected}, found '{found}'")]
    Unexpected { expected: &'static str, found: String },

    #[error("unbalanced '{open}' in '{line}'")]
    Unbalanced { open: String, line: String },

    #[error("unterminated string literal in '{line}'")]
    UnterminatedString { line: String },

    #[error("{context} left unconsumed tokens: '{remaining}'")]
    TrailingTokens {
        context: &'static str,
        remaining: String,
    },

    #[error("unknown instruction '{0}'")]
    UnknownInstruction(String),
}

impl ParseError {
    pub fn unexpected(expected: &'static str, found: &str) -> Self {
        ParseError::Unexpected {
            expected,
            found: found.to_string(),
        }
    }
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// A recovered, line-level problem reported after a run
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostic {
    /// Function whose body contained the line (None for module-level lines)
    pub function: Option<String>,
    /// 1-based line number in the input module
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(function: Option<&str>, line: usize, error: &ParseError) -> Self {
        Self {
            function: function.map(str::to_string),
            line,
            message: error.to_string(),
        }
    }
}
