//! Parse error types and error reporting

use crate::token::{Span, Token};
use std::fmt;

/// A parse error with location and contextual information.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The kind of error that occurred
    pub kind: ParseErrorKind,

    /// Source location of the error
    pub span: Span,

    /// Human-readable error message
    pub message: String,

    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Unexpected token found
    UnexpectedToken {
        /// Tokens that would have been accepted here
        expected: Vec<Token>,
        /// The token actually found
        found: Token,
    },

    /// Unexpected end of file
    UnexpectedEof {
        /// Tokens that would have been accepted here
        expected: Vec<Token>,
    },

    /// Two declarations share one name
    DuplicateDeclaration {
        /// The repeated name
        name: String,
    },

    /// Missing semicolon
    MissingSemicolon,

    /// Missing closing delimiter
    UnclosedDelimiter {
        /// The opening token
        open: Token,
        /// The closer that never arrived
        expected_close: Token,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at {}:{}: {}",
            self.span.line, self.span.column, self.message
        )?;

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// Create an "unexpected token" error.
    pub fn unexpected_token(expected: Vec<Token>, found: Token, span: Span) -> Self {
        let message = if expected.len() == 1 {
            format!("Expected {:?}, found {:?}", expected[0], found)
        } else {
            format!("Expected one of {:?}, found {:?}", expected, found)
        };

        Self {
            kind: ParseErrorKind::UnexpectedToken { expected, found },
            span,
            message,
            suggestion: None,
        }
    }

    /// Create an "unexpected EOF" error.
    pub fn unexpected_eof(expected: Vec<Token>, span: Span) -> Self {
        let message = if expected.len() == 1 {
            format!("Unexpected end of file, expected {:?}", expected[0])
        } else {
            format!("Unexpected end of file, expected one of {:?}", expected)
        };

        Self {
            kind: ParseErrorKind::UnexpectedEof { expected },
            span,
            message,
            suggestion: None,
        }
    }

    /// Create a "duplicate declaration" error.
    pub fn duplicate_declaration(name: impl Into<String>, span: Span) -> Self {
        let name = name.into();
        Self {
            kind: ParseErrorKind::DuplicateDeclaration { name: name.clone() },
            span,
            message: format!("Duplicate declaration of '{}'", name),
            suggestion: Some("Rename one of the declarations".to_string()),
        }
    }

    /// Create a "missing semicolon" error.
    pub fn missing_semicolon(span: Span) -> Self {
        Self {
            kind: ParseErrorKind::MissingSemicolon,
            span,
            message: "Missing semicolon after declaration".to_string(),
            suggestion: Some("Add ';' here".to_string()),
        }
    }

    /// Create an "unclosed delimiter" error.
    pub fn unclosed_delimiter(open: Token, expected_close: Token, span: Span) -> Self {
        let message = format!("Unclosed {:?}, expected {:?}", open, expected_close);
        Self {
            kind: ParseErrorKind::UnclosedDelimiter {
                open,
                expected_close,
            },
            span,
            message,
            suggestion: None,
        }
    }

    /// Add a suggestion to this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}
