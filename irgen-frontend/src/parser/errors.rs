//! Parse error types for the declaration parser

use crate::lexer::Token;
use irgen_common::{GenError, SourceLocation};

/// Parse error types specific to the parser
#[derive(Debug, Clone)]
pub enum ParseError {
    UnexpectedToken {
        expected: String,
        found: Token,
    },
    UnexpectedEndOfFile {
        expected: String,
        location: SourceLocation,
    },
    InvalidType {
        message: String,
        location: SourceLocation,
    },
    /// `func(a, int)`: some parameters named, others not
    MixedParameters {
        location: SourceLocation,
    },
}

impl From<ParseError> for GenError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnexpectedToken { expected, found } => GenError::syntax(
                format!("expected {}, found {}", expected, found.token_type),
                found.span.start,
            ),
            ParseError::UnexpectedEndOfFile { expected, location } => GenError::syntax(
                format!("unexpected end of file, expected {}", expected),
                location,
            ),
            ParseError::InvalidType { message, location } => GenError::syntax(message, location),
            ParseError::MixedParameters { location } => GenError::syntax(
                "mixed named and unnamed parameters".to_string(),
                location,
            ),
        }
    }
}
