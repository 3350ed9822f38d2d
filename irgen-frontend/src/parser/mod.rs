//! Go Declaration Parser
//!
//! Recursive descent over the token stream of one file. Package clause,
//! imports and type declarations are parsed; `func`, `var` and `const`
//! declarations, and type declarations that are not interfaces, are skipped
//! by bracket matching.

pub mod errors;
pub mod declarations;
pub mod types;

use crate::ast::SourceFile;
use crate::lexer::{Token, TokenType};
use irgen_common::{GenError, SourceLocation};
use std::collections::VecDeque;

pub use errors::ParseError;

/// Go declaration parser
pub struct Parser {
    pub(crate) tokens: VecDeque<Token>,
    pub(crate) path: String,
    /// End of the most recently consumed token
    pub(crate) last_location: SourceLocation,
}

impl Parser {
    /// Create a new parser over the tokens of the file at `path`
    pub fn new(tokens: Vec<Token>, path: &str) -> Self {
        Self {
            tokens: tokens.into(),
            path: path.to_string(),
            last_location: SourceLocation::new(path, 1, 1),
        }
    }

    /// Peek at current token without consuming
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    pub(crate) fn peek_type(&self) -> Option<&TokenType> {
        self.peek().map(|t| &t.token_type)
    }

    /// Peek `offset` tokens ahead
    pub(crate) fn peek_nth(&self, offset: usize) -> Option<&TokenType> {
        self.tokens.get(offset).map(|t| &t.token_type)
    }

    /// Get current token and advance; `EndOfFile` is never consumed
    pub(crate) fn advance(&mut self) -> Option<Token> {
        if matches!(self.peek_type(), None | Some(TokenType::EndOfFile)) {
            return None;
        }
        let token = self.tokens.pop_front()?;
        self.last_location = token.span.end.clone();
        Some(token)
    }

    /// Check if current token matches expected type
    pub(crate) fn check(&self, token_type: &TokenType) -> bool {
        match self.peek_type() {
            Some(current) => std::mem::discriminant(current) == std::mem::discriminant(token_type),
            None => matches!(token_type, TokenType::EndOfFile),
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.check(&TokenType::EndOfFile)
    }

    /// Consume token if it matches expected type
    pub(crate) fn match_token(&mut self, token_type: &TokenType) -> bool {
        if self.check(token_type) && !self.at_end() {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect and consume a specific token type
    pub(crate) fn expect(&mut self, token_type: TokenType, context: &str) -> Result<Token, ParseError> {
        if self.check(&token_type) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(self.unexpected(&format!("{} in {}", token_type, context)))
    }

    /// Expect an identifier, returning its name and start location
    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<(String, SourceLocation), ParseError> {
        match self.peek_type() {
            Some(TokenType::Identifier(_)) => match self.advance() {
                Some(Token {
                    token_type: TokenType::Identifier(name),
                    span,
                }) => Ok((name, span.start)),
                _ => Err(self.unexpected(&format!("identifier in {}", context))),
            },
            _ => Err(self.unexpected(&format!("identifier in {}", context))),
        }
    }

    /// Build the error for the current token not being `expected`
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) if !matches!(token.token_type, TokenType::EndOfFile) => {
                ParseError::UnexpectedToken {
                    expected: expected.to_string(),
                    found: token.clone(),
                }
            }
            _ => ParseError::UnexpectedEndOfFile {
                expected: expected.to_string(),
                location: self.current_location(),
            },
        }
    }

    /// Get current location for error reporting
    pub(crate) fn current_location(&self) -> SourceLocation {
        match self.peek() {
            Some(token) => token.span.start.clone(),
            None => self.last_location.clone(),
        }
    }

    pub(crate) fn skip_semicolons(&mut self) {
        while self.peek_type().is_some_and(TokenType::is_semicolon) {
            self.advance();
        }
    }

    /// Consume the `;` ending a declaration or element. It may be left out
    /// before a closing `)` or `}` and at the end of the file.
    pub(crate) fn expect_terminator(&mut self, context: &str) -> Result<(), ParseError> {
        match self.peek_type() {
            Some(TokenType::Semicolon { .. }) => {
                self.advance();
                Ok(())
            }
            Some(TokenType::RightParen) | Some(TokenType::RightBrace) | Some(TokenType::EndOfFile) | None => Ok(()),
            Some(_) => Err(self.unexpected(&format!("; or newline after {}", context))),
        }
    }

    /// Parse a complete file
    pub fn parse_file(&mut self) -> Result<SourceFile, GenError> {
        Ok(self.parse_source_file()?)
    }
}
