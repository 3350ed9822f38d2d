//! Token definitions for the Go lexer
//!
//! Only the punctuation the declaration parser looks at gets its own
//! variant; everything else that can appear inside skipped bodies is an
//! `Operator`.

use irgen_common::SourceSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Go token types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenType {
    // Literals (raw source text)
    IntLiteral(String),
    FloatLiteral(String),
    ImaginaryLiteral(String),
    RuneLiteral(String),
    /// Interpreted string, quotes stripped, escapes kept as written
    StringLiteral(String),
    /// Raw string, backquotes stripped
    RawStringLiteral(String),

    Identifier(String),

    // Keywords
    Break, Case, Chan, Const, Continue, Default, Defer, Else,
    Fallthrough, For, Func, Go, Goto, If, Import, Interface,
    Map, Package, Range, Return, Select, Struct, Switch, Type, Var,

    // Punctuation the parser cares about
    LeftParen,      // (
    RightParen,     // )
    LeftBrace,      // {
    RightBrace,     // }
    LeftBracket,    // [
    RightBracket,   // ]
    Comma,          // ,
    Dot,            // .
    Ellipsis,       // ...
    Star,           // *
    Equal,          // =
    Tilde,          // ~
    Pipe,           // |
    Arrow,          // <-
    Increment,      // ++
    Decrement,      // --

    /// Explicit `;` or one inserted at a line break
    Semicolon { inserted: bool },

    /// Any other operator (`+`, `:=`, `&^=`, ...)
    Operator(String),

    EndOfFile,
}

impl TokenType {
    /// Look up the keyword spelled by `ident`
    pub fn keyword(ident: &str) -> Option<TokenType> {
        let keyword = match ident {
            "break" => TokenType::Break,
            "case" => TokenType::Case,
            "chan" => TokenType::Chan,
            "const" => TokenType::Const,
            "continue" => TokenType::Continue,
            "default" => TokenType::Default,
            "defer" => TokenType::Defer,
            "else" => TokenType::Else,
            "fallthrough" => TokenType::Fallthrough,
            "for" => TokenType::For,
            "func" => TokenType::Func,
            "go" => TokenType::Go,
            "goto" => TokenType::Goto,
            "if" => TokenType::If,
            "import" => TokenType::Import,
            "interface" => TokenType::Interface,
            "map" => TokenType::Map,
            "package" => TokenType::Package,
            "range" => TokenType::Range,
            "return" => TokenType::Return,
            "select" => TokenType::Select,
            "struct" => TokenType::Struct,
            "switch" => TokenType::Switch,
            "type" => TokenType::Type,
            "var" => TokenType::Var,
            _ => return None,
        };
        Some(keyword)
    }

    /// Whether a line break after this token ends the statement
    /// (Go's automatic semicolon rule).
    pub fn ends_statement(&self) -> bool {
        matches!(
            self,
            TokenType::Identifier(_)
                | TokenType::IntLiteral(_)
                | TokenType::FloatLiteral(_)
                | TokenType::ImaginaryLiteral(_)
                | TokenType::RuneLiteral(_)
                | TokenType::StringLiteral(_)
                | TokenType::RawStringLiteral(_)
                | TokenType::Break
                | TokenType::Continue
                | TokenType::Fallthrough
                | TokenType::Return
                | TokenType::Increment
                | TokenType::Decrement
                | TokenType::RightParen
                | TokenType::RightBracket
                | TokenType::RightBrace
        )
    }

    /// Precedence of this token as a binary operator, from 1 (`||`) to 5
    pub fn binary_precedence(&self) -> Option<u8> {
        let op = match self {
            TokenType::Star => return Some(5),
            TokenType::Pipe => return Some(4),
            TokenType::Operator(op) => op.as_str(),
            _ => return None,
        };
        match op {
            "/" | "%" | "<<" | ">>" | "&" | "&^" => Some(5),
            "+" | "-" | "^" => Some(4),
            "==" | "!=" | "<" | "<=" | ">" | ">=" => Some(3),
            "&&" => Some(2),
            "||" => Some(1),
            _ => None,
        }
    }

    /// Whether this token can end an operand
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenType::Identifier(_)
                | TokenType::IntLiteral(_)
                | TokenType::FloatLiteral(_)
                | TokenType::ImaginaryLiteral(_)
                | TokenType::RuneLiteral(_)
                | TokenType::StringLiteral(_)
                | TokenType::RawStringLiteral(_)
                | TokenType::RightParen
                | TokenType::RightBracket
        )
    }

    pub fn is_semicolon(&self) -> bool {
        matches!(self, TokenType::Semicolon { .. })
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::IntLiteral(s)
            | TokenType::FloatLiteral(s)
            | TokenType::ImaginaryLiteral(s)
            | TokenType::RuneLiteral(s)
            | TokenType::Identifier(s)
            | TokenType::Operator(s) => write!(f, "{s}"),
            TokenType::StringLiteral(s) => write!(f, "\"{s}\""),
            TokenType::RawStringLiteral(s) => write!(f, "`{s}`"),

            TokenType::Break => write!(f, "break"),
            TokenType::Case => write!(f, "case"),
            TokenType::Chan => write!(f, "chan"),
            TokenType::Const => write!(f, "const"),
            TokenType::Continue => write!(f, "continue"),
            TokenType::Default => write!(f, "default"),
            TokenType::Defer => write!(f, "defer"),
            TokenType::Else => write!(f, "else"),
            TokenType::Fallthrough => write!(f, "fallthrough"),
            TokenType::For => write!(f, "for"),
            TokenType::Func => write!(f, "func"),
            TokenType::Go => write!(f, "go"),
            TokenType::Goto => write!(f, "goto"),
            TokenType::If => write!(f, "if"),
            TokenType::Import => write!(f, "import"),
            TokenType::Interface => write!(f, "interface"),
            TokenType::Map => write!(f, "map"),
            TokenType::Package => write!(f, "package"),
            TokenType::Range => write!(f, "range"),
            TokenType::Return => write!(f, "return"),
            TokenType::Select => write!(f, "select"),
            TokenType::Struct => write!(f, "struct"),
            TokenType::Switch => write!(f, "switch"),
            TokenType::Type => write!(f, "type"),
            TokenType::Var => write!(f, "var"),

            TokenType::LeftParen => write!(f, "("),
            TokenType::RightParen => write!(f, ")"),
            TokenType::LeftBrace => write!(f, "{{"),
            TokenType::RightBrace => write!(f, "}}"),
            TokenType::LeftBracket => write!(f, "["),
            TokenType::RightBracket => write!(f, "]"),
            TokenType::Comma => write!(f, ","),
            TokenType::Dot => write!(f, "."),
            TokenType::Ellipsis => write!(f, "..."),
            TokenType::Star => write!(f, "*"),
            TokenType::Equal => write!(f, "="),
            TokenType::Tilde => write!(f, "~"),
            TokenType::Pipe => write!(f, "|"),
            TokenType::Arrow => write!(f, "<-"),
            TokenType::Increment => write!(f, "++"),
            TokenType::Decrement => write!(f, "--"),
            TokenType::Semicolon { inserted: true } => write!(f, "newline"),
            TokenType::Semicolon { inserted: false } => write!(f, ";"),
            TokenType::EndOfFile => write!(f, "EOF"),
        }
    }
}

/// A token with location information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, span: SourceSpan) -> Self {
        Self { token_type, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.token_type, self.span.start)
    }
}
