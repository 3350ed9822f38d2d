//! irgen - Frontend
//!
//! This crate reads the Go declarations irgen works from:
//! - Lexer: tokenizes Go source, inserting automatic semicolons
//! - Parser: package clause, imports and type declarations
//! - AST: declaration and type expression definitions
//! - Loader: collects the files of one package from a directory

pub mod ast;
pub mod lexer;
pub mod loader;
pub mod parser;

pub use ast::{
    field_count, write_signature, ImportSpec, InterfaceElement, MethodSignature, ParamGroup,
    SourceFile, SourceUnit, TypeDeclaration, TypeExpr, TypeKind,
};
pub use lexer::{Lexer, Token, TokenType};
pub use loader::load_package;
pub use parser::{ParseError, Parser};

use irgen_common::GenError;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Parse one Go source file
    pub fn parse_source(source: &str, filename: &str) -> Result<SourceFile, GenError> {
        let mut lexer = Lexer::new(source, filename);
        let tokens = lexer.tokenize()?;

        let mut parser = Parser::new(tokens, filename);
        parser.parse_file()
    }

    /// Tokenize source code (for debugging)
    pub fn tokenize_source(source: &str, filename: &str) -> Result<Vec<Token>, GenError> {
        let mut lexer = Lexer::new(source, filename);
        lexer.tokenize()
    }
}
