//! Top-level declaration parsing
//!
//! Handles the package clause, imports and type declarations, and skips
//! everything else.

use crate::ast::{ImportSpec, SourceFile, TypeDeclaration, TypeKind};
use crate::lexer::TokenType;
use crate::parser::errors::ParseError;
use crate::parser::Parser;
use irgen_common::SourceSpan;
use log::trace;

impl Parser {
    pub(crate) fn parse_source_file(&mut self) -> Result<SourceFile, ParseError> {
        self.skip_semicolons();
        self.expect(TokenType::Package, "package clause")?;
        let (package, _) = self.expect_identifier("package clause")?;
        self.expect_terminator("package clause")?;

        let mut imports = Vec::new();
        let mut declarations = Vec::new();

        loop {
            self.skip_semicolons();
            match self.peek_type() {
                None | Some(TokenType::EndOfFile) => break,
                Some(TokenType::Import) => {
                    self.advance();
                    self.parse_group(|parser| {
                        imports.push(parser.parse_import_spec()?);
                        Ok(())
                    })?;
                }
                Some(TokenType::Type) => {
                    self.advance();
                    self.parse_group(|parser| {
                        declarations.push(parser.parse_type_spec()?);
                        Ok(())
                    })?;
                }
                Some(TokenType::Func) | Some(TokenType::Var) | Some(TokenType::Const) => {
                    let keyword = self.advance();
                    trace!("skipping {:?} declaration", keyword.map(|t| t.token_type));
                    self.skip_to_spec_end();
                    self.expect_terminator("declaration")?;
                }
                Some(_) => return Err(self.unexpected("declaration")),
            }
        }

        Ok(SourceFile {
            path: self.path.clone(),
            package,
            imports,
            declarations,
        })
    }

    /// Parse either one spec or a parenthesized group of specs
    fn parse_group<F>(&mut self, mut parse_spec: F) -> Result<(), ParseError>
    where
        F: FnMut(&mut Parser) -> Result<(), ParseError>,
    {
        if !self.match_token(&TokenType::LeftParen) {
            parse_spec(self)?;
            return self.expect_terminator("declaration");
        }

        loop {
            self.skip_semicolons();
            if self.check(&TokenType::RightParen) || self.at_end() {
                break;
            }
            parse_spec(self)?;
            self.expect_terminator("declaration")?;
        }
        self.expect(TokenType::RightParen, "declaration group")?;
        self.expect_terminator("declaration group")
    }

    fn parse_import_spec(&mut self) -> Result<ImportSpec, ParseError> {
        let start = self.current_location();

        let name = match self.peek_type() {
            Some(TokenType::Identifier(_)) => Some(self.expect_identifier("import")?.0),
            Some(TokenType::Dot) => {
                self.advance();
                Some(".".to_string())
            }
            _ => None,
        };

        let path = match self.peek_type() {
            Some(TokenType::StringLiteral(path)) | Some(TokenType::RawStringLiteral(path)) => {
                let path = path.clone();
                self.advance();
                path
            }
            _ => return Err(self.unexpected("import path")),
        };

        Ok(ImportSpec {
            name,
            path,
            span: SourceSpan::new(start, self.last_location.clone()),
        })
    }

    fn parse_type_spec(&mut self) -> Result<TypeDeclaration, ParseError> {
        let (name, start) = self.expect_identifier("type declaration")?;

        if self.match_token(&TokenType::Equal) {
            self.skip_to_spec_end();
            return Ok(TypeDeclaration {
                name,
                kind: TypeKind::Other("alias".to_string()),
                span: SourceSpan::new(start, self.last_location.clone()),
            });
        }

        if self.at_type_parameters() {
            trace!("skipping type parameters of {name}");
            self.skip_balanced();
        }

        let kind = match self.peek_type() {
            Some(TokenType::Interface) => TypeKind::Interface(self.parse_interface_type()?),
            Some(other) => {
                let description = describe_type_start(other);
                self.skip_to_spec_end();
                TypeKind::Other(description)
            }
            None => return Err(self.unexpected("type")),
        };

        Ok(TypeDeclaration {
            name,
            kind,
            span: SourceSpan::new(start, self.last_location.clone()),
        })
    }

    /// `Name[T any]` as opposed to the array type in `Name [N]T`
    fn at_type_parameters(&self) -> bool {
        matches!(self.peek_nth(0), Some(TokenType::LeftBracket))
            && matches!(self.peek_nth(1), Some(TokenType::Identifier(_)))
            && !matches!(self.peek_nth(2), Some(TokenType::RightBracket))
    }

    /// Skip one bracketed group starting at the current opening bracket
    pub(crate) fn skip_balanced(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.advance() {
            match token.token_type {
                TokenType::LeftParen | TokenType::LeftBracket | TokenType::LeftBrace => depth += 1,
                TokenType::RightParen | TokenType::RightBracket | TokenType::RightBrace => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            if depth == 0 {
                break;
            }
        }
    }

    /// Skip tokens up to the `;` (or group-closing `)`) that ends the
    /// current spec, leaving that token in place.
    pub(crate) fn skip_to_spec_end(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek_type() {
                None | Some(TokenType::EndOfFile) => break,
                Some(TokenType::Semicolon { .. }) | Some(TokenType::RightParen) if depth == 0 => break,
                Some(TokenType::LeftParen) | Some(TokenType::LeftBracket) | Some(TokenType::LeftBrace) => {
                    depth += 1;
                }
                Some(TokenType::RightParen) | Some(TokenType::RightBracket) | Some(TokenType::RightBrace) => {
                    depth = depth.saturating_sub(1);
                }
                Some(_) => {}
            }
            self.advance();
        }
    }
}

/// Short description of a non-interface type from its first token
fn describe_type_start(token_type: &TokenType) -> String {
    match token_type {
        TokenType::Struct => "struct".to_string(),
        TokenType::Map => "map".to_string(),
        TokenType::Chan | TokenType::Arrow => "chan".to_string(),
        TokenType::Func => "func".to_string(),
        TokenType::Star => "pointer".to_string(),
        TokenType::LeftBracket => "array or slice".to_string(),
        TokenType::Identifier(name) => name.clone(),
        other => other.to_string(),
    }
}
