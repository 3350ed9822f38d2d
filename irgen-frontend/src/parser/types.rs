//! Type expression parsing
//!
//! Interface bodies, parameter lists and the type expressions that can
//! appear in them.

use crate::ast::{ChanDir, InterfaceElement, MethodSignature, ParamGroup, StructField, TypeExpr};
use crate::lexer::TokenType;
use crate::parser::errors::ParseError;
use crate::parser::Parser;
use irgen_common::{SourceLocation, SourceSpan};

impl Parser {
    /// Parse `interface { ... }`
    pub(crate) fn parse_interface_type(&mut self) -> Result<Vec<InterfaceElement>, ParseError> {
        self.expect(TokenType::Interface, "interface type")?;
        self.expect(TokenType::LeftBrace, "interface type")?;

        let mut elements = Vec::new();
        loop {
            self.skip_semicolons();
            if self.check(&TokenType::RightBrace) || self.at_end() {
                break;
            }
            elements.push(self.parse_interface_element()?);
            self.expect_terminator("interface element")?;
        }

        self.expect(TokenType::RightBrace, "interface type")?;
        Ok(elements)
    }

    fn parse_interface_element(&mut self) -> Result<InterfaceElement, ParseError> {
        let is_method = matches!(self.peek_nth(0), Some(TokenType::Identifier(_)))
            && matches!(self.peek_nth(1), Some(TokenType::LeftParen));
        if is_method {
            return Ok(InterfaceElement::Method(self.parse_method_spec()?));
        }

        let mut terms = vec![self.parse_type_term()?];
        while self.match_token(&TokenType::Pipe) {
            terms.push(self.parse_type_term()?);
        }
        let element = if terms.len() == 1 {
            terms.remove(0)
        } else {
            TypeExpr::Union(terms)
        };
        Ok(InterfaceElement::Embedded(element))
    }

    fn parse_type_term(&mut self) -> Result<TypeExpr, ParseError> {
        if self.match_token(&TokenType::Tilde) {
            Ok(TypeExpr::Approx(Box::new(self.parse_type()?)))
        } else {
            self.parse_type()
        }
    }

    fn parse_method_spec(&mut self) -> Result<MethodSignature, ParseError> {
        let (name, start) = self.expect_identifier("method")?;
        let params = self.parse_parameters()?;
        let results = self.parse_results()?;

        Ok(MethodSignature {
            name,
            params,
            results,
            span: SourceSpan::new(start, self.last_location.clone()),
        })
    }

    /// Parse `(...)` applying Go's grouping rules: either every parameter is
    /// unnamed, or names are grouped with the type that follows them.
    pub(crate) fn parse_parameters(&mut self) -> Result<Vec<ParamGroup>, ParseError> {
        self.expect(TokenType::LeftParen, "parameter list")?;

        // (location, first part, type when the first part was a name)
        let mut entries: Vec<(SourceLocation, TypeExpr, Option<TypeExpr>)> = Vec::new();
        while !self.check(&TokenType::RightParen) && !self.at_end() {
            let location = self.current_location();
            let first = self.parse_parameter_type()?;
            let second = if self.check(&TokenType::Comma) || self.check(&TokenType::RightParen) {
                None
            } else {
                Some(self.parse_parameter_type()?)
            };
            entries.push((location, first, second));

            if !self.match_token(&TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::RightParen, "parameter list")?;

        if entries.iter().all(|(_, _, ty)| ty.is_none()) {
            return Ok(entries
                .into_iter()
                .map(|(_, ty, _)| ParamGroup::unnamed(ty))
                .collect());
        }

        let mut groups = Vec::new();
        let mut pending: Vec<(SourceLocation, String)> = Vec::new();
        for (location, first, ty) in entries {
            let Some(name) = first.as_ident() else {
                return Err(ParseError::MixedParameters { location });
            };
            pending.push((location, name.to_string()));

            if let Some(ty) = ty {
                let names = pending.drain(..).map(|(_, name)| name).collect();
                groups.push(ParamGroup { names, ty });
            }
        }
        if let Some((location, _)) = pending.into_iter().next() {
            return Err(ParseError::MixedParameters { location });
        }

        Ok(groups)
    }

    /// Results: nothing, a single type, or a parenthesized list
    pub(crate) fn parse_results(&mut self) -> Result<Vec<ParamGroup>, ParseError> {
        if self.check(&TokenType::LeftParen) {
            self.parse_parameters()
        } else if self.at_type_start() {
            Ok(vec![ParamGroup::unnamed(self.parse_type()?)])
        } else {
            Ok(Vec::new())
        }
    }

    fn parse_parameter_type(&mut self) -> Result<TypeExpr, ParseError> {
        if self.match_token(&TokenType::Ellipsis) {
            Ok(TypeExpr::Variadic(Box::new(self.parse_type()?)))
        } else {
            self.parse_type()
        }
    }

    fn at_type_start(&self) -> bool {
        self.peek_type().is_some_and(starts_type)
    }

    /// Parse a type expression
    pub(crate) fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let location = self.current_location();
        match self.peek_type() {
            Some(TokenType::Identifier(_)) => self.parse_named_type(),
            Some(TokenType::Star) => {
                self.advance();
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            Some(TokenType::LeftBracket) => {
                self.advance();
                if self.match_token(&TokenType::RightBracket) {
                    return Ok(TypeExpr::Slice(Box::new(self.parse_type()?)));
                }
                let len = self.collect_array_length()?;
                Ok(TypeExpr::Array {
                    len,
                    elem: Box::new(self.parse_type()?),
                })
            }
            Some(TokenType::Map) => {
                self.advance();
                self.expect(TokenType::LeftBracket, "map type")?;
                let key = self.parse_type()?;
                self.expect(TokenType::RightBracket, "map type")?;
                let value = self.parse_type()?;
                Ok(TypeExpr::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            Some(TokenType::Chan) => {
                self.advance();
                let dir = if self.match_token(&TokenType::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Ok(TypeExpr::Chan {
                    dir,
                    elem: Box::new(self.parse_type()?),
                })
            }
            Some(TokenType::Arrow) => {
                self.advance();
                self.expect(TokenType::Chan, "receive-only channel type")?;
                Ok(TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(self.parse_type()?),
                })
            }
            Some(TokenType::Func) => {
                self.advance();
                let params = self.parse_parameters()?;
                let results = self.parse_results()?;
                Ok(TypeExpr::Func { params, results })
            }
            Some(TokenType::Interface) => Ok(TypeExpr::Interface(self.parse_interface_type()?)),
            Some(TokenType::Struct) => Ok(TypeExpr::Struct(self.parse_struct_type()?)),
            Some(TokenType::LeftParen) => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect(TokenType::RightParen, "parenthesized type")?;
                Ok(inner)
            }
            Some(TokenType::EndOfFile) | None => Err(self.unexpected("type")),
            Some(other) => Err(ParseError::InvalidType {
                message: format!("expected type, found {}", other),
                location,
            }),
        }
    }

    /// `T`, `pkg.T`, `T[A, B]`
    fn parse_named_type(&mut self) -> Result<TypeExpr, ParseError> {
        let (first, _) = self.expect_identifier("type name")?;

        let (package, name) = if matches!(self.peek_nth(0), Some(TokenType::Dot))
            && matches!(self.peek_nth(1), Some(TokenType::Identifier(_)))
        {
            self.advance();
            let (name, _) = self.expect_identifier("qualified type name")?;
            (Some(first), name)
        } else {
            (None, first)
        };

        let mut args = Vec::new();
        if self.at_type_arguments() {
            self.advance();
            loop {
                args.push(self.parse_type()?);
                if !self.match_token(&TokenType::Comma) || self.check(&TokenType::RightBracket) {
                    break;
                }
            }
            self.expect(TokenType::RightBracket, "type arguments")?;
        }

        Ok(TypeExpr::Named {
            package,
            name,
            args,
        })
    }

    /// Whether the `[` after a type name opens type arguments. In
    /// `Items []T` or `Grid [N]T` the bracket starts the next type instead,
    /// which shows as a type right after the matching `]`.
    fn at_type_arguments(&self) -> bool {
        if !matches!(self.peek_nth(0), Some(TokenType::LeftBracket)) {
            return false;
        }
        if matches!(self.peek_nth(1), Some(TokenType::RightBracket)) {
            return false;
        }

        let mut depth = 0usize;
        for (offset, token) in self.tokens.iter().enumerate() {
            match token.token_type {
                TokenType::LeftBracket => depth += 1,
                TokenType::RightBracket => {
                    depth -= 1;
                    if depth == 0 {
                        return !self.peek_nth(offset + 1).is_some_and(starts_type);
                    }
                }
                TokenType::EndOfFile => break,
                _ => {}
            }
        }
        false
    }

    /// Source text between `[` and `]` of an array type; consumes the `]`
    fn collect_array_length(&mut self) -> Result<String, ParseError> {
        let mut parts: Vec<TokenType> = Vec::new();
        let mut depth = 0usize;
        loop {
            match self.peek_type() {
                Some(TokenType::RightBracket) if depth == 0 => {
                    self.advance();
                    break;
                }
                None | Some(TokenType::EndOfFile) => return Err(self.unexpected("] in array type")),
                _ => {}
            }
            if let Some(token) = self.advance() {
                match token.token_type {
                    TokenType::LeftBracket | TokenType::LeftParen => depth += 1,
                    TokenType::RightBracket | TokenType::RightParen => depth = depth.saturating_sub(1),
                    _ => {}
                }
                parts.push(token.token_type);
            }
        }
        Ok(format_expression(&parts))
    }

    /// Parse `struct { ... }`
    fn parse_struct_type(&mut self) -> Result<Vec<StructField>, ParseError> {
        self.expect(TokenType::Struct, "struct type")?;
        self.expect(TokenType::LeftBrace, "struct type")?;

        let mut fields = Vec::new();
        loop {
            self.skip_semicolons();
            if self.check(&TokenType::RightBrace) || self.at_end() {
                break;
            }
            fields.push(self.parse_struct_field()?);
            self.expect_terminator("struct field")?;
        }

        self.expect(TokenType::RightBrace, "struct type")?;
        Ok(fields)
    }

    fn parse_struct_field(&mut self) -> Result<StructField, ParseError> {
        let embedded = match self.peek_nth(0) {
            Some(TokenType::Star) => true,
            Some(TokenType::Identifier(_)) => matches!(
                self.peek_nth(1),
                Some(TokenType::Semicolon { .. })
                    | Some(TokenType::RightBrace)
                    | Some(TokenType::Dot)
                    | Some(TokenType::StringLiteral(_))
                    | Some(TokenType::RawStringLiteral(_))
            ),
            _ => false,
        };

        let mut names = Vec::new();
        if !embedded {
            names.push(self.expect_identifier("struct field")?.0);
            while self.match_token(&TokenType::Comma) {
                names.push(self.expect_identifier("struct field")?.0);
            }
        }
        let ty = self.parse_type()?;

        let tag = match self.peek_type() {
            Some(tag @ TokenType::StringLiteral(_)) | Some(tag @ TokenType::RawStringLiteral(_)) => {
                let tag = tag.to_string();
                self.advance();
                Some(tag)
            }
            _ => None,
        };

        Ok(StructField { names, ty, tag })
    }
}

fn starts_type(token_type: &TokenType) -> bool {
    matches!(
        token_type,
        TokenType::Identifier(_)
            | TokenType::Star
            | TokenType::LeftBracket
            | TokenType::LeftParen
            | TokenType::Map
            | TokenType::Chan
            | TokenType::Arrow
            | TokenType::Func
            | TokenType::Interface
            | TokenType::Struct
    )
}

/// Render expression tokens with gofmt's spacing. Within each parenthesized
/// group, binary operators of the loosest precedence present get spaces and
/// tighter ones stay attached, so `2*N + 1` and `N + 1` print as gofmt does.
fn format_expression(tokens: &[TokenType]) -> String {
    // Group of each token; `(` and `[` open a new group for their contents
    let mut groups = Vec::with_capacity(tokens.len());
    let mut binary = Vec::with_capacity(tokens.len());
    let mut open = vec![0usize];
    let mut group_count = 1;
    let mut after_operand = false;
    for token in tokens {
        let current = open.last().copied().unwrap_or(0);
        match token {
            TokenType::LeftParen | TokenType::LeftBracket => {
                groups.push(current);
                open.push(group_count);
                group_count += 1;
            }
            TokenType::RightParen | TokenType::RightBracket => {
                if open.len() > 1 {
                    open.pop();
                }
                groups.push(open.last().copied().unwrap_or(0));
            }
            _ => groups.push(current),
        }
        binary.push(if after_operand { token.binary_precedence() } else { None });
        after_operand = token.ends_operand();
    }

    let mut loosest = vec![u8::MAX; group_count];
    for (group, precedence) in groups.iter().zip(&binary) {
        if let Some(precedence) = precedence {
            loosest[*group] = loosest[*group].min(*precedence);
        }
    }

    let mut out = String::new();
    for ((token, group), precedence) in tokens.iter().zip(&groups).zip(&binary) {
        match (token, precedence) {
            (_, Some(precedence)) if *precedence == loosest[*group] => out.push_str(&format!(" {token} ")),
            (TokenType::Comma, _) => out.push_str(", "),
            _ => out.push_str(&token.to_string()),
        }
    }
    out
}
