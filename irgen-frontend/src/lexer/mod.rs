//! Go Lexer
//!
//! Tokenizes Go source code into a stream of tokens. The whole file is
//! tokenized, function bodies included, so that the parser can skip the
//! declarations it does not care about by bracket matching. Line breaks are
//! turned into semicolons following Go's automatic semicolon rule.

pub mod token;

pub use token::{Token, TokenType};

use irgen_common::{GenError, SourceLocation, SourceSpan};

/// Operators, longest first so that the first prefix match wins
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "...",
    "<<", ">>", "&^", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=",
    "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", ":=",
    "+", "-", "*", "/", "%", "&", "|", "^", "<", ">", "=", "!",
    "(", ")", "[", "]", "{", "}", ",", ";", ".", ":", "~",
];

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Go Lexer
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    filename: String,
    /// Last emitted token, for semicolon insertion
    last: Option<TokenType>,
}

impl Lexer {
    pub fn new(input: &str, filename: &str) -> Self {
        // A leading byte order mark is not part of the source
        let input = input.strip_prefix(BYTE_ORDER_MARK).unwrap_or(input);
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            filename: filename.to_string(),
            last: None,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(&self.filename, self.line, self.column)
    }

    fn starts_with(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, ch)| self.peek_char(i) == Some(ch))
    }

    /// Whether a line break right now should produce a semicolon
    fn wants_semicolon(&self) -> bool {
        self.last.as_ref().is_some_and(TokenType::ends_statement)
    }

    /// Skip spaces and comments. Returns the location of the first line
    /// break crossed that ends a statement, if any.
    fn skip_trivia(&mut self) -> Result<Option<SourceLocation>, GenError> {
        loop {
            match self.current_char() {
                Some(' ') | Some('\t') | Some('\r') => {
                    self.advance();
                }
                Some('\n') => {
                    let location = self.current_location();
                    self.advance();
                    if self.wants_semicolon() {
                        return Ok(Some(location));
                    }
                }
                Some('/') if self.peek_char(1) == Some('/') => {
                    while let Some(ch) = self.current_char() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_char(1) == Some('*') => {
                    let start = self.current_location();
                    self.advance();
                    self.advance();
                    let mut crossed_line = false;
                    loop {
                        match self.current_char() {
                            None => {
                                return Err(GenError::syntax(
                                    "comment not terminated".to_string(),
                                    start,
                                ))
                            }
                            Some('*') if self.peek_char(1) == Some('/') => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            Some(ch) => {
                                crossed_line |= ch == '\n';
                                self.advance();
                            }
                        }
                    }
                    if crossed_line && self.wants_semicolon() {
                        return Ok(Some(start));
                    }
                }
                _ => return Ok(None),
            }
        }
    }

    fn tokenize_identifier(&mut self) -> TokenType {
        let mut identifier = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        TokenType::keyword(&identifier).unwrap_or(TokenType::Identifier(identifier))
    }

    fn tokenize_number(&mut self) -> TokenType {
        let mut text = String::new();
        let hex = self.current_char() == Some('0')
            && matches!(self.peek_char(1), Some('x') | Some('X'));

        while let Some(ch) = self.current_char() {
            let exponent_sign = matches!(ch, '+' | '-')
                && match text.chars().last() {
                    Some('e') | Some('E') => !hex,
                    Some('p') | Some('P') => true,
                    _ => false,
                };
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' || exponent_sign {
                // a second dot starts a new token
                if ch == '.' && text.contains('.') {
                    break;
                }
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if text.ends_with('i') {
            TokenType::ImaginaryLiteral(text)
        } else if text.contains('.')
            || text.contains(|c| matches!(c, 'p' | 'P'))
            || (!hex && text.contains(|c| matches!(c, 'e' | 'E')))
        {
            TokenType::FloatLiteral(text)
        } else {
            TokenType::IntLiteral(text)
        }
    }

    fn tokenize_string(&mut self) -> Result<TokenType, GenError> {
        let start = self.current_location();
        self.advance(); // opening quote
        let mut content = String::new();

        loop {
            match self.current_char() {
                None | Some('\n') => {
                    return Err(GenError::syntax(
                        "string literal not terminated".to_string(),
                        start,
                    ))
                }
                Some('"') => {
                    self.advance();
                    return Ok(TokenType::StringLiteral(content));
                }
                Some('\\') => {
                    content.push('\\');
                    self.advance();
                    if let Some(escaped) = self.advance() {
                        content.push(escaped);
                    }
                }
                Some(ch) => {
                    content.push(ch);
                    self.advance();
                }
            }
        }
    }

    fn tokenize_raw_string(&mut self) -> Result<TokenType, GenError> {
        let start = self.current_location();
        self.advance(); // opening backquote
        let mut content = String::new();

        loop {
            match self.advance() {
                None => {
                    return Err(GenError::syntax(
                        "raw string literal not terminated".to_string(),
                        start,
                    ))
                }
                Some('`') => return Ok(TokenType::RawStringLiteral(content)),
                Some('\r') => {}
                Some(ch) => content.push(ch),
            }
        }
    }

    fn tokenize_rune(&mut self) -> Result<TokenType, GenError> {
        let start = self.current_location();
        let mut text = String::from('\'');
        self.advance();

        loop {
            match self.current_char() {
                None | Some('\n') => {
                    return Err(GenError::syntax(
                        "rune literal not terminated".to_string(),
                        start,
                    ))
                }
                Some('\'') => {
                    text.push('\'');
                    self.advance();
                    return Ok(TokenType::RuneLiteral(text));
                }
                Some('\\') => {
                    text.push('\\');
                    self.advance();
                    if let Some(escaped) = self.advance() {
                        text.push(escaped);
                    }
                }
                Some(ch) => {
                    text.push(ch);
                    self.advance();
                }
            }
        }
    }

    fn tokenize_operator(&mut self) -> Result<TokenType, GenError> {
        let Some(op) = OPERATORS.iter().find(|op| self.starts_with(op)) else {
            let location = self.current_location();
            let ch = self.current_char().unwrap_or_default();
            return Err(GenError::syntax(format!("invalid character {ch:?}"), location));
        };
        for _ in 0..op.chars().count() {
            self.advance();
        }

        let token_type = match *op {
            "(" => TokenType::LeftParen,
            ")" => TokenType::RightParen,
            "{" => TokenType::LeftBrace,
            "}" => TokenType::RightBrace,
            "[" => TokenType::LeftBracket,
            "]" => TokenType::RightBracket,
            "," => TokenType::Comma,
            "." => TokenType::Dot,
            "..." => TokenType::Ellipsis,
            "*" => TokenType::Star,
            "=" => TokenType::Equal,
            "~" => TokenType::Tilde,
            "|" => TokenType::Pipe,
            "<-" => TokenType::Arrow,
            "++" => TokenType::Increment,
            "--" => TokenType::Decrement,
            ";" => TokenType::Semicolon { inserted: false },
            other => TokenType::Operator(other.to_string()),
        };
        Ok(token_type)
    }

    /// Get next token
    pub fn next_token(&mut self) -> Result<Token, GenError> {
        if let Some(location) = self.skip_trivia()? {
            return Ok(self.emit(TokenType::Semicolon { inserted: true }, location.clone(), location));
        }

        let start = self.current_location();
        let token_type = match self.current_char() {
            None => {
                if self.wants_semicolon() {
                    TokenType::Semicolon { inserted: true }
                } else {
                    TokenType::EndOfFile
                }
            }
            Some(ch) if ch.is_alphabetic() || ch == '_' => self.tokenize_identifier(),
            Some(ch) if ch.is_ascii_digit() => self.tokenize_number(),
            Some('.') if self.peek_char(1).is_some_and(|ch| ch.is_ascii_digit()) => {
                self.tokenize_number()
            }
            Some('"') => self.tokenize_string()?,
            Some('`') => self.tokenize_raw_string()?,
            Some('\'') => self.tokenize_rune()?,
            Some(_) => self.tokenize_operator()?,
        };

        let end = self.current_location();
        Ok(self.emit(token_type, start, end))
    }

    fn emit(&mut self, token_type: TokenType, start: SourceLocation, end: SourceLocation) -> Token {
        self.last = Some(token_type.clone());
        Token::new(token_type, SourceSpan::new(start, end))
    }

    /// Tokenize the entire input; the last token is always `EndOfFile`
    pub fn tokenize(&mut self) -> Result<Vec<Token>, GenError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.token_type, TokenType::EndOfFile);
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token_types(input: &str) -> Vec<TokenType> {
        let mut lexer = Lexer::new(input, "test.go");
        lexer
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.token_type)
            .collect()
    }

    fn ident(name: &str) -> TokenType {
        TokenType::Identifier(name.to_string())
    }

    const NL: TokenType = TokenType::Semicolon { inserted: true };

    #[test]
    fn test_leading_byte_order_mark_skipped() {
        assert_eq!(
            token_types("\u{feff}package intexpr\n"),
            vec![TokenType::Package, ident("intexpr"), NL, TokenType::EndOfFile]
        );

        let mut lexer = Lexer::new("\u{feff}package p\n", "bom.go");
        let tokens = lexer.tokenize().unwrap();
        assert_eq!(tokens[0].span.start.column, 1);
    }

    #[test]
    fn test_byte_order_mark_inside_source_rejected() {
        let mut lexer = Lexer::new("package p\n\u{feff}\n", "bom.go");
        assert!(lexer.tokenize().is_err());
    }

    #[test]
    fn test_package_clause() {
        assert_eq!(
            token_types("package intexpr\n"),
            vec![TokenType::Package, ident("intexpr"), NL, TokenType::EndOfFile]
        );
    }

    #[test]
    fn test_semicolon_after_closing_paren_only() {
        let types = token_types("Add(Left, Right Expr)\n}\n");
        assert_eq!(
            types,
            vec![
                ident("Add"),
                TokenType::LeftParen,
                ident("Left"),
                TokenType::Comma,
                ident("Right"),
                ident("Expr"),
                TokenType::RightParen,
                NL,
                TokenType::RightBrace,
                NL,
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_no_semicolon_after_open_brace() {
        let types = token_types("interface {\n\tFeedTo(c C)\n}");
        assert_eq!(types[0], TokenType::Interface);
        assert_eq!(types[1], TokenType::LeftBrace);
        assert_eq!(types[2], ident("FeedTo"));
    }

    #[test]
    fn test_comments_are_skipped() {
        let types = token_types("// header\ntype /* inline */ Expr // trailing\n");
        assert_eq!(types, vec![TokenType::Type, ident("Expr"), NL, TokenType::EndOfFile]);
    }

    #[test]
    fn test_multiline_block_comment_ends_statement() {
        let types = token_types("x /* a\nb */ y");
        assert_eq!(types, vec![ident("x"), NL, ident("y"), NL, TokenType::EndOfFile]);
    }

    #[test]
    fn test_semicolon_inserted_at_eof() {
        assert_eq!(token_types("return"), vec![TokenType::Return, NL, TokenType::EndOfFile]);
    }

    #[test]
    fn test_literals() {
        let types = token_types(r#"42 0x1F 3.14 1e9 2i 'a' '\n' "s\"q" `raw`"#);
        assert_eq!(
            types[..9].to_vec(),
            vec![
                TokenType::IntLiteral("42".to_string()),
                TokenType::IntLiteral("0x1F".to_string()),
                TokenType::FloatLiteral("3.14".to_string()),
                TokenType::FloatLiteral("1e9".to_string()),
                TokenType::ImaginaryLiteral("2i".to_string()),
                TokenType::RuneLiteral("'a'".to_string()),
                TokenType::RuneLiteral("'\\n'".to_string()),
                TokenType::StringLiteral("s\\\"q".to_string()),
                TokenType::RawStringLiteral("raw".to_string()),
            ]
        );
    }

    #[test]
    fn test_operators_longest_match() {
        let types = token_types("a &^= b <- c ... d := e");
        assert_eq!(types[1], TokenType::Operator("&^=".to_string()));
        assert_eq!(types[3], TokenType::Arrow);
        assert_eq!(types[5], TokenType::Ellipsis);
        assert_eq!(types[7], TokenType::Operator(":=".to_string()));
    }

    #[test]
    fn test_token_locations() {
        let mut lexer = Lexer::new("type Expr\n  interface", "expr.go");
        let tokens = lexer.tokenize().unwrap();
        assert_eq!(tokens[1].span.start, SourceLocation::new("expr.go", 1, 6));
        assert_eq!(tokens[3].span.start, SourceLocation::new("expr.go", 2, 3));
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new("import \"fmt\n", "bad.go");
        let err = lexer.tokenize().unwrap_err();
        assert!(matches!(err, GenError::Syntax { .. }));
    }

    #[test]
    fn test_invalid_character() {
        let mut lexer = Lexer::new("type $", "bad.go");
        let err = lexer.tokenize().unwrap_err();
        assert_eq!(err.to_string(), "syntax error at bad.go:1:6: invalid character '$'");
    }
}
