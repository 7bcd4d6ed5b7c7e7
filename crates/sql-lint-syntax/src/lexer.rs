//! SQL tokenizer.

use crate::{Keyword, LexError, Span, Token, TokenKind};

/// A lexer that tokenizes SQL input.
///
/// Whitespace and comments (`--`, `//`, `#`, `/* */`) are skipped. Keywords
/// are recognized case-insensitively.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            match (self.peek(), self.peek_next()) {
                (Some('-'), Some('-')) | (Some('/'), Some('/')) | (Some('#'), _) => {
                    self.skip_line();
                }
                (Some('/'), Some('*')) => {
                    let start = self.pos;
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                return Err(LexError::new(
                                    start,
                                    "Syntax error: Unclosed comment",
                                ));
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos))
    }

    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::lookup(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier),
        }
    }

    fn scan_quoted_identifier(&mut self) -> Result<Token, LexError> {
        loop {
            match self.advance() {
                Some('`') => return Ok(self.make_token(TokenKind::QuotedIdentifier)),
                Some('\\') => {
                    self.advance();
                }
                Some('\n') | None => {
                    return Err(LexError::new(
                        self.start,
                        "Syntax error: Unclosed identifier literal",
                    ));
                }
                Some(_) => {}
            }
        }
    }

    /// Scans a string literal whose opening quote has already been consumed.
    fn scan_string(&mut self, quote: char) -> Result<Token, LexError> {
        let triple = self.peek() == Some(quote) && self.peek_next() == Some(quote);
        if triple {
            self.advance();
            self.advance();
            loop {
                match self.advance() {
                    Some('\\') => {
                        self.advance();
                    }
                    Some(c)
                        if c == quote
                            && self.peek() == Some(quote)
                            && self.peek_next() == Some(quote) =>
                    {
                        self.advance();
                        self.advance();
                        return Ok(self.make_token(TokenKind::String));
                    }
                    Some(_) => {}
                    None => {
                        return Err(LexError::new(
                            self.start,
                            "Syntax error: Unclosed triple-quoted string literal",
                        ));
                    }
                }
            }
        }

        loop {
            match self.advance() {
                Some('\\') => {
                    self.advance();
                }
                Some(c) if c == quote => return Ok(self.make_token(TokenKind::String)),
                Some('\n') | None => {
                    return Err(LexError::new(
                        self.start,
                        "Syntax error: Unclosed string literal",
                    ));
                }
                Some(_) => {}
            }
        }
    }

    fn scan_number(&mut self, first: char) -> Token {
        if first == '0' && matches!(self.peek(), Some('x' | 'X')) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            return self.make_token(TokenKind::Integer);
        }

        let mut is_float = first == '.';
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if !is_float
            && self.peek() == Some('.')
            && self.peek_next().map_or(true, |c| !c.is_alphabetic() && c != '_')
        {
            is_float = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if matches!(self.peek(), Some('e' | 'E'))
            && self
                .peek_next()
                .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-')
        {
            is_float = true;
            self.advance();
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if is_float {
            self.make_token(TokenKind::Float)
        } else {
            self.make_token(TokenKind::Integer)
        }
    }

    /// Returns true if the characters at the cursor form a string prefix
    /// (`r`, `b`, `rb`, `br`) immediately followed by a quote.
    fn at_string_prefix(&self, first: char) -> Option<usize> {
        let is_prefix = |c: char| matches!(c, 'r' | 'R' | 'b' | 'B');
        if !is_prefix(first) {
            return None;
        }
        let mut chars = self.input[self.pos..].chars();
        match chars.next() {
            Some('\'' | '"') => Some(0),
            Some(c) if is_prefix(c) && !c.eq_ignore_ascii_case(&first) => {
                matches!(chars.next(), Some('\'' | '"')).then_some(1)
            }
            _ => None,
        }
    }

    /// Returns the next token, or `TokenKind::Eof` at the end of input.
    ///
    /// # Errors
    ///
    /// Returns an error for unterminated literals or comments and for
    /// characters that cannot start any token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return Ok(self.make_token(TokenKind::Eof));
        };

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '&' => TokenKind::BitAnd,
            '^' => TokenKind::BitXor,
            '~' => TokenKind::BitNot,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '@' => TokenKind::At,
            '=' => TokenKind::Eq,
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                return Ok(self.scan_number(c));
            }
            '.' => TokenKind::Dot,
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    TokenKind::Concat
                } else {
                    TokenKind::BitOr
                }
            }
            '!' if self.peek() == Some('=') => {
                self.advance();
                TokenKind::NotEq
            }
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::LtEq
                }
                Some('>') => {
                    self.advance();
                    TokenKind::NotEq
                }
                Some('<') => {
                    self.advance();
                    TokenKind::ShiftLeft
                }
                _ => TokenKind::Lt,
            },
            '>' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::GtEq
                }
                Some('>') => {
                    self.advance();
                    TokenKind::ShiftRight
                }
                _ => TokenKind::Gt,
            },
            '\'' | '"' => return self.scan_string(c),
            '`' => return self.scan_quoted_identifier(),
            c if c.is_ascii_digit() => return Ok(self.scan_number(c)),
            c if c.is_alphabetic() || c == '_' => {
                if let Some(extra) = self.at_string_prefix(c) {
                    for _ in 0..extra {
                        self.advance();
                    }
                    if let Some(quote) = self.advance() {
                        return self.scan_string(quote);
                    }
                }
                return Ok(self.scan_identifier());
            }
            other => {
                return Err(LexError::new(
                    self.start,
                    format!("Syntax error: Illegal input character \"{other}\""),
                ));
            }
        };

        Ok(self.make_token(kind))
    }
}

/// Tokenizes the whole input, excluding the end-of-input token.
///
/// # Errors
///
/// Returns the first tokenizer error encountered.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.is_eof() {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenClass;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .expect("tokenize failed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = tokenize("SeLEct a FROM `Table`").expect("tokenize failed");
        let classes: Vec<TokenClass> = tokens.iter().map(Token::class).collect();
        assert_eq!(
            classes,
            vec![
                TokenClass::Keyword,
                TokenClass::Identifier,
                TokenClass::Keyword,
                TokenClass::Identifier,
            ]
        );
        assert_eq!(tokens[3].span, Span::new(14, 21));
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("-- one\nSELECT /* two */ 1 # three\n// four"),
            vec![TokenKind::Keyword(Keyword::Select), TokenKind::Integer]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("a <> b <= c || d >> e"),
            vec![
                TokenKind::Identifier,
                TokenKind::NotEq,
                TokenKind::Identifier,
                TokenKind::LtEq,
                TokenKind::Identifier,
                TokenKind::Concat,
                TokenKind::Identifier,
                TokenKind::ShiftRight,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("1 6.28 .5 1e10 0x1F"),
            vec![
                TokenKind::Integer,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Integer,
            ]
        );
    }

    #[test]
    fn test_strings() {
        let tokens = tokenize(r#"'a\'b' "x" """multi
line""" r'raw' b"bytes""#)
        .expect("tokenize failed");
        assert!(tokens.iter().all(|t| t.kind == TokenKind::String));
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_unclosed_string_is_an_error() {
        let err = tokenize("SELECT 'abc").expect_err("should fail");
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn test_unclosed_comment_is_an_error() {
        let err = tokenize("SELECT /* abc").expect_err("should fail");
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn test_illegal_character() {
        let err = tokenize("SELECT $").expect_err("should fail");
        assert_eq!(err.offset, 7);
        assert!(err.message.contains("Illegal input character"));
    }
}
