use phpobj_ast::*;
use phpobj_lexer::{Lexer, Token, TokenKind};

use crate::diagnostics::ParseError;
use crate::stmt;

/// Recursive-descent parser state. `current` is the next token to be consumed;
/// the lexer holds at most one more token of lookahead.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    source: &'src str,
    prev_end: u32,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            source,
            prev_end: 0,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    // =========================================================================
    // Token navigation
    // =========================================================================

    /// Get the current token kind without consuming it.
    pub fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Get the current token's span.
    pub fn current_span(&self) -> Span {
        self.current.span
    }

    /// Get the text of the current token.
    pub fn current_text(&self) -> &'src str {
        &self.source[self.current.span.range()]
    }

    /// Text of an already consumed token.
    pub fn text(&self, token: &Token) -> &'src str {
        &self.source[token.span.range()]
    }

    /// Advance to the next token, returning the consumed token.
    pub fn advance(&mut self) -> Token {
        let prev = std::mem::replace(&mut self.current, self.lexer.next_token());
        self.prev_end = prev.span.end;
        prev
    }

    /// Peek at the kind of the token after the current one.
    pub fn peek_kind(&mut self) -> TokenKind {
        self.lexer.peek().kind
    }

    /// Check if the current token matches the given kind.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// If the current token matches `kind`, consume and return it. Otherwise return None.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume the current token if it is `kind`, otherwise fail.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.expect_current(kind)?;
        Ok(self.advance())
    }

    /// Assert the current token is `kind` without consuming it.
    pub fn expect_current(&self, kind: TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            Ok(())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    /// Expect a closing delimiter, reporting where the opening was.
    pub fn expect_closing(&mut self, kind: TokenKind, opened_at: Span) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::UnclosedDelimiter {
                delimiter: kind.to_string(),
                opened_at,
                span: self.current_span(),
            })
        }
    }

    /// Expect a `;`. A `?>` close tag also ends a statement; it is left in the
    /// stream so the statement loop can pick up the inline text after it.
    pub fn expect_semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat(TokenKind::Semicolon).is_some() || self.check(TokenKind::CloseTag) {
            Ok(())
        } else {
            Err(self.unexpected("';'"))
        }
    }

    /// Build an `Expected` error describing the current token.
    pub fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::Expected {
            expected: expected.to_string(),
            found: self.current_kind(),
            text: self.current_text().to_string(),
            span: self.current_span(),
        }
    }

    /// Start a span at the current token position.
    pub fn start_span(&self) -> u32 {
        self.current.span.start
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn end_span(&self, start: u32) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Consume a plain identifier (class, interface or type name).
    pub fn expect_identifier(&mut self) -> Result<(String, Span), ParseError> {
        let token = self.expect(TokenKind::Identifier)?;
        Ok((self.text(&token).to_string(), token.span))
    }

    /// Consume an identifier or any keyword used as a name, as allowed for
    /// member, method and constant names.
    pub fn eat_identifier_or_keyword(&mut self) -> Option<(String, Span)> {
        if self.check(TokenKind::Identifier) || self.current_kind().is_keyword() {
            let token = self.advance();
            Some((self.text(&token).to_string(), token.span))
        } else {
            None
        }
    }

    pub fn expect_identifier_or_keyword(&mut self) -> Result<(String, Span), ParseError> {
        match self.eat_identifier_or_keyword() {
            Some(name) => Ok(name),
            None => Err(self.unexpected("identifier")),
        }
    }

    /// Consume a possibly qualified name: `Foo`, `Foo\Bar` or `\Foo\Bar`.
    pub fn expect_name(&mut self) -> Result<(String, Span), ParseError> {
        let start = self.start_span();
        let mut name = String::new();
        if self.eat(TokenKind::Backslash).is_some() {
            name.push('\\');
        }
        name.push_str(&self.expect_identifier()?.0);
        while self.eat(TokenKind::Backslash).is_some() {
            name.push('\\');
            name.push_str(&self.expect_identifier_or_keyword()?.0);
        }
        Ok((name, self.end_span(start)))
    }

    /// Parse a non-empty comma-separated list of names.
    pub fn parse_name_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = vec![self.expect_name()?.0];
        while self.eat(TokenKind::Comma).is_some() {
            names.push(self.expect_name()?.0);
        }
        Ok(names)
    }

    // =========================================================================
    // Top-level parsing
    // =========================================================================

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let start = self.start_span();
        let mut stmts = Vec::new();

        while !self.check(TokenKind::Eof) {
            // Tags only switch modes; they leave nothing in the tree
            if self.eat(TokenKind::OpenTag).is_some() || self.eat(TokenKind::CloseTag).is_some() {
                continue;
            }
            stmts.push(stmt::parse_stmt(self)?);
        }

        Ok(Program {
            stmts,
            span: Span::new(start, self.current.span.end),
        })
    }
}
