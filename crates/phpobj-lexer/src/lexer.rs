use logos::Logos;
use memchr::memmem;
use phpobj_ast::Span;

use crate::token::{resolve_keyword, TokenKind};

const OPEN_TAG: &str = "<?php";

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(offset: u32) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::new(offset, offset),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexerMode {
    InlineHtml,
    Code,
}

/// Token source over a single source string. Starts in code mode; text after a
/// `?>` up to the next `<?php` is returned as one [`TokenKind::InlineHtml`] token.
pub struct Lexer<'src> {
    source: &'src str,
    mode: LexerMode,
    pos: usize,
    peeked: Option<Token>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            mode: LexerMode::Code,
            pos: 0,
            peeked: None,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn peek(&mut self) -> &Token {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.read_next_token(),
        };
        self.peeked.insert(token)
    }

    pub fn next_token(&mut self) -> Token {
        match self.peeked.take() {
            Some(token) => token,
            None => self.read_next_token(),
        }
    }

    /// Get the text slice corresponding to a token
    pub fn token_text(&self, token: &Token) -> &'src str {
        &self.source[token.span.range()]
    }

    fn read_next_token(&mut self) -> Token {
        if self.pos >= self.source.len() {
            return Token::eof(self.source.len() as u32);
        }

        match self.mode {
            LexerMode::InlineHtml => self.lex_inline_html(),
            LexerMode::Code => self.lex_code(),
        }
    }

    fn lex_inline_html(&mut self) -> Token {
        let start = self.pos;
        self.mode = LexerMode::Code;

        let end = match memmem::find(self.source[start..].as_bytes(), OPEN_TAG.as_bytes()) {
            Some(0) => return self.lex_code(),
            Some(offset) => start + offset,
            None => self.source.len(),
        };
        self.pos = end;
        Token::new(TokenKind::InlineHtml, Span::new(start as u32, end as u32))
    }

    fn lex_code(&mut self) -> Token {
        let remaining = &self.source[self.pos..];

        // Logos only skips closed block comments; an unclosed one runs to end of file.
        let trimmed = remaining.trim_start_matches([' ', '\t', '\r', '\n', '\x0C']);
        if trimmed.starts_with("/*") && !trimmed[2..].contains("*/") {
            self.pos = self.source.len();
            return Token::eof(self.source.len() as u32);
        }

        let mut inner = TokenKind::lexer(remaining);
        let result = inner.next();
        let logos_span = inner.span();
        let start = self.pos + logos_span.start;
        let end = self.pos + logos_span.end;

        match result {
            Some(Ok(kind)) => {
                self.pos = end;
                let span = Span::new(start as u32, end as u32);
                match kind {
                    TokenKind::CloseTag => {
                        self.mode = LexerMode::InlineHtml;
                        Token::new(kind, span)
                    }
                    TokenKind::Identifier => {
                        let resolved =
                            resolve_keyword(&self.source[start..end]).unwrap_or(TokenKind::Identifier);
                        Token::new(resolved, span)
                    }
                    _ => Token::new(kind, span),
                }
            }
            Some(Err(())) => {
                // Keep the offending text so the parser can report it
                let end = end.max(start + self.char_len_at(start));
                self.pos = end;
                Token::new(TokenKind::Unknown, Span::new(start as u32, end as u32))
            }
            None => {
                self.pos = self.source.len();
                Token::eof(self.source.len() as u32)
            }
        }
    }

    fn char_len_at(&self, offset: usize) -> usize {
        self.source[offset..].chars().next().map_or(1, char::len_utf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_tokens(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    fn collect_kinds(source: &str) -> Vec<TokenKind> {
        collect_tokens(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_open_tag_and_statement() {
        let tokens = collect_kinds("<?php $x = 42;");
        assert_eq!(
            tokens,
            vec![
                TokenKind::OpenTag,
                TokenKind::Variable,
                TokenKind::Equals,
                TokenKind::IntLiteral,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_code_without_open_tag() {
        let tokens = collect_kinds("new Foo()");
        assert_eq!(
            tokens,
            vec![
                TokenKind::New,
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_inline_html_after_close_tag() {
        let source = "<?php echo 1; ?>\n<p>hi</p>\n<?php echo 2;";
        let tokens = collect_tokens(source);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::OpenTag,
                TokenKind::Echo,
                TokenKind::IntLiteral,
                TokenKind::Semicolon,
                TokenKind::CloseTag,
                TokenKind::InlineHtml,
                TokenKind::OpenTag,
                TokenKind::Echo,
                TokenKind::IntLiteral,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[5].span.text(source), "\n<p>hi</p>\n");
    }

    #[test]
    fn test_close_tag_at_end_of_file() {
        let tokens = collect_kinds("<?php echo 1; ?>");
        assert_eq!(tokens.last(), Some(&TokenKind::Eof));
        assert!(!tokens.contains(&TokenKind::InlineHtml));
    }

    #[test]
    fn test_object_keywords() {
        let tokens = collect_kinds("abstract FINAL class Foo extends Bar implements Baz");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Abstract,
                TokenKind::Final,
                TokenKind::Class,
                TokenKind::Identifier,
                TokenKind::Extends,
                TokenKind::Identifier,
                TokenKind::Implements,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_member_access_tokens() {
        let tokens = collect_kinds("$obj->prop->call()");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Variable,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_peek_doesnt_consume() {
        let mut lexer = Lexer::new("<?php 42");
        assert_eq!(lexer.peek().kind, TokenKind::OpenTag);
        assert_eq!(lexer.peek().kind, TokenKind::OpenTag);
        assert_eq!(lexer.next_token().kind, TokenKind::OpenTag);
        assert_eq!(lexer.next_token().kind, TokenKind::IntLiteral);
    }

    #[test]
    fn test_token_text() {
        let source = "<?php $myVar = 'hello';";
        let mut lexer = Lexer::new(source);
        lexer.next_token(); // <?php
        let var_tok = lexer.next_token();
        assert_eq!(lexer.token_text(&var_tok), "$myVar");
        lexer.next_token(); // =
        let str_tok = lexer.next_token();
        assert_eq!(lexer.token_text(&str_tok), "'hello'");
    }

    #[test]
    fn test_spans_are_correct() {
        let tokens = collect_tokens("<?php $x");
        assert_eq!(tokens[0].span, Span::new(0, 5));
        assert_eq!(tokens[1].span, Span::new(6, 8));
        assert_eq!(tokens[2].span, Span::new(8, 8));
    }

    #[test]
    fn test_unknown_input() {
        let source = "$a ` $b";
        let tokens = collect_tokens(source);
        assert_eq!(tokens[1].kind, TokenKind::Unknown);
        assert_eq!(tokens[1].span.text(source), "`");
        assert_eq!(tokens[2].kind, TokenKind::Variable);
    }

    #[test]
    fn test_unclosed_block_comment() {
        assert_eq!(collect_kinds("$a /* never closed"), vec![TokenKind::Variable, TokenKind::Eof]);
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(collect_kinds(""), vec![TokenKind::Eof]);
    }
}
