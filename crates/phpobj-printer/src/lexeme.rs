//! Source text for each token kind the printer emits.

use std::borrow::Cow;
use std::collections::HashMap;

use lazy_static::lazy_static;
use phpobj_lexer::TokenKind;

lazy_static! {
    static ref LEXEMES: HashMap<TokenKind, &'static str> = HashMap::from([
        // declarations
        (TokenKind::Class, "class"),
        (TokenKind::Interface, "interface"),
        (TokenKind::Abstract, "abstract"),
        (TokenKind::Final, "final"),
        (TokenKind::Extends, "extends"),
        (TokenKind::Implements, "implements"),
        (TokenKind::Const, "const"),
        (TokenKind::Var, "var"),
        (TokenKind::Function, "function"),
        (TokenKind::Static, "static"),
        (TokenKind::Public, "public"),
        (TokenKind::Protected, "protected"),
        (TokenKind::Private, "private"),
        (TokenKind::Self_, "self"),
        (TokenKind::Parent_, "parent"),
        (TokenKind::New, "new"),
        (TokenKind::Clone, "clone"),
        (TokenKind::Namespace, "namespace"),
        (TokenKind::Use, "use"),
        // control flow
        (TokenKind::If, "if"),
        (TokenKind::Else, "else"),
        (TokenKind::ElseIf, "elseif"),
        (TokenKind::While, "while"),
        (TokenKind::Do, "do"),
        (TokenKind::For, "for"),
        (TokenKind::Foreach, "foreach"),
        (TokenKind::As, "as"),
        (TokenKind::Switch, "switch"),
        (TokenKind::Case, "case"),
        (TokenKind::Default, "default"),
        (TokenKind::Break, "break"),
        (TokenKind::Continue, "continue"),
        (TokenKind::EndIf, "endif"),
        (TokenKind::EndWhile, "endwhile"),
        (TokenKind::EndFor, "endfor"),
        (TokenKind::EndForeach, "endforeach"),
        (TokenKind::EndSwitch, "endswitch"),
        (TokenKind::Return, "return"),
        (TokenKind::Echo, "echo"),
        (TokenKind::Throw, "throw"),
        (TokenKind::Try, "try"),
        (TokenKind::Catch, "catch"),
        (TokenKind::Finally, "finally"),
        (TokenKind::Global, "global"),
        (TokenKind::List, "list"),
        (TokenKind::Array, "array"),
        (TokenKind::Exit, "exit"),
        (TokenKind::Instanceof, "instanceof"),
        (TokenKind::Null, "null"),
        (TokenKind::True, "true"),
        (TokenKind::False, "false"),
        (TokenKind::And, "and"),
        (TokenKind::Or, "or"),
        (TokenKind::Xor, "xor"),
        // punctuation
        (TokenKind::LeftBrace, "{"),
        (TokenKind::RightBrace, "}"),
        (TokenKind::LeftParen, "("),
        (TokenKind::RightParen, ")"),
        (TokenKind::LeftBracket, "["),
        (TokenKind::RightBracket, "]"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Comma, ","),
        (TokenKind::Colon, ":"),
        (TokenKind::Question, "?"),
        (TokenKind::Arrow, "->"),
        (TokenKind::DoubleColon, "::"),
        (TokenKind::FatArrow, "=>"),
        (TokenKind::Ellipsis, "..."),
        (TokenKind::Backslash, "\\"),
        (TokenKind::Dollar, "$"),
        (TokenKind::At, "@"),
        (TokenKind::OpenTag, "<?php"),
        (TokenKind::CloseTag, "?>"),
        // arithmetic
        (TokenKind::Plus, "+"),
        (TokenKind::Minus, "-"),
        (TokenKind::Star, "*"),
        (TokenKind::Slash, "/"),
        (TokenKind::Percent, "%"),
        (TokenKind::StarStar, "**"),
        (TokenKind::Dot, "."),
        (TokenKind::PlusPlus, "++"),
        (TokenKind::MinusMinus, "--"),
        // assignment
        (TokenKind::Equals, "="),
        (TokenKind::PlusEquals, "+="),
        (TokenKind::MinusEquals, "-="),
        (TokenKind::StarEquals, "*="),
        (TokenKind::SlashEquals, "/="),
        (TokenKind::DotEquals, ".="),
        // comparison
        (TokenKind::EqualsEquals, "=="),
        (TokenKind::BangEquals, "!="),
        (TokenKind::EqualsEqualsEquals, "==="),
        (TokenKind::BangEqualsEquals, "!=="),
        (TokenKind::LessThan, "<"),
        (TokenKind::GreaterThan, ">"),
        (TokenKind::LessThanEquals, "<="),
        (TokenKind::GreaterThanEquals, ">="),
        (TokenKind::QuestionQuestion, "??"),
        // logical and bitwise
        (TokenKind::Bang, "!"),
        (TokenKind::AmpersandAmpersand, "&&"),
        (TokenKind::PipePipe, "||"),
        (TokenKind::Ampersand, "&"),
        (TokenKind::Pipe, "|"),
        (TokenKind::Caret, "^"),
        (TokenKind::Tilde, "~"),
    ]);
}

/// The source text for `kind`. Kinds without a fixed spelling fall back to
/// their display name.
pub fn lexeme(kind: TokenKind) -> Cow<'static, str> {
    match LEXEMES.get(&kind) {
        Some(text) => Cow::Borrowed(*text),
        None => Cow::Owned(kind.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phpobj_lexer::{resolve_keyword, Lexer};

    #[test]
    fn test_every_lexeme_lexes_back_to_its_kind() {
        for (kind, text) in LEXEMES.iter() {
            let token = Lexer::new(text).next_token();
            assert_eq!(token.kind, *kind, "{text:?}");
            assert_eq!(token.span.len() as usize, text.len(), "{text:?}");
        }
    }

    #[test]
    fn test_keyword_lexemes_match_keyword_table() {
        for (kind, text) in LEXEMES.iter().filter(|(kind, _)| kind.is_keyword()) {
            assert_eq!(resolve_keyword(text), Some(*kind), "{text:?}");
        }
    }

    /// Kinds whose text varies per token. Every other kind needs a table entry.
    /// The match has no wildcard so a new token kind must be classified here.
    fn has_variable_text(kind: TokenKind) -> bool {
        use TokenKind::*;
        match kind {
            FloatLiteral | IntLiteral | SingleQuotedString | DoubleQuotedString | Variable
            | Identifier | InlineHtml | Unknown | Eof => true,
            Dollar | Plus | Minus | Star | Slash | Percent | StarStar | Dot | Equals
            | PlusEquals | MinusEquals | StarEquals | SlashEquals | DotEquals | EqualsEquals
            | BangEquals | EqualsEqualsEquals | BangEqualsEquals | LessThan | GreaterThan
            | LessThanEquals | GreaterThanEquals | AmpersandAmpersand | PipePipe | Bang
            | Ampersand | Pipe | Caret | Tilde | PlusPlus | MinusMinus | Question
            | QuestionQuestion | Colon | FatArrow | LeftParen | RightParen | LeftBracket
            | RightBracket | LeftBrace | RightBrace | Semicolon | Comma | DoubleColon | Arrow
            | Backslash | At | Ellipsis | If | Else | ElseIf | While | Do | For | Foreach | As
            | Function | Return | Echo | True | False | Null | And | Or | Xor | Break
            | Continue | Switch | Case | Default | EndIf | EndWhile | EndFor | EndForeach
            | EndSwitch | Throw | Try | Catch | Finally | Instanceof | Array | List | Global
            | Exit | Clone | New | Class | Abstract | Final | Interface | Extends | Implements
            | Public | Protected | Private | Static | Const | Var | Namespace | Use | Self_
            | Parent_ | OpenTag | CloseTag => false,
        }
    }

    /// Every kind the lexer can produce, each spelled out in source once.
    const VOCABULARY: &str = "$ + - * / % ** . = += -= *= /= .= == != === !== < > <= >= \
        && || ! & | ^ ~ ++ -- ? ?? : => ( ) [ ] { } ; , :: -> \\ @ ... \
        if else elseif while do for foreach as function return echo true false null \
        and or xor break continue switch case default endif endwhile endfor endforeach \
        endswitch throw try catch finally instanceof array list global exit clone new \
        class abstract final interface extends implements public protected private \
        static const var namespace use self parent <?php";

    #[test]
    fn test_every_fixed_kind_has_a_lexeme() {
        let mut lexer = Lexer::new(VOCABULARY);
        let mut seen = 0;
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::Eof {
                break;
            }
            assert!(!has_variable_text(token.kind), "{:?}", token.kind);
            assert_eq!(
                LEXEMES.get(&token.kind).copied(),
                Some(lexer.token_text(&token)),
                "{:?}",
                token.kind
            );
            seen += 1;
        }
        // `?>` switches the lexer out of code mode, so it is checked on its own
        assert_eq!(Lexer::new("?>").next_token().kind, TokenKind::CloseTag);
        assert_eq!(seen + 1, LEXEMES.len());
    }

    #[test]
    fn test_operators_print_as_source() {
        for (kind, text) in [
            (TokenKind::Star, "*"),
            (TokenKind::EqualsEqualsEquals, "==="),
            (TokenKind::QuestionQuestion, "??"),
            (TokenKind::DotEquals, ".="),
            (TokenKind::MinusMinus, "--"),
        ] {
            assert_eq!(lexeme(kind), text);
        }
        assert!(LEXEMES.keys().all(|kind| !has_variable_text(*kind)));
    }

    #[test]
    fn test_unlisted_kinds_use_display() {
        assert_eq!(lexeme(TokenKind::Class), "class");
        assert_eq!(lexeme(TokenKind::Variable), "variable");
        assert_eq!(lexeme(TokenKind::Eof), "end of file");
    }
}
