use logos::Logos;

fn lex_quoted(lex: &mut logos::Lexer<TokenKind>, quote: char) -> bool {
    let remainder = lex.remainder();
    let mut chars = remainder.chars();
    loop {
        match chars.next() {
            Some('\\') => {
                chars.next(); // skip escaped char
            }
            Some(c) if c == quote => {
                let consumed = remainder.len() - chars.as_str().len();
                lex.bump(consumed);
                return true;
            }
            Some(_) => {}
            None => return false,
        }
    }
}

fn lex_single_quoted_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    lex_quoted(lex, '\'')
}

fn lex_double_quoted_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    lex_quoted(lex, '"')
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"#[^\n]*")]
#[logos(skip r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
pub enum TokenKind {
    // --- Literals ---
    #[regex(
        r"[0-9](_?[0-9])*(\.[0-9](_?[0-9])*)?[eE][+-]?[0-9](_?[0-9])*",
        priority = 5
    )]
    #[regex(r"[0-9](_?[0-9])*\.[0-9](_?[0-9])*", priority = 4)]
    FloatLiteral,

    #[regex(r"[0-9](_?[0-9])*", priority = 1)]
    IntLiteral,

    #[token("'", lex_single_quoted_string)]
    SingleQuotedString,

    #[token("\"", lex_double_quoted_string)]
    DoubleQuotedString,

    // --- Variables ---
    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*")]
    Variable,
    #[token("$")]
    Dollar,

    // --- Identifiers (keywords resolved from these) ---
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // --- Operators ---
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("**")]
    StarStar,
    #[token(".")]
    Dot,

    #[token("=")]
    Equals,
    #[token("+=")]
    PlusEquals,
    #[token("-=")]
    MinusEquals,
    #[token("*=")]
    StarEquals,
    #[token("/=")]
    SlashEquals,
    #[token(".=")]
    DotEquals,

    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    BangEquals,
    #[token("===")]
    EqualsEqualsEquals,
    #[token("!==")]
    BangEqualsEquals,
    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,
    #[token("<=")]
    LessThanEquals,
    #[token(">=")]
    GreaterThanEquals,

    #[token("&&")]
    AmpersandAmpersand,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,

    #[token("&")]
    Ampersand,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,

    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    #[token("?")]
    Question,
    #[token("??")]
    QuestionQuestion,
    #[token(":")]
    Colon,

    #[token("=>")]
    FatArrow,

    // --- Delimiters ---
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,

    #[token("::")]
    DoubleColon,

    #[token("->")]
    Arrow,

    #[token("\\")]
    Backslash,

    #[token("@")]
    At,

    #[token("...")]
    Ellipsis,

    // --- Keywords (not matched by Logos directly, resolved from Identifier) ---
    If,
    Else,
    ElseIf,
    While,
    Do,
    For,
    Foreach,
    As,
    Function,
    Return,
    Echo,
    True,
    False,
    Null,
    And,
    Or,
    Xor,
    Break,
    Continue,
    Switch,
    Case,
    Default,
    EndIf,
    EndWhile,
    EndFor,
    EndForeach,
    EndSwitch,
    Throw,
    Try,
    Catch,
    Finally,
    Instanceof,
    Array,
    List,
    Global,
    Exit,
    Clone,
    // Object model
    New,
    Class,
    Abstract,
    Final,
    Interface,
    Extends,
    Implements,
    Public,
    Protected,
    Private,
    Static,
    Const,
    Var,
    Namespace,
    Use,
    Self_,
    Parent_,

    // --- Tags ---
    #[token("<?php")]
    OpenTag,

    #[token("?>")]
    CloseTag,

    // Text between `?>` and the next `<?php`, produced by the Lexer wrapper
    InlineHtml,

    // Input no rule matches, produced by the Lexer wrapper
    Unknown,

    Eof,
}

impl TokenKind {
    pub fn is_assignment_op(&self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::SlashEquals
                | TokenKind::DotEquals
        )
    }

    /// True for any kind produced by [`resolve_keyword`].
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::ElseIf
                | TokenKind::While
                | TokenKind::Do
                | TokenKind::For
                | TokenKind::Foreach
                | TokenKind::As
                | TokenKind::Function
                | TokenKind::Return
                | TokenKind::Echo
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Xor
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Switch
                | TokenKind::Case
                | TokenKind::Default
                | TokenKind::EndIf
                | TokenKind::EndWhile
                | TokenKind::EndFor
                | TokenKind::EndForeach
                | TokenKind::EndSwitch
                | TokenKind::Throw
                | TokenKind::Try
                | TokenKind::Catch
                | TokenKind::Finally
                | TokenKind::Instanceof
                | TokenKind::Array
                | TokenKind::List
                | TokenKind::Global
                | TokenKind::Exit
                | TokenKind::Clone
                | TokenKind::New
                | TokenKind::Class
                | TokenKind::Abstract
                | TokenKind::Final
                | TokenKind::Interface
                | TokenKind::Extends
                | TokenKind::Implements
                | TokenKind::Public
                | TokenKind::Protected
                | TokenKind::Private
                | TokenKind::Static
                | TokenKind::Const
                | TokenKind::Var
                | TokenKind::Namespace
                | TokenKind::Use
                | TokenKind::Self_
                | TokenKind::Parent_
        )
    }
}

/// Resolve a keyword from an identifier string. Returns the keyword TokenKind
/// if the string is a keyword, or None if it's a plain identifier.
pub fn resolve_keyword(text: &str) -> Option<TokenKind> {
    // keywords are case-insensitive
    match text.to_ascii_lowercase().as_str() {
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "elseif" => Some(TokenKind::ElseIf),
        "while" => Some(TokenKind::While),
        "do" => Some(TokenKind::Do),
        "for" => Some(TokenKind::For),
        "foreach" => Some(TokenKind::Foreach),
        "as" => Some(TokenKind::As),
        "function" => Some(TokenKind::Function),
        "return" => Some(TokenKind::Return),
        "echo" => Some(TokenKind::Echo),
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        "null" => Some(TokenKind::Null),
        "and" => Some(TokenKind::And),
        "or" => Some(TokenKind::Or),
        "xor" => Some(TokenKind::Xor),
        "break" => Some(TokenKind::Break),
        "continue" => Some(TokenKind::Continue),
        "switch" => Some(TokenKind::Switch),
        "case" => Some(TokenKind::Case),
        "default" => Some(TokenKind::Default),
        "endif" => Some(TokenKind::EndIf),
        "endwhile" => Some(TokenKind::EndWhile),
        "endfor" => Some(TokenKind::EndFor),
        "endforeach" => Some(TokenKind::EndForeach),
        "endswitch" => Some(TokenKind::EndSwitch),
        "throw" => Some(TokenKind::Throw),
        "try" => Some(TokenKind::Try),
        "catch" => Some(TokenKind::Catch),
        "finally" => Some(TokenKind::Finally),
        "instanceof" => Some(TokenKind::Instanceof),
        "array" => Some(TokenKind::Array),
        "list" => Some(TokenKind::List),
        "global" => Some(TokenKind::Global),
        "exit" => Some(TokenKind::Exit),
        "clone" => Some(TokenKind::Clone),
        "new" => Some(TokenKind::New),
        "class" => Some(TokenKind::Class),
        "abstract" => Some(TokenKind::Abstract),
        "final" => Some(TokenKind::Final),
        "interface" => Some(TokenKind::Interface),
        "extends" => Some(TokenKind::Extends),
        "implements" => Some(TokenKind::Implements),
        "public" => Some(TokenKind::Public),
        "protected" => Some(TokenKind::Protected),
        "private" => Some(TokenKind::Private),
        "static" => Some(TokenKind::Static),
        "const" => Some(TokenKind::Const),
        "var" => Some(TokenKind::Var),
        "namespace" => Some(TokenKind::Namespace),
        "use" => Some(TokenKind::Use),
        "self" => Some(TokenKind::Self_),
        "parent" => Some(TokenKind::Parent_),
        _ => None,
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::IntLiteral => write!(f, "integer"),
            TokenKind::FloatLiteral => write!(f, "float"),
            TokenKind::SingleQuotedString | TokenKind::DoubleQuotedString => write!(f, "string"),
            TokenKind::Variable => write!(f, "variable"),
            TokenKind::Dollar => write!(f, "'$'"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::StarStar => write!(f, "'**'"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Equals => write!(f, "'='"),
            TokenKind::PlusEquals => write!(f, "'+='"),
            TokenKind::MinusEquals => write!(f, "'-='"),
            TokenKind::StarEquals => write!(f, "'*='"),
            TokenKind::SlashEquals => write!(f, "'/='"),
            TokenKind::DotEquals => write!(f, "'.='"),
            TokenKind::EqualsEquals => write!(f, "'=='"),
            TokenKind::BangEquals => write!(f, "'!='"),
            TokenKind::EqualsEqualsEquals => write!(f, "'==='"),
            TokenKind::BangEqualsEquals => write!(f, "'!=='"),
            TokenKind::LessThan => write!(f, "'<'"),
            TokenKind::GreaterThan => write!(f, "'>'"),
            TokenKind::LessThanEquals => write!(f, "'<='"),
            TokenKind::GreaterThanEquals => write!(f, "'>='"),
            TokenKind::AmpersandAmpersand => write!(f, "'&&'"),
            TokenKind::PipePipe => write!(f, "'||'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Ampersand => write!(f, "'&'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::Caret => write!(f, "'^'"),
            TokenKind::Tilde => write!(f, "'~'"),
            TokenKind::PlusPlus => write!(f, "'++'"),
            TokenKind::MinusMinus => write!(f, "'--'"),
            TokenKind::Question => write!(f, "'?'"),
            TokenKind::QuestionQuestion => write!(f, "'??'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::FatArrow => write!(f, "'=>'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::LeftBracket => write!(f, "'['"),
            TokenKind::RightBracket => write!(f, "']'"),
            TokenKind::LeftBrace => write!(f, "'{{'"),
            TokenKind::RightBrace => write!(f, "'}}'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::DoubleColon => write!(f, "'::'"),
            TokenKind::Arrow => write!(f, "'->'"),
            TokenKind::Backslash => write!(f, "'\\'"),
            TokenKind::At => write!(f, "'@'"),
            TokenKind::Ellipsis => write!(f, "'...'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::ElseIf => write!(f, "'elseif'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::Do => write!(f, "'do'"),
            TokenKind::For => write!(f, "'for'"),
            TokenKind::Foreach => write!(f, "'foreach'"),
            TokenKind::As => write!(f, "'as'"),
            TokenKind::Function => write!(f, "'function'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::Echo => write!(f, "'echo'"),
            TokenKind::True => write!(f, "'true'"),
            TokenKind::False => write!(f, "'false'"),
            TokenKind::Null => write!(f, "'null'"),
            TokenKind::And => write!(f, "'and'"),
            TokenKind::Or => write!(f, "'or'"),
            TokenKind::Xor => write!(f, "'xor'"),
            TokenKind::Break => write!(f, "'break'"),
            TokenKind::Continue => write!(f, "'continue'"),
            TokenKind::Switch => write!(f, "'switch'"),
            TokenKind::Case => write!(f, "'case'"),
            TokenKind::Default => write!(f, "'default'"),
            TokenKind::EndIf => write!(f, "'endif'"),
            TokenKind::EndWhile => write!(f, "'endwhile'"),
            TokenKind::EndFor => write!(f, "'endfor'"),
            TokenKind::EndForeach => write!(f, "'endforeach'"),
            TokenKind::EndSwitch => write!(f, "'endswitch'"),
            TokenKind::Throw => write!(f, "'throw'"),
            TokenKind::Try => write!(f, "'try'"),
            TokenKind::Catch => write!(f, "'catch'"),
            TokenKind::Finally => write!(f, "'finally'"),
            TokenKind::Instanceof => write!(f, "'instanceof'"),
            TokenKind::Array => write!(f, "'array'"),
            TokenKind::List => write!(f, "'list'"),
            TokenKind::Global => write!(f, "'global'"),
            TokenKind::Exit => write!(f, "'exit'"),
            TokenKind::Clone => write!(f, "'clone'"),
            TokenKind::New => write!(f, "'new'"),
            TokenKind::Class => write!(f, "'class'"),
            TokenKind::Abstract => write!(f, "'abstract'"),
            TokenKind::Final => write!(f, "'final'"),
            TokenKind::Interface => write!(f, "'interface'"),
            TokenKind::Extends => write!(f, "'extends'"),
            TokenKind::Implements => write!(f, "'implements'"),
            TokenKind::Public => write!(f, "'public'"),
            TokenKind::Protected => write!(f, "'protected'"),
            TokenKind::Private => write!(f, "'private'"),
            TokenKind::Static => write!(f, "'static'"),
            TokenKind::Const => write!(f, "'const'"),
            TokenKind::Var => write!(f, "'var'"),
            TokenKind::Namespace => write!(f, "'namespace'"),
            TokenKind::Use => write!(f, "'use'"),
            TokenKind::Self_ => write!(f, "'self'"),
            TokenKind::Parent_ => write!(f, "'parent'"),
            TokenKind::OpenTag => write!(f, "'<?php'"),
            TokenKind::CloseTag => write!(f, "'?>'"),
            TokenKind::InlineHtml => write!(f, "inline HTML"),
            TokenKind::Unknown => write!(f, "unknown input"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keyword() {
        assert_eq!(resolve_keyword("class"), Some(TokenKind::Class));
        assert_eq!(resolve_keyword("CLASS"), Some(TokenKind::Class));
        assert_eq!(resolve_keyword("Abstract"), Some(TokenKind::Abstract));
        assert_eq!(resolve_keyword("var"), Some(TokenKind::Var));
        assert_eq!(resolve_keyword("self"), Some(TokenKind::Self_));
        assert_eq!(resolve_keyword("myFunc"), None);
        assert_eq!(resolve_keyword("TRUE"), Some(TokenKind::True));
    }

    #[test]
    fn test_resolved_keywords_are_keywords() {
        for word in ["if", "new", "interface", "implements", "parent", "endswitch"] {
            let kind = resolve_keyword(word).unwrap();
            assert!(kind.is_keyword(), "{word} should be a keyword");
        }
        assert!(!TokenKind::Identifier.is_keyword());
        assert!(!TokenKind::Arrow.is_keyword());
    }

    #[test]
    fn test_is_assignment_op() {
        assert!(TokenKind::Equals.is_assignment_op());
        assert!(TokenKind::PlusEquals.is_assignment_op());
        assert!(TokenKind::DotEquals.is_assignment_op());
        assert!(!TokenKind::Plus.is_assignment_op());
        assert!(!TokenKind::EqualsEquals.is_assignment_op());
    }

    #[test]
    fn test_logos_object_punctuation() {
        let mut lex = TokenKind::lexer("-> :: => ... \\");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Arrow)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::DoubleColon)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::FatArrow)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Ellipsis)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Backslash)));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_logos_numbers() {
        let mut lex = TokenKind::lexer("42 1_000 3.14 2.5e-3");
        assert_eq!(lex.next(), Some(Ok(TokenKind::IntLiteral)));
        assert_eq!(lex.slice(), "42");
        assert_eq!(lex.next(), Some(Ok(TokenKind::IntLiteral)));
        assert_eq!(lex.slice(), "1_000");
        assert_eq!(lex.next(), Some(Ok(TokenKind::FloatLiteral)));
        assert_eq!(lex.slice(), "3.14");
        assert_eq!(lex.next(), Some(Ok(TokenKind::FloatLiteral)));
        assert_eq!(lex.slice(), "2.5e-3");
    }

    #[test]
    fn test_logos_strings() {
        let mut lex = TokenKind::lexer(r#"'hello' "world" 'it\'s'"#);
        assert_eq!(lex.next(), Some(Ok(TokenKind::SingleQuotedString)));
        assert_eq!(lex.slice(), "'hello'");
        assert_eq!(lex.next(), Some(Ok(TokenKind::DoubleQuotedString)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::SingleQuotedString)));
        assert_eq!(lex.slice(), r"'it\'s'");
    }

    #[test]
    fn test_logos_variable_includes_sigil() {
        let mut lex = TokenKind::lexer("$x $_foo $");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Variable)));
        assert_eq!(lex.slice(), "$x");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Variable)));
        assert_eq!(lex.slice(), "$_foo");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Dollar)));
    }

    #[test]
    fn test_logos_comments_skipped() {
        let mut lex = TokenKind::lexer("1 // line\n2 /* block */ 3 # hash\n4");
        for expected in ["1", "2", "3", "4"] {
            assert_eq!(lex.next(), Some(Ok(TokenKind::IntLiteral)));
            assert_eq!(lex.slice(), expected);
        }
        assert_eq!(lex.next(), None);
    }
}
