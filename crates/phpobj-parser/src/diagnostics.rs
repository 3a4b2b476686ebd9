use std::fmt;

use miette::{Diagnostic, LabeledSpan, NamedSource, Report};
use phpobj_ast::Span;
use phpobj_lexer::TokenKind;
use thiserror::Error;

/// The modifier families a member declaration may carry at most once each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierCategory {
    Abstract,
    Visibility,
    Final,
    Static,
}

impl fmt::Display for ModifierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModifierCategory::Abstract => "abstract",
            ModifierCategory::Visibility => "visibility",
            ModifierCategory::Final => "final",
            ModifierCategory::Static => "static",
        };
        f.write_str(name)
    }
}

/// A fatal parse error. The first one raised aborts the whole pass.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found} `{text}`")]
    Expected {
        expected: String,
        found: TokenKind,
        text: String,
        span: Span,
    },

    #[error("unclosed {delimiter} opened at {opened_at:?}")]
    UnclosedDelimiter {
        delimiter: String,
        opened_at: Span,
        span: Span,
    },

    #[error("expected expression, found {found}")]
    ExpectedExpression { found: TokenKind, span: Span },

    #[error("found multiple {modifier} declarations")]
    DuplicateModifier { modifier: ModifierCategory, span: Span },

    #[error("unexpected {found} `{text}` in class body")]
    UnexpectedClassMember {
        found: TokenKind,
        text: String,
        span: Span,
    },

    #[error("unexpected {found} `{text}` in interface body")]
    UnexpectedInterfaceMember {
        found: TokenKind,
        text: String,
        span: Span,
    },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Expected { span, .. }
            | ParseError::UnclosedDelimiter { span, .. }
            | ParseError::ExpectedExpression { span, .. }
            | ParseError::DuplicateModifier { span, .. }
            | ParseError::UnexpectedClassMember { span, .. }
            | ParseError::UnexpectedInterfaceMember { span, .. } => *span,
        }
    }

    /// Attach the source text so the error renders with a code excerpt.
    pub fn into_report(self, name: &str, source: &str) -> Report {
        Report::new(self).with_source_code(NamedSource::new(name, source.to_string()))
    }

    fn label(&self) -> &'static str {
        match self {
            ParseError::Expected { .. } => "unexpected token",
            ParseError::UnclosedDelimiter { .. } => "closing delimiter expected here",
            ParseError::ExpectedExpression { .. } => "expression expected here",
            ParseError::DuplicateModifier { .. } => "repeated modifier",
            ParseError::UnexpectedClassMember { .. } => "not a class member",
            ParseError::UnexpectedInterfaceMember { .. } => "not an interface member",
        }
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self {
            ParseError::Expected { .. } => "phpobj::expected",
            ParseError::UnclosedDelimiter { .. } => "phpobj::unclosed_delimiter",
            ParseError::ExpectedExpression { .. } => "phpobj::expected_expression",
            ParseError::DuplicateModifier { .. } => "phpobj::duplicate_modifier",
            ParseError::UnexpectedClassMember { .. } => "phpobj::class_member",
            ParseError::UnexpectedInterfaceMember { .. } => "phpobj::interface_member",
        };
        Some(Box::new(code))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let mut labels = vec![LabeledSpan::at(self.span().range(), self.label())];
        if let ParseError::UnclosedDelimiter { opened_at, .. } = self {
            labels.push(LabeledSpan::at(opened_at.range(), "opened here"));
        }
        Some(Box::new(labels.into_iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_modifier_message() {
        let err = ParseError::DuplicateModifier {
            modifier: ModifierCategory::Visibility,
            span: Span::new(7, 14),
        };
        assert_eq!(err.to_string(), "found multiple visibility declarations");
        assert_eq!(err.span(), Span::new(7, 14));
    }

    #[test]
    fn test_class_member_message_names_token() {
        let err = ParseError::UnexpectedClassMember {
            found: TokenKind::Echo,
            text: "echo".into(),
            span: Span::new(10, 14),
        };
        assert_eq!(err.to_string(), "unexpected 'echo' `echo` in class body");
    }

    #[test]
    fn test_diagnostic_code_and_labels() {
        let err = ParseError::UnclosedDelimiter {
            delimiter: "')'".into(),
            opened_at: Span::new(3, 4),
            span: Span::new(9, 9),
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("phpobj::unclosed_delimiter"));
        let labels: Vec<_> = err.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[1].offset(), 3);
    }

    #[test]
    fn test_into_report_keeps_message() {
        let err = ParseError::ExpectedExpression {
            found: TokenKind::Semicolon,
            span: Span::new(4, 5),
        };
        let report = err.into_report("input.php", "$a =;");
        assert_eq!(report.to_string(), "expected expression, found ';'");
    }
}
