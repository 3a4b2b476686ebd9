use phpobj_ast::Visibility;
use phpobj_lexer::TokenKind;

use crate::diagnostics::{ModifierCategory, ParseError};
use crate::parser::Parser;

/// Modifiers collected in front of a class member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberModifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
}

/// Consume a single visibility keyword if one is current.
pub fn parse_visibility(parser: &mut Parser) -> Option<Visibility> {
    let visibility = match parser.current_kind() {
        TokenKind::Public => Visibility::Public,
        TokenKind::Private => Visibility::Private,
        TokenKind::Protected => Visibility::Protected,
        _ => return None,
    };
    parser.advance();
    Some(visibility)
}

/// Consume `abstract`, a visibility, `final` and `static` in any order, each at
/// most once. Stops at the first other token and leaves it current.
pub fn parse_class_member_settings(parser: &mut Parser) -> Result<MemberModifiers, ParseError> {
    let mut modifiers = MemberModifiers::default();
    let mut found_visibility = false;

    loop {
        let span = parser.current_span();
        let (seen, category) = match parser.current_kind() {
            TokenKind::Abstract => (&mut modifiers.is_abstract, ModifierCategory::Abstract),
            TokenKind::Public | TokenKind::Private | TokenKind::Protected => {
                (&mut found_visibility, ModifierCategory::Visibility)
            }
            TokenKind::Final => (&mut modifiers.is_final, ModifierCategory::Final),
            TokenKind::Static => (&mut modifiers.is_static, ModifierCategory::Static),
            _ => return Ok(modifiers),
        };
        if *seen {
            return Err(ParseError::DuplicateModifier {
                modifier: category,
                span,
            });
        }
        *seen = true;

        if category == ModifierCategory::Visibility {
            if let Some(visibility) = parse_visibility(parser) {
                modifiers.visibility = visibility;
            }
        } else {
            parser.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(source: &str) -> Result<MemberModifiers, ParseError> {
        let mut parser = Parser::new(source);
        let modifiers = parse_class_member_settings(&mut parser)?;
        assert_eq!(parser.current_kind(), TokenKind::Function, "stopped early in {source:?}");
        Ok(modifiers)
    }

    #[test]
    fn test_no_modifiers_defaults_to_public() {
        assert_eq!(settings("function").unwrap(), MemberModifiers::default());
        assert_eq!(MemberModifiers::default().visibility, Visibility::Public);
    }

    #[test]
    fn test_any_order() {
        let expected = MemberModifiers {
            visibility: Visibility::Protected,
            is_static: true,
            is_final: true,
            is_abstract: true,
        };
        for source in [
            "abstract protected final static function",
            "static final protected abstract function",
            "final abstract static protected function",
            "protected static abstract final function",
        ] {
            assert_eq!(settings(source).unwrap(), expected, "{source}");
        }
    }

    fn orderings<'a>(words: &[&'a str]) -> Vec<Vec<&'a str>> {
        if words.len() <= 1 {
            return vec![words.to_vec()];
        }
        let mut all = Vec::new();
        for (i, first) in words.iter().enumerate() {
            let mut rest = words.to_vec();
            rest.remove(i);
            for mut tail in orderings(&rest) {
                tail.insert(0, *first);
                all.push(tail);
            }
        }
        all
    }

    #[test]
    fn test_every_ordering_of_all_four_categories() {
        let mut checked = 0;
        for (word, visibility) in [
            ("public", Visibility::Public),
            ("protected", Visibility::Protected),
            ("private", Visibility::Private),
        ] {
            let expected = MemberModifiers {
                visibility,
                is_static: true,
                is_final: true,
                is_abstract: true,
            };
            for order in orderings(&["abstract", word, "final", "static"]) {
                let source = format!("{} function", order.join(" "));
                assert_eq!(settings(&source).unwrap(), expected, "{source}");
                checked += 1;
            }
        }
        assert_eq!(checked, 72);
    }

    #[test]
    fn test_each_category_at_most_once() {
        let cases = [
            ("abstract abstract function", ModifierCategory::Abstract),
            ("public private function", ModifierCategory::Visibility),
            ("private static private function", ModifierCategory::Visibility),
            ("final static final function", ModifierCategory::Final),
            ("static public static function", ModifierCategory::Static),
        ];
        for (source, category) in cases {
            match settings(source) {
                Err(ParseError::DuplicateModifier { modifier, .. }) => assert_eq!(modifier, category, "{source}"),
                other => panic!("expected duplicate modifier for {source}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_duplicate_points_at_second_occurrence() {
        let mut parser = Parser::new("static static function");
        let err = parse_class_member_settings(&mut parser).unwrap_err();
        assert_eq!(err.span().start, 7);
    }

    #[test]
    fn test_parse_visibility_optional() {
        let mut parser = Parser::new("private function");
        assert_eq!(parse_visibility(&mut parser), Some(Visibility::Private));
        assert_eq!(parse_visibility(&mut parser), None);
        assert!(parser.check(TokenKind::Function));
    }
}
