use phpobj_ast::*;
use phpobj_lexer::TokenKind;

use crate::diagnostics::ParseError;
use crate::expr::{parse_expr, parse_function_call, parse_operation, parse_variable_variable};
use crate::parser::Parser;

/// Resolve `receiver->member`. The current token must be `->`.
///
/// The member name is `{expr}`, a variable, a variable variable such as
/// `$$name`, or an identifier (keywords are accepted as names here). A `(` right after the name turns the access into a
/// method call whose callee is that name. Whatever follows is folded in by
/// [`parse_operation`] at the caller's binding power, so `$a->b() + 1` and
/// `$a->b->c` keep binding to the right.
pub fn parse_object_lookup(parser: &mut Parser, receiver: Expr, min_bp: u8) -> Result<Expr, ParseError> {
    tracing::trace!(pos = parser.start_span(), "parse_object_lookup");
    parser.expect_current(TokenKind::Arrow)?;
    parser.advance();

    let name = match parser.current_kind() {
        TokenKind::LeftBrace => {
            let open = parser.advance();
            let inner = parse_expr(parser)?;
            parser.expect_closing(TokenKind::RightBrace, open.span)?;
            inner
        }
        TokenKind::Variable => {
            let token = parser.advance();
            Expr {
                kind: ExprKind::Variable(Variable::new(&parser.text(&token)[1..])),
                span: token.span,
            }
        }
        TokenKind::Dollar => parse_variable_variable(parser)?,
        _ => match parser.eat_identifier_or_keyword() {
            Some((text, span)) => Expr {
                kind: ExprKind::Identifier(text),
                span,
            },
            None => return Err(parser.unexpected("member name")),
        },
    };

    let start = receiver.span.start;
    let kind = if parser.check(TokenKind::LeftParen) {
        ExprKind::MethodCall(MethodCallExpr {
            receiver: Box::new(receiver),
            call: parse_function_call(parser, name)?,
        })
    } else {
        ExprKind::PropertyAccess(PropertyAccessExpr {
            receiver: Box::new(receiver),
            name: Box::new(name),
        })
    };
    let expr = Expr {
        kind,
        span: parser.end_span(start),
    };

    parse_operation(parser, min_bp, expr)
}
