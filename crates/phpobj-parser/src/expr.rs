use phpobj_ast::*;
use phpobj_lexer::TokenKind;

use crate::decl;
use crate::diagnostics::ParseError;
use crate::member;
use crate::parser::Parser;
use crate::precedence::{self, ASSIGNMENT_BP, MEMBER_BP};

/// Parse an expression.
pub fn parse_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    parse_expr_bp(parser, 0)
}

/// Pratt expression parser. Parses expressions with binding power >= min_bp.
pub fn parse_expr_bp(parser: &mut Parser, min_bp: u8) -> Result<Expr, ParseError> {
    let lhs = parse_atom(parser)?;
    parse_operation(parser, min_bp, lhs)
}

/// Continue an expression from an already parsed left-hand side, folding in
/// every postfix and infix operator that binds at least as tightly as `min_bp`.
pub fn parse_operation(parser: &mut Parser, min_bp: u8, mut lhs: Expr) -> Result<Expr, ParseError> {
    loop {
        let kind = parser.current_kind();

        // Postfix ++ / --
        if let Some(left_bp) = precedence::postfix_binding_power(&kind) {
            if left_bp < min_bp {
                break;
            }
            let op_token = parser.advance();
            let op = if op_token.kind == TokenKind::PlusPlus {
                UnaryPostfixOp::PostIncrement
            } else {
                UnaryPostfixOp::PostDecrement
            };
            let span = lhs.span.merge(op_token.span);
            lhs = Expr {
                kind: ExprKind::UnaryPostfix(UnaryPostfixExpr {
                    operand: Box::new(lhs),
                    op,
                }),
                span,
            };
            continue;
        }

        // Assignment operators (right-associative)
        if let Some(op) = assign_op(kind) {
            if ASSIGNMENT_BP < min_bp {
                break;
            }
            parser.advance();
            let rhs = parse_expr_bp(parser, ASSIGNMENT_BP)?;
            let span = lhs.span.merge(rhs.span);
            lhs = Expr {
                kind: ExprKind::Assign(AssignExpr {
                    target: Box::new(lhs),
                    op,
                    value: Box::new(rhs),
                }),
                span,
            };
            continue;
        }

        // Object operator: the resolver folds in everything that follows
        if kind == TokenKind::Arrow {
            if MEMBER_BP < min_bp {
                break;
            }
            return member::parse_object_lookup(parser, lhs, min_bp);
        }

        // Class member: Class::CONST, Class::method(), Class::class
        if kind == TokenKind::DoubleColon {
            if MEMBER_BP < min_bp {
                break;
            }
            lhs = parse_static_member(parser, lhs)?;
            continue;
        }

        // Function call: name(args)
        if kind == TokenKind::LeftParen {
            if MEMBER_BP < min_bp {
                break;
            }
            let start = lhs.span.start;
            let call = parse_function_call(parser, lhs)?;
            lhs = Expr {
                kind: ExprKind::FunctionCall(call),
                span: parser.end_span(start),
            };
            continue;
        }

        // Infix binary operators
        if let Some((left_bp, right_bp)) = precedence::infix_binding_power(&kind) {
            if left_bp < min_bp {
                break;
            }
            let op_token = parser.advance();
            let op = binary_op(op_token.kind);
            let rhs = parse_expr_bp(parser, right_bp)?;
            let span = lhs.span.merge(rhs.span);
            lhs = Expr {
                kind: ExprKind::Binary(BinaryExpr {
                    left: Box::new(lhs),
                    op,
                    right: Box::new(rhs),
                }),
                span,
            };
            continue;
        }

        break;
    }

    Ok(lhs)
}

/// Parse a single operand naming a class or callee: a (possibly qualified)
/// identifier, a variable, `self`/`static`/`parent`, or a parenthesized
/// expression. No operators are folded in.
pub fn parse_operand(parser: &mut Parser) -> Result<Expr, ParseError> {
    match parser.current_kind() {
        TokenKind::Identifier | TokenKind::Backslash => parse_qualified_name(parser),
        TokenKind::Variable => {
            let token = parser.advance();
            let name = &parser.text(&token)[1..];
            Ok(Expr {
                kind: ExprKind::Variable(Variable::new(name)),
                span: token.span,
            })
        }
        TokenKind::Dollar => parse_variable_variable(parser),
        TokenKind::Self_ | TokenKind::Static | TokenKind::Parent_ => {
            let token = parser.advance();
            Ok(Expr {
                kind: ExprKind::Identifier(parser.text(&token).to_ascii_lowercase()),
                span: token.span,
            })
        }
        TokenKind::LeftParen => {
            let start = parser.start_span();
            let open = parser.advance();
            let inner = parse_expr(parser)?;
            parser.expect_closing(TokenKind::RightParen, open.span)?;
            Ok(Expr {
                kind: ExprKind::Parenthesized(Box::new(inner)),
                span: parser.end_span(start),
            })
        }
        found => Err(ParseError::ExpectedExpression {
            found,
            span: parser.current_span(),
        }),
    }
}

/// `$$name`, `$$$name` or `${expr}`. The current token must be `$`.
pub fn parse_variable_variable(parser: &mut Parser) -> Result<Expr, ParseError> {
    let start = parser.start_span();
    parser.expect_current(TokenKind::Dollar)?;
    parser.advance();

    let name = match parser.current_kind() {
        TokenKind::LeftBrace => {
            let open = parser.advance();
            let inner = parse_expr(parser)?;
            parser.expect_closing(TokenKind::RightBrace, open.span)?;
            inner
        }
        TokenKind::Variable | TokenKind::Dollar => parse_operand(parser)?,
        _ => return Err(parser.unexpected("variable")),
    };
    Ok(Expr {
        kind: ExprKind::VariableVariable(Box::new(name)),
        span: parser.end_span(start),
    })
}

/// `Foo`, `Foo\Bar` or `\Foo\Bar`, kept as a single identifier string.
fn parse_qualified_name(parser: &mut Parser) -> Result<Expr, ParseError> {
    let (name, span) = parser.expect_name()?;
    Ok(Expr {
        kind: ExprKind::Identifier(name),
        span,
    })
}

fn parse_atom(parser: &mut Parser) -> Result<Expr, ParseError> {
    let kind = parser.current_kind();

    if let Some(right_bp) = precedence::prefix_binding_power(&kind) {
        let op_token = parser.advance();
        let operand = parse_expr_bp(parser, right_bp)?;
        let op = match op_token.kind {
            TokenKind::Minus => UnaryPrefixOp::Negate,
            TokenKind::Plus => UnaryPrefixOp::Plus,
            TokenKind::Bang => UnaryPrefixOp::BooleanNot,
            TokenKind::Tilde => UnaryPrefixOp::BitwiseNot,
            TokenKind::At => UnaryPrefixOp::ErrorSuppress,
            TokenKind::PlusPlus => UnaryPrefixOp::PreIncrement,
            _ => UnaryPrefixOp::PreDecrement,
        };
        let span = op_token.span.merge(operand.span);
        return Ok(Expr {
            kind: ExprKind::UnaryPrefix(UnaryPrefixExpr {
                op,
                operand: Box::new(operand),
            }),
            span,
        });
    }

    match kind {
        TokenKind::IntLiteral => {
            let token = parser.advance();
            let clean: String = parser.text(&token).chars().filter(|c| *c != '_').collect();
            // Out-of-range integers become floats
            let kind = match clean.parse::<i64>() {
                Ok(value) => ExprKind::Int(value),
                Err(_) => ExprKind::Float(clean.parse::<f64>().unwrap_or(f64::INFINITY)),
            };
            Ok(Expr { kind, span: token.span })
        }
        TokenKind::FloatLiteral => {
            let token = parser.advance();
            let clean: String = parser.text(&token).chars().filter(|c| *c != '_').collect();
            Ok(Expr {
                kind: ExprKind::Float(clean.parse::<f64>().unwrap_or(0.0)),
                span: token.span,
            })
        }
        TokenKind::SingleQuotedString | TokenKind::DoubleQuotedString => {
            let token = parser.advance();
            let text = parser.text(&token);
            Ok(Expr {
                kind: ExprKind::String(text[1..text.len() - 1].to_string()),
                span: token.span,
            })
        }
        TokenKind::True | TokenKind::False => {
            let token = parser.advance();
            Ok(Expr {
                kind: ExprKind::Bool(kind == TokenKind::True),
                span: token.span,
            })
        }
        TokenKind::Null => {
            let token = parser.advance();
            Ok(Expr {
                kind: ExprKind::Null,
                span: token.span,
            })
        }
        TokenKind::New => decl::parse_instantiation(parser),
        TokenKind::Clone => {
            let token = parser.advance();
            let operand = parse_expr_bp(parser, 41)?;
            let span = token.span.merge(operand.span);
            Ok(Expr {
                kind: ExprKind::Clone(Box::new(operand)),
                span,
            })
        }
        TokenKind::LeftBracket => {
            let start = parser.start_span();
            let open = parser.advance();
            let elements = parse_array_elements(parser, TokenKind::RightBracket, open.span)?;
            Ok(Expr {
                kind: ExprKind::Array(elements),
                span: parser.end_span(start),
            })
        }
        TokenKind::Array => {
            let start = parser.start_span();
            parser.advance();
            let open = parser.expect(TokenKind::LeftParen)?;
            let elements = parse_array_elements(parser, TokenKind::RightParen, open.span)?;
            Ok(Expr {
                kind: ExprKind::Array(elements),
                span: parser.end_span(start),
            })
        }
        _ => parse_operand(parser),
    }
}

fn parse_array_elements(
    parser: &mut Parser,
    close: TokenKind,
    opened_at: Span,
) -> Result<Vec<ArrayElement>, ParseError> {
    let mut elements = Vec::new();
    while !parser.check(close) {
        let start = parser.start_span();
        let first = parse_expr(parser)?;
        let element = if parser.eat(TokenKind::FatArrow).is_some() {
            let value = parse_expr(parser)?;
            ArrayElement {
                key: Some(first),
                value,
                span: parser.end_span(start),
            }
        } else {
            ArrayElement {
                key: None,
                value: first,
                span: parser.end_span(start),
            }
        };
        elements.push(element);
        if parser.eat(TokenKind::Comma).is_none() {
            break;
        }
    }
    parser.expect_closing(close, opened_at)?;
    Ok(elements)
}

fn parse_static_member(parser: &mut Parser, class: Expr) -> Result<Expr, ParseError> {
    let start = class.span.start;
    parser.advance(); // consume ::
    let (member, _) = parser.expect_identifier_or_keyword()?;

    if parser.check(TokenKind::LeftParen) {
        let args = parse_arg_list(parser)?;
        return Ok(Expr {
            kind: ExprKind::StaticMethodCall(StaticMethodCallExpr {
                class: Box::new(class),
                method: member,
                args,
            }),
            span: parser.end_span(start),
        });
    }

    Ok(Expr {
        kind: ExprKind::ClassConstAccess(StaticAccessExpr {
            class: Box::new(class),
            member,
        }),
        span: parser.end_span(start),
    })
}

/// Parse `(arg, arg, ...)`. The current token must be `(`. A trailing comma
/// is accepted; a missing `)` is reported against the opening parenthesis.
pub fn parse_arg_list(parser: &mut Parser) -> Result<Vec<Expr>, ParseError> {
    let open = parser.expect(TokenKind::LeftParen)?;
    let mut args = Vec::new();
    while !parser.check(TokenKind::RightParen) {
        args.push(parse_expr(parser)?);
        if parser.eat(TokenKind::Comma).is_none() {
            break;
        }
    }
    parser.expect_closing(TokenKind::RightParen, open.span)?;
    Ok(args)
}

/// Parse the argument list following `callee`.
pub fn parse_function_call(parser: &mut Parser, callee: Expr) -> Result<FunctionCallExpr, ParseError> {
    let args = parse_arg_list(parser)?;
    Ok(FunctionCallExpr {
        name: Box::new(callee),
        args,
    })
}

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    let op = match kind {
        TokenKind::Equals => AssignOp::Assign,
        TokenKind::PlusEquals => AssignOp::Plus,
        TokenKind::MinusEquals => AssignOp::Minus,
        TokenKind::StarEquals => AssignOp::Mul,
        TokenKind::SlashEquals => AssignOp::Div,
        TokenKind::DotEquals => AssignOp::Concat,
        _ => return None,
    };
    Some(op)
}

fn binary_op(kind: TokenKind) -> BinaryOp {
    match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::StarStar => BinaryOp::Pow,
        TokenKind::Dot => BinaryOp::Concat,
        TokenKind::EqualsEquals => BinaryOp::Equal,
        TokenKind::BangEquals => BinaryOp::NotEqual,
        TokenKind::EqualsEqualsEquals => BinaryOp::Identical,
        TokenKind::BangEqualsEquals => BinaryOp::NotIdentical,
        TokenKind::LessThan => BinaryOp::Less,
        TokenKind::GreaterThan => BinaryOp::Greater,
        TokenKind::LessThanEquals => BinaryOp::LessOrEqual,
        TokenKind::GreaterThanEquals => BinaryOp::GreaterOrEqual,
        TokenKind::AmpersandAmpersand => BinaryOp::BooleanAnd,
        TokenKind::PipePipe => BinaryOp::BooleanOr,
        TokenKind::Ampersand => BinaryOp::BitwiseAnd,
        TokenKind::Pipe => BinaryOp::BitwiseOr,
        TokenKind::Caret => BinaryOp::BitwiseXor,
        TokenKind::And => BinaryOp::LogicalAnd,
        TokenKind::Or => BinaryOp::LogicalOr,
        TokenKind::Xor => BinaryOp::LogicalXor,
        TokenKind::QuestionQuestion => BinaryOp::Coalesce,
        TokenKind::Instanceof => BinaryOp::Instanceof,
        _ => unreachable!("not a binary operator: {:?}", kind),
    }
}
