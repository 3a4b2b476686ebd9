use phpobj_ast::*;
use phpobj_lexer::TokenKind;

use crate::decl;
use crate::diagnostics::ParseError;
use crate::expr;
use crate::parser::Parser;

/// Parse a single statement.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, ParseError> {
    match parser.current_kind() {
        TokenKind::Semicolon | TokenKind::OpenTag | TokenKind::CloseTag => {
            let span = parser.current_span();
            parser.advance();
            Ok(Stmt { kind: StmtKind::Nop, span })
        }
        TokenKind::InlineHtml => {
            let token = parser.advance();
            Ok(Stmt {
                kind: StmtKind::InlineHtml(parser.text(&token).to_string()),
                span: token.span,
            })
        }
        TokenKind::Echo => parse_echo(parser),
        TokenKind::Return => parse_return(parser),
        TokenKind::Throw => parse_throw(parser),
        TokenKind::LeftBrace => parse_block(parser),
        TokenKind::If => parse_if(parser),
        TokenKind::While => parse_while(parser),
        TokenKind::Try => parse_try_catch(parser),
        TokenKind::Function => {
            let start = parser.start_span();
            let function = parse_function_stmt(parser)?;
            Ok(Stmt {
                kind: StmtKind::Function(function),
                span: parser.end_span(start),
            })
        }
        TokenKind::Class | TokenKind::Abstract | TokenKind::Final => {
            let start = parser.start_span();
            let class = decl::parse_class(parser)?;
            Ok(Stmt {
                kind: StmtKind::Class(class),
                span: parser.end_span(start),
            })
        }
        TokenKind::Interface => {
            let start = parser.start_span();
            let interface = decl::parse_interface(parser)?;
            Ok(Stmt {
                kind: StmtKind::Interface(interface),
                span: parser.end_span(start),
            })
        }
        _ => parse_expression_stmt(parser),
    }
}

/// Parse `{ stmts }` as a block statement.
pub fn parse_block(parser: &mut Parser) -> Result<Stmt, ParseError> {
    let start = parser.start_span();
    let stmts = parse_body(parser)?;
    Ok(Stmt {
        kind: StmtKind::Block(stmts),
        span: parser.end_span(start),
    })
}

/// Parse `{ stmts }` and return the statements.
fn parse_body(parser: &mut Parser) -> Result<Vec<Stmt>, ParseError> {
    let open = parser.expect(TokenKind::LeftBrace)?;
    let mut stmts = Vec::new();
    while !parser.check(TokenKind::RightBrace) && !parser.check(TokenKind::Eof) {
        stmts.push(parse_stmt(parser)?);
    }
    parser.expect_closing(TokenKind::RightBrace, open.span)?;
    Ok(stmts)
}

/// Parse a statement or block (used as body of if/while)
fn parse_stmt_or_block(parser: &mut Parser) -> Result<Stmt, ParseError> {
    if parser.check(TokenKind::LeftBrace) {
        parse_block(parser)
    } else {
        parse_stmt(parser)
    }
}

fn parse_echo(parser: &mut Parser) -> Result<Stmt, ParseError> {
    let start = parser.start_span();
    parser.advance(); // consume 'echo'

    let mut exprs = vec![expr::parse_expr(parser)?];
    while parser.eat(TokenKind::Comma).is_some() {
        exprs.push(expr::parse_expr(parser)?);
    }
    parser.expect_semicolon()?;

    Ok(Stmt {
        kind: StmtKind::Echo(exprs),
        span: parser.end_span(start),
    })
}

fn parse_return(parser: &mut Parser) -> Result<Stmt, ParseError> {
    let start = parser.start_span();
    parser.advance(); // consume 'return'

    let value = if parser.check(TokenKind::Semicolon) || parser.check(TokenKind::CloseTag) {
        None
    } else {
        Some(expr::parse_expr(parser)?)
    };
    parser.expect_semicolon()?;

    Ok(Stmt {
        kind: StmtKind::Return(value),
        span: parser.end_span(start),
    })
}

fn parse_throw(parser: &mut Parser) -> Result<Stmt, ParseError> {
    let start = parser.start_span();
    parser.advance(); // consume 'throw'
    let value = expr::parse_expr(parser)?;
    parser.expect_semicolon()?;
    Ok(Stmt {
        kind: StmtKind::Throw(value),
        span: parser.end_span(start),
    })
}

/// Parse `(condition)`.
fn parse_condition(parser: &mut Parser) -> Result<Expr, ParseError> {
    let open = parser.expect(TokenKind::LeftParen)?;
    let condition = expr::parse_expr(parser)?;
    parser.expect_closing(TokenKind::RightParen, open.span)?;
    Ok(condition)
}

/// `if`/`elseif` share this path; an `elseif` becomes a nested if in the else branch.
fn parse_if(parser: &mut Parser) -> Result<Stmt, ParseError> {
    let start = parser.start_span();
    parser.advance(); // consume 'if' or 'elseif'

    let condition = parse_condition(parser)?;
    let then_branch = Box::new(parse_stmt_or_block(parser)?);

    let else_branch = if parser.check(TokenKind::ElseIf) {
        Some(Box::new(parse_if(parser)?))
    } else if parser.eat(TokenKind::Else).is_some() {
        Some(Box::new(parse_stmt_or_block(parser)?))
    } else {
        None
    };

    Ok(Stmt {
        kind: StmtKind::If(IfStmt {
            condition,
            then_branch,
            else_branch,
        }),
        span: parser.end_span(start),
    })
}

fn parse_while(parser: &mut Parser) -> Result<Stmt, ParseError> {
    let start = parser.start_span();
    parser.advance(); // consume 'while'
    let condition = parse_condition(parser)?;
    let body = Box::new(parse_stmt_or_block(parser)?);
    Ok(Stmt {
        kind: StmtKind::While(WhileStmt { condition, body }),
        span: parser.end_span(start),
    })
}

fn parse_try_catch(parser: &mut Parser) -> Result<Stmt, ParseError> {
    let start = parser.start_span();
    parser.advance(); // consume 'try'
    let body = parse_body(parser)?;

    let mut catches = Vec::new();
    while parser.check(TokenKind::Catch) {
        let catch_start = parser.start_span();
        parser.advance();
        let open = parser.expect(TokenKind::LeftParen)?;

        let mut types = vec![parse_type_name(parser)?];
        while parser.eat(TokenKind::Pipe).is_some() {
            types.push(parse_type_name(parser)?);
        }
        let var = parser
            .eat(TokenKind::Variable)
            .map(|token| parser.text(&token).to_string());
        parser.expect_closing(TokenKind::RightParen, open.span)?;

        let body = parse_body(parser)?;
        catches.push(CatchClause {
            types,
            var,
            body,
            span: parser.end_span(catch_start),
        });
    }

    let finally = if parser.eat(TokenKind::Finally).is_some() {
        Some(parse_body(parser)?)
    } else {
        None
    };

    if catches.is_empty() && finally.is_none() {
        return Err(parser.unexpected("'catch' or 'finally'"));
    }

    Ok(Stmt {
        kind: StmtKind::TryCatch(TryCatchStmt { body, catches, finally }),
        span: parser.end_span(start),
    })
}

fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, ParseError> {
    let start = parser.start_span();
    let value = expr::parse_expr(parser)?;
    parser.expect_semicolon()?;
    Ok(Stmt {
        kind: StmtKind::Expression(value),
        span: parser.end_span(start),
    })
}

// =============================================================================
// Functions
// =============================================================================

/// Parse `function [&]name(params)[: type]`, stopping before any body.
pub fn parse_function_definition(parser: &mut Parser) -> Result<FunctionDefinition, ParseError> {
    let start = parser.start_span();
    parser.expect(TokenKind::Function)?;

    let by_ref = parser.eat(TokenKind::Ampersand).is_some();
    let (name, _) = parser.expect_identifier_or_keyword()?;

    let open = parser.expect(TokenKind::LeftParen)?;
    let params = parse_param_list(parser)?;
    parser.expect_closing(TokenKind::RightParen, open.span)?;

    let return_type = if parser.eat(TokenKind::Colon).is_some() {
        Some(parse_type(parser)?)
    } else {
        None
    };

    Ok(FunctionDefinition {
        name,
        params,
        by_ref,
        return_type,
        span: parser.end_span(start),
    })
}

/// Parse a function definition followed by its `{ body }`.
pub fn parse_function_stmt(parser: &mut Parser) -> Result<FunctionStmt, ParseError> {
    let definition = parse_function_definition(parser)?;
    let body = parse_body(parser)?;
    Ok(FunctionStmt { definition, body })
}

fn parse_param_list(parser: &mut Parser) -> Result<Vec<Param>, ParseError> {
    let mut params = Vec::new();
    while !parser.check(TokenKind::RightParen) {
        let start = parser.start_span();

        let type_hint = if matches!(
            parser.current_kind(),
            TokenKind::Variable | TokenKind::Ampersand | TokenKind::Ellipsis
        ) {
            None
        } else {
            Some(parse_type(parser)?)
        };
        let by_ref = parser.eat(TokenKind::Ampersand).is_some();
        let variadic = parser.eat(TokenKind::Ellipsis).is_some();

        let name_token = parser.expect(TokenKind::Variable)?;
        let name = parser.text(&name_token).to_string();

        let default = if parser.eat(TokenKind::Equals).is_some() {
            Some(expr::parse_expr(parser)?)
        } else {
            None
        };

        params.push(Param {
            name,
            type_hint,
            by_ref,
            variadic,
            default,
            span: parser.end_span(start),
        });

        if parser.eat(TokenKind::Comma).is_none() {
            break;
        }
    }
    Ok(params)
}

/// Parse a type: `?T`, `A|B`, or a single name, kept as written.
fn parse_type(parser: &mut Parser) -> Result<String, ParseError> {
    let mut text = String::new();
    if parser.eat(TokenKind::Question).is_some() {
        text.push('?');
    }
    text.push_str(&parse_type_name(parser)?);
    while parser.eat(TokenKind::Pipe).is_some() {
        text.push('|');
        text.push_str(&parse_type_name(parser)?);
    }
    Ok(text)
}

fn parse_type_name(parser: &mut Parser) -> Result<String, ParseError> {
    match parser.current_kind() {
        TokenKind::Identifier | TokenKind::Backslash => {
            let name = expr::parse_operand(parser)?;
            match name.kind {
                ExprKind::Identifier(text) => Ok(text),
                _ => Err(parser.unexpected("type")),
            }
        }
        TokenKind::Array
        | TokenKind::Self_
        | TokenKind::Static
        | TokenKind::Parent_
        | TokenKind::Null
        | TokenKind::False
        | TokenKind::True => {
            let token = parser.advance();
            Ok(parser.text(&token).to_string())
        }
        _ => Err(parser.unexpected("type")),
    }
}
