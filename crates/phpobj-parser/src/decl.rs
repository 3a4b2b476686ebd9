//! Class, interface and instantiation parsing.

use phpobj_ast::*;
use phpobj_lexer::TokenKind;

use crate::diagnostics::{ModifierCategory, ParseError};
use crate::expr::{parse_arg_list, parse_expr, parse_operand};
use crate::modifiers::{parse_class_member_settings, parse_visibility, MemberModifiers};
use crate::parser::Parser;
use crate::stmt::{parse_function_definition, parse_function_stmt};

// =============================================================================
// Builders
// =============================================================================

/// Collects the members of a class body while it is being parsed.
#[derive(Debug)]
pub struct ClassBuilder {
    name: String,
    modifiers: ClassModifiers,
    extends: Option<String>,
    implements: Vec<String>,
    methods: Vec<Method>,
    properties: Vec<Property>,
    constants: Vec<Constant>,
}

impl ClassBuilder {
    pub fn new(name: impl Into<String>, modifiers: ClassModifiers) -> Self {
        Self {
            name: name.into(),
            modifiers,
            extends: None,
            implements: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            constants: Vec::new(),
        }
    }

    pub fn extends(&mut self, parent: impl Into<String>) -> &mut Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn implements(&mut self, interfaces: Vec<String>) -> &mut Self {
        self.implements = interfaces;
        self
    }

    pub fn add_method(&mut self, method: Method) -> &mut Self {
        self.methods.push(method);
        self
    }

    pub fn add_property(&mut self, property: Property) -> &mut Self {
        self.properties.push(property);
        self
    }

    pub fn add_constant(&mut self, constant: Constant) -> &mut Self {
        self.constants.push(constant);
        self
    }

    pub fn build(self) -> ClassDecl {
        ClassDecl {
            name: self.name,
            modifiers: self.modifiers,
            extends: self.extends,
            implements: self.implements,
            methods: self.methods,
            properties: self.properties,
            constants: self.constants,
        }
    }
}

/// Collects the signatures of an interface body.
#[derive(Debug)]
pub struct InterfaceBuilder {
    name: String,
    inherits: Vec<String>,
    methods: Vec<Method>,
}

impl InterfaceBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inherits: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn inherits(&mut self, interfaces: Vec<String>) -> &mut Self {
        self.inherits = interfaces;
        self
    }

    pub fn add_method(&mut self, method: Method) -> &mut Self {
        self.methods.push(method);
        self
    }

    pub fn build(self) -> InterfaceDecl {
        InterfaceDecl {
            name: self.name,
            inherits: self.inherits,
            methods: self.methods,
        }
    }
}

// =============================================================================
// Instantiation
// =============================================================================

/// Parse `new Operand[(args)]`. The current token must be `new`.
/// Without parentheses the argument list is empty.
pub fn parse_instantiation(parser: &mut Parser) -> Result<Expr, ParseError> {
    tracing::trace!(pos = parser.start_span(), "parse_instantiation");
    let start = parser.start_span();
    parser.expect_current(TokenKind::New)?;
    parser.advance();

    let class = parse_operand(parser)?;
    let args = if parser.check(TokenKind::LeftParen) {
        parse_arg_list(parser)?
    } else {
        Vec::new()
    };

    Ok(Expr {
        kind: ExprKind::New(NewExpr {
            class: Box::new(class),
            args,
        }),
        span: parser.end_span(start),
    })
}

// =============================================================================
// Classes
// =============================================================================

/// Parse `[abstract|final]* class Name [extends P] [implements A, B] { members }`.
pub fn parse_class(parser: &mut Parser) -> Result<ClassDecl, ParseError> {
    tracing::trace!(pos = parser.start_span(), "parse_class");

    let mut modifiers = ClassModifiers::default();
    loop {
        let span = parser.current_span();
        let (seen, category) = match parser.current_kind() {
            TokenKind::Abstract => (&mut modifiers.is_abstract, ModifierCategory::Abstract),
            TokenKind::Final => (&mut modifiers.is_final, ModifierCategory::Final),
            _ => break,
        };
        if *seen {
            return Err(ParseError::DuplicateModifier {
                modifier: category,
                span,
            });
        }
        *seen = true;
        parser.advance();
    }

    parser.expect(TokenKind::Class)?;
    let (name, _) = parser.expect_identifier()?;
    let mut builder = ClassBuilder::new(name, modifiers);

    if parser.eat(TokenKind::Extends).is_some() {
        builder.extends(parser.expect_name()?.0);
    }
    if parser.eat(TokenKind::Implements).is_some() {
        builder.implements(parser.parse_name_list()?);
    }

    let open = parser.expect(TokenKind::LeftBrace)?;
    parse_class_fields(parser, &mut builder)?;
    parser.expect_closing(TokenKind::RightBrace, open.span)?;

    Ok(builder.build())
}

/// Parse class members up to (not including) the closing `}`.
pub fn parse_class_fields(parser: &mut Parser, builder: &mut ClassBuilder) -> Result<(), ParseError> {
    tracing::trace!(pos = parser.start_span(), "parse_class_fields");

    while !parser.check(TokenKind::RightBrace) && !parser.check(TokenKind::Eof) {
        let start = parser.start_span();
        let modifiers = parse_class_member_settings(parser)?;

        match parser.current_kind() {
            TokenKind::Function => {
                let method = parse_method(parser, modifiers, start)?;
                builder.add_method(method);
            }
            TokenKind::Var => {
                parser.advance();
                let property = parse_property(parser, modifiers, start)?;
                builder.add_property(property);
            }
            TokenKind::Variable => {
                let property = parse_property(parser, modifiers, start)?;
                builder.add_property(property);
            }
            TokenKind::Const => {
                let constant = parse_constant(parser, start)?;
                builder.add_constant(constant);
            }
            found => {
                return Err(ParseError::UnexpectedClassMember {
                    found,
                    text: parser.current_text().to_string(),
                    span: parser.current_span(),
                })
            }
        }
    }
    Ok(())
}

fn parse_method(parser: &mut Parser, modifiers: MemberModifiers, start: u32) -> Result<Method, ParseError> {
    let function = if modifiers.is_abstract {
        let definition = parse_function_definition(parser)?;
        parser.expect_semicolon()?;
        MethodFunction::Signature(definition)
    } else {
        MethodFunction::Body(parse_function_stmt(parser)?)
    };

    Ok(Method {
        visibility: modifiers.visibility,
        is_static: modifiers.is_static,
        is_final: modifiers.is_final,
        function,
        span: parser.end_span(start),
    })
}

fn parse_property(parser: &mut Parser, modifiers: MemberModifiers, start: u32) -> Result<Property, ParseError> {
    let token = parser.expect(TokenKind::Variable)?;
    let name = parser.text(&token).to_string();
    let initialization = parse_initializer(parser)?;
    parser.expect_semicolon()?;

    Ok(Property {
        visibility: modifiers.visibility,
        is_static: modifiers.is_static,
        name,
        initialization,
        span: parser.end_span(start),
    })
}

fn parse_constant(parser: &mut Parser, start: u32) -> Result<Constant, ParseError> {
    parser.advance(); // consume 'const'
    let (name, _) = parser.expect_identifier_or_keyword()?;
    let value = parse_initializer(parser)?;
    parser.expect_semicolon()?;

    Ok(Constant {
        variable: Variable::new(name),
        value,
        span: parser.end_span(start),
    })
}

fn parse_initializer(parser: &mut Parser) -> Result<Option<Expr>, ParseError> {
    if parser.eat(TokenKind::Equals).is_some() {
        Ok(Some(parse_expr(parser)?))
    } else {
        Ok(None)
    }
}

// =============================================================================
// Interfaces
// =============================================================================

/// Parse `interface Name [extends A, B] { signatures }`.
pub fn parse_interface(parser: &mut Parser) -> Result<InterfaceDecl, ParseError> {
    tracing::trace!(pos = parser.start_span(), "parse_interface");

    parser.expect(TokenKind::Interface)?;
    let (name, _) = parser.expect_identifier()?;
    let mut builder = InterfaceBuilder::new(name);

    if parser.eat(TokenKind::Extends).is_some() {
        builder.inherits(parser.parse_name_list()?);
    }

    let open = parser.expect(TokenKind::LeftBrace)?;
    while !parser.check(TokenKind::RightBrace) && !parser.check(TokenKind::Eof) {
        let start = parser.start_span();
        let visibility = parse_visibility(parser).unwrap_or_default();
        let is_static = parser.eat(TokenKind::Static).is_some();

        if !parser.check(TokenKind::Function) {
            return Err(ParseError::UnexpectedInterfaceMember {
                found: parser.current_kind(),
                text: parser.current_text().to_string(),
                span: parser.current_span(),
            });
        }
        let definition = parse_function_definition(parser)?;
        parser.expect_semicolon()?;

        builder.add_method(Method {
            visibility,
            is_static,
            is_final: false,
            function: MethodFunction::Signature(definition),
            span: parser.end_span(start),
        });
    }
    parser.expect_closing(TokenKind::RightBrace, open.span)?;

    Ok(builder.build())
}
