use std::io::{self, Write};

use phpobj_ast::*;
use phpobj_lexer::TokenKind;

use crate::config::PrinterConfig;
use crate::lexeme::lexeme;

/// Stand-in for every expression; only statement and declaration structure is rendered.
pub const EXPRESSION: &str = "<expression>";

/// Writes normalized source text for statements into `out`.
///
/// Every statement starts at the current indentation and ends with a newline.
/// Bodies are printed one level deeper than their owner.
pub struct Printer<'c, W: Write> {
    out: W,
    config: &'c PrinterConfig,
    depth: usize,
}

impl<'c, W: Write> Printer<'c, W> {
    pub fn new(out: W, config: &'c PrinterConfig) -> Self {
        Self { out, config, depth: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn walk(&mut self, stmt: &Stmt) -> io::Result<()> {
        match &stmt.kind {
            StmtKind::If(if_stmt) => self.walk_if(if_stmt),
            StmtKind::While(while_stmt) => {
                self.print_indent()?;
                self.print_token(TokenKind::While)?;
                self.print(" ")?;
                self.print_condition()?;
                self.print(" ")?;
                self.print_token(TokenKind::LeftBrace)?;
                self.print("\n")?;
                self.walk_branch(&while_stmt.body)?;
                self.print_indent()?;
                self.print_token(TokenKind::RightBrace)?;
                self.print("\n")
            }
            StmtKind::Block(stmts) => {
                self.print_indent()?;
                self.print_token(TokenKind::LeftBrace)?;
                self.print("\n")?;
                self.walk_nested(stmts)?;
                self.print_indent()?;
                self.print_token(TokenKind::RightBrace)?;
                self.print("\n")
            }
            StmtKind::Echo(values) => {
                self.print_indent()?;
                self.print_token(TokenKind::Echo)?;
                self.print(" ")?;
                for (i, _) in values.iter().enumerate() {
                    if i > 0 {
                        self.print_token(TokenKind::Comma)?;
                        self.print(" ")?;
                    }
                    self.print(EXPRESSION)?;
                }
                self.end_statement()
            }
            StmtKind::Return(value) => {
                self.print_indent()?;
                self.print_token(TokenKind::Return)?;
                if value.is_some() {
                    self.print(" ")?;
                    self.print(EXPRESSION)?;
                }
                self.end_statement()
            }
            StmtKind::Throw(_) => {
                self.print_indent()?;
                self.print_token(TokenKind::Throw)?;
                self.print(" ")?;
                self.print(EXPRESSION)?;
                self.end_statement()
            }
            StmtKind::Expression(_) => {
                self.print_indent()?;
                self.print(EXPRESSION)?;
                self.end_statement()
            }
            StmtKind::TryCatch(try_catch) => self.walk_try_catch(try_catch),
            StmtKind::Function(function) => {
                self.print_indent()?;
                self.print_definition(&function.definition)?;
                self.print_body(&function.body)
            }
            StmtKind::Class(class) => self.walk_class(class),
            StmtKind::Interface(interface) => self.walk_interface(interface),
            StmtKind::Nop | StmtKind::InlineHtml(_) => Ok(()),
        }
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn walk_if(&mut self, if_stmt: &IfStmt) -> io::Result<()> {
        self.print_indent()?;
        self.print_token(TokenKind::If)?;
        self.print(" ")?;
        self.print_condition()?;
        self.print(" ")?;
        self.print_token(TokenKind::LeftBrace)?;
        self.print("\n")?;
        self.walk_branch(&if_stmt.then_branch)?;
        self.print_indent()?;
        self.print_token(TokenKind::RightBrace)?;

        if let Some(else_branch) = &if_stmt.else_branch {
            self.print(" ")?;
            self.print_token(TokenKind::Else)?;
            self.print(" ")?;
            self.print_token(TokenKind::LeftBrace)?;
            self.print("\n")?;
            self.walk_branch(else_branch)?;
            self.print_indent()?;
            self.print_token(TokenKind::RightBrace)?;
        }
        self.print("\n")
    }

    fn walk_try_catch(&mut self, try_catch: &TryCatchStmt) -> io::Result<()> {
        self.print_indent()?;
        self.print_token(TokenKind::Try)?;
        self.print(" ")?;
        self.print_block(&try_catch.body)?;

        for catch in &try_catch.catches {
            self.print(" ")?;
            self.print_token(TokenKind::Catch)?;
            self.print(" ")?;
            self.print_token(TokenKind::LeftParen)?;
            for (i, ty) in catch.types.iter().enumerate() {
                if i > 0 {
                    self.print(" ")?;
                    self.print_token(TokenKind::Pipe)?;
                    self.print(" ")?;
                }
                self.print(ty)?;
            }
            if let Some(var) = &catch.var {
                self.print(" ")?;
                self.print(var)?;
            }
            self.print_token(TokenKind::RightParen)?;
            self.print(" ")?;
            self.print_block(&catch.body)?;
        }

        if let Some(finally) = &try_catch.finally {
            self.print(" ")?;
            self.print_token(TokenKind::Finally)?;
            self.print(" ")?;
            self.print_block(finally)?;
        }
        self.print("\n")
    }

    /// A branch body one level deeper; a block contributes its statements.
    fn walk_branch(&mut self, branch: &Stmt) -> io::Result<()> {
        match &branch.kind {
            StmtKind::Block(stmts) => self.walk_nested(stmts),
            _ => self.walk_nested(std::slice::from_ref(branch)),
        }
    }

    fn walk_nested(&mut self, stmts: &[Stmt]) -> io::Result<()> {
        self.depth += 1;
        let result = stmts.iter().try_for_each(|stmt| self.walk(stmt));
        self.depth -= 1;
        result
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn walk_class(&mut self, class: &ClassDecl) -> io::Result<()> {
        self.print_indent()?;
        if class.modifiers.is_abstract {
            self.print_token(TokenKind::Abstract)?;
            self.print(" ")?;
        }
        if class.modifiers.is_final {
            self.print_token(TokenKind::Final)?;
            self.print(" ")?;
        }
        self.print_token(TokenKind::Class)?;
        self.print(" ")?;
        self.print(&class.name)?;
        if let Some(parent) = &class.extends {
            self.print(" ")?;
            self.print_token(TokenKind::Extends)?;
            self.print(" ")?;
            self.print(parent)?;
        }
        if !class.implements.is_empty() {
            self.print(" ")?;
            self.print_token(TokenKind::Implements)?;
            self.print(" ")?;
            self.print_name_list(&class.implements)?;
        }
        self.print(" ")?;
        self.print_token(TokenKind::LeftBrace)?;
        self.print("\n")?;

        self.depth += 1;
        for constant in &class.constants {
            self.print_constant(constant)?;
        }
        for property in &class.properties {
            self.print_property(property)?;
        }
        for method in &class.methods {
            self.print_method(method, true)?;
        }
        self.depth -= 1;

        self.print_indent()?;
        self.print_token(TokenKind::RightBrace)?;
        self.print("\n")
    }

    fn walk_interface(&mut self, interface: &InterfaceDecl) -> io::Result<()> {
        self.print_indent()?;
        self.print_token(TokenKind::Interface)?;
        self.print(" ")?;
        self.print(&interface.name)?;
        if !interface.inherits.is_empty() {
            self.print(" ")?;
            self.print_token(TokenKind::Extends)?;
            self.print(" ")?;
            self.print_name_list(&interface.inherits)?;
        }
        self.print(" ")?;
        self.print_token(TokenKind::LeftBrace)?;
        self.print("\n")?;

        self.depth += 1;
        for method in &interface.methods {
            self.print_method(method, false)?;
        }
        self.depth -= 1;

        self.print_indent()?;
        self.print_token(TokenKind::RightBrace)?;
        self.print("\n")
    }

    fn print_constant(&mut self, constant: &Constant) -> io::Result<()> {
        self.print_indent()?;
        self.print_token(TokenKind::Const)?;
        self.print(" ")?;
        self.print(&constant.variable.name)?;
        if constant.value.is_some() {
            self.print_initializer()?;
        }
        self.end_statement()
    }

    fn print_property(&mut self, property: &Property) -> io::Result<()> {
        self.print_indent()?;
        self.print_token(visibility_token(property.visibility))?;
        self.print(" ")?;
        if property.is_static {
            self.print_token(TokenKind::Static)?;
            self.print(" ")?;
        }
        self.print(&property.name)?;
        if property.initialization.is_some() {
            self.print_initializer()?;
        }
        self.end_statement()
    }

    /// Interface signatures carry no `abstract` keyword, so it is only
    /// printed for signature-only methods of a class.
    fn print_method(&mut self, method: &Method, in_class: bool) -> io::Result<()> {
        self.print_indent()?;
        if in_class && method.is_abstract() {
            self.print_token(TokenKind::Abstract)?;
            self.print(" ")?;
        }
        if method.is_final {
            self.print_token(TokenKind::Final)?;
            self.print(" ")?;
        }
        self.print_token(visibility_token(method.visibility))?;
        self.print(" ")?;
        if method.is_static {
            self.print_token(TokenKind::Static)?;
            self.print(" ")?;
        }

        match &method.function {
            MethodFunction::Signature(definition) => {
                self.print_definition(definition)?;
                self.end_statement()
            }
            MethodFunction::Body(function) => {
                self.print_definition(&function.definition)?;
                self.print_body(&function.body)
            }
        }
    }

    fn print_definition(&mut self, definition: &FunctionDefinition) -> io::Result<()> {
        self.print_token(TokenKind::Function)?;
        self.print(" ")?;
        if definition.by_ref {
            self.print_token(TokenKind::Ampersand)?;
        }
        self.print(&definition.name)?;
        self.print_token(TokenKind::LeftParen)?;
        for (i, param) in definition.params.iter().enumerate() {
            if i > 0 {
                self.print_token(TokenKind::Comma)?;
                self.print(" ")?;
            }
            self.print_param(param)?;
        }
        self.print_token(TokenKind::RightParen)?;
        if let Some(return_type) = &definition.return_type {
            self.print_token(TokenKind::Colon)?;
            self.print(" ")?;
            self.print(return_type)?;
        }
        Ok(())
    }

    fn print_param(&mut self, param: &Param) -> io::Result<()> {
        if let Some(type_hint) = &param.type_hint {
            self.print(type_hint)?;
            self.print(" ")?;
        }
        if param.by_ref {
            self.print_token(TokenKind::Ampersand)?;
        }
        if param.variadic {
            self.print_token(TokenKind::Ellipsis)?;
        }
        self.print(&param.name)?;
        if param.default.is_some() {
            self.print_initializer()?;
        }
        Ok(())
    }

    // =========================================================================
    // Output helpers
    // =========================================================================

    /// ` {`, the statements one level deeper, then `}` and a newline.
    fn print_body(&mut self, stmts: &[Stmt]) -> io::Result<()> {
        self.print(" ")?;
        self.print_block(stmts)?;
        self.print("\n")
    }

    /// `{`, the statements one level deeper, then an indented `}`.
    fn print_block(&mut self, stmts: &[Stmt]) -> io::Result<()> {
        self.print_token(TokenKind::LeftBrace)?;
        self.print("\n")?;
        self.walk_nested(stmts)?;
        self.print_indent()?;
        self.print_token(TokenKind::RightBrace)
    }

    fn print_condition(&mut self) -> io::Result<()> {
        self.print_token(TokenKind::LeftParen)?;
        self.print(EXPRESSION)?;
        self.print_token(TokenKind::RightParen)
    }

    fn print_initializer(&mut self) -> io::Result<()> {
        self.print(" ")?;
        self.print_token(TokenKind::Equals)?;
        self.print(" ")?;
        self.print(EXPRESSION)
    }

    fn print_name_list(&mut self, names: &[String]) -> io::Result<()> {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.print_token(TokenKind::Comma)?;
                self.print(" ")?;
            }
            self.print(name)?;
        }
        Ok(())
    }

    fn end_statement(&mut self) -> io::Result<()> {
        self.print_token(TokenKind::Semicolon)?;
        self.print("\n")
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    fn print_token(&mut self, kind: TokenKind) -> io::Result<()> {
        self.out.write_all(lexeme(kind).as_bytes())
    }

    fn print_indent(&mut self) -> io::Result<()> {
        for _ in 0..self.depth {
            self.out.write_all(self.config.indent_unit.as_bytes())?;
        }
        Ok(())
    }
}

fn visibility_token(visibility: Visibility) -> TokenKind {
    match visibility {
        Visibility::Public => TokenKind::Public,
        Visibility::Protected => TokenKind::Protected,
        Visibility::Private => TokenKind::Private,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmt(kind: StmtKind) -> Stmt {
        Stmt { kind, span: Span::DUMMY }
    }

    fn expr() -> Expr {
        Expr {
            kind: ExprKind::Null,
            span: Span::DUMMY,
        }
    }

    fn render(stmt: &Stmt, config: &PrinterConfig) -> String {
        let mut printer = Printer::new(Vec::new(), config);
        printer.walk(stmt).unwrap();
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    fn test_if_else_layout() {
        let if_stmt = stmt(StmtKind::If(IfStmt {
            condition: expr(),
            then_branch: Box::new(stmt(StmtKind::Block(vec![stmt(StmtKind::Return(None))]))),
            else_branch: Some(Box::new(stmt(StmtKind::Echo(vec![expr(), expr()])))),
        }));
        assert_eq!(
            render(&if_stmt, &PrinterConfig::with_indent("\t")),
            "if (<expression>) {\n\treturn;\n} else {\n\techo <expression>, <expression>;\n}\n"
        );
    }

    #[test]
    fn test_if_without_else_ends_with_newline() {
        let if_stmt = stmt(StmtKind::If(IfStmt {
            condition: expr(),
            then_branch: Box::new(stmt(StmtKind::Block(vec![]))),
            else_branch: None,
        }));
        assert_eq!(render(&if_stmt, &PrinterConfig::default()), "if (<expression>) {\n}\n");
    }

    #[test]
    fn test_silent_kinds() {
        let config = PrinterConfig::default();
        assert_eq!(render(&stmt(StmtKind::Nop), &config), "");
        assert_eq!(render(&stmt(StmtKind::InlineHtml("<p>".into())), &config), "");
    }

    #[test]
    fn test_depth_scales_indentation() {
        let inner = stmt(StmtKind::While(WhileStmt {
            condition: expr(),
            body: Box::new(stmt(StmtKind::Throw(expr()))),
        }));
        let outer = stmt(StmtKind::Block(vec![stmt(StmtKind::Block(vec![inner]))]));
        assert_eq!(
            render(&outer, &PrinterConfig::with_indent("  ")),
            "{\n  {\n    while (<expression>) {\n      throw <expression>;\n    }\n  }\n}\n"
        );
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_errors_propagate() {
        let config = PrinterConfig::default();
        let mut printer = Printer::new(FailingSink, &config);
        assert!(printer.walk(&stmt(StmtKind::Return(None))).is_err());
    }
}
