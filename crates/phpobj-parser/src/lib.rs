pub mod decl;
pub mod diagnostics;
pub mod expr;
pub mod member;
pub mod modifiers;
pub mod parser;
pub mod precedence;
pub mod stmt;

pub use decl::{ClassBuilder, InterfaceBuilder};
pub use diagnostics::{ModifierCategory, ParseError};
pub use modifiers::MemberModifiers;
pub use parser::Parser;

use phpobj_ast::Program;

/// Parse a whole source file. The first syntax error aborts the parse.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let mut parser = Parser::new(source);
    parser.parse_program().inspect_err(|err| {
        tracing::debug!(error = %err, span = ?err.span(), "parse failed");
    })
}
