//! Renders phpobj syntax trees back to normalized source text.
//!
//! Statement and declaration structure is reproduced; expressions print as a
//! fixed placeholder.

pub mod config;
pub mod lexeme;
pub mod printer;

use std::io;

use phpobj_ast::{Program, Stmt};

pub use config::PrinterConfig;
pub use lexeme::lexeme;
pub use printer::{Printer, EXPRESSION};

/// Render every statement of `program`.
pub fn print_program(program: &Program, config: &PrinterConfig) -> io::Result<String> {
    tracing::trace!(stmts = program.stmts.len(), "print_program");
    let mut printer = Printer::new(Vec::new(), config);
    for stmt in &program.stmts {
        printer.walk(stmt)?;
    }
    Ok(String::from_utf8_lossy(&printer.into_inner()).into_owned())
}

/// Render a single statement at the top level.
pub fn print_stmt(stmt: &Stmt, config: &PrinterConfig) -> io::Result<String> {
    tracing::trace!("print_stmt");
    let mut printer = Printer::new(Vec::new(), config);
    printer.walk(stmt)?;
    Ok(String::from_utf8_lossy(&printer.into_inner()).into_owned())
}
