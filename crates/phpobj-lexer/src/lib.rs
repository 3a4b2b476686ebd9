pub mod lexer;
pub mod token;

pub use lexer::{Lexer, Token};
pub use token::{resolve_keyword, TokenKind};
