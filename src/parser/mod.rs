//! Parser for placeholder expressions

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::parse_expression;
