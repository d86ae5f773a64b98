//! Lexical analysis for the Turtle subset.

mod chars;
mod lexer;
mod token;

pub use lexer::tokenize;
pub use token::{Token, TokenKind};
