//! Lexical analysis for Tael source text.

mod cursor;
mod error;
mod lexer;
mod token;

pub use error::LexError;
pub use lexer::{Lexer, tokenize};
pub use token::{Token, TokenKind};
