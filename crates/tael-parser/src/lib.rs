//! Tael front-end: lexer, parser, and AST.
//!
//! This crate turns Tael source text into an owned abstract syntax tree.
//! It provides:
//! - tokenization ([`tokenize`], [`Lexer`])
//! - parsing ([`parse`], [`parse_tokens`], [`ast::Parser`])
//! - the AST node types ([`ast`])
//! - a diagnostic pretty-printer ([`printer`])
//!
//! Nothing here executes or type-checks a program; later phases consume the
//! tree this crate produces.
//!
//! # Example
//!
//! ```
//! use tael_parser::parse;
//!
//! let program = parse("int32 x = 1 + 2 * 3;").unwrap();
//! assert_eq!(program.statements.len(), 1);
//! ```

pub mod ast;
pub mod lexer;
pub mod printer;

pub use ast::{ParseError, Parser, Program};
pub use lexer::{LexError, Lexer, Token, TokenKind, tokenize};
pub use printer::to_source;

use thiserror::Error;

/// Either phase's failure, for callers that go straight from text to tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    /// Tokenization failed.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// Parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Parse an already-tokenized stream into a [`Program`].
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::parse(tokens)
}

/// Tokenize and parse `source` in one step.
pub fn parse(source: &str) -> Result<Program, SyntaxError> {
    let tokens = tokenize(source)?;
    Ok(Parser::parse(tokens)?)
}
