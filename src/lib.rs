//! Tael: a small statically-typed language.
//!
//! The root crate is a facade over the front-end; everything lives in
//! [`tael_parser`] and is re-exported here.
//!
//! # Example
//!
//! ```
//! let program = tael::parse("int32 x = 1;").unwrap();
//! assert_eq!(program.statements.len(), 1);
//! ```

pub use tael_parser::{
    LexError, Lexer, ParseError, Parser, Program, SyntaxError, Token, TokenKind, ast, lexer,
    parse, parse_tokens, printer, to_source, tokenize,
};
