//! The parser's core: token buffer, lookahead helpers, and the top-level
//! program loop. The grammar itself lives in the sibling `*_parser` modules.

use crate::ast::error::ParseError;
use crate::ast::stmt::Program;
use crate::lexer::{Token, TokenKind};

/// Recursive-descent parser over a token list.
///
/// The parser consumes the whole list and aborts on the first error; no
/// recovery is attempted.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a parser over `tokens`.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // Hand-built token lists may lack the Eof terminator.
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, ""));
        }
        Self { tokens, pos: 0 }
    }

    /// Parse a full token list into a [`Program`].
    pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
        Self::new(tokens).parse_program()
    }

    /// Consume statements until end of input.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while self.peek_kind() != TokenKind::Eof {
            statements.push(self.parse_statement(true)?);
        }
        Ok(Program::new(statements))
    }

    // =========================================
    // Lookahead and consumption helpers
    // =========================================

    /// The current token.
    #[inline]
    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Kind of the current token.
    #[inline]
    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Kind of the nth token ahead (0 = current); `Eof` past the end.
    #[inline]
    pub(crate) fn peek_nth(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Consume and return the current token. The position never moves past
    /// the final `Eof`.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Check whether the current token has the given kind.
    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail, naming the expectation.
    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::Expected {
                expected,
                found: self.peek_kind(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(source: &str) -> Result<Program, ParseError> {
        Parser::parse(tokenize(source).unwrap())
    }

    #[test]
    fn empty_input_is_an_empty_program() {
        let program = parse("").unwrap();
        assert!(program.statements.is_empty());
    }

    #[test]
    fn statements_keep_source_order() {
        let program = parse("a = 1; b = 2; c = 3;").unwrap();
        assert_eq!(program.statements.len(), 3);
    }

    #[test]
    fn first_error_aborts() {
        assert!(parse("a = 1; b = ;").is_err());
    }

    #[test]
    fn missing_terminator_guard() {
        // A hand-built token list without Eof must not panic the parser.
        let tokens = vec![Token::new(TokenKind::Identifier, "x")];
        assert!(Parser::parse(tokens).is_err());
    }

    #[test]
    fn expect_reports_the_expectation() {
        let err = parse("x = 1").unwrap_err();
        assert_eq!(
            err,
            ParseError::Expected {
                expected: "';'",
                found: TokenKind::Eof,
            }
        );
    }
}
