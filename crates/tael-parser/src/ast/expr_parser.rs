//! Expression parsing.
//!
//! A fixed ladder of methods, one per precedence level, each folding its
//! operators left-associatively over the next level:
//!
//! 1. assignment (`=`, right-associative)
//! 2. equality (`==`, `!=`)
//! 3. additive (`+`, `-`)
//! 4. multiplicative (`*`, `/`, `%`)
//! 5. exponent (`**`)
//! 6. member access (`.`)
//! 7. primary (identifiers, calls, literals, parentheses)

use super::parser::Parser;
use crate::ast::error::ParseError;
use crate::ast::expr::{
    AssignExpr, BinaryExpr, BoolLiteral, CharacterLiteral, Expr, FunctionCall, Identifier,
    NumericLiteral, NumericValue, StringLiteral,
};
use crate::ast::stmt::Stmt;
use crate::lexer::TokenKind;

impl Parser {
    /// Assignment, the lowest level. The right side of `=` is parsed as
    /// another assignment, making chains right-associative.
    pub(crate) fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_equality()?;
        if self.eat(TokenKind::Equal) {
            let rhs = self.parse_assignment()?;
            return Ok(Expr::Assign(Box::new(AssignExpr { lhs, rhs })));
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_additive()?;
        while matches!(
            self.peek_kind(),
            TokenKind::EqualEqual | TokenKind::BangEqual
        ) {
            let op = self.advance().text;
            let rhs = self.parse_additive()?;
            lhs = Expr::Binary(Box::new(BinaryExpr { lhs, rhs, op }));
        }
        Ok(lhs)
    }

    /// Additive level; also the level at which call arguments parse.
    pub(crate) fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_multiplicative()?;
        while matches!(self.peek_kind(), TokenKind::Plus | TokenKind::Minus) {
            let op = self.advance().text;
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::Binary(Box::new(BinaryExpr { lhs, rhs, op }));
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_exponent()?;
        while matches!(
            self.peek_kind(),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent
        ) {
            let op = self.advance().text;
            let rhs = self.parse_exponent()?;
            lhs = Expr::Binary(Box::new(BinaryExpr { lhs, rhs, op }));
        }
        Ok(lhs)
    }

    fn parse_exponent(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_member_access()?;
        while self.check(TokenKind::StarStar) {
            let op = self.advance().text;
            let rhs = self.parse_member_access()?;
            lhs = Expr::Binary(Box::new(BinaryExpr { lhs, rhs, op }));
        }
        Ok(lhs)
    }

    fn parse_member_access(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_primary()?;
        while self.check(TokenKind::Dot) {
            let op = self.advance().text;
            let rhs = self.parse_primary()?;
            lhs = Expr::Binary(Box::new(BinaryExpr { lhs, rhs, op }));
        }
        Ok(lhs)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            TokenKind::Identifier => {
                let name = Identifier::new(self.advance().text);
                if self.check(TokenKind::LeftParen) {
                    return self.parse_function_call(name);
                }
                Ok(Expr::Identifier(name))
            }

            TokenKind::IntLiteral => {
                let token = self.advance();
                let value = token.text.parse::<u64>().map_err(|_| {
                    ParseError::InvalidNumericLiteral {
                        text: token.text.clone(),
                    }
                })?;
                Ok(Expr::NumericLiteral(NumericLiteral {
                    value: NumericValue::UInt(value),
                }))
            }

            TokenKind::NegativeIntLiteral => {
                let token = self.advance();
                let value = token.text.parse::<i64>().map_err(|_| {
                    ParseError::InvalidNumericLiteral {
                        text: token.text.clone(),
                    }
                })?;
                Ok(Expr::NumericLiteral(NumericLiteral {
                    value: NumericValue::Int(value),
                }))
            }

            TokenKind::FloatLiteral => {
                let token = self.advance();
                let value = token.text.parse::<f64>().map_err(|_| {
                    ParseError::InvalidNumericLiteral {
                        text: token.text.clone(),
                    }
                })?;
                Ok(Expr::NumericLiteral(NumericLiteral {
                    value: NumericValue::Float(value),
                }))
            }

            TokenKind::StringLiteral => Ok(Expr::StringLiteral(StringLiteral {
                value: self.advance().text,
            })),

            TokenKind::CharLiteral => Ok(Expr::CharacterLiteral(CharacterLiteral {
                value: self.advance().text,
            })),

            TokenKind::BoolLiteral => {
                let token = self.advance();
                Ok(Expr::BoolLiteral(BoolLiteral {
                    value: token.text == "true",
                }))
            }

            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_assignment()?;
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(inner)
            }

            found => Err(ParseError::UnexpectedToken { found }),
        }
    }

    /// `name ( args )`. Arguments parse at the additive level and are
    /// wrapped as statements.
    fn parse_function_call(&mut self, name: Identifier) -> Result<Expr, ParseError> {
        self.expect(TokenKind::LeftParen, "'('")?;

        let mut arguments = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                let argument = self.parse_additive()?;
                arguments.push(Stmt::Expression(argument));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RightParen, "')'")?;
        Ok(Expr::Call(FunctionCall { name, arguments }))
    }
}
