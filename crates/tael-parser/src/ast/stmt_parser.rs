//! Statement dispatch, `if` statements, and `return` statements.

use super::parser::Parser;
use crate::ast::error::ParseError;
use crate::ast::expr::Expr;
use crate::ast::stmt::{IfStatement, ReturnStatement, Stmt};
use crate::lexer::TokenKind;

impl Parser {
    /// Parse one statement, dispatching on the current token.
    ///
    /// `allow_declarations` is false inside single-statement `if` bodies,
    /// where `class` and `namespace` are rejected.
    pub(crate) fn parse_statement(
        &mut self,
        allow_declarations: bool,
    ) -> Result<Stmt, ParseError> {
        let expr = match self.peek_kind() {
            TokenKind::If => self.parse_if_statement()?,
            TokenKind::Namespace => {
                if !allow_declarations {
                    return Err(ParseError::DeclarationNotAllowed {
                        found: TokenKind::Namespace,
                    });
                }
                self.parse_namespace_declaration()?
            }
            TokenKind::Class => {
                if !allow_declarations {
                    return Err(ParseError::DeclarationNotAllowed {
                        found: TokenKind::Class,
                    });
                }
                self.parse_class_definition()?
            }
            kind if kind.is_type() => self.parse_typed_declaration()?,
            TokenKind::Mutable => self.parse_mutable_statement()?,
            // Identifiers, literals, and parenthesized expressions all land
            // in the assignment entry point.
            _ => self.parse_assignment_statement()?,
        };
        Ok(Stmt::Expression(expr))
    }

    /// Statement-level expression: an assignment followed by `;`. If the
    /// token after the current one is a type or a `~`/`->` marker, the
    /// statement is parsed as a variable declaration instead.
    pub(crate) fn parse_assignment_statement(&mut self) -> Result<Expr, ParseError> {
        let next = self.peek_nth(1);
        if next.is_type() || next.is_ref_or_ptr() {
            let decl = self.parse_variable_declaration()?;
            return Ok(Expr::VariableDeclaration(Box::new(decl)));
        }

        let expr = self.parse_assignment()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(expr)
    }

    /// `if` `(` condition `)` then either a braced block or one statement.
    fn parse_if_statement(&mut self) -> Result<Expr, ParseError> {
        self.expect(TokenKind::If, "'if'")?;
        self.expect(TokenKind::LeftParen, "'('")?;

        let condition = self.parse_assignment()?;
        if !matches!(
            condition,
            Expr::Binary(_) | Expr::BoolLiteral(_) | Expr::NumericLiteral(_)
        ) {
            return Err(ParseError::InvalidIfCondition);
        }

        self.expect(TokenKind::RightParen, "')'")?;

        let body = if self.eat(TokenKind::LeftBrace) {
            let mut statements = Vec::new();
            while !matches!(self.peek_kind(), TokenKind::RightBrace | TokenKind::Eof) {
                statements.push(self.parse_statement(true)?);
            }
            self.expect(TokenKind::RightBrace, "'}'")?;
            statements
        } else {
            vec![self.parse_statement(false)?]
        };

        Ok(Expr::If(Box::new(IfStatement { condition, body })))
    }

    /// `return` followed by a full statement. Only reachable from function
    /// bodies; the body loop ends right after the return is appended.
    pub(crate) fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::Return, "'return'")?;
        let value = self.parse_statement(true)?;
        Ok(Stmt::Expression(Expr::Return(ReturnStatement {
            value: Box::new(value),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expr::{BoolLiteral, Identifier, NumericLiteral, NumericValue};
    use crate::ast::stmt::Program;
    use crate::lexer::tokenize;

    fn parse(source: &str) -> Result<Program, ParseError> {
        Parser::parse(tokenize(source).unwrap())
    }

    fn single_expr(source: &str) -> Expr {
        let mut program = parse(source).unwrap();
        assert_eq!(program.statements.len(), 1);
        match program.statements.remove(0) {
            Stmt::Expression(expr) => expr,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn if_with_binary_condition_and_block() {
        let expr = single_expr("if (a == b) { x = 1; }");
        let Expr::If(stmt) = expr else {
            panic!("expected if, got {expr:?}");
        };
        let Expr::Binary(cond) = &stmt.condition else {
            panic!("expected binary condition");
        };
        assert_eq!(cond.op, "==");
        assert_eq!(stmt.body.len(), 1);
        let Stmt::Expression(Expr::Assign(assign)) = &stmt.body[0] else {
            panic!("expected assignment in body");
        };
        assert_eq!(assign.lhs, Expr::Identifier(Identifier::new("x")));
        assert_eq!(
            assign.rhs,
            Expr::NumericLiteral(NumericLiteral {
                value: NumericValue::UInt(1)
            })
        );
    }

    #[test]
    fn if_accepts_bool_and_numeric_conditions() {
        let expr = single_expr("if (true) { }");
        let Expr::If(stmt) = expr else { panic!() };
        assert_eq!(
            stmt.condition,
            Expr::BoolLiteral(BoolLiteral { value: true })
        );
        assert!(stmt.body.is_empty());

        let expr = single_expr("if (1) { }");
        let Expr::If(stmt) = expr else { panic!() };
        assert_eq!(
            stmt.condition,
            Expr::NumericLiteral(NumericLiteral {
                value: NumericValue::UInt(1)
            })
        );
    }

    #[test]
    fn if_rejects_other_condition_shapes() {
        assert_eq!(
            parse("if (a) { }").unwrap_err(),
            ParseError::InvalidIfCondition
        );
        assert_eq!(
            parse("if (\"s\") { }").unwrap_err(),
            ParseError::InvalidIfCondition
        );
    }

    #[test]
    fn if_single_statement_body() {
        let expr = single_expr("if (a == b) x = 1;");
        let Expr::If(stmt) = expr else { panic!() };
        assert_eq!(stmt.body.len(), 1);
        assert!(matches!(&stmt.body[0], Stmt::Expression(Expr::Assign(_))));
    }

    #[test]
    fn if_single_statement_body_rejects_declarations() {
        assert_eq!(
            parse("if (a == b) class Foo { }").unwrap_err(),
            ParseError::DeclarationNotAllowed {
                found: TokenKind::Class
            }
        );
        assert_eq!(
            parse("if (a == b) namespace n { }").unwrap_err(),
            ParseError::DeclarationNotAllowed {
                found: TokenKind::Namespace
            }
        );
    }

    #[test]
    fn braced_if_body_allows_declarations() {
        assert!(parse("if (a == b) { namespace n { } }").is_ok());
    }

    #[test]
    fn assignment_statement_requires_semicolon() {
        assert!(parse("x = 1").is_err());
        assert!(parse("x = 1;").is_ok());
    }

    #[test]
    fn assignment_is_right_associative() {
        let expr = single_expr("x = y = 5;");
        let Expr::Assign(outer) = expr else { panic!() };
        assert_eq!(outer.lhs, Expr::Identifier(Identifier::new("x")));
        let Expr::Assign(inner) = &outer.rhs else {
            panic!("expected nested assignment");
        };
        assert_eq!(inner.lhs, Expr::Identifier(Identifier::new("y")));
    }

    #[test]
    fn return_outside_a_function_is_rejected() {
        assert_eq!(
            parse("return 1;").unwrap_err(),
            ParseError::UnexpectedToken {
                found: TokenKind::Return
            }
        );
    }

    #[test]
    fn bare_expression_statement() {
        let expr = single_expr("1 + 2;");
        assert!(matches!(expr, Expr::Binary(_)));
    }
}
