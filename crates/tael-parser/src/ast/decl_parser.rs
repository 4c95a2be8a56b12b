//! Declaration parsing: types, variables, functions, classes, namespaces,
//! and the routing decisions between them.
//!
//! Declarations are told apart from expressions by bounded lookahead over
//! the `[mutable] type [~|->] name` prefix; nothing is consumed until the
//! target production is known.

use super::parser::Parser;
use crate::ast::decl::{
    Access, ClassDeclaration, FieldDeclaration, FunctionDeclaration, Indirection,
    MethodDeclaration, NamespaceDeclaration, Parameter, TypeName, VariableDeclaration,
};
use crate::ast::error::ParseError;
use crate::ast::expr::{Expr, Identifier};
use crate::ast::stmt::Stmt;
use crate::lexer::TokenKind;

impl Parser {
    /// `[mutable] type [~|->]`, the common prefix of every declaration.
    pub(crate) fn parse_type_name(&mut self) -> Result<TypeName, ParseError> {
        let is_mutable = self.eat(TokenKind::Mutable);

        if !self.peek_kind().is_type() {
            return Err(ParseError::ExpectedType {
                found: self.peek_kind(),
            });
        }
        let name = self.advance().text;

        let indirection = if self.eat(TokenKind::Tilde) {
            Indirection::Reference
        } else if self.eat(TokenKind::Arrow) {
            Indirection::Pointer
        } else {
            Indirection::None
        };
        if indirection != Indirection::None && self.peek_kind().is_ref_or_ptr() {
            return Err(ParseError::ConflictingIndirection { name });
        }

        Ok(TypeName {
            name,
            is_mutable,
            indirection,
        })
    }

    /// `[mutable] type [~|->] name` then `;` or `= initializer ;`.
    pub(crate) fn parse_variable_declaration(
        &mut self,
    ) -> Result<VariableDeclaration, ParseError> {
        let has_mutable_prefix = self.check(TokenKind::Mutable);
        let ty = self.parse_type_name()?;
        let name = Identifier::new(self.expect(TokenKind::Identifier, "an identifier")?.text);

        match self.peek_kind() {
            TokenKind::Semicolon => {
                self.advance();
                // TODO: carry the mutable prefix here instead of forcing it
                // off; only the initialized branch mirrors the source.
                Ok(VariableDeclaration {
                    is_mutable: false,
                    ty,
                    name,
                    value: None,
                })
            }
            TokenKind::Equal => {
                self.advance();
                let value = self.parse_assignment()?;
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(VariableDeclaration {
                    is_mutable: has_mutable_prefix,
                    ty,
                    name,
                    value: Some(value),
                })
            }
            found => Err(ParseError::Expected {
                expected: "'=' or ';'",
                found,
            }),
        }
    }

    /// `[mutable] type [~|->] name ( params ) { body }`.
    pub(crate) fn parse_function_declaration(
        &mut self,
    ) -> Result<FunctionDeclaration, ParseError> {
        let return_type = self.parse_type_name()?;
        let name = Identifier::new(self.expect(TokenKind::Identifier, "a function name")?.text);

        self.expect(TokenKind::LeftParen, "'('")?;
        let mut parameters = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                let ty = self.parse_type_name()?;
                let param_name =
                    Identifier::new(self.expect(TokenKind::Identifier, "a parameter name")?.text);
                parameters.push(Parameter {
                    ty,
                    name: param_name,
                });
                match self.peek_kind() {
                    TokenKind::Comma => {
                        self.advance();
                    }
                    TokenKind::RightParen => break,
                    found => {
                        return Err(ParseError::MalformedParameterList {
                            function: name.symbol.clone(),
                            found,
                        });
                    }
                }
            }
        }
        self.expect(TokenKind::RightParen, "')'")?;

        self.expect(TokenKind::LeftBrace, "'{'")?;
        let body = self.parse_function_body()?;
        self.expect(TokenKind::RightBrace, "'}'")?;

        Ok(FunctionDeclaration {
            return_type,
            name,
            parameters,
            body,
        })
    }

    /// Body statements; a `return` ends the body immediately after it is
    /// appended.
    fn parse_function_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut body = Vec::new();
        while !matches!(self.peek_kind(), TokenKind::RightBrace | TokenKind::Eof) {
            if self.check(TokenKind::Return) {
                body.push(self.parse_return_statement()?);
                break;
            }
            body.push(self.parse_statement(true)?);
        }
        Ok(body)
    }

    /// A statement starting with a type token: a variable declaration when
    /// `=` follows the name, a function declaration otherwise.
    pub(crate) fn parse_typed_declaration(&mut self) -> Result<Expr, ParseError> {
        let mut at = 1;
        if self.peek_nth(at).is_ref_or_ptr() {
            at += 1;
        }
        if self.peek_nth(at) == TokenKind::Identifier
            && self.peek_nth(at + 1) == TokenKind::Equal
        {
            let decl = self.parse_variable_declaration()?;
            Ok(Expr::VariableDeclaration(Box::new(decl)))
        } else {
            let decl = self.parse_function_declaration()?;
            Ok(Expr::FunctionDeclaration(Box::new(decl)))
        }
    }

    /// A statement starting with `mutable`: a type must follow, and the
    /// token after the `[~|->] ` tail picks the production.
    pub(crate) fn parse_mutable_statement(&mut self) -> Result<Expr, ParseError> {
        let after_mutable = self.peek_nth(1);
        if !after_mutable.is_type() {
            return Err(ParseError::MutableWithoutType {
                found: after_mutable,
            });
        }

        let mut at = 2;
        if self.peek_nth(at).is_ref_or_ptr() {
            at += 1;
        }
        match self.peek_nth(at) {
            TokenKind::Equal => {
                // `mutable type = ...` reads as a reassignment and is handed
                // to the expression path, which refuses the leading type
                // token. TODO: decide whether to reject this form up front.
                self.advance();
                self.parse_assignment_statement()
            }
            TokenKind::Identifier
                if matches!(
                    self.peek_nth(at + 1),
                    TokenKind::Equal | TokenKind::Semicolon
                ) =>
            {
                let decl = self.parse_variable_declaration()?;
                Ok(Expr::VariableDeclaration(Box::new(decl)))
            }
            _ => {
                let decl = self.parse_function_declaration()?;
                Ok(Expr::FunctionDeclaration(Box::new(decl)))
            }
        }
    }

    /// `class Name { members }` with sticky access specifiers.
    pub(crate) fn parse_class_definition(&mut self) -> Result<Expr, ParseError> {
        self.expect(TokenKind::Class, "'class'")?;
        let name = self.expect(TokenKind::ClassType, "a class name")?;
        let ty = TypeName::plain(name.text);
        self.expect(TokenKind::LeftBrace, "'{'")?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        let mut access = Access::Public;

        while !matches!(self.peek_kind(), TokenKind::RightBrace | TokenKind::Eof) {
            match self.peek_kind() {
                TokenKind::Public | TokenKind::Private | TokenKind::Protected => {
                    let specifier = self.advance().kind;
                    self.expect(TokenKind::Colon, "':'")?;
                    access = match specifier {
                        TokenKind::Public => Access::Public,
                        TokenKind::Private => Access::Private,
                        _ => Access::Protected,
                    };
                }
                _ => {
                    let mut at = 0;
                    if self.check(TokenKind::Mutable) {
                        at += 1;
                    }
                    if !self.peek_nth(at).is_type() {
                        return Err(ParseError::ExpectedType {
                            found: self.peek_nth(at),
                        });
                    }
                    at += 1;
                    if self.peek_nth(at).is_ref_or_ptr() {
                        at += 1;
                    }
                    // Past the member name; `(` means a method.
                    at += 1;
                    if self.peek_nth(at) == TokenKind::LeftParen {
                        let decl = self.parse_function_declaration()?;
                        methods.push(MethodDeclaration { decl, access });
                    } else {
                        let decl = self.parse_variable_declaration()?;
                        fields.push(FieldDeclaration { decl, access });
                    }
                }
            }
        }

        self.expect(TokenKind::RightBrace, "'}'")?;
        Ok(Expr::ClassDeclaration(Box::new(ClassDeclaration {
            ty,
            fields,
            methods,
        })))
    }

    /// `namespace name { statements }`.
    pub(crate) fn parse_namespace_declaration(&mut self) -> Result<Expr, ParseError> {
        self.expect(TokenKind::Namespace, "'namespace'")?;
        let name = Identifier::new(self.expect(TokenKind::Identifier, "a namespace name")?.text);
        self.expect(TokenKind::LeftBrace, "'{'")?;

        let mut body = Vec::new();
        while !matches!(self.peek_kind(), TokenKind::RightBrace | TokenKind::Eof) {
            body.push(self.parse_statement(true)?);
        }
        self.expect(TokenKind::RightBrace, "'}'")?;

        Ok(Expr::NamespaceDeclaration(Box::new(NamespaceDeclaration {
            name,
            body,
        })))
    }
}
