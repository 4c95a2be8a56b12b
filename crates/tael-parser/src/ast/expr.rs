//! Expression AST nodes.
//!
//! [`Expr`] is a closed sum over every node the parser can produce. Parents
//! own their children exclusively; recursive positions are boxed, so
//! dropping a root drops the whole tree.

use crate::ast::decl::{
    ClassDeclaration, FieldDeclaration, FunctionDeclaration, MethodDeclaration,
    NamespaceDeclaration, Parameter, TypeName, VariableDeclaration,
};
use crate::ast::stmt::{IfStatement, ReturnStatement, Stmt};

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A name reference.
    Identifier(Identifier),
    /// An integer or float literal.
    NumericLiteral(NumericLiteral),
    /// A string literal.
    StringLiteral(StringLiteral),
    /// A character literal.
    CharacterLiteral(CharacterLiteral),
    /// `true` or `false`.
    BoolLiteral(BoolLiteral),
    /// A type in expression position.
    TypeName(TypeName),
    /// A binary operation.
    Binary(Box<BinaryExpr>),
    /// A unary operation. Present in the model, never built by the parser.
    Unary(Box<UnaryExpr>),
    /// An assignment.
    Assign(Box<AssignExpr>),
    /// A variable declaration.
    VariableDeclaration(Box<VariableDeclaration>),
    /// A function parameter. The parser only builds parameters nested in
    /// [`FunctionDeclaration`], never as standalone expressions.
    Parameter(Parameter),
    /// A function declaration with a body.
    FunctionDeclaration(Box<FunctionDeclaration>),
    /// A call.
    Call(FunctionCall),
    /// A `return` statement.
    Return(ReturnStatement),
    /// A class definition.
    ClassDeclaration(Box<ClassDeclaration>),
    /// A class field. The parser only builds fields nested in
    /// [`ClassDeclaration`], never as standalone expressions.
    FieldDeclaration(Box<FieldDeclaration>),
    /// A class method. The parser only builds methods nested in
    /// [`ClassDeclaration`], never as standalone expressions.
    MethodDeclaration(Box<MethodDeclaration>),
    /// A namespace.
    NamespaceDeclaration(Box<NamespaceDeclaration>),
    /// An `if` statement.
    If(Box<IfStatement>),
}

/// A name reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The referenced name.
    pub symbol: String,
}

impl Identifier {
    /// Create an identifier from its name.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

/// A numeric literal.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericLiteral {
    /// The parsed value.
    pub value: NumericValue,
}

/// The three numeric flavors, one per literal token kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    /// From a sign-prefixed integer literal.
    Int(i64),
    /// From a plain integer literal.
    UInt(u64),
    /// From a float literal.
    Float(f64),
}

/// A string literal; the value is the raw text between the quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    /// The literal content, escapes uninterpreted.
    pub value: String,
}

/// A character literal; one character, or two when carrying an escape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterLiteral {
    /// The captured character(s).
    pub value: String,
}

/// A boolean literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolLiteral {
    /// The literal value.
    pub value: bool,
}

/// A binary operation. The operator is kept as its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    /// Left operand.
    pub lhs: Expr,
    /// Right operand.
    pub rhs: Expr,
    /// Operator text, e.g. `"+"` or `"=="`.
    pub op: String,
}

/// A unary operation.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    /// The operand.
    pub operand: Expr,
    /// Operator text, e.g. `"!"` or `"--"`.
    pub op: String,
    /// Whether the operator precedes its operand.
    pub is_prefix: bool,
}

/// An assignment; the right side may itself be an assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    /// Assignment target.
    pub lhs: Expr,
    /// Assigned value.
    pub rhs: Expr,
}

/// A function call.
///
/// Arguments are wrapped as statements, matching how bodies hold their
/// children elsewhere in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The callee.
    pub name: Identifier,
    /// Arguments in source order.
    pub arguments: Vec<Stmt>,
}
