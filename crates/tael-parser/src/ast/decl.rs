//! Declaration AST nodes: types, variables, functions, classes, namespaces.

use crate::ast::expr::{Expr, Identifier};
use crate::ast::stmt::Stmt;

/// A type as written in source: a name with its modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    /// The type's name.
    pub name: String,
    /// Whether the type was prefixed with `mutable`.
    pub is_mutable: bool,
    /// Reference/pointer marker, if any.
    pub indirection: Indirection,
}

impl TypeName {
    /// A plain type with no modifiers.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_mutable: false,
            indirection: Indirection::None,
        }
    }
}

/// Reference (`~`) or pointer (`->`) marker on a type. Never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indirection {
    /// A plain value type.
    #[default]
    None,
    /// `~`
    Reference,
    /// `->`
    Pointer,
}

/// A variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// Whether the declaration carried a `mutable` prefix.
    pub is_mutable: bool,
    /// The declared type.
    pub ty: TypeName,
    /// The declared name.
    pub name: Identifier,
    /// The initializer; absent for the `type name;` form.
    pub value: Option<Expr>,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The parameter's type.
    pub ty: TypeName,
    /// The parameter's name.
    pub name: Identifier,
}

/// A function declaration with its body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// The return type.
    pub return_type: TypeName,
    /// The function's name.
    pub name: Identifier,
    /// Parameters in source order.
    pub parameters: Vec<Parameter>,
    /// Body statements. A `return` statement ends the body.
    pub body: Vec<Stmt>,
}

/// Member visibility inside a class. Sticky: an access specifier applies to
/// every following member until the next specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    /// The default when no specifier has been seen.
    #[default]
    Public,
    /// `private`
    Private,
    /// `protected`
    Protected,
}

/// A class field with its visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
    /// The underlying variable declaration.
    pub decl: VariableDeclaration,
    /// Visibility at the point of declaration.
    pub access: Access,
}

/// A class method with its visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDeclaration {
    /// The underlying function declaration.
    pub decl: FunctionDeclaration,
    /// Visibility at the point of declaration.
    pub access: Access,
}

/// A class definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    /// The class's type, with default modifiers.
    pub ty: TypeName,
    /// Fields in source order.
    pub fields: Vec<FieldDeclaration>,
    /// Methods in source order.
    pub methods: Vec<MethodDeclaration>,
}

/// A namespace and its contents.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDeclaration {
    /// The namespace's name.
    pub name: Identifier,
    /// Statements inside the braces.
    pub body: Vec<Stmt>,
}
