//! Diagnostic pretty-printer.
//!
//! Renders a [`Program`] back to source text. Nested binary, unary, and
//! assignment expressions are parenthesized, so parsing the printed text
//! reproduces a structurally equal tree. The exact format is for human
//! eyes and is not a stable interface.

use std::fmt;

use crate::ast::{
    Access, ClassDeclaration, Expr, FunctionDeclaration, Indirection, NamespaceDeclaration,
    NumericValue, Program, Stmt, TypeName, VariableDeclaration,
};

/// Render a program as source text.
pub fn to_source(program: &Program) -> String {
    let mut out = String::new();
    for stmt in &program.statements {
        write_stmt(&mut out, stmt, 0).expect("writing to a String cannot fail");
    }
    out
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_source(self))
    }
}

fn indent(out: &mut impl fmt::Write, level: usize) -> fmt::Result {
    write!(out, "{:width$}", "", width = level * 4)
}

/// One statement on its own line at the given indent level.
fn write_stmt(out: &mut impl fmt::Write, stmt: &Stmt, level: usize) -> fmt::Result {
    match stmt {
        Stmt::Expression(_) => {
            indent(out, level)?;
            write_stmt_content(out, stmt, level)?;
            writeln!(out)
        }
        Stmt::Program(program) => {
            for inner in &program.statements {
                write_stmt(out, inner, level)?;
            }
            Ok(())
        }
        Stmt::Scope(statements) => {
            for inner in statements {
                write_stmt(out, inner, level)?;
            }
            Ok(())
        }
    }
}

/// Statement text without leading indentation or trailing newline.
fn write_stmt_content(out: &mut impl fmt::Write, stmt: &Stmt, level: usize) -> fmt::Result {
    match stmt {
        Stmt::Expression(expr) => match expr {
            Expr::VariableDeclaration(decl) => write_var_decl(out, decl),
            Expr::FunctionDeclaration(func) => write_function(out, func, level),
            Expr::ClassDeclaration(class) => write_class(out, class, level),
            Expr::NamespaceDeclaration(ns) => write_namespace(out, ns, level),
            Expr::If(stmt) => {
                write!(out, "if (")?;
                write_expr(out, &stmt.condition, level)?;
                write!(out, ") ")?;
                write_block(out, &stmt.body, level)
            }
            Expr::Return(ret) => {
                write!(out, "return ")?;
                write_stmt_content(out, &ret.value, level)
            }
            other => {
                write_expr(out, other, level)?;
                write!(out, ";")
            }
        },
        Stmt::Program(_) | Stmt::Scope(_) => write_stmt(out, stmt, level),
    }
}

fn write_block(out: &mut impl fmt::Write, body: &[Stmt], level: usize) -> fmt::Result {
    writeln!(out, "{{")?;
    for stmt in body {
        write_stmt(out, stmt, level + 1)?;
    }
    indent(out, level)?;
    write!(out, "}}")
}

fn write_type(out: &mut impl fmt::Write, ty: &TypeName) -> fmt::Result {
    if ty.is_mutable {
        write!(out, "mutable ")?;
    }
    write!(out, "{}", ty.name)?;
    match ty.indirection {
        Indirection::None => Ok(()),
        Indirection::Reference => write!(out, "~"),
        Indirection::Pointer => write!(out, "->"),
    }
}

fn write_var_decl(out: &mut impl fmt::Write, decl: &VariableDeclaration) -> fmt::Result {
    write_type(out, &decl.ty)?;
    write!(out, " {}", decl.name.symbol)?;
    if let Some(value) = &decl.value {
        write!(out, " = ")?;
        write_expr(out, value, 0)?;
    }
    write!(out, ";")
}

fn write_function(
    out: &mut impl fmt::Write,
    func: &FunctionDeclaration,
    level: usize,
) -> fmt::Result {
    write_type(out, &func.return_type)?;
    write!(out, " {}(", func.name.symbol)?;
    for (i, param) in func.parameters.iter().enumerate() {
        if i > 0 {
            write!(out, ", ")?;
        }
        write_type(out, &param.ty)?;
        write!(out, " {}", param.name.symbol)?;
    }
    write!(out, ") ")?;
    write_block(out, &func.body, level)
}

fn write_class(out: &mut impl fmt::Write, class: &ClassDeclaration, level: usize) -> fmt::Result {
    writeln!(out, "class {} {{", class.ty.name)?;

    // Fields print before methods; access specifier lines are emitted
    // whenever the sticky visibility has to change.
    let mut current = Access::Public;
    for field in &class.fields {
        write_access(out, &mut current, field.access, level)?;
        indent(out, level + 1)?;
        write_var_decl(out, &field.decl)?;
        writeln!(out)?;
    }
    for method in &class.methods {
        write_access(out, &mut current, method.access, level)?;
        indent(out, level + 1)?;
        write_function(out, &method.decl, level + 1)?;
        writeln!(out)?;
    }

    indent(out, level)?;
    write!(out, "}}")
}

fn write_access(
    out: &mut impl fmt::Write,
    current: &mut Access,
    wanted: Access,
    level: usize,
) -> fmt::Result {
    if *current != wanted {
        indent(out, level)?;
        let name = match wanted {
            Access::Public => "public",
            Access::Private => "private",
            Access::Protected => "protected",
        };
        writeln!(out, "{name}:")?;
        *current = wanted;
    }
    Ok(())
}

fn write_namespace(
    out: &mut impl fmt::Write,
    ns: &NamespaceDeclaration,
    level: usize,
) -> fmt::Result {
    write!(out, "namespace {} ", ns.name.symbol)?;
    write_block(out, &ns.body, level)
}

fn write_expr(out: &mut impl fmt::Write, expr: &Expr, level: usize) -> fmt::Result {
    match expr {
        Expr::Identifier(ident) => write!(out, "{}", ident.symbol),

        Expr::NumericLiteral(lit) => match lit.value {
            NumericValue::Int(v) => write!(out, "{v}"),
            NumericValue::UInt(v) => write!(out, "{v}"),
            NumericValue::Float(v) => {
                // Keep the decimal point so the literal stays a float.
                if v.fract() == 0.0 && v.is_finite() {
                    write!(out, "{v:.1}")
                } else {
                    write!(out, "{v}")
                }
            }
        },

        Expr::StringLiteral(lit) => write!(out, "\"{}\"", lit.value),
        Expr::CharacterLiteral(lit) => write!(out, "'{}'", lit.value),
        Expr::BoolLiteral(lit) => write!(out, "{}", lit.value),
        Expr::TypeName(ty) => write_type(out, ty),

        Expr::Binary(binary) => {
            write!(out, "(")?;
            write_expr(out, &binary.lhs, level)?;
            if binary.op == "." {
                write!(out, ".")?;
            } else {
                write!(out, " {} ", binary.op)?;
            }
            write_expr(out, &binary.rhs, level)?;
            write!(out, ")")
        }

        Expr::Unary(unary) => {
            write!(out, "(")?;
            if unary.is_prefix {
                write!(out, "{}", unary.op)?;
                write_expr(out, &unary.operand, level)?;
            } else {
                write_expr(out, &unary.operand, level)?;
                write!(out, "{}", unary.op)?;
            }
            write!(out, ")")
        }

        Expr::Assign(assign) => {
            write!(out, "(")?;
            write_expr(out, &assign.lhs, level)?;
            write!(out, " = ")?;
            write_expr(out, &assign.rhs, level)?;
            write!(out, ")")
        }

        Expr::Call(call) => {
            write!(out, "{}(", call.name.symbol)?;
            for (i, argument) in call.arguments.iter().enumerate() {
                if i > 0 {
                    write!(out, ", ")?;
                }
                match argument {
                    Stmt::Expression(expr) => write_expr(out, expr, level)?,
                    other => write_stmt_content(out, other, level)?,
                }
            }
            write!(out, ")")
        }

        Expr::Parameter(param) => {
            write_type(out, &param.ty)?;
            write!(out, " {}", param.name.symbol)
        }

        Expr::VariableDeclaration(decl) => write_var_decl(out, decl),
        Expr::FunctionDeclaration(func) => write_function(out, func, level),
        Expr::FieldDeclaration(field) => write_var_decl(out, &field.decl),
        Expr::MethodDeclaration(method) => write_function(out, &method.decl, level),
        Expr::ClassDeclaration(class) => write_class(out, class, level),
        Expr::NamespaceDeclaration(ns) => write_namespace(out, ns, level),

        Expr::If(stmt) => {
            write!(out, "if (")?;
            write_expr(out, &stmt.condition, level)?;
            write!(out, ") ")?;
            write_block(out, &stmt.body, level)
        }

        Expr::Return(ret) => {
            write!(out, "return ")?;
            write_stmt_content(out, &ret.value, level)
        }
    }
}
