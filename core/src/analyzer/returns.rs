//! Return-path analysis of function bodies.
//!
//! A statement "returns" if every path through it ends in a `return`:
//! a block returns if one of its statements does, an `if` returns if both
//! branches do, and a `while` returns if its body does. Nested function
//! declarations never return on behalf of the enclosing function.

use crate::analyzer::error::{TypeError, TypeErrorKind};
use crate::parser::{FunctionDecl, Span, Stmt};
use crate::stack::ensure_sufficient_stack;
use crate::types::TypeId;

#[derive(Default)]
struct ReturnPaths {
    last_return: Option<Span>,
    errors: Vec<TypeError>,
}

/// Checks the body of `decl` for unreachable statements and, if
/// `return_type` is not void, for paths that fall off the end.
pub(crate) fn check_returns(decl: &FunctionDecl, return_type: TypeId) -> Vec<TypeError> {
    let mut paths = ReturnPaths::default();
    let returns = paths.block(&decl.body);

    if !returns && return_type != TypeId::Void && paths.errors.is_empty() {
        paths
            .errors
            .push(TypeError::new(TypeErrorKind::MissingReturn {
                function: decl.name.name.clone(),
                span: decl.name.span,
            }));
    }
    paths.errors
}

impl ReturnPaths {
    fn block(&mut self, statements: &[Stmt]) -> bool {
        for (index, stmt) in statements.iter().enumerate() {
            if !self.stmt(stmt) {
                continue;
            }
            if index + 1 < statements.len() {
                let span = self.last_return.unwrap_or_else(|| stmt.span());
                self.errors
                    .push(TypeError::new(TypeErrorKind::UnreachableCode { span }));
            }
            return true;
        }
        false
    }

    fn stmt(&mut self, stmt: &Stmt) -> bool {
        ensure_sufficient_stack(|| self.stmt_returns(stmt))
    }

    fn stmt_returns(&mut self, stmt: &Stmt) -> bool {
        match stmt {
            Stmt::Return { keyword, .. } => {
                self.last_return = Some(*keyword);
                true
            }
            Stmt::Block { statements, .. } => self.block(statements),
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                // Both branches are visited so each reports its own dead code.
                let then_returns = self.stmt(then_branch);
                let else_returns = match else_branch {
                    Some(branch) => self.stmt(branch),
                    None => false,
                };
                then_returns && else_returns
            }
            Stmt::While { body, .. } => self.stmt(body),
            Stmt::Expression(_) | Stmt::Var(_) | Stmt::Function(_) => false,
        }
    }
}
