//! Callable runtime values.
//!
//! A user function pairs its declaration with the environment it was
//! declared in. The environment is shared, not copied, so the function sees
//! later changes to captured variables and keeps the frame alive after the
//! declaring block has exited.

use core::fmt;
use std::io;
use std::rc::Rc;

use super::value::Value;
use crate::environment::Environment;
use crate::parser::FunctionDecl;
use crate::types::TypeId;

/// Signature of functions implemented in Rust.
///
/// Output goes to `out`; arguments have already been checked against the
/// declared parameter list.
pub type NativeFn = fn(out: &mut dyn io::Write, args: &[Value]) -> Result<Value, io::Error>;

/// A predeclared function, visible to both the analyzer and the evaluator.
#[derive(Debug)]
pub struct Builtin {
    pub name: &'static str,
    pub params: &'static [(&'static str, TypeId)],
    pub return_type: TypeId,
    pub function: NativeFn,
}

impl Builtin {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

pub struct UserFunction {
    pub declaration: Rc<FunctionDecl>,
    pub closure: Environment<Value>,
}

impl UserFunction {
    pub fn name(&self) -> &str {
        &self.declaration.name.name
    }

    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

// The closure may (indirectly) contain this function, so it is not printed.
impl fmt::Debug for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFunction")
            .field("name", &self.name())
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum Callable {
    User(Rc<UserFunction>),
    Native(&'static Builtin),
}

impl Callable {
    pub fn new(declaration: Rc<FunctionDecl>, closure: Environment<Value>) -> Self {
        Callable::User(Rc::new(UserFunction {
            declaration,
            closure,
        }))
    }

    pub fn name(&self) -> &str {
        match self {
            Callable::User(function) => function.name(),
            Callable::Native(builtin) => builtin.name,
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Callable::User(function) => function.arity(),
            Callable::Native(builtin) => builtin.arity(),
        }
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::User(a), Callable::User(b)) => Rc::ptr_eq(a, b),
            (Callable::Native(a), Callable::Native(b)) => core::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::User(function) => write!(f, "<fn {}>", function.name()),
            Callable::Native(builtin) => write!(f, "<native fn {}>", builtin.name),
        }
    }
}
