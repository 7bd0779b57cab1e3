//! Tree-walking evaluator for Spike programs.
//!
//! The evaluator runs statements produced by the parser after the analyzer
//! has annotated every expression with its type. Functions are closures:
//! each captures the environment it was declared in and keeps it alive for
//! as long as the function value itself is reachable.
//!
//! ## Design Principles
//!
//! - **Never panic**: failures are returned as [`ExecutionError`]s
//! - **Bounded recursion**: call depth is checked against [`EvaluatorOptions`]
//!
//! ## Example
//!
//! ```ignore
//! let mut out = Vec::new();
//! let result = evaluator::run(&statements, EvaluatorOptions::default(), &mut out)?;
//! ```

mod error;
mod eval;
mod operators;


use std::io;

pub use error::{ExecutionError, ExecutionErrorKind, ResourceExceededError, RuntimeError};
pub use eval::{Flow, Interpreter};

use crate::parser::Stmt;
use crate::values::Value;

/// Limits applied while evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Maximum number of nested user function calls.
    pub max_call_depth: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_call_depth: 1000,
        }
    }
}

/// Run a type-checked program and return the value of its `main` call.
///
/// Program output goes to `out`. The global scope is cleared afterwards,
/// which releases closures that captured it.
pub fn run(
    statements: &[Stmt],
    options: EvaluatorOptions,
    out: &mut dyn io::Write,
) -> Result<Value, ExecutionError> {
    let mut interpreter = Interpreter::new(options, out);
    let result = interpreter.run(statements);
    interpreter.globals().clear();
    result
}
