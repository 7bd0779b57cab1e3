//! Compiled programs.

use std::io;

use super::{Error, ExecutionOptions};
use crate::evaluator;
use crate::parser::Stmt;
use crate::values::Value;

/// A parsed and type-checked Spike program.
///
/// Every expression in the tree carries its inferred type. Each run starts
/// from a fresh global scope.
#[derive(Debug, Clone)]
pub struct Program {
    statements: Vec<Stmt>,
    source: String,
    options: ExecutionOptions,
}

impl Program {
    pub(crate) fn new(statements: Vec<Stmt>, source: &str, options: ExecutionOptions) -> Self {
        Self {
            statements,
            source: source.to_string(),
            options,
        }
    }

    /// Run the program with its default execution options.
    ///
    /// Output of `print` goes to `out`. Returns the value returned by `main`
    /// (`null` for a void `main`).
    pub fn run(&self, out: &mut dyn io::Write) -> Result<Value, Error> {
        self.run_with(self.options, out)
    }

    pub fn run_with(&self, options: ExecutionOptions, out: &mut dyn io::Write) -> Result<Value, Error> {
        evaluator::run(&self.statements, options.into(), out).map_err(|error| Error::Runtime {
            diagnostic: error.to_diagnostic(),
            src: self.source.clone(),
        })
    }

    /// The top-level statements.
    pub fn statements(&self) -> &[Stmt] {
        &self.statements
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}
