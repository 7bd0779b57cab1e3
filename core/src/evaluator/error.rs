//! Runtime evaluation errors.
//!
//! Most failure modes (undefined names, wrong operand types, bad arity) are
//! ruled out by the analyzer and only show up when an unchecked tree is run.
//!
//! # Error Categories
//!
//! - **Runtime errors**: problems with the program's own values, such as an
//!   integer division by zero.
//!
//! - **Resource exceeded errors**: evaluation hit a configured limit (call
//!   depth).

use std::io;

use thiserror::Error;

use crate::api::Diagnostic;
use crate::diagnostics::DiagnosticKind;
use crate::parser::Span;

/// Evaluation failure at a source location.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct ExecutionError {
    pub kind: ExecutionErrorKind,
    pub span: Span,
}

#[derive(Debug, Error)]
pub enum ExecutionErrorKind {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    ResourceExceeded(#[from] ResourceExceededError),
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Integer `/` or `%` with a zero divisor.
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("Value of type '{type_name}' is not callable")]
    NotCallable { type_name: String },

    #[error("'{function}' expects {expected} argument(s), but {found} given")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("Operator '{op}' cannot be applied to {operands}")]
    InvalidOperand { op: String, operands: String },

    /// The tree was not type-checked before evaluation.
    #[error("Expression has no inferred type")]
    Unannotated,

    #[error("Failed to write program output")]
    Output(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum ResourceExceededError {
    #[error("Stack overflow: call depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },
}

impl ExecutionError {
    pub fn new(kind: impl Into<ExecutionErrorKind>, span: Span) -> Self {
        Self {
            kind: kind.into(),
            span,
        }
    }

    pub fn code(&self) -> &'static str {
        match &self.kind {
            ExecutionErrorKind::Runtime(error) => match error {
                RuntimeError::DivisionByZero => "R001",
                RuntimeError::UndefinedVariable { .. } => "R002",
                RuntimeError::NotCallable { .. } => "R003",
                RuntimeError::ArityMismatch { .. } => "R004",
                RuntimeError::InvalidOperand { .. } => "R005",
                RuntimeError::Unannotated => "R006",
                RuntimeError::Output(_) => "R007",
            },
            ExecutionErrorKind::ResourceExceeded(ResourceExceededError::StackOverflow {
                ..
            }) => "R008",
        }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(DiagnosticKind::Runtime, self.span, self.to_string())
            .with_code(self.code());
        match &self.kind {
            ExecutionErrorKind::ResourceExceeded(_) => {
                diagnostic.with_help("Check for unbounded recursion")
            }
            ExecutionErrorKind::Runtime(RuntimeError::Output(source)) => {
                diagnostic.with_help(source.to_string())
            }
            ExecutionErrorKind::Runtime(_) => diagnostic,
        }
    }
}
