//! Reporting problems found in any phase.
//!
//! Phases report into a [`DiagnosticSink`] instead of failing on the first
//! problem. [`Diagnostics`] is the collecting sink used by the engine.

pub mod context;
mod sink;

use core::fmt;

pub use sink::{Aborted, DiagnosticSink, Diagnostics};

/// The phase that found a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Semantic,
    Runtime,
}

impl DiagnosticKind {
    pub fn title(self) -> &'static str {
        match self {
            DiagnosticKind::Lexical => "lexical error",
            DiagnosticKind::Syntax => "syntax error",
            DiagnosticKind::Semantic => "semantic error",
            DiagnosticKind::Runtime => "runtime error",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
