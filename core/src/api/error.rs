//! Public error types for the Spike API.
//!
//! Lexical, syntax and semantic problems are collected as [`Diagnostic`]s and
//! returned together; a runtime failure stops execution and is returned as a
//! single diagnostic. Both carry the source text so callers can render them
//! without keeping it around.

use core::fmt;

use thiserror::Error;

use crate::diagnostics::DiagnosticKind;
use crate::parser::Span;

/// Public error type for all Spike operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Lexing, parsing or type checking failed.
    ///
    /// Contains every diagnostic reported before the failing phase stopped.
    #[error("{} failed with {} error(s)", phase_name(.diagnostics), error_count(.diagnostics))]
    Compilation {
        diagnostics: Vec<Diagnostic>,
        src: String,
    },

    /// The program stopped with a runtime error.
    #[error("Runtime error: {}", .diagnostic.message)]
    Runtime { diagnostic: Diagnostic, src: String },
}

fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count()
}

fn phase_name(diagnostics: &[Diagnostic]) -> &'static str {
    match diagnostics.first().map(|d| d.kind) {
        Some(DiagnosticKind::Lexical) => "Lexing",
        Some(DiagnosticKind::Syntax) => "Parsing",
        _ => "Type checking",
    }
}

impl Error {
    /// All diagnostics carried by this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Error::Compilation { diagnostics, .. } => diagnostics,
            Error::Runtime { diagnostic, .. } => core::slice::from_ref(diagnostic),
        }
    }

    /// The source text the diagnostics point into.
    pub fn source_text(&self) -> &str {
        match self {
            Error::Compilation { src, .. } | Error::Runtime { src, .. } => src,
        }
    }
}

/// A diagnostic message (error, warning, or info) with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Phase that found the problem.
    pub kind: DiagnosticKind,

    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Related locations that provide additional context.
    pub related: Vec<RelatedInfo>,

    /// Suggestions for fixing the issue.
    pub help: Vec<String>,

    /// Optional error code (e.g., "E001") for documentation lookup.
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            message: message.into(),
            span,
            related: Vec::new(),
            help: Vec::new(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    pub fn with_related(mut self, related: RelatedInfo) -> Self {
        self.related.push(related);
        self
    }

    pub fn line(&self) -> u32 {
        self.span.line
    }

    pub fn column(&self) -> u32 {
        self.span.column
    }
}

/// `[line:column] kind: message [code]`
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.span, self.kind, self.message)?;
        if let Some(code) = &self.code {
            write!(f, " [{}]", code)?;
        }
        Ok(())
    }
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - compilation cannot succeed.
    Error,
    /// Warning - suspicious code that might be wrong.
    Warning,
    /// Info - informational message.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Related information for a diagnostic (e.g., "first declared here").
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedInfo {
    /// Source location of the related information.
    pub span: Span,

    /// Message explaining the relevance.
    pub message: String,
}
