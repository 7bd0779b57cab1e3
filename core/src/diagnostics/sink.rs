use tracing::debug;

use crate::api::{Diagnostic, Severity};
use crate::diagnostics::DiagnosticKind;
use crate::parser::Span;

/// Signal that the current unit of work was abandoned after an error.
///
/// The error itself has already been reported; the receiver only needs to
/// recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted;

/// Receiver for diagnostics produced by the lexer, parser and analyzer.
pub trait DiagnosticSink {
    /// Records a diagnostic without interrupting the caller.
    fn report(&mut self, diagnostic: Diagnostic);

    /// True if an error has been reported since creation or the last reset.
    fn had_errors(&self) -> bool;

    /// Clears the error flag. Already recorded diagnostics are kept.
    fn reset(&mut self);

    fn error(&mut self, kind: DiagnosticKind, span: Span, message: String) {
        self.report(Diagnostic::error(kind, span, message));
    }

    /// Records a diagnostic and returns the signal to abandon the current unit.
    fn panic(&mut self, diagnostic: Diagnostic) -> Aborted {
        self.report(diagnostic);
        Aborted
    }
}

/// Sink that keeps every diagnostic in report order.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
    had_errors: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        debug!(
            kind = %diagnostic.kind,
            location = %diagnostic.span,
            message = %diagnostic.message,
            "Diagnostic reported"
        );
        if diagnostic.severity == Severity::Error {
            self.had_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    fn had_errors(&self) -> bool {
        self.had_errors
    }

    fn reset(&mut self) {
        self.had_errors = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_flag_but_keeps_diagnostics() {
        let mut sink = Diagnostics::new();
        assert!(!sink.had_errors());

        sink.error(
            DiagnosticKind::Syntax,
            Span::start_of_file(),
            "broken".to_string(),
        );
        assert!(sink.had_errors());
        assert_eq!(sink.len(), 1);

        sink.reset();
        assert!(!sink.had_errors());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_panic_reports_and_returns_signal() {
        let mut sink = Diagnostics::new();
        let diagnostic = Diagnostic::error(
            DiagnosticKind::Semantic,
            Span::start_of_file(),
            "bad".to_string(),
        );
        assert_eq!(sink.panic(diagnostic), Aborted);
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn test_warnings_do_not_set_error_flag() {
        let mut sink = Diagnostics::new();
        let mut diagnostic = Diagnostic::error(
            DiagnosticKind::Semantic,
            Span::start_of_file(),
            "odd".to_string(),
        );
        diagnostic.severity = Severity::Warning;
        sink.report(diagnostic);
        assert!(!sink.had_errors());
        assert_eq!(sink.error_count(), 0);
    }
}
