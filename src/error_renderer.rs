//! Error rendering using ariadne
//!
//! Renders Spike diagnostics with source snippets, secondary labels for
//! related locations and help notes.

use crate::{Diagnostic, Error, Severity};
use ariadne::{Color, ColorGenerator, Config, IndexType, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<input>";

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use spike::{Engine, EngineOptions, render_error};
///
/// let engine = Engine::new(EngineOptions::default());
/// if let Err(e) = engine.compile("var x: int = true;") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for UIs and logs)
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes
///
/// Same as `render_error_to_string`, but easier to compare in tests.
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    render_diagnostics(error.source_text(), error.diagnostics(), writer, use_color)
}

fn render_diagnostics(
    source: &str,
    diagnostics: &[Diagnostic],
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    for diag in diagnostics {
        let mut colors = ColorGenerator::new();
        colors.next(); // Skip the first color.

        let kind = match diag.severity {
            Severity::Error => ReportKind::Custom(diag.kind.title(), Color::Red),
            Severity::Warning => ReportKind::Warning,
            Severity::Info => ReportKind::Advice,
        };

        let config = Config::default()
            .with_color(use_color)
            .with_index_type(IndexType::Byte);
        let mut report = Report::build(kind, (SOURCE_ID, diag.span.range()))
            .with_message(format!("[{}] {}", diag.span, diag.message))
            .with_config(config);

        if let Some(code) = &diag.code {
            report = report.with_code(code);
        }

        let color = colors.next();
        report = report.with_label(
            Label::new((SOURCE_ID, diag.span.range()))
                .with_message(&diag.message)
                .with_color(color),
        );

        // Related locations as secondary labels
        for related in &diag.related {
            let color = colors.next();
            report = report.with_label(
                Label::new((SOURCE_ID, related.span.range()))
                    .with_message(&related.message)
                    .with_color(color),
            );
        }

        for help_msg in &diag.help {
            report = report.with_help(help_msg);
        }

        report
            .finish()
            .write((SOURCE_ID, Source::from(source)), &mut *writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Engine, EngineOptions};

    fn compile_error(source: &str) -> Error {
        match Engine::new(EngineOptions::default()).compile(source) {
            Err(e) => e,
            Ok(_) => panic!("expected {:?} to fail", source),
        }
    }

    #[test]
    fn test_render_syntax_error() {
        let source = "function main(): void { var x = ; }";
        let output = render_error_to_string_no_color(&compile_error(source));

        assert!(output.contains("syntax error"), "{}", output);
        assert!(output.contains("[P002]"), "{}", output);
        assert!(output.contains("var x = ;"), "{}", output);
    }

    #[test]
    fn test_render_type_error_with_code() {
        let source = "var x: int = true;\nfunction main(): void {}";
        let output = render_error_to_string_no_color(&compile_error(source));

        assert!(output.contains("semantic error"), "{}", output);
        assert!(output.contains("[1:"), "{}", output);
    }

    #[test]
    fn test_render_related_location() {
        let source = "var a: int = 1;\nvar a: int = 2;\nfunction main(): void {}";
        let output = render_error_to_string_no_color(&compile_error(source));

        // Both declarations appear as labelled lines
        assert!(output.contains("var a: int = 1;"), "{}", output);
        assert!(output.contains("var a: int = 2;"), "{}", output);
    }

    #[test]
    fn test_render_runtime_error() {
        let engine = Engine::new(EngineOptions::default());
        let program = engine
            .compile("function main(): void { print(1 / 0); }")
            .unwrap();
        let error = program.run(&mut Vec::new()).unwrap_err();
        let output = render_error_to_string_no_color(&error);

        assert!(output.contains("runtime error"), "{}", output);
        assert!(output.contains("Division by zero"), "{}", output);
        assert!(output.lines().count() > 1);
    }
}
