use crate::api::Diagnostic;
use crate::diagnostics::DiagnosticKind;
use crate::diagnostics::context::Context;
use crate::parser::Span;

/// Lexical or syntax error with context
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub context: Vec<Context>,
}

/// Specific kinds of lexical and syntax errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// A character that starts no token
    UnexpectedCharacter { text: String },
    /// A string literal without its closing quote
    UnterminatedString,
    /// An escape sequence other than `\" \\ \n \t`
    InvalidEscape { sequence: String },
    /// An integer literal that does not fit in 64 bits
    IntegerOutOfRange { text: String },

    /// A required token is missing
    Expected {
        expected: String,
        location: &'static str,
        found: String,
    },
    /// No expression starts at this token
    ExpectedExpression { found: String },
    /// Left-hand side of `=` is not a plain variable
    InvalidAssignmentTarget,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            context: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context.push(context);
        self
    }

    pub fn is_lexical(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::UnexpectedCharacter { .. }
                | ParseErrorKind::UnterminatedString
                | ParseErrorKind::InvalidEscape { .. }
                | ParseErrorKind::IntegerOutOfRange { .. }
        )
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (message, code, help) = match &self.kind {
            ParseErrorKind::UnexpectedCharacter { text } => {
                (format!("Unexpected character '{}'", text), "L001", vec![])
            }
            ParseErrorKind::UnterminatedString => (
                "Unterminated string literal".to_string(),
                "L002",
                vec!["Add the missing closing '\"'".to_string()],
            ),
            ParseErrorKind::InvalidEscape { sequence } => (
                format!("Invalid escape sequence '{}'", sequence),
                "L003",
                vec!["Supported escapes are \\\", \\\\, \\n and \\t".to_string()],
            ),
            ParseErrorKind::IntegerOutOfRange { text } => (
                format!("Integer literal '{}' is out of range", text),
                "L004",
                vec![format!("The largest integer is {}", i64::MAX)],
            ),
            ParseErrorKind::Expected {
                expected,
                location,
                found,
            } => (
                format!("{} is missing {}, found {}", expected, location, found),
                "P001",
                vec![],
            ),
            ParseErrorKind::ExpectedExpression { found } => {
                (format!("Expected expression, found {}", found), "P002", vec![])
            }
            ParseErrorKind::InvalidAssignmentTarget => (
                "Invalid assignment target".to_string(),
                "P003",
                vec!["Only a variable name can appear on the left of '='".to_string()],
            ),
        };

        let kind = if self.is_lexical() {
            DiagnosticKind::Lexical
        } else {
            DiagnosticKind::Syntax
        };

        let mut diagnostic = Diagnostic::error(kind, self.span, message).with_code(code);
        diagnostic.help = help;
        diagnostic.related = self.context.iter().map(Context::to_related_info).collect();
        diagnostic
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let diagnostic = self.to_diagnostic();
        write!(f, "{}: {}", diagnostic.severity, diagnostic.message)?;

        if let Some(ref code) = diagnostic.code {
            write!(f, " [{}]", code)?;
        }

        for help_msg in &diagnostic.help {
            write!(f, "\nhelp: {}", help_msg)?;
        }

        Ok(())
    }
}
