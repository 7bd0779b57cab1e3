use crate::api::Diagnostic;
use crate::diagnostics::DiagnosticKind;
use crate::diagnostics::context::Context;
use crate::parser::{Span, UnaryOp};
use crate::types::TypeId;

/// Semantic error with context
#[derive(Debug, Clone)]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub context: Vec<Context>,
}

impl core::fmt::Display for TypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let diagnostic = self.to_diagnostic();
        write!(f, "{}: {}", diagnostic.severity, diagnostic.message)?;

        if let Some(ref code) = diagnostic.code {
            write!(f, " [{}]", code)?;
        }

        for help in &diagnostic.help {
            write!(f, "\nhelp: {}", help)?;
        }

        Ok(())
    }
}

/// Specific kinds of semantic errors
#[derive(Debug, Clone, PartialEq)]
pub enum TypeErrorKind {
    /// Value type differs from the declared type of a variable
    Nonconforming {
        expected: TypeId,
        found: TypeId,
        name: String,
        span: Span,
    },
    /// Name already bound in the same scope
    AlreadyDefined { name: String, span: Span },
    /// Unbound variable
    UndefinedVariable { name: String, span: Span },
    /// Type name that is not part of the lattice
    UndefinedType { name: String, span: Span },
    /// Call of a name that is not bound
    UndefinedFunction { name: String, span: Span },
    /// Callee is not a plain name, or names a variable
    NotCallable { what: String, span: Span },
    /// Wrong number of call arguments
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
        span: Span,
    },
    /// Argument type does not conform to the parameter type
    ArgumentMismatch {
        function: String,
        parameter: String,
        expected: TypeId,
        found: TypeId,
        span: Span,
    },
    InvalidUnaryOperand {
        op: UnaryOp,
        operand: TypeId,
        span: Span,
    },
    InvalidBinaryOperands {
        op: String,
        left: TypeId,
        right: TypeId,
        span: Span,
    },
    /// `if`/`while` condition that is not `bool`
    InvalidCondition {
        statement: &'static str,
        found: TypeId,
        span: Span,
    },
    MainHasParameters { count: usize, span: Span },
    DuplicateMain { previous: Span, span: Span },
    MissingMain { span: Span },
    /// Statement other than `var`/`function` at top level
    TopLevelStatement { statement: &'static str, span: Span },
    DuplicateParameter {
        name: String,
        function: String,
        span: Span,
    },
    /// `return;` in a function with a non-void return type
    EmptyReturn { function: String, span: Span },
    ReturnOutsideFunction { span: Span },
    ReturnMismatch {
        function: String,
        expected: TypeId,
        found: TypeId,
        span: Span,
    },
    /// Non-void function with a path that does not return
    MissingReturn { function: String, span: Span },
    UnreachableCode { span: Span },
    /// Variable with neither a type annotation nor a typed initializer
    CannotInfer { name: String, span: Span },
    /// Function name used as a variable
    NotAVariable { name: String, span: Span },
}

impl TypeErrorKind {
    /// Get the span of the error
    pub fn span(&self) -> Span {
        match self {
            TypeErrorKind::Nonconforming { span, .. }
            | TypeErrorKind::AlreadyDefined { span, .. }
            | TypeErrorKind::UndefinedVariable { span, .. }
            | TypeErrorKind::UndefinedType { span, .. }
            | TypeErrorKind::UndefinedFunction { span, .. }
            | TypeErrorKind::NotCallable { span, .. }
            | TypeErrorKind::ArityMismatch { span, .. }
            | TypeErrorKind::ArgumentMismatch { span, .. }
            | TypeErrorKind::InvalidUnaryOperand { span, .. }
            | TypeErrorKind::InvalidBinaryOperands { span, .. }
            | TypeErrorKind::InvalidCondition { span, .. }
            | TypeErrorKind::MainHasParameters { span, .. }
            | TypeErrorKind::DuplicateMain { span, .. }
            | TypeErrorKind::MissingMain { span }
            | TypeErrorKind::TopLevelStatement { span, .. }
            | TypeErrorKind::DuplicateParameter { span, .. }
            | TypeErrorKind::EmptyReturn { span, .. }
            | TypeErrorKind::ReturnOutsideFunction { span }
            | TypeErrorKind::ReturnMismatch { span, .. }
            | TypeErrorKind::MissingReturn { span, .. }
            | TypeErrorKind::UnreachableCode { span }
            | TypeErrorKind::CannotInfer { span, .. }
            | TypeErrorKind::NotAVariable { span, .. } => *span,
        }
    }
}

impl TypeError {
    /// Create a new TypeError with no context
    pub fn new(kind: TypeErrorKind) -> Self {
        Self {
            kind,
            context: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context.push(context);
        self
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (message, code, help) = match &self.kind {
            TypeErrorKind::Nonconforming {
                expected,
                found,
                name,
                ..
            } => (
                format!(
                    "Type of expression '{}' doesn't conform to declared type '{}' of '{}'",
                    found, expected, name
                ),
                "E001",
                None,
            ),
            TypeErrorKind::AlreadyDefined { name, .. } => (
                format!("'{}' is already defined", name),
                "E002",
                Some("Names must be unique within a scope"),
            ),
            TypeErrorKind::UndefinedVariable { name, .. } => (
                format!("Variable '{}' is not defined", name),
                "E003",
                Some("Make sure the variable is declared before use"),
            ),
            TypeErrorKind::UndefinedType { name, .. } => (
                format!("Type '{}' is not defined", name),
                "E004",
                Some("Available types are Object, int, double, bool, String and void"),
            ),
            TypeErrorKind::UndefinedFunction { name, .. } => (
                format!("Undefined reference to function '{}'", name),
                "E005",
                None,
            ),
            TypeErrorKind::NotCallable { what, .. } => {
                (format!("{} is not callable", what), "E006", Some("Only functions can be called"))
            }
            TypeErrorKind::ArityMismatch {
                function,
                expected,
                found,
                ..
            } => (
                format!(
                    "Invalid number of arguments to '{}', {} expected, but found {}",
                    function, expected, found
                ),
                "E007",
                None,
            ),
            TypeErrorKind::ArgumentMismatch {
                function,
                parameter,
                expected,
                found,
                ..
            } => (
                format!(
                    "Inferred type '{}' of argument '{}' to '{}' does not conform to declared type '{}'",
                    found, parameter, function, expected
                ),
                "E008",
                None,
            ),
            TypeErrorKind::InvalidUnaryOperand { op, operand, .. } => (
                format!("Operator '{}' cannot be applied to '{}'", op, operand),
                "E009",
                Some(match op {
                    UnaryOp::Not => "'!' expects a 'bool' operand",
                    UnaryOp::Neg => "'-' is defined only for 'int' and 'double'",
                    UnaryOp::BitNot => "'~' is defined only for 'int'",
                }),
            ),
            TypeErrorKind::InvalidBinaryOperands {
                op, left, right, ..
            } => (
                format!(
                    "Operator '{}' cannot be applied to '{}' and '{}'",
                    op, left, right
                ),
                "E010",
                None,
            ),
            TypeErrorKind::InvalidCondition {
                statement, found, ..
            } => (
                format!(
                    "'{}' condition expects 'bool', but '{}' found",
                    statement, found
                ),
                "E011",
                None,
            ),
            TypeErrorKind::MainHasParameters { count, .. } => (
                format!("'main' takes zero arguments, but {} found", count),
                "E012",
                None,
            ),
            TypeErrorKind::DuplicateMain { previous, .. } => (
                format!(
                    "'main' is already defined, previous declaration at {}",
                    previous
                ),
                "E013",
                None,
            ),
            TypeErrorKind::MissingMain { .. } => (
                "'main' function is not defined".to_string(),
                "E014",
                Some("Add a 'function main(): void { ... }' declaration"),
            ),
            TypeErrorKind::TopLevelStatement { statement, .. } => (
                format!(
                    "Only variable and function declarations are allowed at top level, found {}",
                    statement
                ),
                "E015",
                Some("Move the statement into a function"),
            ),
            TypeErrorKind::DuplicateParameter { name, function, .. } => (
                format!("Parameter '{}' is already defined in '{}'", name, function),
                "E016",
                Some("Each parameter must have a unique name"),
            ),
            TypeErrorKind::EmptyReturn { function, .. } => (
                format!(
                    "Empty return statement in function '{}' returning non-void",
                    function
                ),
                "E017",
                None,
            ),
            TypeErrorKind::ReturnOutsideFunction { .. } => {
                ("'return' outside of a function".to_string(), "E018", None)
            }
            TypeErrorKind::ReturnMismatch {
                function,
                expected,
                found,
                ..
            } => (
                format!(
                    "Inferred type '{}' of return expression does not conform to declared type '{}' of function '{}'",
                    found, expected, function
                ),
                "E019",
                None,
            ),
            TypeErrorKind::MissingReturn { function, .. } => (
                format!(
                    "Control reached the end of non-void function '{}'",
                    function
                ),
                "E020",
                Some("Every path through the function must end in a 'return'"),
            ),
            TypeErrorKind::UnreachableCode { .. } => (
                "Unreachable statement(s) after 'return'".to_string(),
                "E021",
                None,
            ),
            TypeErrorKind::CannotInfer { name, .. } => (
                format!("Cannot infer the type of '{}'", name),
                "E022",
                Some("Add a type annotation or a non-null initializer"),
            ),
            TypeErrorKind::NotAVariable { name, .. } => (
                format!("'{}' is a function, not a variable", name),
                "E023",
                None,
            ),
        };

        let mut diagnostic =
            Diagnostic::error(DiagnosticKind::Semantic, self.kind.span(), message).with_code(code);
        if let Some(help) = help {
            diagnostic = diagnostic.with_help(help);
        }
        diagnostic.related = self.context.iter().map(Context::to_related_info).collect();
        diagnostic
    }
}
