use crate::api::RelatedInfo;
use crate::parser::Span;

/// Secondary location attached to a diagnostic.
///
/// Each entry is converted to a [`RelatedInfo`] for display.
#[derive(Debug, Clone, PartialEq)]
pub enum Context {
    /// Where something was declared first
    DefinedHere { what: String, span: Span },
    /// In a call to a function
    InFunctionCall { name: String, span: Span },
    /// The declaration whose type is being checked against
    DeclaredAs { type_name: String, span: Span },
}

impl Context {
    /// Convert to a RelatedInfo for diagnostic display
    pub fn to_related_info(&self) -> RelatedInfo {
        match self {
            Context::DefinedHere { what, span } => RelatedInfo {
                span: *span,
                message: format!("{} first declared here", what),
            },
            Context::InFunctionCall { name, span } => RelatedInfo {
                span: *span,
                message: format!("in call to function '{}'", name),
            },
            Context::DeclaredAs { type_name, span } => RelatedInfo {
                span: *span,
                message: format!("declared as '{}' here", type_name),
            },
        }
    }
}
