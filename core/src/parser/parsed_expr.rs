use core::cell::Cell;
use core::fmt;
use std::rc::Rc;

use crate::parser::syntax::{BinaryOp, InfixOp, LogicalOp, Span, UnaryOp};
use crate::types::TypeId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Double(f64),
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Double(d) => write!(f, "{:?}", d),
            Literal::Null => f.write_str("null"),
        }
    }
}

/// A name as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Grouping(Box<Expr>),
    Literal(Literal),
    StringLiteral(String),
    Variable(Ident),
    Assign {
        target: Ident,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
}

/// Expression node with its inferred type.
///
/// The type starts out unset and is written exactly once by the analyzer.
/// Equality ignores it, so trees from different parsers compare equal
/// whether or not they have been checked.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    ty: Cell<Option<TypeId>>,
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.span == other.span
    }
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            kind,
            span,
            ty: Cell::new(None),
        }
    }

    pub fn ty(&self) -> Option<TypeId> {
        self.ty.get()
    }

    /// Records the inferred type. Later writes are ignored.
    pub fn set_ty(&self, ty: TypeId) {
        if self.ty.get().is_none() {
            self.ty.set(Some(ty));
        }
    }

    pub fn literal(literal: Literal, span: Span) -> Self {
        Self::new(ExprKind::Literal(literal), span)
    }

    pub fn string(value: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::StringLiteral(value.into()), span)
    }

    pub fn variable(name: Ident) -> Self {
        let span = name.span;
        Self::new(ExprKind::Variable(name), span)
    }

    pub fn unary(op: UnaryOp, op_span: Span, operand: Expr) -> Self {
        let span = Span::combine(&op_span, &operand.span);
        Self::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        )
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        let span = Span::combine(&left.span, &right.span);
        Self::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Self {
        let span = Span::combine(&left.span, &right.span);
        Self::new(
            ExprKind::Logical {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    pub fn infix(op: InfixOp, left: Expr, right: Expr) -> Self {
        match op {
            InfixOp::Binary(op) => Self::binary(op, left, right),
            InfixOp::Logical(op) => Self::logical(op, left, right),
        }
    }

    pub fn grouping(inner: Expr, open: Span, close: Span) -> Self {
        Self::new(
            ExprKind::Grouping(Box::new(inner)),
            Span::combine(&open, &close),
        )
    }

    pub fn call(callee: Expr, arguments: Vec<Expr>, close: Span) -> Self {
        let span = Span::combine(&callee.span, &close);
        Self::new(
            ExprKind::Call {
                callee: Box::new(callee),
                arguments,
            },
            span,
        )
    }

    pub fn assign(target: Ident, value: Expr) -> Self {
        let span = Span::combine(&target.span, &value.span);
        Self::new(
            ExprKind::Assign {
                target,
                value: Box::new(value),
            },
            span,
        )
    }

    /// `target op= value`, expanded to `target = target op value`.
    pub fn compound_assign(target: Ident, op: BinaryOp, value: Expr) -> Self {
        let current = Self::variable(target.clone());
        Self::assign(target, Self::binary(op, current, value))
    }
}

/// S-expression form, e.g. `(+ a (* b c))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Unary { op, operand } => write!(f, "({} {})", op, operand),
            ExprKind::Binary { op, left, right } => write!(f, "({} {} {})", op, left, right),
            ExprKind::Logical { op, left, right } => write!(f, "({} {} {})", op, left, right),
            ExprKind::Grouping(inner) => write!(f, "(group {})", inner),
            ExprKind::Literal(literal) => write!(f, "{}", literal),
            ExprKind::StringLiteral(s) => write!(f, "{:?}", s),
            ExprKind::Variable(name) => f.write_str(&name.name),
            ExprKind::Assign { target, value } => write!(f, "(= {} {})", target.name, value),
            ExprKind::Call { callee, arguments } => {
                write!(f, "(call {}", callee)?;
                for argument in arguments {
                    write!(f, " {}", argument)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A type name as written in a declaration, resolved by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Ident,
    pub ty: TypeName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Ident,
    pub params: Vec<Param>,
    pub return_type: TypeName,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Ident,
    pub ty: Option<TypeName>,
    pub initializer: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    Var(VarDecl),
    Block {
        statements: Vec<Stmt>,
        span: Span,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        span: Span,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
        span: Span,
    },
    Function(Rc<FunctionDecl>),
    Return {
        keyword: Span,
        value: Option<Expr>,
    },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Expression(expr) => expr.span,
            Stmt::Var(decl) => decl.span,
            Stmt::Block { span, .. } | Stmt::If { span, .. } | Stmt::While { span, .. } => *span,
            Stmt::Function(decl) => decl.span,
            Stmt::Return { keyword, .. } => *keyword,
        }
    }

    /// Short name of the statement form, for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Stmt::Expression(_) => "expression statement",
            Stmt::Var(_) => "variable declaration",
            Stmt::Block { .. } => "block",
            Stmt::If { .. } => "if statement",
            Stmt::While { .. } => "while statement",
            Stmt::Function(_) => "function declaration",
            Stmt::Return { .. } => "return statement",
        }
    }
}
