use core::mem;
use std::rc::Rc;

use tracing::{debug, instrument, trace};

use crate::analyzer::error::{TypeError, TypeErrorKind};
use crate::analyzer::returns;
use crate::diagnostics::DiagnosticSink;
use crate::diagnostics::context::Context;
use crate::environment::Environment;
use crate::parser::{
    BinaryOp, Expr, ExprKind, FunctionDecl, InfixOp, Literal, Span, Stmt, TypeName, UnaryOp,
    VarDecl,
};
use crate::stack::ensure_sufficient_stack;
use crate::stdlib;
use crate::types::TypeId;

/// Resolved signature of a user function or builtin.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub name: String,
    pub params: Vec<(String, TypeId)>,
    pub return_type: TypeId,
    /// Declaration site; `None` for builtins.
    pub span: Option<Span>,
}

/// What a name is bound to while checking.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Variable { ty: TypeId, span: Span },
    Function(Rc<Signature>),
}

impl Binding {
    pub fn span(&self) -> Option<Span> {
        match self {
            Binding::Variable { span, .. } => Some(*span),
            Binding::Function(signature) => signature.span,
        }
    }
}

/// Type-checks a parsed program, setting the type of every expression.
///
/// Errors are reported to `sink`. Returns true if the program is well typed.
pub fn analyze(statements: &[Stmt], sink: &mut dyn DiagnosticSink) -> bool {
    let mut analyzer = Analyzer::new(sink);
    analyzer.check_program(statements);
    analyzer.error_count == 0
}

struct Analyzer<'s> {
    sink: &'s mut dyn DiagnosticSink,
    environment: Environment<Binding>,
    current_function: Option<Rc<Signature>>,
    main: Option<Span>,
    error_count: usize,
}

impl<'s> Analyzer<'s> {
    fn new(sink: &'s mut dyn DiagnosticSink) -> Self {
        Self {
            sink,
            environment: Environment::new(),
            current_function: None,
            main: None,
            error_count: 0,
        }
    }

    fn report(&mut self, error: TypeError) {
        self.error_count += 1;
        self.sink.report(error.to_diagnostic());
    }

    fn error(&mut self, kind: TypeErrorKind) {
        self.report(TypeError::new(kind));
    }

    #[instrument(level = "debug", skip_all, fields(count = statements.len()))]
    fn check_program(&mut self, statements: &[Stmt]) {
        self.define_builtins();

        self.gather_globals(statements);
        debug!(errors = self.error_count, "Gathered globals");
        if self.error_count > 0 {
            return;
        }

        for stmt in statements {
            if let Stmt::Var(decl) = stmt {
                self.check_var(decl);
            }
        }
        for stmt in statements {
            if let Stmt::Function(decl) = stmt {
                if let Some(Binding::Function(signature)) = self.environment.get(&decl.name.name) {
                    self.check_body(decl, signature);
                }
            }
        }
        debug!(errors = self.error_count, "Checked statements");
    }

    fn define_builtins(&mut self) {
        for builtin in stdlib::BUILTINS {
            let signature = Signature {
                name: builtin.name.to_string(),
                params: builtin
                    .params
                    .iter()
                    .map(|(name, ty)| (name.to_string(), *ty))
                    .collect(),
                return_type: builtin.return_type,
                span: None,
            };
            self.environment
                .define(builtin.name, Binding::Function(Rc::new(signature)));
        }
    }

    /// Binds every top-level function and validates top-level declarations.
    fn gather_globals(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            match stmt {
                Stmt::Function(decl) if decl.name.name == "main" => self.declare_main(decl),
                Stmt::Function(decl) => {
                    self.declare_function(decl);
                }
                Stmt::Var(decl) => {
                    if let Some(ty) = &decl.ty {
                        self.resolve_type(ty);
                    }
                }
                other => self.error(TypeErrorKind::TopLevelStatement {
                    statement: other.describe(),
                    span: other.span(),
                }),
            }
        }

        if self.main.is_none() {
            self.error(TypeErrorKind::MissingMain {
                span: Span::start_of_file(),
            });
        }
    }

    fn declare_main(&mut self, decl: &FunctionDecl) {
        if let Some(previous) = self.main {
            let error = TypeError::new(TypeErrorKind::DuplicateMain {
                previous,
                span: decl.name.span,
            })
            .with_context(Context::DefinedHere {
                what: "'main'".to_string(),
                span: previous,
            });
            self.report(error);
            return;
        }

        if !decl.params.is_empty() {
            self.error(TypeErrorKind::MainHasParameters {
                count: decl.params.len(),
                span: decl.name.span,
            });
        }
        let signature = self.signature(decl);
        self.environment
            .define("main", Binding::Function(signature));
        self.main = Some(decl.name.span);
    }

    /// Resolves the signature and binds it in the current scope unless the
    /// name is taken there.
    fn declare_function(&mut self, decl: &FunctionDecl) -> Rc<Signature> {
        let signature = self.signature(decl);
        if self.check_unique(&decl.name.name, decl.name.span) {
            self.environment
                .define(decl.name.name.as_str(), Binding::Function(signature.clone()));
        }
        signature
    }

    /// Reports `name` if the current scope already binds it.
    fn check_unique(&mut self, name: &str, span: Span) -> bool {
        if !self.environment.probe(name) {
            return true;
        }
        let mut error = TypeError::new(TypeErrorKind::AlreadyDefined {
            name: name.to_string(),
            span,
        });
        if let Some(previous) = self.environment.get(name).and_then(|b| b.span()) {
            error = error.with_context(Context::DefinedHere {
                what: format!("'{}'", name),
                span: previous,
            });
        }
        self.report(error);
        false
    }

    fn signature(&mut self, decl: &FunctionDecl) -> Rc<Signature> {
        let mut params: Vec<(String, TypeId)> = Vec::with_capacity(decl.params.len());
        for param in &decl.params {
            let ty = self.resolve_type(&param.ty).unwrap_or(TypeId::Object);
            if params.iter().any(|(name, _)| *name == param.name.name) {
                self.error(TypeErrorKind::DuplicateParameter {
                    name: param.name.name.clone(),
                    function: decl.name.name.clone(),
                    span: param.name.span,
                });
            }
            params.push((param.name.name.clone(), ty));
        }
        let return_type = self
            .resolve_type(&decl.return_type)
            .unwrap_or(TypeId::Object);

        Rc::new(Signature {
            name: decl.name.name.clone(),
            params,
            return_type,
            span: Some(decl.name.span),
        })
    }

    fn resolve_type(&mut self, name: &TypeName) -> Option<TypeId> {
        let ty = TypeId::resolve(&name.name);
        if ty.is_none() {
            self.error(TypeErrorKind::UndefinedType {
                name: name.name.clone(),
                span: name.span,
            });
        }
        ty
    }

    /// Runs `f` in a fresh nested scope.
    fn scoped(&mut self, f: impl FnOnce(&mut Self)) {
        let inner = self.environment.child();
        let outer = mem::replace(&mut self.environment, inner);
        f(self);
        self.environment = outer;
    }

    fn check_body(&mut self, decl: &FunctionDecl, signature: Rc<Signature>) {
        trace!(function = %decl.name.name, "Checking function body");
        let function_scope = self.environment.child();
        for (param, (name, ty)) in decl.params.iter().zip(&signature.params) {
            if !function_scope.probe(name) {
                function_scope.define(
                    name.as_str(),
                    Binding::Variable {
                        ty: *ty,
                        span: param.name.span,
                    },
                );
            }
        }

        let outer_scope = mem::replace(&mut self.environment, function_scope);
        let outer_function = self.current_function.replace(signature.clone());
        for stmt in &decl.body {
            self.check_stmt(stmt);
        }
        self.current_function = outer_function;
        self.environment = outer_scope;

        for error in returns::check_returns(decl, signature.return_type) {
            self.report(error);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        ensure_sufficient_stack(|| self.check_stmt_kind(stmt))
    }

    fn check_stmt_kind(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) => {
                self.infer(expr);
            }
            Stmt::Var(decl) => self.check_var(decl),
            Stmt::Block { statements, .. } => self.scoped(|this| {
                for stmt in statements {
                    this.check_stmt(stmt);
                }
            }),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.check_condition("if", condition);
                self.scoped(|this| this.check_stmt(then_branch));
                if let Some(else_branch) = else_branch {
                    self.scoped(|this| this.check_stmt(else_branch));
                }
            }
            Stmt::While {
                condition, body, ..
            } => {
                self.check_condition("while", condition);
                self.scoped(|this| this.check_stmt(body));
            }
            Stmt::Function(decl) => {
                let signature = self.declare_function(decl);
                self.check_body(decl, signature);
            }
            Stmt::Return { keyword, value } => self.check_return(*keyword, value.as_ref()),
        }
    }

    fn check_condition(&mut self, statement: &'static str, condition: &Expr) {
        let found = self.infer(condition);
        if !found.matches(TypeId::Bool) {
            self.error(TypeErrorKind::InvalidCondition {
                statement,
                found,
                span: condition.span,
            });
        }
    }

    fn check_var(&mut self, decl: &VarDecl) {
        // The initializer cannot see the variable it initializes.
        let found = decl.initializer.as_ref().map(|init| self.infer(init));
        let declared = decl.ty.as_ref().map(|ty| self.resolve_type(ty));

        let ty = match declared {
            Some(Some(expected)) => {
                if let Some(found) = found {
                    if !found.matches(expected) {
                        self.error(TypeErrorKind::Nonconforming {
                            expected,
                            found,
                            name: decl.name.name.clone(),
                            span: decl.initializer.as_ref().map_or(decl.span, |e| e.span),
                        });
                    }
                }
                expected
            }
            Some(None) => TypeId::Object,
            None => match found {
                Some(ty) if ty != TypeId::Null && ty != TypeId::Void => ty,
                _ => {
                    self.error(TypeErrorKind::CannotInfer {
                        name: decl.name.name.clone(),
                        span: decl.name.span,
                    });
                    TypeId::Object
                }
            },
        };

        if self.check_unique(&decl.name.name, decl.name.span) {
            self.environment.define(
                decl.name.name.as_str(),
                Binding::Variable {
                    ty,
                    span: decl.name.span,
                },
            );
        }
    }

    fn check_return(&mut self, keyword: Span, value: Option<&Expr>) {
        let found = value.map(|value| self.infer(value));
        let Some(function) = self.current_function.clone() else {
            self.error(TypeErrorKind::ReturnOutsideFunction { span: keyword });
            return;
        };

        match found {
            None if function.return_type != TypeId::Void => {
                self.error(TypeErrorKind::EmptyReturn {
                    function: function.name.clone(),
                    span: keyword,
                });
            }
            Some(found) if !found.matches(function.return_type) => {
                self.error(TypeErrorKind::ReturnMismatch {
                    function: function.name.clone(),
                    expected: function.return_type,
                    found,
                    span: value.map_or(keyword, |v| v.span),
                });
            }
            _ => {}
        }
    }

    /// Infers and records the type of `expr`.
    fn infer(&mut self, expr: &Expr) -> TypeId {
        let ty = ensure_sufficient_stack(|| self.infer_kind(expr));
        expr.set_ty(ty);
        ty
    }

    fn infer_kind(&mut self, expr: &Expr) -> TypeId {
        match &expr.kind {
            ExprKind::Literal(literal) => match literal {
                Literal::Bool(_) => TypeId::Bool,
                Literal::Int(_) => TypeId::Int,
                Literal::Double(_) => TypeId::Double,
                Literal::Null => TypeId::Null,
            },
            ExprKind::StringLiteral(_) => TypeId::String,
            ExprKind::Grouping(inner) => self.infer(inner),
            ExprKind::Unary { op, operand } => self.infer_unary(*op, operand, expr.span),
            ExprKind::Binary { op, left, right } => {
                self.infer_infix(InfixOp::Binary(*op), left, right, expr.span)
            }
            ExprKind::Logical { op, left, right } => {
                self.infer_infix(InfixOp::Logical(*op), left, right, expr.span)
            }
            ExprKind::Variable(name) => match self.environment.get(&name.name) {
                Some(Binding::Variable { ty, .. }) => ty,
                Some(Binding::Function(_)) => {
                    self.error(TypeErrorKind::NotAVariable {
                        name: name.name.clone(),
                        span: name.span,
                    });
                    TypeId::Object
                }
                None => {
                    self.error(TypeErrorKind::UndefinedVariable {
                        name: name.name.clone(),
                        span: name.span,
                    });
                    TypeId::Object
                }
            },
            ExprKind::Assign { target, value } => {
                let found = self.infer(value);
                match self.environment.get(&target.name) {
                    Some(Binding::Variable { ty, span }) => {
                        if found.matches(ty) {
                            return ty;
                        }
                        let error = TypeError::new(TypeErrorKind::Nonconforming {
                            expected: ty,
                            found,
                            name: target.name.clone(),
                            span: value.span,
                        })
                        .with_context(Context::DeclaredAs {
                            type_name: ty.to_string(),
                            span,
                        });
                        self.report(error);
                    }
                    Some(Binding::Function(_)) => self.error(TypeErrorKind::NotAVariable {
                        name: target.name.clone(),
                        span: target.span,
                    }),
                    None => self.error(TypeErrorKind::UndefinedVariable {
                        name: target.name.clone(),
                        span: target.span,
                    }),
                }
                TypeId::Object
            }
            ExprKind::Call { callee, arguments } => self.infer_call(callee, arguments, expr.span),
        }
    }

    fn infer_unary(&mut self, op: UnaryOp, operand: &Expr, span: Span) -> TypeId {
        let ty = self.infer(operand);
        let result = match op {
            UnaryOp::Not if ty == TypeId::Bool => Some(TypeId::Bool),
            UnaryOp::Neg if ty.is_numeric() => Some(ty),
            UnaryOp::BitNot if ty == TypeId::Int => Some(TypeId::Int),
            _ => None,
        };
        result.unwrap_or_else(|| {
            self.error(TypeErrorKind::InvalidUnaryOperand {
                op,
                operand: ty,
                span,
            });
            TypeId::Object
        })
    }

    fn infer_infix(&mut self, op: InfixOp, left: &Expr, right: &Expr, span: Span) -> TypeId {
        let left_ty = self.infer(left);
        let right_ty = self.infer(right);

        // A null operand takes the type of the other side.
        let (left_ty, right_ty) = match (left_ty, right_ty) {
            (TypeId::Null, other) | (other, TypeId::Null) => (other, other),
            pair => pair,
        };

        if op == InfixOp::Binary(BinaryOp::Add)
            && (left_ty == TypeId::String || right_ty == TypeId::String)
        {
            return TypeId::String;
        }

        let result = if left_ty != right_ty {
            None
        } else {
            match op {
                InfixOp::Binary(op) if op.is_relational() => {
                    left_ty.is_numeric().then_some(TypeId::Bool)
                }
                InfixOp::Binary(op) if op.is_arithmetic() => {
                    left_ty.is_numeric().then_some(left_ty)
                }
                InfixOp::Binary(op) if op.is_integral() => {
                    (left_ty == TypeId::Int).then_some(TypeId::Int)
                }
                InfixOp::Binary(BinaryOp::Eq | BinaryOp::Neq) => Some(TypeId::Bool),
                InfixOp::Binary(_) => None,
                InfixOp::Logical(_) => (left_ty == TypeId::Bool).then_some(TypeId::Bool),
            }
        };

        result.unwrap_or_else(|| {
            let symbol = match op {
                InfixOp::Binary(op) => op.to_string(),
                InfixOp::Logical(op) => op.to_string(),
            };
            self.error(TypeErrorKind::InvalidBinaryOperands {
                op: symbol,
                left: left_ty,
                right: right_ty,
                span,
            });
            TypeId::Object
        })
    }

    fn infer_call(&mut self, callee: &Expr, arguments: &[Expr], span: Span) -> TypeId {
        let argument_types: Vec<TypeId> = arguments.iter().map(|arg| self.infer(arg)).collect();

        let ExprKind::Variable(name) = &callee.kind else {
            self.infer(callee);
            self.error(TypeErrorKind::NotCallable {
                what: "Expression".to_string(),
                span: callee.span,
            });
            return TypeId::Object;
        };
        callee.set_ty(TypeId::Object);

        let signature = match self.environment.get(&name.name) {
            Some(Binding::Function(signature)) => signature,
            Some(Binding::Variable { .. }) => {
                self.error(TypeErrorKind::NotCallable {
                    what: format!("Variable '{}'", name.name),
                    span: name.span,
                });
                return TypeId::Object;
            }
            None => {
                self.error(TypeErrorKind::UndefinedFunction {
                    name: name.name.clone(),
                    span: name.span,
                });
                return TypeId::Object;
            }
        };

        if signature.params.len() != arguments.len() {
            let mut error = TypeError::new(TypeErrorKind::ArityMismatch {
                function: signature.name.clone(),
                expected: signature.params.len(),
                found: arguments.len(),
                span,
            });
            if let Some(declared) = signature.span {
                error = error.with_context(Context::DefinedHere {
                    what: format!("'{}'", signature.name),
                    span: declared,
                });
            }
            self.report(error);
            return signature.return_type;
        }

        for ((parameter, expected), (argument, found)) in signature
            .params
            .iter()
            .zip(arguments.iter().zip(argument_types))
        {
            if !found.conforms_to(*expected) {
                let error = TypeError::new(TypeErrorKind::ArgumentMismatch {
                    function: signature.name.clone(),
                    parameter: parameter.clone(),
                    expected: *expected,
                    found,
                    span: argument.span,
                })
                .with_context(Context::InFunctionCall {
                    name: signature.name.clone(),
                    span,
                });
                self.report(error);
            }
        }

        signature.return_type
    }
}
