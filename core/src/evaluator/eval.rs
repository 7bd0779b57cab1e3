//! Core evaluation logic.

use core::mem;
use std::io;
use std::rc::Rc;

use tracing::{debug, instrument, trace};

use crate::environment::Environment;
use crate::evaluator::operators;
use crate::evaluator::{
    EvaluatorOptions, ExecutionError, ResourceExceededError::StackOverflow, RuntimeError,
};
use crate::parser::{BinaryOp, Expr, ExprKind, FunctionDecl, Literal, Span, Stmt};
use crate::stack::ensure_sufficient_stack;
use crate::stdlib;
use crate::types::TypeId;
use crate::values::{Callable, Value};

type EvalResult<T> = Result<T, ExecutionError>;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Return(Value),
}

/// Tree-walking interpreter for type-checked programs.
pub struct Interpreter<'o> {
    options: EvaluatorOptions,
    out: &'o mut dyn io::Write,
    globals: Environment<Value>,
    environment: Environment<Value>,
    depth: usize,
}

impl<'o> Interpreter<'o> {
    /// Create an interpreter whose global scope holds the builtins.
    pub fn new(options: EvaluatorOptions, out: &'o mut dyn io::Write) -> Self {
        let globals = Environment::new();
        for builtin in stdlib::BUILTINS {
            globals.define(builtin.name, Value::Callable(Callable::Native(builtin)));
        }

        Self {
            options,
            out,
            environment: globals.clone(),
            globals,
            depth: 0,
        }
    }

    pub fn globals(&self) -> &Environment<Value> {
        &self.globals
    }

    /// Run a whole program: bind its functions, run the remaining top-level
    /// declarations in order, then call `main`.
    #[instrument(level = "debug", skip_all, fields(count = statements.len()))]
    pub fn run(&mut self, statements: &[Stmt]) -> EvalResult<Value> {
        for stmt in statements {
            if let Stmt::Function(decl) = stmt {
                self.declare_function(decl);
            }
        }
        for stmt in statements {
            if !matches!(stmt, Stmt::Function(_)) {
                self.execute(stmt)?;
            }
        }

        let Some(Value::Callable(main)) = self.globals.get("main") else {
            return Err(ExecutionError::new(
                RuntimeError::UndefinedVariable {
                    name: "main".to_string(),
                },
                Span::start_of_file(),
            ));
        };
        let span = match &main {
            Callable::User(function) => function.declaration.name.span,
            Callable::Native(_) => Span::start_of_file(),
        };

        debug!("Calling main");
        self.call(&main, Vec::new(), span)
    }

    fn declare_function(&mut self, decl: &Rc<FunctionDecl>) {
        trace!(name = %decl.name.name, depth = self.environment.depth(), "Declaring function");
        let function = Callable::new(decl.clone(), self.environment.clone());
        self.environment
            .define(decl.name.name.as_str(), Value::Callable(function));
    }

    pub fn execute(&mut self, stmt: &Stmt) -> EvalResult<Flow> {
        ensure_sufficient_stack(|| self.execute_stmt(stmt))
    }

    fn execute_stmt(&mut self, stmt: &Stmt) -> EvalResult<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
            }
            Stmt::Var(decl) => {
                let value = match &decl.initializer {
                    Some(init) => self.evaluate(init)?,
                    None => Value::Null,
                };
                self.environment.define(decl.name.name.as_str(), value);
            }
            Stmt::Block { statements, .. } => {
                let scope = self.environment.child();
                return self.execute_block(statements, scope);
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    return self.execute(then_branch);
                }
                if let Some(else_branch) = else_branch {
                    return self.execute(else_branch);
                }
            }
            Stmt::While {
                condition, body, ..
            } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
            }
            Stmt::Function(decl) => self.declare_function(decl),
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(value) => self.evaluate(value)?,
                    None => Value::Null,
                };
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Execute `statements` with `scope` as the current environment.
    ///
    /// The previous environment is restored whether or not execution fails.
    pub fn execute_block(&mut self, statements: &[Stmt], scope: Environment<Value>) -> EvalResult<Flow> {
        let previous = mem::replace(&mut self.environment, scope);
        let result = self.execute_all(statements);
        self.environment = previous;
        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> EvalResult<Flow> {
        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.evaluate_expr(expr))
    }

    fn evaluate_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        let at = |error: RuntimeError| ExecutionError::new(error, expr.span);

        match &expr.kind {
            ExprKind::Literal(literal) => Ok(match literal {
                Literal::Bool(b) => Value::Bool(*b),
                Literal::Int(n) => Value::Int(*n),
                Literal::Double(d) => Value::Double(*d),
                Literal::Null => Value::Null,
            }),
            ExprKind::StringLiteral(s) => Ok(Value::str(s)),
            ExprKind::Grouping(inner) => self.evaluate(inner),
            ExprKind::Unary { op, operand } => {
                let operand = self.evaluate(operand)?;
                operators::eval_unary(*op, operand).map_err(at)
            }
            ExprKind::Binary { op, left, right } => {
                let unannotated = || at(RuntimeError::Unannotated);
                let ty = expr.ty().ok_or_else(unannotated)?;
                // Operands dispatch on the left tag; a null literal takes the
                // right one.
                let tag = match left.ty().ok_or_else(unannotated)? {
                    TypeId::Null => right.ty().ok_or_else(unannotated)?,
                    tag => tag,
                };
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                if *op == BinaryOp::Add && ty == TypeId::String {
                    return Ok(operators::concat(&left, &right));
                }
                operators::eval_binary(*op, tag, left, right).map_err(at)
            }
            ExprKind::Logical { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                operators::eval_logical(*op, left, right).map_err(at)
            }
            ExprKind::Variable(name) => self.environment.get(&name.name).ok_or_else(|| {
                ExecutionError::new(
                    RuntimeError::UndefinedVariable {
                        name: name.name.clone(),
                    },
                    name.span,
                )
            }),
            ExprKind::Assign { target, value } => {
                let value = self.evaluate(value)?;
                if !self.environment.assign(&target.name, value.clone()) {
                    return Err(ExecutionError::new(
                        RuntimeError::UndefinedVariable {
                            name: target.name.clone(),
                        },
                        target.span,
                    ));
                }
                Ok(value)
            }
            ExprKind::Call { callee, arguments } => {
                let callee_value = self.evaluate(callee)?;
                let arguments = arguments
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<EvalResult<Vec<_>>>()?;

                match callee_value {
                    Value::Callable(callable) => self.call(&callable, arguments, expr.span),
                    other => Err(ExecutionError::new(
                        RuntimeError::NotCallable {
                            type_name: other.type_id().to_string(),
                        },
                        callee.span,
                    )),
                }
            }
        }
    }

    /// Call a function value. `span` is the call site.
    pub fn call(&mut self, callable: &Callable, arguments: Vec<Value>, span: Span) -> EvalResult<Value> {
        if arguments.len() != callable.arity() {
            return Err(ExecutionError::new(
                RuntimeError::ArityMismatch {
                    function: callable.name().to_string(),
                    expected: callable.arity(),
                    found: arguments.len(),
                },
                span,
            ));
        }

        let function = match callable {
            Callable::Native(builtin) => {
                return (builtin.function)(&mut *self.out, &arguments)
                    .map_err(|e| ExecutionError::new(RuntimeError::Output(e), span));
            }
            Callable::User(function) => function,
        };

        if self.depth >= self.options.max_call_depth {
            return Err(ExecutionError::new(
                StackOverflow {
                    depth: self.depth,
                    max_depth: self.options.max_call_depth,
                },
                span,
            ));
        }

        trace!(name = function.name(), depth = self.depth, "Calling function");
        let scope = function.closure.child();
        for (param, argument) in function.declaration.params.iter().zip(arguments) {
            scope.define(param.name.name.as_str(), argument);
        }

        self.depth += 1;
        let result = self.execute_block(&function.declaration.body, scope);
        self.depth -= 1;

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Null),
        }
    }
}
