//! Configuration options for the Spike engine.

use crate::evaluator::EvaluatorOptions;
use crate::parser::ParserStrategy;

/// Configuration options for compilation.
///
/// # Example
///
/// ```
/// use spike_core::api::CompilationOptions;
/// use spike_core::parser::ParserStrategy;
///
/// let options = CompilationOptions {
///     parser: ParserStrategy::Pratt,
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompilationOptions {
    /// Which expression parser builds the AST.
    ///
    /// Default: recursive descent
    pub parser: ParserStrategy,
}

/// Configuration options for program execution.
///
/// These options control resource limits during evaluation.
///
/// # Example
///
/// ```
/// use spike_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions { max_call_depth: 500 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Maximum number of nested function calls (for recursion protection).
    ///
    /// Default: 1000
    pub max_call_depth: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            max_call_depth: EvaluatorOptions::default().max_call_depth,
        }
    }
}

impl From<ExecutionOptions> for EvaluatorOptions {
    fn from(options: ExecutionOptions) -> Self {
        EvaluatorOptions {
            max_call_depth: options.max_call_depth,
        }
    }
}

/// Configuration options for the Spike engine.
///
/// These options set the defaults for compilation and execution,
/// which can be overridden on a per-call basis.
///
/// # Example
///
/// ```
/// use spike_core::api::{CompilationOptions, EngineOptions, ExecutionOptions};
///
/// let options = EngineOptions {
///     default_compilation_options: CompilationOptions::default(),
///     default_execution_options: ExecutionOptions { max_call_depth: 1000 },
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Default options for compilation.
    ///
    /// These can be overridden with `Engine::compile_with()`.
    pub default_compilation_options: CompilationOptions,

    /// Default options for execution.
    ///
    /// These can be overridden with `Program::run_with()`.
    pub default_execution_options: ExecutionOptions,
}
