//! The Spike compilation engine.

use std::io;

use tracing::debug;

use super::{CompilationOptions, EngineOptions, Error, Program};
use crate::diagnostics::Diagnostics;
use crate::values::Value;
use crate::{analyzer, parser};

/// The Spike compilation and execution engine.
///
/// The engine runs the front end (lexer, parser, analyzer) and hands out
/// [`Program`]s that can be run any number of times.
///
/// # Example
///
/// ```
/// use spike_core::api::{Engine, EngineOptions};
///
/// let engine = Engine::new(EngineOptions::default());
/// let program = engine
///     .compile(r#"function main(): void { print("Hello"); }"#)
///     .unwrap();
///
/// let mut out = Vec::new();
/// program.run(&mut out).unwrap();
/// assert_eq!(out, b"Hello\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Compile a Spike program with the engine's default options.
    pub fn compile(&self, source: &str) -> Result<Program, Error> {
        self.compile_with(self.options.default_compilation_options, source)
    }

    /// Compile a Spike program.
    ///
    /// Lexing, parsing and type checking each run to completion and report
    /// every error they find; a phase only starts if the previous one
    /// succeeded.
    ///
    /// # Returns
    ///
    /// A checked program ready for execution, or an [`Error::Compilation`]
    /// with all diagnostics found.
    pub fn compile_with(&self, options: CompilationOptions, source: &str) -> Result<Program, Error> {
        let mut sink = Diagnostics::new();
        let failed = |sink: Diagnostics| Error::Compilation {
            diagnostics: sink.into_vec(),
            src: source.to_string(),
        };

        let parsed = parser::parse_source(source, options.parser, &mut sink);
        if !parsed.success {
            debug!(errors = sink.error_count(), "Parsing failed");
            return Err(failed(sink));
        }

        if !analyzer::analyze(&parsed.statements, &mut sink) {
            debug!(errors = sink.error_count(), "Type checking failed");
            return Err(failed(sink));
        }

        Ok(Program::new(
            parsed.statements,
            source,
            self.options.default_execution_options,
        ))
    }

    /// Compile and run `source`, writing program output to `out`.
    pub fn run(&self, source: &str, out: &mut dyn io::Write) -> Result<Value, Error> {
        self.compile(source)?.run(out)
    }
}
