//! Spike - a small statically typed scripting language
//!
//! # Overview
//!
//! Spike programs are a sequence of global variables and functions with a
//! `main` entry point. Source text goes through a lexer, one of two
//! interchangeable expression parsers, a type checker and finally a
//! tree-walking interpreter.
//!
//! # Quick Start
//!
//! ```
//! use spike::{Engine, EngineOptions};
//!
//! let engine = Engine::new(EngineOptions::default());
//! let program = engine
//!     .compile("var n: int = 6; function main(): void { print(n * 7); }")
//!     .unwrap();
//!
//! let mut out = Vec::new();
//! program.run(&mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "42\n");
//! ```
//!
//! # Errors
//!
//! Compilation reports every lexical, syntax or semantic problem it finds
//! as a [`Diagnostic`]; a runtime error stops the program with a single
//! one. Use [`render_error`] and friends to print them with source snippets.

// Re-export public API from spike_core
pub use spike_core::api::{
    CompilationOptions, Diagnostic, Engine, EngineOptions, Error, ExecutionOptions, Program,
    RelatedInfo, Severity,
};

pub use spike_core::diagnostics::DiagnosticKind;
pub use spike_core::parser::{ParserStrategy, Span};
pub use spike_core::types::TypeId;
pub use spike_core::values::{self, Value};

// Lower-level building blocks for tools that drive the phases themselves
pub use spike_core::{analyzer, diagnostics, evaluator, parser, types};

mod error_renderer;
pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
