//! Public API for the Spike language.
//!
//! This module provides the stable public API for compiling and running
//! Spike programs: an [`Engine`] compiles source text into a [`Program`],
//! and a program runs against any output sink.
//!
//! # Example
//!
//! ```
//! use spike_core::api::{CompilationOptions, Engine, EngineOptions};
//! use spike_core::parser::ParserStrategy;
//!
//! let engine = Engine::new(EngineOptions::default());
//!
//! // Compile with the Pratt parser instead of the default
//! let options = CompilationOptions { parser: ParserStrategy::Pratt };
//! let program = engine
//!     .compile_with(options, "function main(): void { print(1 + 2 * 3); }")
//!     .unwrap();
//!
//! // Execute
//! let mut out = Vec::new();
//! program.run(&mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "7\n");
//! ```

pub mod engine;
pub mod error;
pub mod options;
pub mod program;

pub use engine::Engine;
pub use error::{Diagnostic, Error, RelatedInfo, Severity};
pub use options::{CompilationOptions, EngineOptions, ExecutionOptions};
pub use program::Program;
