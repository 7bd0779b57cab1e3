//! Spike language core: lexer, parsers, type checker and tree-walking evaluator.
//!
//! ```text
//! source ─▶ parser::lexer ─▶ parser::{recursive, pratt} ─▶ analyzer ─▶ evaluator
//!                                   │                         │
//!                                   └──── diagnostics ◀───────┘
//! ```
//!
//! Most users only need [`api::Engine`].

pub mod analyzer;
pub mod api;
pub mod diagnostics;
pub mod environment;
pub mod evaluator;
pub mod parser;
pub mod stack;
pub mod stdlib;
pub mod types;
pub mod values;

#[cfg(test)]
mod environment_test;

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_type_inference() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
