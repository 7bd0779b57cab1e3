#![allow(dead_code, unused_macros)]

use pretty_assertions::assert_eq;
use spike::{
    CompilationOptions, Diagnostic, Engine, EngineOptions, Error, ParserStrategy, Value,
    render_error_to_string_no_color,
};

pub const STRATEGIES: [ParserStrategy; 2] =
    [ParserStrategy::RecursiveDescent, ParserStrategy::Pratt];

pub fn engine(strategy: ParserStrategy) -> Engine {
    Engine::new(EngineOptions {
        default_compilation_options: CompilationOptions { parser: strategy },
        ..EngineOptions::default()
    })
}

/// Compiles and runs `source`, returning what it printed and how it ended.
pub fn run(source: &str, strategy: ParserStrategy) -> (String, Result<Value, Error>) {
    let mut out = Vec::new();
    let result = engine(strategy).run(source, &mut out);
    (String::from_utf8_lossy(&out).to_string(), result)
}

pub fn check_output(source: &str, expected: &str) {
    for strategy in STRATEGIES {
        let (out, result) = run(source, strategy);
        if let Err(error) = result {
            panic!("{} failed:\n{}", strategy, render_error_to_string_no_color(&error));
        }
        assert_eq!(out, expected, "output differs with {}", strategy);
    }
}

pub fn compile_errors(source: &str, strategy: ParserStrategy) -> Vec<Diagnostic> {
    match engine(strategy).compile(source) {
        Ok(_) => panic!("expected {} to reject {:?}", strategy, source),
        Err(Error::Compilation { diagnostics, .. }) => diagnostics,
        Err(other) => panic!("expected a compilation error, got {}", other),
    }
}

pub fn check_errors(source: &str, expected: &[&str]) {
    for strategy in STRATEGIES {
        let codes: Vec<String> = compile_errors(source, strategy)
            .into_iter()
            .filter_map(|d| d.code)
            .collect();
        assert_eq!(codes, expected, "error codes differ with {}", strategy);
    }
}

/// Runs a program expected to fail at runtime; checks the output printed
/// before the failure and returns the error.
pub fn check_runtime_error(source: &str, expected_output: &str, code: &str) -> Diagnostic {
    let mut diagnostics = Vec::new();
    for strategy in STRATEGIES {
        let (out, result) = run(source, strategy);
        assert_eq!(out, expected_output, "output differs with {}", strategy);
        match result {
            Err(Error::Runtime { diagnostic, .. }) => {
                assert_eq!(diagnostic.code.as_deref(), Some(code));
                diagnostics.push(diagnostic);
            }
            Err(other) => panic!("expected a runtime error, got {}", other),
            Ok(value) => panic!("expected a runtime error, got {}", value),
        }
    }
    assert_eq!(diagnostics[0], diagnostics[1]);
    diagnostics.remove(0)
}

/// Declares a test.
///
/// - `output:` plus `runtime_error:` the program prints `output` and then
///   stops with this code.
/// - `output:` the program runs under both parsers and prints exactly this.
/// - `errors:` compilation fails with exactly these codes, in order.
macro_rules! test_case {
    ($name:ident, input: $input:expr, output: $output:expr, runtime_error: $code:expr $(,)?) => {
        #[test]
        fn $name() {
            $crate::cases::check_runtime_error($input, $output, $code);
        }
    };
    ($name:ident, input: $input:expr, output: $output:expr $(,)?) => {
        #[test]
        fn $name() {
            $crate::cases::check_output($input, $output);
        }
    };
    ($name:ident, input: $input:expr, errors: [$($code:expr),* $(,)?] $(,)?) => {
        #[test]
        fn $name() {
            $crate::cases::check_errors($input, &[$($code),*]);
        }
    };
}
