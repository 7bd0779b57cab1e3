//! The embedding API: engine, options, programs, errors and rendering.

#[macro_use]
mod cases;

use pretty_assertions::assert_eq;
use spike::{
    CompilationOptions, DiagnosticKind, Engine, EngineOptions, Error, ExecutionOptions,
    ParserStrategy, Severity, Value, render_error_to_string, render_error_to_string_no_color,
};

const COUNTER: &str = r#"
    var runs: int = 0;
    function main(): int {
        runs += 1;
        print("run " + runs);
        return runs * 10;
    }
"#;

#[test]
fn main_result_is_returned() {
    let engine = Engine::default();
    let mut out = Vec::new();
    let value = engine.run(COUNTER, &mut out).unwrap();
    assert_eq!(value, Value::Int(10));
    assert_eq!(String::from_utf8(out).unwrap(), "run 1\n");
}

#[test]
fn void_main_returns_null() {
    let engine = Engine::default();
    let value = engine
        .run("function main(): void {}", &mut Vec::new())
        .unwrap();
    assert!(value.is_null());
}

#[test]
fn each_run_starts_from_fresh_globals() {
    let program = Engine::default().compile(COUNTER).unwrap();

    for _ in 0..3 {
        let mut out = Vec::new();
        assert_eq!(program.run(&mut out).unwrap(), Value::Int(10));
        assert_eq!(String::from_utf8(out).unwrap(), "run 1\n");
    }
}

#[test]
fn program_keeps_its_source() {
    let source = "function main(): void {}";
    let program = Engine::default().compile(source).unwrap();
    assert_eq!(program.source(), source);
    assert_eq!(program.statements().len(), 1);
}

#[test]
fn parser_strategy_is_selected_per_compilation() {
    let engine = Engine::default();
    assert_eq!(
        engine.options().default_compilation_options.parser,
        ParserStrategy::RecursiveDescent
    );

    let source = "function main(): void { print(2 + 3 * 4 == 14); }";
    for strategy in cases::STRATEGIES {
        let program = engine
            .compile_with(CompilationOptions { parser: strategy }, source)
            .unwrap();
        let mut out = Vec::new();
        program.run(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "true\n");
    }
}

#[test]
fn call_depth_limit_comes_from_options() {
    let source = r#"
        function depth(n: int): int { if (n == 0) { return 0; } return 1 + depth(n - 1); }
        function main(): int { return depth(50); }
    "#;

    let strict = Engine::new(EngineOptions {
        default_execution_options: ExecutionOptions { max_call_depth: 20 },
        ..EngineOptions::default()
    });
    let program = strict.compile(source).unwrap();
    let error = program.run(&mut Vec::new()).unwrap_err();
    assert_eq!(error.diagnostics()[0].code.as_deref(), Some("R008"));

    // Overriding per run
    let relaxed = ExecutionOptions { max_call_depth: 100 };
    assert_eq!(program.run_with(relaxed, &mut Vec::new()).unwrap(), Value::Int(50));
}

#[test]
fn compilation_error_collects_every_diagnostic() {
    let source = r#"
        function main(): void {
            var a: int = "text";
            var b: bool = 1;
            missing();
        }
    "#;
    let error = Engine::default().compile(source).unwrap_err();
    let Error::Compilation { diagnostics, src } = &error else {
        panic!("expected a compilation error, got {}", error);
    };
    assert_eq!(src, source);

    let summary: Vec<(u32, Option<&str>)> = diagnostics
        .iter()
        .map(|d| (d.line(), d.code.as_deref()))
        .collect();
    assert_eq!(
        summary,
        vec![(3, Some("E001")), (4, Some("E001")), (5, Some("E005"))]
    );
    assert!(diagnostics.iter().all(|d| d.kind == DiagnosticKind::Semantic));
    assert!(diagnostics.iter().all(|d| d.severity == Severity::Error));
    assert_eq!(error.to_string(), "Type checking failed with 3 error(s)");
}

#[test]
fn lexical_errors_stop_before_parsing() {
    let error = Engine::default()
        .compile("function main(): void { var s = \"open; @ }")
        .unwrap_err();
    let kinds: Vec<DiagnosticKind> = error.diagnostics().iter().map(|d| d.kind).collect();
    assert!(!kinds.is_empty());
    assert!(kinds.iter().all(|k| *k == DiagnosticKind::Lexical), "{:?}", kinds);
    assert!(error.to_string().starts_with("Lexing failed"));
}

#[test]
fn diagnostic_display_includes_location_and_code() {
    let error = Engine::default()
        .compile("function main(): void {}\nfunction main(): void {}")
        .unwrap_err();
    assert_eq!(
        error.diagnostics()[0].to_string(),
        "[2:10] semantic error: 'main' is already defined, previous declaration at 1:10 [E013]"
    );
}

#[test]
fn runtime_error_carries_source() {
    let source = "function main(): void { print(1 % 0); }";
    let error = Engine::default().run(source, &mut Vec::new()).unwrap_err();
    assert_eq!(error.source_text(), source);
    assert_eq!(error.to_string(), "Runtime error: Division by zero");
}

#[test]
fn rendering_shows_source_and_code() {
    let error = Engine::default()
        .compile("function main(): void {\n    print(undefined_name);\n}")
        .unwrap_err();

    let plain = render_error_to_string_no_color(&error);
    assert!(plain.contains("print(undefined_name);"), "{}", plain);
    assert!(plain.contains("E003"), "{}", plain);
    assert!(plain.contains("Variable 'undefined_name' is not defined"), "{}", plain);

    let colored = render_error_to_string(&error);
    assert!(colored.contains('\u{1b}'));
}
