use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use spike::{CompilationOptions, Engine, EngineOptions, ParserStrategy, render_error};
use spike_core::diagnostics::Diagnostics;
use spike_core::parser;
use tracing::debug;

/// Spike - a small statically typed scripting language
#[derive(Parser, Debug)]
#[command(name = "spike")]
#[command(about = "Run Spike programs", long_about = None)]
struct Args {
    /// Expression parser to use
    #[arg(long, value_enum, default_value_t = ParserArg::Rd)]
    parser: ParserArg,

    /// Print the token stream (for debugging)
    #[arg(long)]
    debug_tokens: bool,

    /// Print the parsed AST (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Program to run (if not provided, reads from stdin)
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ParserArg {
    /// Recursive descent
    Rd,
    /// Pratt (precedence climbing)
    Pratt,
}

impl From<ParserArg> for ParserStrategy {
    fn from(arg: ParserArg) -> Self {
        match arg {
            ParserArg::Rd => ParserStrategy::RecursiveDescent,
            ParserArg::Pratt => ParserStrategy::Pratt,
        }
    }
}

fn read_source(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).into_diagnostic(),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source).into_diagnostic()?;
            Ok(source)
        }
    }
}

fn dump_front_end(source: &str, strategy: ParserStrategy, args: &Args) {
    // Errors are reported by the real compilation below.
    let mut sink = Diagnostics::new();
    let tokens = parser::tokenize(source, &mut sink);

    if args.debug_tokens {
        println!("=== Tokens ===");
        for token in &tokens {
            println!("{}", token);
        }
        println!();
    }

    if args.debug_parse {
        let outcome = parser::parse(tokens, strategy, &mut sink);
        println!("=== Parsed AST ===");
        println!("{:#?}", outcome.statements);
        println!();
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG to control log level, defaulting to WARN
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let source = read_source(args.file.as_ref())?;
    let strategy = ParserStrategy::from(args.parser);
    debug!(%strategy, bytes = source.len(), "Loaded program");

    if args.debug_tokens || args.debug_parse {
        dump_front_end(&source, strategy, &args);
    }

    let engine = Engine::new(EngineOptions {
        default_compilation_options: CompilationOptions { parser: strategy },
        ..EngineOptions::default()
    });

    let program = match engine.compile(&source) {
        Ok(program) => program,
        Err(e) => {
            render_error(&e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = program.run(&mut out);
    // Program output comes before any error report.
    out.flush().into_diagnostic()?;
    match result {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            render_error(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}
