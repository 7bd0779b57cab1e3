pub mod error;
mod grammar;
pub mod lexer;
mod parsed_expr;
mod pratt;
mod recursive;
mod syntax;
pub mod token;

use core::fmt;

use tracing::debug;

use crate::diagnostics::DiagnosticSink;

pub use error::{ParseError, ParseErrorKind};
pub use grammar::{ExprParser, PResult, ParserState, StatementParser};
pub use lexer::tokenize;
pub use parsed_expr::{
    Expr, ExprKind, FunctionDecl, Ident, Literal, Param, Stmt, TypeName, VarDecl,
};
pub use pratt::Pratt;
pub use recursive::RecursiveDescent;
pub use syntax::{BinaryOp, InfixOp, LogicalOp, Span, UnaryOp};
pub use token::{Token, TokenKind, TokenLiteral, TokenStream};

/// Which expression parser builds the AST.
///
/// Both accept the same language and build equal trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserStrategy {
    #[default]
    RecursiveDescent,
    Pratt,
}

impl fmt::Display for ParserStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserStrategy::RecursiveDescent => f.write_str("recursive-descent"),
            ParserStrategy::Pratt => f.write_str("pratt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// False if any error was reported while parsing.
    pub success: bool,
    pub statements: Vec<Stmt>,
}

/// Parses a token sequence into top-level statements.
///
/// Syntax errors go to `sink`; parsing recovers after each one, so the
/// returned statements cover everything that could be parsed.
pub fn parse(
    tokens: Vec<Token>,
    strategy: ParserStrategy,
    sink: &mut dyn DiagnosticSink,
) -> ParseOutcome {
    let tokens = TokenStream::new(tokens);
    debug!(%strategy, token_count = tokens.len(), "Parsing");

    let (statements, had_errors) = match strategy {
        ParserStrategy::RecursiveDescent => run::<RecursiveDescent>(tokens, sink),
        ParserStrategy::Pratt => run::<Pratt>(tokens, sink),
    };

    debug!(
        statement_count = statements.len(),
        had_errors, "Parsing finished"
    );
    ParseOutcome {
        success: !had_errors,
        statements,
    }
}

fn run<E: ExprParser>(tokens: TokenStream, sink: &mut dyn DiagnosticSink) -> (Vec<Stmt>, bool) {
    let mut parser = StatementParser::<E>::new(tokens, sink);
    let statements = parser.program();
    (statements, parser.had_errors())
}

/// Tokenizes and parses `source`. Parsing is skipped if lexing failed.
pub fn parse_source(
    source: &str,
    strategy: ParserStrategy,
    sink: &mut dyn DiagnosticSink,
) -> ParseOutcome {
    let tokens = tokenize(source, sink);
    if sink.had_errors() {
        return ParseOutcome {
            success: false,
            statements: Vec::new(),
        };
    }
    parse(tokens, strategy, sink)
}



#[cfg(test)]
mod precedence_test;
