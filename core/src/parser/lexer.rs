//! Source text to token stream.
//!
//! Scanning is done by the `logos`-generated [`TokenKind`] automaton; this
//! module adds line/column tracking, literal decoding and error reporting.

use logos::Logos;
use tracing::{debug, trace};

use crate::diagnostics::DiagnosticSink;
use crate::parser::error::{ParseError, ParseErrorKind};
use crate::parser::token::{Token, TokenKind, TokenLiteral};
use crate::parser::Span;

/// Maps byte offsets to 1-based line/column pairs.
struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .char_indices()
                .filter(|&(_, c)| c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            source,
            line_starts,
        }
    }

    fn span(&self, range: core::ops::Range<usize>) -> Span {
        let line = match self.line_starts.binary_search(&range.start) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self.source[line_start..range.start].chars().count() + 1;
        Span::new(range.start, range.end, line as u32 + 1, column as u32)
    }

    fn end_of_input(&self) -> Span {
        let end = self.source.len();
        self.span(end..end)
    }
}

/// Tokenizes `source`, reporting lexical errors to `sink`.
///
/// Lexing never stops early: offending text is skipped and scanning resumes
/// after it. The returned vector always ends with an EOF token.
pub fn tokenize(source: &str, sink: &mut dyn DiagnosticSink) -> Vec<Token> {
    let index = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = index.span(range.clone());
        let text = lexer.slice();

        let kind = match result {
            Ok(kind) => kind,
            Err(()) => {
                let kind = if text.starts_with('"') {
                    // Nothing after an unmatched quote on this line can be trusted.
                    let rest = &source[range.end..];
                    let skip = rest.find('\n').unwrap_or(rest.len());
                    lexer.bump(skip);
                    ParseErrorKind::UnterminatedString
                } else {
                    ParseErrorKind::UnexpectedCharacter {
                        text: text.to_string(),
                    }
                };
                sink.report(ParseError::new(kind, span).to_diagnostic());
                continue;
            }
        };

        let token = match kind {
            TokenKind::Comment => continue,
            TokenKind::Integer => match text.parse::<i64>() {
                Ok(n) => Token::new(kind, text, span).with_literal(TokenLiteral::Int(n)),
                Err(_) => {
                    let kind = ParseErrorKind::IntegerOutOfRange {
                        text: text.to_string(),
                    };
                    sink.report(ParseError::new(kind, span).to_diagnostic());
                    continue;
                }
            },
            TokenKind::Double => match text.parse::<f64>() {
                Ok(n) => Token::new(kind, text, span).with_literal(TokenLiteral::Double(n)),
                Err(_) => {
                    let kind = ParseErrorKind::UnexpectedCharacter {
                        text: text.to_string(),
                    };
                    sink.report(ParseError::new(kind, span).to_diagnostic());
                    continue;
                }
            },
            TokenKind::String => match unescape(&text[1..text.len() - 1]) {
                Ok(value) => Token::new(kind, text, span).with_literal(TokenLiteral::Str(value)),
                Err(sequence) => {
                    let kind = ParseErrorKind::InvalidEscape { sequence };
                    sink.report(ParseError::new(kind, span).to_diagnostic());
                    continue;
                }
            },
            _ => Token::new(kind, text, span),
        };

        trace!(token = %token, line = span.line, column = span.column, "Scanned token");
        tokens.push(token);
    }

    tokens.push(Token::eof(index.end_of_input()));
    debug!(token_count = tokens.len(), "Tokenized source");
    tokens
}

/// Decodes the escapes of a string literal body.
///
/// Returns the first invalid escape sequence on failure.
fn unescape(body: &str) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => return Err(format!("\\{}", other)),
            None => return Err("\\".to_string()),
        }
    }
    Ok(out)
}
