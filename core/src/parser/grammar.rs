//! Statement grammar shared by both expression strategies.
//!
//! The statement layer is written once and parameterised over an
//! [`ExprParser`]; the recursive-descent and Pratt parsers only differ in how
//! they parse expressions.

use core::marker::PhantomData;
use std::rc::Rc;

use tracing::trace;

use crate::diagnostics::{Aborted, DiagnosticSink};
use crate::parser::error::{ParseError, ParseErrorKind};
use crate::parser::parsed_expr::{
    Expr, ExprKind, FunctionDecl, Ident, Literal, Param, Stmt, TypeName, VarDecl,
};
use crate::parser::syntax::{BinaryOp, InfixOp, LogicalOp, Span, UnaryOp};
use crate::parser::token::{Token, TokenKind, TokenLiteral, TokenStream};
use crate::stack::ensure_sufficient_stack;

/// Result of a parse step; `Err` means the current declaration was abandoned
/// after an error was reported.
pub type PResult<T> = Result<T, Aborted>;

/// Token cursor plus the sink errors are reported to.
pub struct ParserState<'s> {
    pub tokens: TokenStream,
    sink: &'s mut dyn DiagnosticSink,
}

impl<'s> ParserState<'s> {
    pub fn new(tokens: TokenStream, sink: &'s mut dyn DiagnosticSink) -> Self {
        Self { tokens, sink }
    }

    pub fn peek(&self) -> &Token {
        self.tokens.peek()
    }

    pub fn advance(&mut self) -> Token {
        self.tokens.advance()
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.tokens.check(kind)
    }

    pub fn matches(&mut self, kind: TokenKind) -> bool {
        self.tokens.matches(kind)
    }

    /// Consumes a token of `kind` or aborts with "`kind` is missing `location`".
    pub fn consume(&mut self, kind: TokenKind, location: &'static str) -> PResult<Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        let found = self.peek().describe();
        Err(self.abort(ParseErrorKind::Expected {
            expected: kind.describe().to_string(),
            location,
            found,
        }))
    }

    /// Reports an error at the current token and returns the abort signal.
    pub fn abort(&mut self, kind: ParseErrorKind) -> Aborted {
        let span = self.peek().span;
        self.sink.panic(ParseError::new(kind, span).to_diagnostic())
    }

    /// Reports an error without abandoning the current declaration.
    pub fn report(&mut self, error: ParseError) {
        self.sink.report(error.to_diagnostic());
    }

    pub fn had_errors(&self) -> bool {
        self.sink.had_errors()
    }

    /// Skips tokens until a statement boundary.
    ///
    /// Stops before `var`, `function`, `for`, `while`, `if` and end of input;
    /// a `;` is consumed.
    pub fn synchronize(&mut self) {
        let from = self.peek().span;
        loop {
            let kind = self.peek().kind;
            if kind.is_statement_boundary() {
                break;
            }
            self.advance();
            if kind == TokenKind::Semicolon {
                break;
            }
        }
        trace!(from = %from, to = %self.peek().span, "Resynchronized");
    }
}

/// An expression parsing strategy.
pub trait ExprParser {
    /// Parses a full expression, including assignment.
    fn expression(state: &mut ParserState<'_>) -> PResult<Expr>;
}

/// Literals, names and parenthesized groups.
pub fn primary<E: ExprParser>(state: &mut ParserState<'_>) -> PResult<Expr> {
    let token = state.peek().clone();
    let expr = match token.kind {
        TokenKind::True => Expr::literal(Literal::Bool(true), token.span),
        TokenKind::False => Expr::literal(Literal::Bool(false), token.span),
        TokenKind::Null => Expr::literal(Literal::Null, token.span),
        TokenKind::Integer | TokenKind::Double | TokenKind::String => match &token.literal {
            Some(TokenLiteral::Int(n)) => Expr::literal(Literal::Int(*n), token.span),
            Some(TokenLiteral::Double(d)) => Expr::literal(Literal::Double(*d), token.span),
            Some(TokenLiteral::Str(s)) => Expr::string(s.as_str(), token.span),
            None => {
                return Err(state.abort(ParseErrorKind::ExpectedExpression {
                    found: token.describe(),
                }));
            }
        },
        TokenKind::Identifier => Expr::variable(Ident::new(token.lexeme, token.span)),
        TokenKind::LeftParen => {
            state.advance();
            let inner = E::expression(state)?;
            let close = state.consume(TokenKind::RightParen, "after grouping expression")?;
            return Ok(Expr::grouping(inner, token.span, close.span));
        }
        _ => {
            return Err(state.abort(ParseErrorKind::ExpectedExpression {
                found: token.describe(),
            }));
        }
    };
    state.advance();
    Ok(expr)
}

/// Parses the argument list after a consumed `(` and builds the call node.
pub fn finish_call<E: ExprParser>(state: &mut ParserState<'_>, callee: Expr) -> PResult<Expr> {
    let mut arguments = Vec::new();
    if !state.check(TokenKind::RightParen) {
        loop {
            arguments.push(E::expression(state)?);
            if !state.matches(TokenKind::Comma) {
                break;
            }
        }
    }
    let close = state.consume(TokenKind::RightParen, "after call arguments")?;
    Ok(Expr::call(callee, arguments, close.span))
}

/// Builds `target = value`, rejecting targets that are not plain names.
///
/// On an invalid target the error is reported and the target expression is
/// returned unchanged so parsing can continue.
pub fn assignment_target(
    state: &mut ParserState<'_>,
    target: Expr,
    op: Option<BinaryOp>,
    value: Expr,
) -> Expr {
    match target.kind {
        ExprKind::Variable(name) => match op {
            None => Expr::assign(name, value),
            Some(op) => Expr::compound_assign(name, op, value),
        },
        _ => {
            state.report(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                target.span,
            ));
            target
        }
    }
}

/// The operator an infix token stands for, if any.
pub fn infix_op(kind: TokenKind) -> Option<InfixOp> {
    let op = match kind {
        TokenKind::Or => return Some(InfixOp::Logical(LogicalOp::Or)),
        TokenKind::And => return Some(InfixOp::Logical(LogicalOp::And)),
        TokenKind::BitOr => BinaryOp::BitOr,
        TokenKind::BitXor => BinaryOp::BitXor,
        TokenKind::BitAnd => BinaryOp::BitAnd,
        TokenKind::EqualEqual => BinaryOp::Eq,
        TokenKind::NotEqual => BinaryOp::Neq,
        TokenKind::Less => BinaryOp::Lt,
        TokenKind::LessEqual => BinaryOp::Le,
        TokenKind::Greater => BinaryOp::Gt,
        TokenKind::GreaterEqual => BinaryOp::Ge,
        TokenKind::ShiftLeft => BinaryOp::Shl,
        TokenKind::ShiftRight => BinaryOp::Shr,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Remainder => BinaryOp::Rem,
        _ => return None,
    };
    Some(InfixOp::Binary(op))
}

pub fn prefix_op(kind: TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Not => Some(UnaryOp::Not),
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::BitComplement => Some(UnaryOp::BitNot),
        _ => None,
    }
}

/// `=` maps to `Some(None)`; `op=` maps to `Some(Some(op))`.
pub fn assignment_op(kind: TokenKind) -> Option<Option<BinaryOp>> {
    match kind {
        TokenKind::Equal => Some(None),
        TokenKind::PlusEqual => Some(Some(BinaryOp::Add)),
        TokenKind::MinusEqual => Some(Some(BinaryOp::Sub)),
        TokenKind::StarEqual => Some(Some(BinaryOp::Mul)),
        TokenKind::SlashEqual => Some(Some(BinaryOp::Div)),
        TokenKind::RemainderEqual => Some(Some(BinaryOp::Rem)),
        _ => None,
    }
}

/// Declarations and statements on top of an expression strategy.
pub struct StatementParser<'s, E> {
    state: ParserState<'s>,
    _strategy: PhantomData<E>,
}

impl<'s, E: ExprParser> StatementParser<'s, E> {
    pub fn new(tokens: TokenStream, sink: &'s mut dyn DiagnosticSink) -> Self {
        Self {
            state: ParserState::new(tokens, sink),
            _strategy: PhantomData,
        }
    }

    /// Parses declarations until end of input, recovering after errors.
    pub fn program(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.state.tokens.at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        statements
    }

    pub fn had_errors(&self) -> bool {
        self.state.had_errors()
    }

    fn declaration(&mut self) -> Option<Stmt> {
        let start = self.state.tokens.position();
        let result = if self.state.matches(TokenKind::Function) {
            self.function().map(Stmt::Function)
        } else if self.state.matches(TokenKind::Var) {
            self.var_declaration().map(Stmt::Var)
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(Aborted) => {
                if self.state.tokens.position() == start {
                    self.state.advance();
                }
                self.state.synchronize();
                None
            }
        }
    }

    fn function(&mut self) -> PResult<Rc<FunctionDecl>> {
        let keyword = self.state.tokens.previous().span;
        let name = self
            .state
            .consume(TokenKind::Identifier, "after 'function'")?;
        self.state
            .consume(TokenKind::LeftParen, "after function name")?;

        let mut params = Vec::new();
        if !self.state.check(TokenKind::RightParen) {
            loop {
                let param = self
                    .state
                    .consume(TokenKind::Identifier, "in parameter list")?;
                self.state.consume(TokenKind::Colon, "after parameter name")?;
                let ty = self.type_name("after ':'")?;
                params.push(Param {
                    name: Ident::new(param.lexeme, param.span),
                    ty,
                });
                if !self.state.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.state
            .consume(TokenKind::RightParen, "after parameter list")?;
        self.state
            .consume(TokenKind::Colon, "before function return type")?;

        let return_type = if self.state.check(TokenKind::Void) {
            let token = self.state.advance();
            TypeName {
                name: token.lexeme,
                span: token.span,
            }
        } else {
            self.type_name("after ':'")?
        };

        self.state
            .consume(TokenKind::LeftBrace, "after function signature")?;
        let (body, close) = self.block_body()?;

        Ok(Rc::new(FunctionDecl {
            name: Ident::new(name.lexeme, name.span),
            params,
            return_type,
            body,
            span: Span::combine(&keyword, &close),
        }))
    }

    fn type_name(&mut self, location: &'static str) -> PResult<TypeName> {
        let token = self.state.consume(TokenKind::Identifier, location)?;
        Ok(TypeName {
            name: token.lexeme,
            span: token.span,
        })
    }

    fn var_declaration(&mut self) -> PResult<VarDecl> {
        let keyword = self.state.tokens.previous().span;
        let name = self.state.consume(TokenKind::Identifier, "after 'var'")?;

        let ty = if self.state.matches(TokenKind::Colon) {
            Some(self.type_name("after ':'")?)
        } else {
            None
        };

        let initializer = if self.state.matches(TokenKind::Equal) {
            Some(E::expression(&mut self.state)?)
        } else {
            None
        };

        let semicolon = self
            .state
            .consume(TokenKind::Semicolon, "after variable declaration")?;

        Ok(VarDecl {
            name: Ident::new(name.lexeme, name.span),
            ty,
            initializer,
            span: Span::combine(&keyword, &semicolon.span),
        })
    }

    fn statement(&mut self) -> PResult<Stmt> {
        ensure_sufficient_stack(|| self.statement_kind())
    }

    fn statement_kind(&mut self) -> PResult<Stmt> {
        match self.state.peek().kind {
            TokenKind::For => self.for_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::If => self.if_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::LeftBrace => {
                let open = self.state.advance().span;
                let (statements, close) = self.block_body()?;
                Ok(Stmt::Block {
                    statements,
                    span: Span::combine(&open, &close),
                })
            }
            _ => self.expression_statement(),
        }
    }

    /// Statements up to and including the closing `}`.
    fn block_body(&mut self) -> PResult<(Vec<Stmt>, Span)> {
        let mut statements = Vec::new();
        while !self.state.check(TokenKind::RightBrace) && !self.state.tokens.at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        let close = self
            .state
            .consume(TokenKind::RightBrace, "at the end of a block")?;
        Ok((statements, close.span))
    }

    fn expression_statement(&mut self) -> PResult<Stmt> {
        let expr = E::expression(&mut self.state)?;
        self.state
            .consume(TokenKind::Semicolon, "after expression statement")?;
        Ok(Stmt::Expression(expr))
    }

    fn return_statement(&mut self) -> PResult<Stmt> {
        let keyword = self.state.advance().span;
        let value = if self.state.check(TokenKind::Semicolon) {
            None
        } else {
            Some(E::expression(&mut self.state)?)
        };
        self.state
            .consume(TokenKind::Semicolon, "after return statement")?;
        Ok(Stmt::Return { keyword, value })
    }

    fn if_statement(&mut self) -> PResult<Stmt> {
        let keyword = self.state.advance().span;
        self.state.consume(TokenKind::LeftParen, "after 'if'")?;
        let condition = E::expression(&mut self.state)?;
        self.state
            .consume(TokenKind::RightParen, "after if condition")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.state.matches(TokenKind::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };
        let end = else_branch.as_ref().unwrap_or(&then_branch).span();

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            span: Span::combine(&keyword, &end),
        })
    }

    fn while_statement(&mut self) -> PResult<Stmt> {
        let keyword = self.state.advance().span;
        self.state.consume(TokenKind::LeftParen, "after 'while'")?;
        let condition = E::expression(&mut self.state)?;
        self.state
            .consume(TokenKind::RightParen, "after while condition")?;
        let body = self.statement()?;
        let span = Span::combine(&keyword, &body.span());
        Ok(Stmt::While {
            condition,
            body: Box::new(body),
            span,
        })
    }

    /// `for (init; cond; iter) body` becomes
    /// `{ init; while (cond) { body; iter; } }`.
    fn for_statement(&mut self) -> PResult<Stmt> {
        let keyword = self.state.advance().span;
        self.state.consume(TokenKind::LeftParen, "after 'for'")?;

        let initializer = if self.state.matches(TokenKind::Semicolon) {
            None
        } else if self.state.matches(TokenKind::Var) {
            Some(Stmt::Var(self.var_declaration()?))
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if self.state.check(TokenKind::Semicolon) {
            Expr::literal(Literal::Bool(true), self.state.peek().span)
        } else {
            E::expression(&mut self.state)?
        };
        self.state
            .consume(TokenKind::Semicolon, "after loop condition")?;

        let increment = if self.state.check(TokenKind::RightParen) {
            None
        } else {
            Some(E::expression(&mut self.state)?)
        };
        self.state
            .consume(TokenKind::RightParen, "after for clauses")?;

        let body = self.statement()?;
        let span = Span::combine(&keyword, &body.span());

        let mut loop_body = vec![body];
        loop_body.extend(increment.map(Stmt::Expression));
        let while_loop = Stmt::While {
            condition,
            body: Box::new(Stmt::Block {
                statements: loop_body,
                span,
            }),
            span,
        };

        let mut statements: Vec<Stmt> = initializer.into_iter().collect();
        statements.push(while_loop);
        Ok(Stmt::Block { statements, span })
    }
}
