//! Precedence-ladder recursive-descent expression parser.
//!
//! One function per precedence level, lowest first:
//!
//! ```text
//! assignment → or → and → bit_or → bit_xor → bit_and → equality
//!            → relational → shift → additive → multiplicative → unary → call
//! ```

use crate::parser::grammar::{
    ExprParser, PResult, ParserState, assignment_op, assignment_target, finish_call, infix_op,
    prefix_op, primary,
};
use crate::parser::parsed_expr::Expr;
use crate::parser::token::TokenKind;
use crate::stack::ensure_sufficient_stack;

pub struct RecursiveDescent;

impl ExprParser for RecursiveDescent {
    fn expression(state: &mut ParserState<'_>) -> PResult<Expr> {
        assignment(state)
    }
}

type Level = fn(&mut ParserState<'_>) -> PResult<Expr>;

// Grouping and unary chains re-enter here and in `unary`.
fn assignment(state: &mut ParserState<'_>) -> PResult<Expr> {
    ensure_sufficient_stack(|| assignment_level(state))
}

fn assignment_level(state: &mut ParserState<'_>) -> PResult<Expr> {
    let target = logical_or(state)?;
    match assignment_op(state.peek().kind) {
        Some(op) => {
            state.advance();
            // Right associative: `a = b = c` is `a = (b = c)`.
            let value = assignment(state)?;
            Ok(assignment_target(state, target, op, value))
        }
        None => Ok(target),
    }
}

/// `operand (op operand)*` for the given operator tokens.
fn left_associative(
    state: &mut ParserState<'_>,
    operators: &[TokenKind],
    operand: Level,
) -> PResult<Expr> {
    let mut left = operand(state)?;
    loop {
        let kind = state.peek().kind;
        let Some(op) = infix_op(kind).filter(|_| operators.contains(&kind)) else {
            return Ok(left);
        };
        state.advance();
        let right = operand(state)?;
        left = Expr::infix(op, left, right);
    }
}

fn logical_or(state: &mut ParserState<'_>) -> PResult<Expr> {
    left_associative(state, &[TokenKind::Or], logical_and)
}

fn logical_and(state: &mut ParserState<'_>) -> PResult<Expr> {
    left_associative(state, &[TokenKind::And], bit_or)
}

fn bit_or(state: &mut ParserState<'_>) -> PResult<Expr> {
    left_associative(state, &[TokenKind::BitOr], bit_xor)
}

fn bit_xor(state: &mut ParserState<'_>) -> PResult<Expr> {
    left_associative(state, &[TokenKind::BitXor], bit_and)
}

fn bit_and(state: &mut ParserState<'_>) -> PResult<Expr> {
    left_associative(state, &[TokenKind::BitAnd], equality)
}

fn equality(state: &mut ParserState<'_>) -> PResult<Expr> {
    left_associative(
        state,
        &[TokenKind::EqualEqual, TokenKind::NotEqual],
        relational,
    )
}

fn relational(state: &mut ParserState<'_>) -> PResult<Expr> {
    left_associative(
        state,
        &[
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
        ],
        shift,
    )
}

fn shift(state: &mut ParserState<'_>) -> PResult<Expr> {
    left_associative(
        state,
        &[TokenKind::ShiftLeft, TokenKind::ShiftRight],
        additive,
    )
}

fn additive(state: &mut ParserState<'_>) -> PResult<Expr> {
    left_associative(state, &[TokenKind::Plus, TokenKind::Minus], multiplicative)
}

fn multiplicative(state: &mut ParserState<'_>) -> PResult<Expr> {
    left_associative(
        state,
        &[TokenKind::Star, TokenKind::Slash, TokenKind::Remainder],
        unary,
    )
}

fn unary(state: &mut ParserState<'_>) -> PResult<Expr> {
    match prefix_op(state.peek().kind) {
        Some(op) => {
            let op_span = state.advance().span;
            let operand = ensure_sufficient_stack(|| unary(state))?;
            Ok(Expr::unary(op, op_span, operand))
        }
        None => call(state),
    }
}

fn call(state: &mut ParserState<'_>) -> PResult<Expr> {
    let mut expr = primary::<RecursiveDescent>(state)?;
    while state.matches(TokenKind::LeftParen) {
        expr = finish_call::<RecursiveDescent>(state, expr)?;
    }
    Ok(expr)
}
