//! Table-driven Pratt expression parser.
//!
//! Every infix token has a binding power; a single loop folds operators into
//! the left operand while they bind tighter than the caller's minimum.
//! Assignment is the loosest infix entry and is right associative.

use crate::parser::grammar::{
    ExprParser, PResult, ParserState, assignment_op, assignment_target, finish_call, infix_op,
    prefix_op, primary,
};
use crate::parser::parsed_expr::Expr;
use crate::parser::syntax::{BinaryOp, InfixOp, LogicalOp};
use crate::parser::token::TokenKind;
use crate::stack::ensure_sufficient_stack;

pub struct Pratt;

impl ExprParser for Pratt {
    fn expression(state: &mut ParserState<'_>) -> PResult<Expr> {
        parse_expr(state, 0)
    }
}

const ASSIGNMENT: u8 = 1;
const UNARY: u8 = 12;
const CALL: u8 = 13;

/// What an infix token does to the expression on its left.
#[derive(Debug, Clone, Copy)]
enum Infix {
    Assign(Option<BinaryOp>),
    Operator(InfixOp),
    Call,
}

fn binding_power(op: InfixOp) -> u8 {
    match op {
        InfixOp::Logical(LogicalOp::Or) => 2,
        InfixOp::Logical(LogicalOp::And) => 3,
        InfixOp::Binary(op) => match op {
            BinaryOp::BitOr => 4,
            BinaryOp::BitXor => 5,
            BinaryOp::BitAnd => 6,
            BinaryOp::Eq | BinaryOp::Neq => 7,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => 8,
            BinaryOp::Shl | BinaryOp::Shr => 9,
            BinaryOp::Add | BinaryOp::Sub => 10,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 11,
        },
    }
}

fn infix_rule(kind: TokenKind) -> Option<(u8, Infix)> {
    if let Some(op) = assignment_op(kind) {
        return Some((ASSIGNMENT, Infix::Assign(op)));
    }
    if kind == TokenKind::LeftParen {
        return Some((CALL, Infix::Call));
    }
    let op = infix_op(kind)?;
    Some((binding_power(op), Infix::Operator(op)))
}

fn parse_expr(state: &mut ParserState<'_>, min_bp: u8) -> PResult<Expr> {
    ensure_sufficient_stack(|| fold_infix(state, min_bp))
}

fn fold_infix(state: &mut ParserState<'_>, min_bp: u8) -> PResult<Expr> {
    let mut left = prefix(state)?;

    while let Some((bp, rule)) = infix_rule(state.peek().kind) {
        if bp <= min_bp {
            break;
        }
        state.advance();

        left = match rule {
            Infix::Assign(op) => {
                let value = parse_expr(state, bp - 1)?;
                assignment_target(state, left, op, value)
            }
            Infix::Operator(op) => {
                let right = parse_expr(state, bp)?;
                Expr::infix(op, left, right)
            }
            Infix::Call => finish_call::<Pratt>(state, left)?,
        };
    }

    Ok(left)
}

fn prefix(state: &mut ParserState<'_>) -> PResult<Expr> {
    match prefix_op(state.peek().kind) {
        Some(op) => {
            let op_span = state.advance().span;
            let operand = parse_expr(state, UNARY)?;
            Ok(Expr::unary(op, op_span, operand))
        }
        None => primary::<Pratt>(state),
    }
}
