//! Unary, binary and logical operator implementations.

use crate::evaluator::RuntimeError;
use crate::parser::{BinaryOp, LogicalOp, UnaryOp};
use crate::types::TypeId;
use crate::values::Value;

fn invalid(op: impl ToString, operands: &[&Value]) -> RuntimeError {
    let operands = operands
        .iter()
        .map(|v| format!("'{}'", v.type_id()))
        .collect::<Vec<_>>()
        .join(" and ");
    RuntimeError::InvalidOperand {
        op: op.to_string(),
        operands,
    }
}

pub(super) fn eval_unary(op: UnaryOp, operand: Value) -> Result<Value, RuntimeError> {
    match (op, &operand) {
        (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (UnaryOp::Neg, Value::Double(d)) => Ok(Value::Double(-d)),
        // Null is falsy, so `!` on an unset bool is true.
        (UnaryOp::Not, _) => Ok(Value::Bool(!operand.is_truthy())),
        (UnaryOp::BitNot, Value::Int(n)) => Ok(Value::Int(!n)),
        _ => Err(invalid(op, &[&operand])),
    }
}

/// Evaluate a binary operation.
///
/// `tag` is the static type of the operands as inferred by the analyzer
/// (the right operand's when the left one is `null`). Equality compares any
/// two values; every other operator runs the integer or double arithmetic
/// the tag selects, and fails if a runtime operand is not of that type.
pub(super) fn eval_binary(
    op: BinaryOp,
    tag: TypeId,
    left: Value,
    right: Value,
) -> Result<Value, RuntimeError> {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left == right)),
        BinaryOp::Neq => return Ok(Value::Bool(left != right)),
        _ => {}
    }

    match (tag, &left, &right) {
        (TypeId::Int, Value::Int(a), Value::Int(b)) => eval_binary_int(op, *a, *b),
        (TypeId::Double, Value::Double(a), Value::Double(b)) => eval_binary_double(op, *a, *b)
            .ok_or_else(|| invalid(op, &[&left, &right])),
        _ => Err(invalid(op, &[&left, &right])),
    }
}

/// Evaluate a binary operation on two integers.
///
/// Uses wrapping arithmetic to prevent panics on overflow.
/// Division by zero returns an error.
pub(super) fn eval_binary_int(op: BinaryOp, left: i64, right: i64) -> Result<Value, RuntimeError> {
    let value = match op {
        BinaryOp::Add => left.wrapping_add(right),
        BinaryOp::Sub => left.wrapping_sub(right),
        BinaryOp::Mul => left.wrapping_mul(right),
        BinaryOp::Div | BinaryOp::Rem if right == 0 => return Err(RuntimeError::DivisionByZero),
        // wrapping_div/rem handle i64::MIN / -1
        BinaryOp::Div => left.wrapping_div(right),
        BinaryOp::Rem => left.wrapping_rem(right),
        BinaryOp::BitAnd => left & right,
        BinaryOp::BitOr => left | right,
        BinaryOp::BitXor => left ^ right,
        // Shift counts use their low six bits.
        BinaryOp::Shl => left.wrapping_shl(right as u32),
        BinaryOp::Shr => left.wrapping_shr(right as u32),
        BinaryOp::Lt => return Ok(Value::Bool(left < right)),
        BinaryOp::Le => return Ok(Value::Bool(left <= right)),
        BinaryOp::Gt => return Ok(Value::Bool(left > right)),
        BinaryOp::Ge => return Ok(Value::Bool(left >= right)),
        BinaryOp::Eq => return Ok(Value::Bool(left == right)),
        BinaryOp::Neq => return Ok(Value::Bool(left != right)),
    };
    Ok(Value::Int(value))
}

/// Evaluate a binary operation on two doubles.
///
/// Follows IEEE 754 semantics (produces inf/nan rather than failing).
/// Returns `None` for the integer-only operators.
pub(super) fn eval_binary_double(op: BinaryOp, left: f64, right: f64) -> Option<Value> {
    let value = match op {
        BinaryOp::Add => Value::Double(left + right),
        BinaryOp::Sub => Value::Double(left - right),
        BinaryOp::Mul => Value::Double(left * right),
        BinaryOp::Div => Value::Double(left / right),
        BinaryOp::Lt => Value::Bool(left < right),
        BinaryOp::Le => Value::Bool(left <= right),
        BinaryOp::Gt => Value::Bool(left > right),
        BinaryOp::Ge => Value::Bool(left >= right),
        BinaryOp::Eq => Value::Bool(left == right),
        BinaryOp::Neq => Value::Bool(left != right),
        _ => return None,
    };
    Some(value)
}

/// Both operands are evaluated before this is called.
pub(super) fn eval_logical(op: LogicalOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(match op {
            LogicalOp::And => *a && *b,
            LogicalOp::Or => *a || *b,
        })),
        _ => Err(invalid(op, &[&left, &right])),
    }
}

/// `+` on a string-typed node: concatenates the display forms.
pub(super) fn concat(left: &Value, right: &Value) -> Value {
    Value::from(format!("{}{}", left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn int(op: BinaryOp, a: i64, b: i64) -> Value {
        eval_binary_int(op, a, b).unwrap()
    }

    #[test]
    fn test_int_arithmetic() {
        assert_eq!(int(BinaryOp::Add, 2, 3), Value::Int(5));
        assert_eq!(int(BinaryOp::Sub, 3, 10), Value::Int(-7));
        assert_eq!(int(BinaryOp::Mul, -2, 5), Value::Int(-10));
        assert_eq!(int(BinaryOp::Div, 7, 2), Value::Int(3));
        assert_eq!(int(BinaryOp::Div, -7, 2), Value::Int(-3));
        assert_eq!(int(BinaryOp::Rem, -7, 2), Value::Int(-1));
    }

    #[test]
    fn test_int_overflow_wraps() {
        assert_eq!(int(BinaryOp::Add, i64::MAX, 1), Value::Int(i64::MIN));
        assert_eq!(int(BinaryOp::Mul, i64::MAX, 2), Value::Int(-2));
        assert_eq!(int(BinaryOp::Div, i64::MIN, -1), Value::Int(i64::MIN));
        assert_eq!(int(BinaryOp::Rem, i64::MIN, -1), Value::Int(0));
    }

    #[test]
    fn test_int_division_by_zero() {
        assert!(matches!(
            eval_binary_int(BinaryOp::Div, 1, 0),
            Err(RuntimeError::DivisionByZero)
        ));
        assert!(matches!(
            eval_binary_int(BinaryOp::Rem, 1, 0),
            Err(RuntimeError::DivisionByZero)
        ));
    }

    #[test]
    fn test_int_bitwise_and_shifts() {
        assert_eq!(int(BinaryOp::BitAnd, 0b1100, 0b1010), Value::Int(0b1000));
        assert_eq!(int(BinaryOp::BitOr, 0b1100, 0b1010), Value::Int(0b1110));
        assert_eq!(int(BinaryOp::BitXor, 0b1100, 0b1010), Value::Int(0b0110));
        assert_eq!(int(BinaryOp::Shl, 1, 4), Value::Int(16));
        assert_eq!(int(BinaryOp::Shr, -16, 2), Value::Int(-4));
        assert_eq!(int(BinaryOp::Shl, 1, 64), Value::Int(1));
    }

    #[test]
    fn test_double_division_by_zero_is_infinite() {
        assert_eq!(
            eval_binary_double(BinaryOp::Div, 1.0, 0.0),
            Some(Value::Double(f64::INFINITY))
        );
        assert_eq!(eval_binary_double(BinaryOp::Rem, 1.0, 2.0), None);
    }

    #[test]
    fn test_equality_of_any_values() {
        let eq = |a: Value, b: Value| eval_binary(BinaryOp::Eq, TypeId::Object, a, b).unwrap();
        assert_eq!(eq(Value::Null, Value::Null), Value::Bool(true));
        assert_eq!(eq(Value::str("a"), Value::str("a")), Value::Bool(true));
        assert_eq!(eq(Value::Int(1), Value::Null), Value::Bool(false));
    }

    #[test]
    fn test_mixed_operands_rejected() {
        let error = eval_binary(BinaryOp::Add, TypeId::Int, Value::Int(1), Value::Null).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Operator '+' cannot be applied to 'int' and 'null'"
        );
    }

    #[test]
    fn test_arithmetic_follows_static_tag() {
        let add = |tag, a, b| eval_binary(BinaryOp::Add, tag, a, b);
        assert_eq!(add(TypeId::Int, Value::Int(2), Value::Int(3)).unwrap(), Value::Int(5));
        assert_eq!(
            add(TypeId::Double, Value::Double(0.5), Value::Double(0.25)).unwrap(),
            Value::Double(0.75)
        );
        // Runtime operands that disagree with the tag are rejected.
        assert!(add(TypeId::Double, Value::Int(2), Value::Int(3)).is_err());
        assert!(add(TypeId::Bool, Value::Bool(true), Value::Bool(false)).is_err());
    }

    #[test]
    fn test_unary() {
        assert_eq!(
            eval_unary(UnaryOp::Neg, Value::Int(i64::MIN)).unwrap(),
            Value::Int(i64::MIN)
        );
        assert_eq!(eval_unary(UnaryOp::BitNot, Value::Int(0)).unwrap(), Value::Int(-1));
        assert_eq!(eval_unary(UnaryOp::Not, Value::Bool(true)).unwrap(), Value::Bool(false));
        assert_eq!(eval_unary(UnaryOp::Not, Value::Null).unwrap(), Value::Bool(true));
        assert!(eval_unary(UnaryOp::Neg, Value::Null).is_err());
    }

    #[test]
    fn test_logical_evaluates_on_values() {
        let and = eval_logical(LogicalOp::And, Value::Bool(true), Value::Bool(false)).unwrap();
        assert_eq!(and, Value::Bool(false));
        let or = eval_logical(LogicalOp::Or, Value::Bool(false), Value::Bool(true)).unwrap();
        assert_eq!(or, Value::Bool(true));
    }

    #[test]
    fn test_concat_uses_display_forms() {
        let joined = concat(&Value::str("n = "), &Value::Double(2.0));
        assert_eq!(joined, Value::str("n = 2.0"));
    }
}
