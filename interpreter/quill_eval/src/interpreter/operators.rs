//! Unary and binary operator evaluation.
//!
//! Dispatch order for binary operators fixes the error taxonomy:
//! integer pairs, then string pairs, then a type-mismatch check, then
//! identity equality for whatever same-type pairs remain.

use crate::{Heap, Value};
use quill_ir::{BinaryOp, UnaryOp};

pub(crate) fn unary(op: UnaryOp, right: Value) -> Value {
    match op {
        UnaryOp::Not => bang(&right),
        UnaryOp::Neg => match right {
            Value::Int(value) => Value::Int(value.wrapping_neg()),
            other => Value::error(format!("unknown operator: -{}", other.type_name())),
        },
    }
}

/// `!x` negates truthiness; it never errors.
fn bang(value: &Value) -> Value {
    match value {
        Value::Bool(true) => Value::FALSE,
        Value::Bool(false) | Value::Null => Value::TRUE,
        _ => Value::FALSE,
    }
}

pub(crate) fn binary(op: BinaryOp, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Int(l), Value::Int(r)) => integer_binary(op, *l, *r),
        (Value::Str(l), Value::Str(r)) => string_binary(op, l, r),
        _ if left.type_name() != right.type_name() => Value::error(format!(
            "type mismatch: {} {} {}",
            left.type_name(),
            op.as_str(),
            right.type_name()
        )),
        _ => match op {
            BinaryOp::Eq => Value::bool_from(identity_eq(&left, &right)),
            BinaryOp::NotEq => Value::bool_from(!identity_eq(&left, &right)),
            _ => Value::error(format!(
                "unknown operator: {} {} {}",
                left.type_name(),
                op.as_str(),
                right.type_name()
            )),
        },
    }
}

fn integer_binary(op: BinaryOp, l: i64, r: i64) -> Value {
    match op {
        BinaryOp::Add => Value::Int(l.wrapping_add(r)),
        BinaryOp::Sub => Value::Int(l.wrapping_sub(r)),
        BinaryOp::Mul => Value::Int(l.wrapping_mul(r)),
        BinaryOp::Div => {
            if r == 0 {
                Value::error("division by zero")
            } else {
                // Truncating; wrapping_div covers i64::MIN / -1.
                Value::Int(l.wrapping_div(r))
            }
        }
        BinaryOp::Lt => Value::bool_from(l < r),
        BinaryOp::Gt => Value::bool_from(l > r),
        BinaryOp::Eq => Value::bool_from(l == r),
        BinaryOp::NotEq => Value::bool_from(l != r),
    }
}

/// Strings support `+` and nothing else; even `==` on two strings is
/// an unknown operator.
fn string_binary(op: BinaryOp, l: &Heap<String>, r: &Heap<String>) -> Value {
    match op {
        BinaryOp::Add => Value::string(format!("{}{}", **l, **r)),
        _ => Value::error(format!("unknown operator: STRING {} STRING", op.as_str())),
    }
}

/// Reference-style equality for the non-integer, non-string pairs.
/// Booleans compare by value (they behave as shared singletons) and
/// functions by allocation.
fn identity_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Null, Value::Null) => true,
        (Value::Function(a), Value::Function(b)) => Heap::ptr_eq(a, b),
        (Value::Builtin(a), Value::Builtin(b)) => a == b,
        _ => false,
    }
}
