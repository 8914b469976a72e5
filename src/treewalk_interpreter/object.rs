use super::errors::{RuntimeErrorKind, RuntimeResult};
use crate::lox_frontend::grammar::{InfixOperator, PrefixOperator};
use crate::lox_frontend::numbers::format_number;

use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Number(f64),
    Boolean(bool),
    String(String),
    Nil,
}

impl Value {
    pub fn apply_prefix_op(op: PrefixOperator, value: Value) -> RuntimeResult<Value> {
        match op {
            PrefixOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeErrorKind::OperandMustBeNumber),
            },
            PrefixOperator::LogicalNot => match value {
                Value::Nil => Ok(Value::Boolean(true)),
                Value::Number(_) => Ok(Value::Boolean(false)),
                Value::Boolean(b) => Ok(Value::Boolean(!b)),
                Value::String(_) => Err(RuntimeErrorKind::OperandNotNegatable),
            },
        }
    }

    pub fn apply_infix_op(op: InfixOperator, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
        match op {
            InfixOperator::Add => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Err(RuntimeErrorKind::OperandsMustBeNumbersOrStrings),
            },
            InfixOperator::Subtract => numerical_binop(lhs, rhs, |a, b| Value::Number(a - b)),
            InfixOperator::Multiply => numerical_binop(lhs, rhs, |a, b| Value::Number(a * b)),
            InfixOperator::Divide => numerical_binop(lhs, rhs, |a, b| Value::Number(a / b)),
            InfixOperator::EqualTo => Ok(Value::Boolean(lhs == rhs)),
            InfixOperator::NotEqualTo => Ok(Value::Boolean(lhs != rhs)),
            InfixOperator::GreaterEq => numerical_binop(lhs, rhs, |a, b| Value::Boolean(a >= b)),
            InfixOperator::GreaterThan => numerical_binop(lhs, rhs, |a, b| Value::Boolean(a > b)),
            InfixOperator::LessEq => numerical_binop(lhs, rhs, |a, b| Value::Boolean(a <= b)),
            InfixOperator::LessThan => numerical_binop(lhs, rhs, |a, b| Value::Boolean(a < b)),
        }
    }
}

fn numerical_binop<F>(lhs: Value, rhs: Value, func: F) -> RuntimeResult<Value>
where
    F: Fn(f64, f64) -> Value,
{
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(func(a, b)),
        _ => Err(RuntimeErrorKind::OperandsMustBeNumbers),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => f.write_str(s),
            Value::Nil => f.write_str("nil"),
        }
    }
}
