use super::errors::{RuntimeError, RuntimeResult};
use super::object::Value;
use crate::lox_frontend::grammar::{Expr, ExprType, InfixOperator, Literal, PrefixOperator};

use tracing::{debug, trace};

/// Tree-walking evaluator for expression trees.
///
/// Type errors do not stop the walk: they are recorded and the failing node
/// simply has no value, which propagates to its ancestors.
#[derive(Debug, Default)]
pub struct Interpreter {
    errors: Vec<RuntimeError>,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter { errors: vec![] }
    }

    /// Errors recorded since the last call to `evaluate`.
    pub fn errors(&self) -> &[RuntimeError] {
        &self.errors
    }

    /// Evaluates a whole tree. Succeeds only if no error was recorded.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, Vec<RuntimeError>> {
        let value = self.eval_expression(expr);
        let errors = std::mem::take(&mut self.errors);

        debug!(errors = errors.len(), "evaluated expression");
        match value {
            Some(value) if errors.is_empty() => Ok(value),
            _ => Err(errors),
        }
    }

    pub fn eval_expression(&mut self, expr: &Expr) -> Option<Value> {
        match &expr.expr {
            ExprType::Literal(l) => Some(self.eval_literal(l)),
            ExprType::Grouping(inner) => self.eval_expression(inner),
            ExprType::Prefix(op, operand) => self.eval_prefix_operator(*op, operand, expr.line),
            ExprType::Infix(op, lhs, rhs) => self.eval_infix_operator(*op, lhs, rhs, expr.line),
        }
    }

    fn eval_literal(&self, l: &Literal) -> Value {
        match l {
            Literal::Number(n) => Value::Number(*n),
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::Str(s) => Value::String(s.clone()),
            Literal::Nil => Value::Nil,
        }
    }

    fn eval_prefix_operator(
        &mut self,
        op: PrefixOperator,
        operand: &Expr,
        line: usize,
    ) -> Option<Value> {
        let value = self.eval_expression(operand)?;
        self.record(Value::apply_prefix_op(op, value), line)
    }

    fn eval_infix_operator(
        &mut self,
        op: InfixOperator,
        lhs: &Expr,
        rhs: &Expr,
        line: usize,
    ) -> Option<Value> {
        // Both sides are walked so that each reports its own errors.
        let lhs = self.eval_expression(lhs);
        let rhs = self.eval_expression(rhs);
        let (lhs, rhs) = (lhs?, rhs?);
        self.record(Value::apply_infix_op(op, lhs, rhs), line)
    }

    fn record(&mut self, result: RuntimeResult<Value>, line: usize) -> Option<Value> {
        match result {
            Ok(value) => Some(value),
            Err(kind) => {
                trace!(%kind, line, "runtime error");
                self.errors.push(RuntimeError { line, kind });
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lox_frontend::Parser;
    use crate::treewalk_interpreter::RuntimeErrorKind;

    fn evaluate(source: &str) -> Result<Value, Vec<RuntimeError>> {
        let expr = Parser::new(source.as_bytes()).parse().unwrap();
        Interpreter::new().evaluate(&expr)
    }

    fn display(source: &str) -> String {
        evaluate(source).unwrap().to_string()
    }

    #[test]
    fn test_literals_and_grouping() {
        assert_eq!(display("true"), "true");
        assert_eq!(display("nil"), "nil");
        assert_eq!(display("\"hello world!\""), "hello world!");
        assert_eq!(display("10.40"), "10.4");
        assert_eq!(display("((false))"), "false");
    }

    #[test]
    fn test_unary() {
        assert_eq!(display("-73"), "-73.0");
        assert_eq!(display("!true"), "false");
        assert_eq!(display("!nil"), "true");
        assert_eq!(display("!10.40"), "false");
        assert_eq!(display("!!false"), "false");
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(display("42 / 5"), "8.4");
        assert_eq!(display("18 * 3 / (3 * 6)"), "3.0");
        assert_eq!(display("(10.40 * 2) / 2"), "10.4");
        assert_eq!(display("70 - 65 + 2"), "7.0");
        assert_eq!(display("\"hello\" + \" \" + \"world\""), "hello world");
        assert_eq!(display("1 / 0"), "Infinity");
    }

    #[test]
    fn test_comparison_and_equality() {
        assert_eq!(display("57 > -65"), "true");
        assert_eq!(display("11 >= 11"), "true");
        assert_eq!(display("(54 - 67) >= -(114 / 57 + 11)"), "true");
        assert_eq!(display("\"2\" == 2"), "false");
        assert_eq!(display("nil == nil"), "true");
        assert_eq!(display("\"bar\" != \"bar\""), "false");
        assert_eq!(display("61 == \"61\""), "false");
    }

    #[test]
    fn test_type_errors() {
        let errors = evaluate("1 + \"a\"").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Operands must be two numbers or two strings."
        );

        assert_eq!(
            evaluate("-\"muffin\"").unwrap_err(),
            vec![RuntimeError {
                line: 1,
                kind: RuntimeErrorKind::OperandMustBeNumber
            }]
        );
        assert_eq!(
            evaluate("true\n* 2").unwrap_err(),
            vec![RuntimeError {
                line: 2,
                kind: RuntimeErrorKind::OperandsMustBeNumbers
            }]
        );
        assert_eq!(
            evaluate("!\"x\"").unwrap_err()[0].kind,
            RuntimeErrorKind::OperandNotNegatable
        );
    }

    #[test]
    fn test_errors_in_siblings_accumulate() {
        let errors = evaluate("(-true) * (\"a\" < 1)").unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RuntimeErrorKind::OperandMustBeNumber,
                RuntimeErrorKind::OperandsMustBeNumbers
            ]
        );
    }

    #[test]
    fn test_absent_operand_does_not_cascade() {
        let errors = evaluate("-(1 + nil) == nil").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].kind,
            RuntimeErrorKind::OperandsMustBeNumbersOrStrings
        );
    }

    #[test]
    fn test_interpreter_is_reusable() {
        let mut interpreter = Interpreter::new();
        let bad = Parser::new(b"1 - nil").parse().unwrap();
        let good = Parser::new(b"1 - 1").parse().unwrap();

        assert!(interpreter.evaluate(&bad).is_err());
        assert!(interpreter.errors().is_empty());
        assert_eq!(interpreter.evaluate(&good), Ok(Value::Number(0.0)));
    }
}
