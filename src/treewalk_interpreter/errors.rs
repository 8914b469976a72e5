use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum RuntimeErrorKind {
    #[error("Operand must be a number.")]
    OperandMustBeNumber,
    #[error("Operand must be a number, boolean or nil.")]
    OperandNotNegatable,
    #[error("Operands must be numbers.")]
    OperandsMustBeNumbers,
    #[error("Operands must be two numbers or two strings.")]
    OperandsMustBeNumbersOrStrings,
}

/// A type error raised while evaluating the node scanned on `line`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
#[error("{kind}")]
pub struct RuntimeError {
    pub line: usize,
    pub kind: RuntimeErrorKind,
}

pub type RuntimeResult<T> = Result<T, RuntimeErrorKind>;
