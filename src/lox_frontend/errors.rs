use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum LexErrorKind {
    #[error("Unexpected character: {0}")]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
#[error("[line {line}] Error: {kind}")]
pub struct LexError {
    pub line: usize,
    pub kind: LexErrorKind,
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ParserError {
    #[error(transparent)]
    Lexical(#[from] LexError),
    #[error("[line {line}] Error at '{lexeme}': Expect expression.")]
    ExpectedExpression { line: usize, lexeme: String },
    #[error("[line {line}] Error at end: Expect expression.")]
    ExpectedExpressionAtEnd { line: usize },
    #[error("Error: Unmatched parentheses.")]
    UnmatchedParentheses { line: usize },
}

impl LexError {
    pub fn new(line: usize, kind: LexErrorKind) -> Self {
        LexError { line, kind }
    }
}

impl ParserError {
    pub fn line(&self) -> usize {
        match self {
            ParserError::Lexical(e) => e.line,
            ParserError::ExpectedExpression { line, .. }
            | ParserError::ExpectedExpressionAtEnd { line }
            | ParserError::UnmatchedParentheses { line } => *line,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, ParserError::Lexical(_))
    }
}
