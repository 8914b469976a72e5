use super::errors::ParserError;
use super::grammar::{Expr, ExprType, InfixOperator, Literal, PrefixOperator};
use super::lexer::Lexer;
use super::parser_utils::BindingPower;
use super::token::{Token, TokenKind};

use tracing::{debug, trace};

/// Pratt parser over a lazily scanned token stream.
///
/// `current` is the last token handed to a parse routine and `peek` is the
/// one token of lookahead. A parse routine is entered with `current` on the
/// first token of its expression and leaves `current` on the last one.
pub struct Parser<'s> {
    lexer: Lexer<'s>,
    current: Token,
    peek: Token,
    errors: Vec<ParserError>,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s [u8]) -> Self {
        Self::from_lexer(Lexer::new(source))
    }

    pub fn from_lexer(lexer: Lexer<'s>) -> Self {
        let mut parser = Parser {
            lexer,
            current: Token::end_of_file(1),
            peek: Token::end_of_file(1),
            errors: vec![],
        };

        // Fill current and peek.
        parser.bump();
        parser.bump();
        parser
    }

    /// Errors recorded so far, lexical ones included.
    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }

    /// Parses a single expression. The remaining input is still scanned so
    /// that its lexical errors get reported, but it is not parsed.
    pub fn parse(mut self) -> Result<Expr, Vec<ParserError>> {
        let expr = self.parse_expression(BindingPower::Lowest);

        while !self.peek.is_eof() {
            self.bump();
        }

        debug!(errors = self.errors.len(), "parsed expression");
        match expr {
            Some(expr) if self.errors.is_empty() => Ok(expr),
            _ => Err(self.errors),
        }
    }

    /// Advances the stream.
    fn bump(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);

        let lex_errors = self.lexer.take_errors();
        self.errors
            .extend(lex_errors.into_iter().map(ParserError::from));
    }

    fn emit_error(&mut self, error: ParserError) {
        trace!(%error, "syntax error");
        self.errors.push(error);
    }

    /// Pratt parsing algo. Returns `None` when the expression is malformed;
    /// the reason has been recorded in the error list.
    pub fn parse_expression(&mut self, min_power: BindingPower) -> Option<Expr> {
        let mut lhs = self.parse_prefix();

        loop {
            let power = BindingPower::of(self.peek.kind);
            if power <= min_power {
                break;
            }

            let op = match InfixOperator::from_token(self.peek.kind) {
                Some(op) => op,
                None => break,
            };

            trace!(op = op.symbol(), power = power.rank(), "infix dispatch");

            // Move onto the operator, then past it.
            self.bump();
            let line = self.current.line;
            self.bump();

            // Same power on the right keeps operators left-associative.
            let rhs = self.parse_expression(power);

            lhs = match (lhs, rhs) {
                (Some(lhs), Some(rhs)) => Some(Expr::new(
                    ExprType::Infix(op, Box::new(lhs), Box::new(rhs)),
                    line,
                )),
                _ => None,
            };
        }

        lhs
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        let line = self.current.line;
        trace!(token = %self.current.kind, line, "prefix dispatch");

        let literal = match self.current.kind {
            TokenKind::True => Literal::Boolean(true),
            TokenKind::False => Literal::Boolean(false),
            TokenKind::Nil => Literal::Nil,
            TokenKind::Number => Literal::Number(self.number_value()),
            TokenKind::String => {
                Literal::Str(self.current.literal.clone().unwrap_or_default())
            }
            TokenKind::LeftParen => return self.parse_grouping(),
            TokenKind::Minus | TokenKind::Bang => return self.parse_unary(),
            _ => {
                self.emit_expected_expression();
                return None;
            }
        };

        Some(Expr::new(ExprType::Literal(literal), line))
    }

    fn number_value(&self) -> f64 {
        // Number lexemes are plain digit runs, which always parse.
        self.current.lexeme.parse().unwrap_or(f64::NAN)
    }

    fn parse_grouping(&mut self) -> Option<Expr> {
        let line = self.current.line;
        // Eat '('.
        self.bump();

        let inner = self.parse_expression(BindingPower::Lowest)?;

        if self.peek.kind != TokenKind::RightParen {
            self.emit_error(ParserError::UnmatchedParentheses {
                line: self.peek.line,
            });
            return None;
        }
        // Move onto ')'.
        self.bump();

        Some(Expr::new(ExprType::Grouping(Box::new(inner)), line))
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let line = self.current.line;
        let op = PrefixOperator::from_token(self.current.kind)?;
        // Eat the operator.
        self.bump();

        let operand = self.parse_expression(BindingPower::Prefix)?;
        Some(Expr::new(ExprType::Prefix(op, Box::new(operand)), line))
    }

    fn emit_expected_expression(&mut self) {
        let error = if self.current.is_eof() {
            ParserError::ExpectedExpressionAtEnd {
                line: self.current.line,
            }
        } else {
            ParserError::ExpectedExpression {
                line: self.current.line,
                lexeme: self.current.lexeme.clone(),
            }
        };
        self.emit_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lox_frontend::errors::{LexError, LexErrorKind};

    fn parse(source: &str) -> Result<Expr, Vec<ParserError>> {
        Parser::new(source.as_bytes()).parse()
    }

    fn render(source: &str) -> String {
        parse(source).unwrap().ast_string()
    }

    #[test]
    fn test_literals() {
        assert_eq!(render("true"), "true");
        assert_eq!(render("false"), "false");
        assert_eq!(render("nil"), "nil");
        assert_eq!(render("42.47"), "42.47");
        assert_eq!(render("200.00"), "200.0");
        assert_eq!(render("\"hello\""), "hello");
    }

    #[test]
    fn test_literal_tree() {
        let expr = parse("\n\"hello\"").unwrap();
        assert_eq!(
            expr,
            Expr::new(ExprType::Literal(Literal::Str("hello".to_owned())), 2)
        );
    }

    #[test]
    fn test_grouping_and_unary() {
        assert_eq!(render("(\"hello\")"), "(group hello)");
        assert_eq!(render("((true))"), "(group (group true))");
        assert_eq!(render("!true"), "(! true)");
        assert_eq!(render("!!false"), "(! (! false))");
        assert_eq!(render("--1"), "(- (- 1.0))");
        assert_eq!(render("-1 * 2"), "(* (- 1.0) 2.0)");
    }

    #[test]
    fn test_precedence() {
        assert_eq!(render("1+1*3"), "(+ 1.0 (* 1.0 3.0))");
        assert_eq!(render("1*1+3"), "(+ (* 1.0 1.0) 3.0)");
        assert_eq!(
            render("1 < 2 == 3 >= 4"),
            "(== (< 1.0 2.0) (>= 3.0 4.0))"
        );
        assert_eq!(render("\"foo\" == \"foo\""), "(== foo foo)");
        assert_eq!(render("1 + 2 != 3 - -4"), "(!= (+ 1.0 2.0) (- 3.0 (- 4.0)))");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(render("8-3-2"), "(- (- 8.0 3.0) 2.0)");
        assert_eq!(render("8/4/2"), "(/ (/ 8.0 4.0) 2.0)");
        assert_eq!(render("1 == 2 != 3"), "(!= (== 1.0 2.0) 3.0)");
    }

    #[test]
    fn test_composite() {
        assert_eq!(
            render("-(-58 + 68) * (40 * 40) / (72 + 39)"),
            "(/ (* (- (group (+ (- 58.0) 68.0))) (group (* 40.0 40.0))) (group (+ 72.0 39.0)))"
        );
    }

    #[test]
    fn test_node_lines() {
        let expr = parse("1\n+\n2").unwrap();
        assert_eq!(expr.line, 2);
        match expr.expr {
            ExprType::Infix(InfixOperator::Add, lhs, rhs) => {
                assert_eq!(lhs.line, 1);
                assert_eq!(rhs.line, 3);
            }
            other => panic!("unexpected tree {:?}", other),
        }
    }

    #[test]
    fn test_rendering_is_stable() {
        for source in ["1+1*3", "(1 - -2) <= 3", "!(nil == false)", "\"a\" + \"b\""] {
            let first = render(source);
            let second = render(source);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_trailing_tokens_ignored() {
        assert_eq!(render("1 2"), "1.0");
    }

    #[test]
    fn test_expect_expression() {
        assert_eq!(
            parse(")").unwrap_err(),
            vec![ParserError::ExpectedExpression {
                line: 1,
                lexeme: ")".to_owned()
            }]
        );
        assert_eq!(
            parse("1 +\n\n)").unwrap_err(),
            vec![ParserError::ExpectedExpression {
                line: 3,
                lexeme: ")".to_owned()
            }]
        );
        assert_eq!(
            parse("").unwrap_err(),
            vec![ParserError::ExpectedExpressionAtEnd { line: 1 }]
        );
        assert_eq!(
            parse("var").unwrap_err()[0].to_string(),
            "[line 1] Error at 'var': Expect expression."
        );
    }

    #[test]
    fn test_unmatched_parentheses() {
        assert_eq!(
            parse("(72 +)").unwrap_err(),
            vec![ParserError::ExpectedExpression {
                line: 1,
                lexeme: ")".to_owned()
            }]
        );

        let errors = parse("(72").unwrap_err();
        assert_eq!(errors, vec![ParserError::UnmatchedParentheses { line: 1 }]);
        assert_eq!(errors[0].to_string(), "Error: Unmatched parentheses.");

        assert_eq!(
            parse("(1 2)").unwrap_err(),
            vec![ParserError::UnmatchedParentheses { line: 1 }]
        );
    }

    #[test]
    fn test_sibling_errors_accumulate() {
        let errors = parse("(1 +) * (2 -)").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.to_string() == "[line 1] Error at ')': Expect expression."));
    }

    #[test]
    fn test_lexical_errors_are_reported() {
        let mut parser = Parser::new(b"1 + $ 2");
        let expr = parser.parse_expression(BindingPower::Lowest).unwrap();
        assert_eq!(expr.ast_string(), "(+ 1.0 2.0)");
        assert_eq!(
            parser.errors(),
            &[ParserError::Lexical(LexError::new(
                1,
                LexErrorKind::UnexpectedCharacter('$')
            ))]
        );

        let errors = parse("1 + 2 @").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_lexical());
    }
}
