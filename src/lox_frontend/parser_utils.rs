use super::grammar::{InfixOperator, PrefixOperator};
use super::token::TokenKind;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// How tightly a token binds its operands; later variants bind tighter.
#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, IntoPrimitive, TryFromPrimitive,
)]
#[repr(u8)]
pub enum BindingPower {
    // Lowest binding power
    Lowest,
    Equality,
    Comparison,
    Additive,
    Multiplicative,
    Prefix,
    Paren, // Highest binding power
}

impl BindingPower {
    /// Binding power of a token in infix position.
    pub fn of(kind: TokenKind) -> BindingPower {
        match kind {
            TokenKind::EqualEqual | TokenKind::BangEqual => BindingPower::Equality,
            TokenKind::Greater
            | TokenKind::GreaterEqual
            | TokenKind::Less
            | TokenKind::LessEqual => BindingPower::Comparison,
            TokenKind::Plus | TokenKind::Minus => BindingPower::Additive,
            TokenKind::Star | TokenKind::Slash => BindingPower::Multiplicative,
            TokenKind::LeftParen => BindingPower::Paren,
            _ => BindingPower::Lowest,
        }
    }

    pub fn rank(self) -> u8 {
        self.into()
    }
}

impl PrefixOperator {
    pub fn from_token(kind: TokenKind) -> Option<PrefixOperator> {
        match kind {
            TokenKind::Bang => Some(PrefixOperator::LogicalNot),
            TokenKind::Minus => Some(PrefixOperator::Negate),
            _ => None,
        }
    }
}

impl InfixOperator {
    pub fn from_token(kind: TokenKind) -> Option<InfixOperator> {
        let op = match kind {
            TokenKind::Plus => InfixOperator::Add,
            TokenKind::Minus => InfixOperator::Subtract,
            TokenKind::Star => InfixOperator::Multiply,
            TokenKind::Slash => InfixOperator::Divide,
            TokenKind::EqualEqual => InfixOperator::EqualTo,
            TokenKind::BangEqual => InfixOperator::NotEqualTo,
            TokenKind::Greater => InfixOperator::GreaterThan,
            TokenKind::GreaterEqual => InfixOperator::GreaterEq,
            TokenKind::Less => InfixOperator::LessThan,
            TokenKind::LessEqual => InfixOperator::LessEq,
            _ => return None,
        };
        Some(op)
    }
}
